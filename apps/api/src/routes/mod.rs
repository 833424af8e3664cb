pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::company::handlers as company;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .nest("/authentication", auth_routes())
        .nest("/user", user_routes())
        .nest("/company", company_routes())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::handle_login))
        .route("/sign-up", post(auth::handle_sign_up))
        .route("/forgot-password", post(auth::handle_forgot_password))
        .route("/reset-password", put(auth::handle_reset_password))
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/details", get(profile::handle_get_user_details))
        .route(
            "/update/personal/info",
            put(profile::handle_update_personal_info),
        )
        .route(
            "/update/education/info",
            put(profile::handle_update_education_info),
        )
        .route(
            "/update/address/info",
            put(profile::handle_update_address_info),
        )
        .route(
            "/update/family/info",
            put(profile::handle_update_family_info),
        )
        .route(
            "/update/experience/info",
            put(profile::handle_update_experience_info),
        )
}

fn company_routes() -> Router<AppState> {
    Router::new()
        .route("/list", get(company::handle_list_companies))
        .route("/create", post(company::handle_create_company))
        .route("/:id", get(company::handle_get_company))
}
