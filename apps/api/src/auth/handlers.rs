use axum::extract::{Query, State};
use chrono::{Datelike, Utc};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::{info, warn};

use crate::auth::password::{hash_password, verify_password};
use crate::auth::requests::{
    ForgotPasswordRequest, LoginRequest, ResetPasswordRequest, ResetTokenQuery, SignUpRequest,
};
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::formatting::{capitalize_first, format_date};
use crate::lookup::{fetch_lookup_catalog, LookupCatalog, LookupKind};
use crate::mail::templates::{self, RESET_PASSWORD, RESET_PASSWORD_SUBJECT};
use crate::mail::MailMessage;
use crate::models::employee::{EmployeeRow, NewEmployee};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::store::EmployeeStore;
use crate::validation::check_new_password;

const INVALID_CREDENTIALS: &str = "Invalid email or password.";

/// Employee as returned by login: no password hash, coded fields resolved.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginUserDetails {
    pub id: i64,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub dob: Option<String>,
    pub doj: Option<String>,
    pub dos: Option<String>,
    pub gender: Option<String>,
    pub role: Option<String>,
}

impl LoginUserDetails {
    fn from_employee(employee: EmployeeRow, catalog: &LookupCatalog) -> Self {
        LoginUserDetails {
            gender: catalog
                .label(LookupKind::Gender, employee.gender)
                .map(capitalize_first),
            role: catalog
                .user_role
                .as_ref()
                .map(|role| capitalize_first(&role.value)),
            dob: format_date(employee.dob),
            doj: format_date(employee.doj),
            dos: format_date(employee.dos),
            id: employee.id,
            first_name: employee.first_name,
            middle_name: employee.middle_name,
            last_name: employee.last_name,
            email: employee.email,
            phone: employee.phone,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginData {
    pub user: LoginUserDetails,
    pub token: String,
}

/// POST /authentication/login
pub async fn handle_login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<ApiResponse<LoginData>, AppError> {
    let credentials = req.validate()?;

    let employee = state
        .store
        .find_employee_by_email(&credentials.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(&credentials.password, &employee.password_hash)? {
        warn!("Failed login for user {}", employee.id);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let catalog = fetch_lookup_catalog(state.store.as_ref(), employee.role_id).await?;
    let token = state
        .tokens
        .issue_session(employee.id, &employee.email)
        .map_err(anyhow::Error::from)?;

    info!("User {} logged in", employee.id);
    Ok(ApiResponse::ok(
        "Login successful!",
        LoginData {
            user: LoginUserDetails::from_employee(employee, &catalog),
            token,
        },
    ))
}

/// POST /authentication/sign-up
pub async fn handle_sign_up(
    State(state): State<AppState>,
    AppJson(req): AppJson<SignUpRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    const DUPLICATE: &str = "This email is already registered.";
    let sign_up = req.validate()?;

    if state.store.find_employee_by_email(&sign_up.email).await?.is_some() {
        return Err(AppError::Conflict(DUPLICATE.to_string()));
    }

    let employee = NewEmployee {
        password_hash: hash_password(&sign_up.password)?,
        first_name: sign_up.first_name,
        middle_name: sign_up.middle_name,
        last_name: sign_up.last_name,
        email: sign_up.email,
        phone: sign_up.phone,
        dob: sign_up.dob,
    };
    let user_id = state
        .store
        .insert_employee(&employee)
        .await
        .map_err(AppError::on_conflict(DUPLICATE))?;

    info!("Registered user {user_id}");
    Ok(ApiResponse::created("Sign-up successfully.", json!({ "userId": user_id })))
}

/// POST /authentication/forgot-password
pub async fn handle_forgot_password(
    State(state): State<AppState>,
    AppJson(req): AppJson<ForgotPasswordRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let email = req.validate()?;

    let employee = state
        .store
        .find_employee_by_email(&email)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;

    let token = state
        .tokens
        .issue_reset(employee.id)
        .map_err(anyhow::Error::from)?;
    let link = format!("{}/reset-password/{}", state.config.client_side_url, token);
    let year = Utc::now().year().to_string();
    let name = employee.full_name();

    let html = templates::render(
        RESET_PASSWORD,
        &[
            ("name", name.as_str()),
            ("reset_password_link", link.as_str()),
            ("support_email", state.config.admin_email.as_str()),
            ("year", year.as_str()),
        ],
    );
    let message = MailMessage {
        from: state.config.admin_email.clone(),
        to: employee.email.clone(),
        subject: RESET_PASSWORD_SUBJECT.to_string(),
        html,
    };
    state.mailer.send(&message).await?.require_accepted()?;

    info!("Password reset mail sent for user {}", employee.id);
    Ok(ApiResponse::message(
        "Please check your email. A reset link has been sent successfully.",
    ))
}

/// PUT /authentication/reset-password?token=...
pub async fn handle_reset_password(
    State(state): State<AppState>,
    Query(query): Query<ResetTokenQuery>,
    AppJson(req): AppJson<ResetPasswordRequest>,
) -> Result<ApiResponse<()>, AppError> {
    let token = query
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Validation("Reset token is required.".to_string()))?;

    let user_id = state.tokens.verify_reset(&token).map_err(|e| {
        warn!("Rejected reset token: {e}");
        AppError::Unauthorized("Invalid or expired reset token.".to_string())
    })?;

    let password = check_new_password(req.password)?;

    if state.store.find_employee(user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found.".to_string()));
    }

    let hash = hash_password(&password)?;
    state.store.update_password(user_id, &hash).await?;

    info!("Password reset for user {user_id}");
    Ok(ApiResponse::message("Your password has been reset successfully."))
}
