use axum::extract::State;
use serde_json::{json, Value};

use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::extract::AppJson;
use crate::lookup::fetch_lookup_catalog;
use crate::models::employee::EmployeeRow;
use crate::profile::assembler::{assemble_profile_view, ProfileRows};
use crate::profile::requests::{
    AddressInfoRequest, EducationInfoRequest, ExperienceInfoRequest, FamilyInfoRequest,
    PersonalInfoRequest,
};
use crate::profile::view::ProfileView;
use crate::profile::writer::{
    write_address_info, write_education_info, write_experience_info, write_family_info,
    write_personal_info,
};
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::store::{EmployeeStore, ProfileStore, StoreResult};

const UPDATE_USER_NOT_FOUND: &str = "User not found. Please check your credentials and try again.";

/// Reads the employee and the five section rows concurrently.
/// `Ok(None)` when the employee does not exist.
pub async fn load_profile_rows<S>(store: &S, user_id: i64) -> StoreResult<Option<ProfileRows>>
where
    S: EmployeeStore + ProfileStore + ?Sized,
{
    let (employee, personal, education, address, experience, family) = tokio::try_join!(
        store.find_employee(user_id),
        store.find_personal(user_id),
        store.find_education(user_id),
        store.find_address(user_id),
        store.find_experience(user_id),
        store.find_family(user_id),
    )?;

    Ok(employee.map(|employee| ProfileRows {
        employee,
        personal,
        education,
        address,
        experience,
        family,
    }))
}

async fn require_employee(state: &AppState, user_id: i64) -> Result<EmployeeRow, AppError> {
    state
        .store
        .find_employee(user_id)
        .await?
        .ok_or_else(|| AppError::NotFound(UPDATE_USER_NOT_FOUND.to_string()))
}

/// GET /user/details
pub async fn handle_get_user_details(
    State(state): State<AppState>,
    user: AuthUser,
) -> Result<ApiResponse<ProfileView>, AppError> {
    let rows = load_profile_rows(state.store.as_ref(), user.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found.".to_string()))?;
    let catalog = fetch_lookup_catalog(state.store.as_ref(), rows.employee.role_id).await?;

    Ok(ApiResponse::ok(
        "User details retrieved successfully.",
        assemble_profile_view(&rows, &catalog),
    ))
}

/// PUT /user/update/personal/info
pub async fn handle_update_personal_info(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<PersonalInfoRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let update = req.validate()?;
    let employee = require_employee(&state, user.user_id).await?;
    let catalog = fetch_lookup_catalog(state.store.as_ref(), employee.role_id).await?;
    let view = write_personal_info(state.store.as_ref(), &employee, update, &catalog).await?;

    Ok(ApiResponse::ok(
        "User personal detail updated successfully.",
        json!({ "personalInfo": view }),
    ))
}

/// PUT /user/update/education/info
pub async fn handle_update_education_info(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<EducationInfoRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let update = req.validate()?;
    let employee = require_employee(&state, user.user_id).await?;
    let catalog = fetch_lookup_catalog(state.store.as_ref(), employee.role_id).await?;
    let view = write_education_info(state.store.as_ref(), employee.id, update, &catalog).await?;

    Ok(ApiResponse::ok(
        "User education detail updated successfully.",
        json!({ "educationInfo": view }),
    ))
}

/// PUT /user/update/address/info
pub async fn handle_update_address_info(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<AddressInfoRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let update = req.validate()?;
    let employee = require_employee(&state, user.user_id).await?;
    let catalog = fetch_lookup_catalog(state.store.as_ref(), employee.role_id).await?;
    let view = write_address_info(state.store.as_ref(), employee.id, update, &catalog).await?;

    Ok(ApiResponse::ok(
        "User address detail updated successfully.",
        json!({ "addressInfo": view }),
    ))
}

/// PUT /user/update/family/info
pub async fn handle_update_family_info(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<FamilyInfoRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let update = req.validate()?;
    let employee = require_employee(&state, user.user_id).await?;
    let catalog = fetch_lookup_catalog(state.store.as_ref(), employee.role_id).await?;
    let view = write_family_info(state.store.as_ref(), employee.id, update, &catalog).await?;

    Ok(ApiResponse::ok(
        "User family detail updated successfully.",
        json!({ "familyInfo": view }),
    ))
}

/// PUT /user/update/experience/info
pub async fn handle_update_experience_info(
    State(state): State<AppState>,
    user: AuthUser,
    AppJson(req): AppJson<ExperienceInfoRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let update = req.validate()?;
    let employee = require_employee(&state, user.user_id).await?;
    let catalog = fetch_lookup_catalog(state.store.as_ref(), employee.role_id).await?;
    let view = write_experience_info(state.store.as_ref(), employee.id, update, &catalog).await?;

    Ok(ApiResponse::ok(
        "User experience detail updated successfully.",
        json!({ "experienceInfo": view }),
    ))
}
