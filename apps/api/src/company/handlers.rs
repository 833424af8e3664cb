use axum::extract::{Query, State};
use serde::Serialize;
use serde_json::{json, Value};
use tracing::info;

use crate::company::code::unique_co_code;
use crate::company::requests::{total_pages, CompanyListParams, CreateCompanyRequest};
use crate::errors::AppError;
use crate::extract::{AppJson, AppPath};
use crate::models::company::CompanyRow;
use crate::response::ApiResponse;
use crate::state::AppState;
use crate::store::CompanyStore;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyListData {
    pub companies: Vec<CompanyRow>,
    pub total_pages: i64,
    pub total_count: i64,
}

/// POST /company/create
pub async fn handle_create_company(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateCompanyRequest>,
) -> Result<ApiResponse<Value>, AppError> {
    let mut company = req.validate()?;

    const DUPLICATE: &str = "This company is already created.";

    if state.store.company_name_exists(&company.name).await? {
        return Err(AppError::Conflict(DUPLICATE.to_string()));
    }

    company.co_code = unique_co_code(state.store.as_ref()).await?;
    let id = state
        .store
        .insert_company(&company)
        .await
        .map_err(AppError::on_conflict(DUPLICATE))?;

    info!("Created company {id} ({})", company.co_code);
    Ok(ApiResponse::created(
        "Company created successfully.",
        json!({ "coCode": company.co_code }),
    ))
}

/// GET /company/list?page&limit&filter
pub async fn handle_list_companies(
    State(state): State<AppState>,
    Query(params): Query<CompanyListParams>,
) -> Result<ApiResponse<CompanyListData>, AppError> {
    let query = params.into_query();
    let page = state.store.list_companies(&query).await?;

    Ok(ApiResponse::ok(
        "Companies fetched successfully.",
        CompanyListData {
            total_pages: total_pages(page.total_count, query.limit),
            total_count: page.total_count,
            companies: page.companies,
        },
    ))
}

/// GET /company/:id
pub async fn handle_get_company(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<ApiResponse<Value>, AppError> {
    let company = state
        .store
        .find_company(id)
        .await?
        .ok_or_else(|| AppError::NotFound("Company not found.".to_string()))?;

    Ok(ApiResponse::ok(
        "Company fetched successfully.",
        json!({ "company": company }),
    ))
}
