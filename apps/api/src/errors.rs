use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::mail::MailError;
use crate::store::StoreError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    /// A coded field whose id does not resolve against its lookup list.
    #[error("Invalid reference for '{field}': {message}")]
    InvalidReference {
        field: &'static str,
        message: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("Mail error: {0}")]
    Mail(#[from] MailError),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn invalid_reference(field: &'static str, label: &str) -> Self {
        AppError::InvalidReference {
            field,
            message: format!("Invalid {label} provided. Please select a valid option."),
        }
    }

    /// Turns a store unique-constraint conflict into a 409 carrying `message`.
    pub fn on_conflict(message: &str) -> impl FnOnce(StoreError) -> AppError + '_ {
        move |err| match err {
            StoreError::Conflict(_) => AppError::Conflict(message.to_string()),
            other => AppError::Store(other),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::InvalidReference { message, .. } => (
                StatusCode::BAD_REQUEST,
                "INVALID_REFERENCE",
                message.clone(),
            ),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Store(StoreError::Conflict(constraint)) => {
                tracing::warn!("Unique constraint {constraint} rejected a write");
                (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    "This record already exists.".to_string(),
                )
            }
            AppError::Store(e) => {
                tracing::error!("Store error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
            AppError::Mail(e) => {
                tracing::error!("Mail error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "MAIL_ERROR",
                    "Failed to send email. Please try again later.".to_string(),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let mut body = json!({
            "status": "fail",
            "code": code,
            "message": message,
        });
        if let AppError::InvalidReference { field, .. } = &self {
            body["field"] = json!(field);
        }

        (status, Json(body)).into_response()
    }
}
