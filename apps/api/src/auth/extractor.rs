use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::errors::AppError;
use crate::state::AppState;

/// The authenticated caller, taken from a session token in `Authorization`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: i64,
}

/// Accepts `Bearer <token>` or a bare token.
fn token_from_header(value: &str) -> Result<&str, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::Unauthorized("No token, authorization denied".to_string()));
    }
    let mut parts = value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        (Some(token), None, None) if !token.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::Unauthorized(
            "Invalid token format, authorization denied".to_string(),
        )),
    }
}

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or_else(|| AppError::Unauthorized("No token, authorization denied".to_string()))?
            .to_str()
            .map_err(|_| {
                AppError::Unauthorized("Invalid token format, authorization denied".to_string())
            })?;

        let token = token_from_header(header)?;
        let claims = state.tokens.verify_session(token).map_err(|e| {
            debug!("Rejected session token: {e}");
            AppError::Unauthorized("Token is not valid".to_string())
        })?;

        Ok(AuthUser {
            user_id: claims.sub,
        })
    }
}
