use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;

const RESET_PURPOSE: &str = "password_reset";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token encoding failed: {0}")]
    Encode(#[source] jsonwebtoken::errors::Error),

    #[error("token rejected: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),

    #[error("token issued for a different purpose")]
    WrongPurpose,
}

/// Claims of a login session token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub sub: i64,
    pub email: String,
    pub iat: i64,
    pub exp: i64,
}

/// Claims of a short-lived password reset token.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResetClaims {
    pub user_id: i64,
    pub purpose: String,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 signer/verifier for session and reset tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    session_ttl: Duration,
    reset_ttl: Duration,
}

impl std::fmt::Debug for TokenIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIssuer")
            .field("session_ttl", &self.session_ttl)
            .field("reset_ttl", &self.reset_ttl)
            .finish_non_exhaustive()
    }
}

impl TokenIssuer {
    pub fn new(secret: &str, session_ttl: Duration, reset_ttl: Duration) -> Self {
        TokenIssuer {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            session_ttl,
            reset_ttl,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.jwt_secret,
            Duration::days(config.jwt_ttl_days),
            Duration::minutes(config.reset_token_ttl_minutes),
        )
    }

    pub fn issue_session(&self, user_id: i64, email: &str) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user_id,
            email: email.to_string(),
            iat: now.timestamp(),
            exp: (now + self.session_ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    pub fn verify_session(&self, token: &str) -> Result<SessionClaims, TokenError> {
        decode::<SessionClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }

    pub fn issue_reset(&self, user_id: i64) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = ResetClaims {
            user_id,
            purpose: RESET_PURPOSE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.reset_ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Encode)
    }

    /// Returns the user id a reset token was issued for.
    pub fn verify_reset(&self, token: &str) -> Result<i64, TokenError> {
        let claims = decode::<ResetClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)?;
        if claims.purpose != RESET_PURPOSE {
            return Err(TokenError::WrongPurpose);
        }
        Ok(claims.user_id)
    }
}
