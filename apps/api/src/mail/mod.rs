//! Mail: the outbound notification sink.
//!
//! Handlers depend on the `Mailer` trait only; `HttpMailer` relays messages to
//! a JSON mail API, and tests swap in `RecordingMailer`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub mod http;
#[cfg(test)]
pub mod memory;
pub mod templates;

pub use http::HttpMailer;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("No recipients accepted the message")]
    NotAccepted,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MailMessage {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub html: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MailReceipt {
    #[serde(default)]
    pub accepted: Vec<String>,
}

impl MailReceipt {
    /// Fails with `NotAccepted` when the relay took no recipient.
    pub fn require_accepted(self) -> Result<Self, MailError> {
        if self.accepted.is_empty() {
            Err(MailError::NotAccepted)
        } else {
            Ok(self)
        }
    }
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<MailReceipt, MailError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_receipt_requires_a_recipient() {
        assert!(matches!(
            MailReceipt::default().require_accepted(),
            Err(MailError::NotAccepted)
        ));
        let receipt = MailReceipt {
            accepted: vec!["asha@example.com".to_string()],
        };
        assert!(receipt.require_accepted().is_ok());
    }

    #[test]
    fn test_receipt_tolerates_missing_accepted() {
        let receipt: MailReceipt = serde_json::from_str(r#"{"id":"m-1"}"#).unwrap();
        assert!(receipt.accepted.is_empty());
    }
}
