use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::{MailError, MailMessage, MailReceipt, Mailer};

/// Test mailer that keeps every message it is asked to send.
#[derive(Clone, Debug, Default)]
pub struct RecordingMailer {
    sent: Arc<Mutex<Vec<MailMessage>>>,
    rejecting: Arc<AtomicBool>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subsequent sends succeed with an empty `accepted` list.
    pub fn reject_all(&self) {
        self.rejecting.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<MailMessage> {
        self.sent.lock().expect("mailer mutex poisoned").clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &MailMessage) -> Result<MailReceipt, MailError> {
        self.sent
            .lock()
            .expect("mailer mutex poisoned")
            .push(message.clone());
        let accepted = if self.rejecting.load(Ordering::SeqCst) {
            Vec::new()
        } else {
            vec![message.to.clone()]
        };
        Ok(MailReceipt { accepted })
    }
}
