use std::sync::Arc;

use crate::auth::token::TokenIssuer;
use crate::config::Config;
use crate::mail::Mailer;
use crate::store::Store;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub tokens: TokenIssuer,
    /// Outbound mail; `HttpMailer` in production.
    pub mailer: Arc<dyn Mailer>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// State over in-memory collaborators with `Config::for_tests`.
    pub fn for_tests(
        store: crate::store::memory::MemoryStore,
        mailer: crate::mail::memory::RecordingMailer,
    ) -> Self {
        let config = Config::for_tests();
        AppState {
            store: Arc::new(store),
            tokens: TokenIssuer::from_config(&config),
            mailer: Arc::new(mailer),
            config,
        }
    }
}
