mod auth;
mod company;
mod config;
mod db;
mod errors;
mod extract;
mod formatting;
mod lookup;
mod mail;
mod models;
mod profile;
mod response;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod testing;
mod validation;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::token::TokenIssuer;
use crate::config::Config;
use crate::db::create_pool;
use crate::mail::HttpMailer;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::PgStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Fails fast on missing required env vars
    let config = Config::from_env()?;

    init_tracing(&config);

    info!("Starting HRMS API v{}", env!("CARGO_PKG_VERSION"));

    // PostgreSQL, migrations applied
    let db = create_pool(&config.database_url).await?;

    let mailer = HttpMailer::new(config.mail_api_url.clone(), config.mail_api_key.clone())?;
    info!("Mail relay configured at {}", config.mail_api_url);

    let state = AppState {
        store: Arc::new(PgStore::new(db)),
        tokens: TokenIssuer::from_config(&config),
        mailer: Arc::new(mailer),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// `RUST_LOG` wins when it parses as a filter; otherwise only this crate logs,
/// at the configured level.
fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), config.rust_log)));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}
