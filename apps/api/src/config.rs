use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Built once at startup and handed to every component through `AppState`.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_ttl_days: i64,
    pub reset_token_ttl_minutes: i64,
    pub client_side_url: String,
    pub admin_email: String,
    pub mail_api_url: String,
    pub mail_api_key: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            jwt_secret: require_env("JWT_SECRET_KEY")?,
            jwt_ttl_days: optional_env("JWT_TTL_DAYS", "365")?
                .parse::<i64>()
                .context("JWT_TTL_DAYS must be a whole number of days")?,
            reset_token_ttl_minutes: optional_env("RESET_TOKEN_TTL_MINUTES", "60")?
                .parse::<i64>()
                .context("RESET_TOKEN_TTL_MINUTES must be a whole number of minutes")?,
            client_side_url: require_env("CLIENT_SIDE_URL")?
                .trim_end_matches('/')
                .to_string(),
            admin_email: require_env("ADMIN_EMAIL")?,
            mail_api_url: require_env("MAIL_API_URL")?,
            mail_api_key: require_env("MAIL_API_KEY")?,
            port: optional_env("PORT", "8080")?
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG", "info")?,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str, default: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) => Ok(value),
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(e) => Err(e).with_context(|| format!("Environment variable '{key}' is not valid UTF-8")),
    }
}

#[cfg(test)]
impl Config {
    /// Fixed configuration for tests; never touches the process environment.
    pub fn for_tests() -> Self {
        Config {
            database_url: "postgres://localhost/hrms_test".to_string(),
            jwt_secret: "test-secret-key-with-enough-entropy".to_string(),
            jwt_ttl_days: 365,
            reset_token_ttl_minutes: 60,
            client_side_url: "http://localhost:3000".to_string(),
            admin_email: "support@example.com".to_string(),
            mail_api_url: "http://localhost:9999/send".to_string(),
            mail_api_key: "test-mail-key".to_string(),
            port: 8080,
            rust_log: "debug".to_string(),
        }
    }
}
