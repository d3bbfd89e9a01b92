//! Process configuration, read from the environment at startup.

use chrono::Duration;

use leaguehub_auth::token::DEFAULT_SESSION_TTL_SECS;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Shared HS256 signing secret for session tokens.
    pub jwt_secret: String,
    /// Static API token presented alongside credentials at login.
    pub login_token: String,
    /// Fixed session lifetime.
    pub session_ttl: Duration,
    pub bind_addr: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        let login_token = std::env::var("LOGIN_API_TOKEN").unwrap_or_else(|_| {
            tracing::warn!("LOGIN_API_TOKEN not set; using insecure dev default");
            "dev-login-token".to_string()
        });

        let session_ttl = std::env::var("SESSION_TTL_SECS")
            .ok()
            .and_then(|v| v.parse::<i64>().ok())
            .map(Duration::seconds)
            .unwrap_or_else(|| Duration::seconds(DEFAULT_SESSION_TTL_SECS));

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());

        Self {
            jwt_secret,
            login_token,
            session_ttl,
            bind_addr,
        }
    }
}
