use crate::errors::AppError;
use std::{env, time::Duration};
use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8080";
pub const DEFAULT_AUTH_SCHEME: &str = "tma";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub auth_scheme: String,
    pub session_token: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>, session_token: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base(base_url.into()),
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            session_token: session_token.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self, AppError> {
        let base_url = env::var("CHORE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(AppError::new(format!(
                "CHORE_API_URL must be an http(s) url, got {base_url:?}"
            )));
        }

        let session_token = env::var("CHORE_SESSION_TOKEN").unwrap_or_default();
        if session_token.is_empty() {
            warn!("CHORE_SESSION_TOKEN is not set; the backend will refuse the session");
        }

        let mut config = Self::new(base_url, session_token);
        if let Ok(scheme) = env::var("CHORE_AUTH_SCHEME") {
            config.auth_scheme = scheme;
        }
        config.timeout = env::var("CHORE_TIMEOUT_SECS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(config.timeout);

        Ok(config)
    }

    pub fn authorization(&self) -> String {
        format!("{} {}", self.auth_scheme, self.session_token)
    }
}

fn normalize_base(mut base_url: String) -> String {
    while base_url.ends_with('/') {
        base_url.pop();
    }
    base_url
}
