use reqwest::StatusCode;
use serde::Deserialize;
use std::fmt;

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone)]
pub struct AppError {
    pub status: Option<StatusCode>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

impl AppError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    pub fn transport(err: reqwest::Error) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }

    /// Builds the error for a non-2xx response from its raw body.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let message = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody {
                error: Some(message),
            }) if !message.is_empty() => message,
            Ok(_) => format!("HTTP {}", status.as_u16()),
            Err(_) => UNKNOWN_ERROR.to_string(),
        };
        Self {
            status: Some(status),
            message,
        }
    }

    pub fn decode(err: serde_json::Error) -> Self {
        Self {
            status: None,
            message: format!("unexpected response: {err}"),
        }
    }

    pub fn render(message: impl Into<String>) -> Self {
        Self::new(message)
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status,
            Some(StatusCode::UNAUTHORIZED) | Some(StatusCode::FORBIDDEN)
        )
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::new(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        Self::transport(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::decode(err)
    }
}
