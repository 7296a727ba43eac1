//! Error types for lorry-hire

use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("No active {0} selected; set it with `lorry-hire config`")]
    MissingContext(&'static str),
}

/// Errors raised while talking to the backend API
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Unexpected response body: {0}")]
    Decode(String),

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status of the failed call, if the backend answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_status_is_exposed() {
        let err = ApiError::Status {
            status: 404,
            message: "Lorry hire not found".to_string(),
        };
        assert_eq!(err.status(), Some(404));
        assert_eq!(ApiError::Transport("reset".to_string()).status(), None);
    }

    #[test]
    fn test_error_display_wraps_source() {
        let err: Error = ApiError::Status {
            status: 400,
            message: "tdsPercent must be a number".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "API error: Backend returned 400: tdsPercent must be a number"
        );
    }
}
