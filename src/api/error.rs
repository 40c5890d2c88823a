/// Error types for the API client
use reqwest::StatusCode;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors that can occur while building the client or talking to the API
#[derive(Debug, Error)]
pub enum ApiError {
    /// Configuration could not be read from the environment
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The underlying HTTP client could not be constructed
    #[error("Failed to create HTTP client: {0}")]
    ClientBuild(String),

    /// Connection-level failure (DNS, refused, reset, TLS)
    #[error("Network error: {0}")]
    Network(String),

    /// No response within the configured timeout
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// The server answered with a status the caller does not accept
    #[error("Unexpected HTTP status: {0}")]
    UnexpectedStatus(StatusCode),
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e.to_string())
        } else {
            ApiError::Network(e.to_string())
        }
    }
}
