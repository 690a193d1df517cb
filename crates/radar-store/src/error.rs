//! Error types for the table API client.

use radar_core::StoreError;
use thiserror::Error;

/// Errors when talking to the hosted table API.
#[derive(Debug, Error)]
pub enum RestError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success response from the API.
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    /// Store health check failed.
    #[error("Health check failed")]
    HealthCheckFailed,

    /// SSE stream error.
    #[error("SSE error: {0}")]
    Sse(String),
}

impl From<RestError> for StoreError {
    fn from(err: RestError) -> Self {
        match err {
            RestError::Http(e) => StoreError::Connection(e.to_string()),
            RestError::Api { status, body } => {
                StoreError::Protocol(format!("HTTP {status}: {body}"))
            }
            RestError::HealthCheckFailed => {
                StoreError::Connection("health check failed".to_string())
            }
            RestError::Sse(msg) => StoreError::Subscribe(msg),
        }
    }
}
