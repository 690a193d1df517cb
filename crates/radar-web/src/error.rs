//! Error types for the web surface.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use radar_core::StoreError;
use radar_service::ServiceError;

/// Errors that can occur while serving a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Error from the radar service.
    #[error("Service error: {0}")]
    Service(#[from] ServiceError),

    /// No such signal in the current snapshot.
    #[error("Signal not found: {0}")]
    NotFound(radar_core::SignalId),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Service(ServiceError::InvalidDraft(msg)) => {
                (StatusCode::UNPROCESSABLE_ENTITY, msg.to_string())
            }
            ApiError::Service(ServiceError::Store(StoreError::NotFound(id)))
            | ApiError::NotFound(id) => {
                (StatusCode::NOT_FOUND, format!("signal not found: {id}"))
            }
            ApiError::Service(err) => {
                tracing::error!("Service error: {}", err);
                (StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
            }
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, Json(body)).into_response()
    }
}

/// Result type for request handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
