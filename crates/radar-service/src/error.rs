//! Service error types.

use thiserror::Error;

use radar_core::StoreError;

/// Errors that can occur in the radar service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Store operation failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// Broadcast draft failed local validation; nothing was written.
    #[error("invalid draft: {0}")]
    InvalidDraft(&'static str),

    /// The change feed ended.
    #[error("change feed ended")]
    FeedEnded,
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;
