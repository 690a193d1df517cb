//! Error types shared across store implementations.

use thiserror::Error;

use crate::models::SignalId;

/// Errors from a signal store backend.
///
/// Kept free of client-crate types so every backend maps its own failures
/// into these variants.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Could not reach the backend.
    #[error("connection failed: {0}")]
    Connection(String),

    /// The backend answered with something unusable.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// No signal with the given id.
    #[error("signal not found: {0}")]
    NotFound(SignalId),

    /// The change feed could not be established.
    #[error("subscribe failed: {0}")]
    Subscribe(String),
}
