//! Route definitions.

mod feed;
mod health;
mod signals;

use axum::routing::{get, post};
use axum::Router;

use crate::state::AppState;

/// Build the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/feed", get(feed::feed))
        .route("/api/ticker", get(feed::ticker))
        .route("/api/signals", post(signals::broadcast))
        .route("/api/signals/:id", get(signals::detail))
        .route("/api/signals/:id/claim", post(signals::claim))
        .route("/api/signals/:id/finished", post(signals::finished))
}
