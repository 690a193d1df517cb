//! Application state shared across handlers.

use std::sync::Arc;

use radar_service::Radar;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The radar feed service.
    pub radar: Arc<Radar>,
}

impl AppState {
    /// Create new application state.
    pub fn new(radar: Arc<Radar>) -> Self {
        Self { radar }
    }
}
