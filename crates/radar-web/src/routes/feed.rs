//! Feed routes.

use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use radar_core::{Coordinate, FeedStats, SignalId, SignalView};

use crate::state::AppState;

/// Viewer context for a feed request.
#[derive(Debug, Deserialize)]
pub struct FeedQuery {
    /// Viewer latitude; distances are unknown when absent.
    pub lat: Option<f64>,
    /// Viewer longitude.
    pub lng: Option<f64>,
    /// Distance cap override, in km.
    pub max_km: Option<f64>,
}

/// Feed response: the annotated view list plus aggregates and this
/// device's claims.
#[derive(Debug, Serialize)]
pub struct FeedResponse {
    pub signals: Vec<SignalView>,
    pub stats: FeedStats,
    pub claimed: Vec<SignalId>,
}

/// The filtered, sorted, distance-annotated feed.
pub async fn feed(
    State(state): State<AppState>,
    Query(query): Query<FeedQuery>,
) -> Json<FeedResponse> {
    let viewer = match (query.lat, query.lng) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
        _ => None,
    };

    let signals = state.radar.view(viewer, query.max_km);
    let stats = state.radar.stats();
    let claimed = state.radar.claimed_ids();

    Json(FeedResponse {
        signals,
        stats,
        claimed,
    })
}

/// Marquee lines for the ticker surface.
pub async fn ticker(State(state): State<AppState>) -> Json<Vec<String>> {
    Json(state.radar.ticker())
}
