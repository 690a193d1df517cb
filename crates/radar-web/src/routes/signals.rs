//! Signal operation routes.

use axum::extract::{Path, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use radar_core::{age_long, Coordinate, Signal, SignalId};
use radar_service::{whatsapp_url, BroadcastDraft, ClaimOutcome, Platform};

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Broadcast submission: the draft plus the broadcaster's location.
#[derive(Debug, Deserialize)]
pub struct BroadcastRequest {
    #[serde(flatten)]
    pub draft: BroadcastDraft,
    /// Broadcaster latitude; the fallback position is used when absent.
    pub lat: Option<f64>,
    /// Broadcaster longitude.
    pub lng: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
    pub accepted: bool,
}

/// Submit a new signal.
pub async fn broadcast(
    State(state): State<AppState>,
    Json(req): Json<BroadcastRequest>,
) -> Result<Json<BroadcastResponse>> {
    let viewer = match (req.lat, req.lng) {
        (Some(lat), Some(lng)) => Some(Coordinate::new(lat, lng)),
        _ => None,
    };

    state.radar.broadcast(req.draft, viewer).await?;
    Ok(Json(BroadcastResponse { accepted: true }))
}

/// Detail payload for the drawer surface.
#[derive(Debug, Serialize)]
pub struct SignalDetail {
    #[serde(flatten)]
    pub signal: Signal,
    /// Long-form relative age, e.g. "45 MINIT LALU".
    pub age: String,
    /// Whether this device already claimed the signal.
    pub claimed: bool,
    /// Share link for messaging apps.
    pub whatsapp_url: String,
}

/// One signal with its drawer annotations.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<SignalId>,
) -> Result<Json<SignalDetail>> {
    let signal = state.radar.signal(id).ok_or(ApiError::NotFound(id))?;

    Ok(Json(SignalDetail {
        age: age_long(signal.last_updated, Utc::now()),
        claimed: state.radar.has_claimed(id),
        whatsapp_url: whatsapp_url(&signal),
        signal,
    }))
}

/// Claim request body.
#[derive(Debug, Default, Deserialize)]
pub struct ClaimRequest {
    /// `"mobile"` gets the Waze link, anything else Google Maps.
    #[serde(default)]
    pub platform: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ClaimResponse {
    pub outcome: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub navigation_url: Option<String>,
}

/// Declare intent to attend.
pub async fn claim(
    State(state): State<AppState>,
    Path(id): Path<SignalId>,
    Json(req): Json<ClaimRequest>,
) -> Result<Json<ClaimResponse>> {
    let platform = match req.platform.as_deref() {
        Some("mobile") => Platform::Mobile,
        _ => Platform::Desktop,
    };

    let response = match state.radar.claim(id, platform).await? {
        ClaimOutcome::Accepted { navigation_url } => ClaimResponse {
            outcome: "accepted",
            navigation_url: Some(navigation_url),
        },
        ClaimOutcome::AlreadyClaimed => ClaimResponse {
            outcome: "already_claimed",
            navigation_url: None,
        },
        ClaimOutcome::Exhausted => ClaimResponse {
            outcome: "exhausted",
            navigation_url: None,
        },
        ClaimOutcome::Unknown => ClaimResponse {
            outcome: "unknown",
            navigation_url: None,
        },
    };

    Ok(Json(response))
}

#[derive(Debug, Serialize)]
pub struct FinishedResponse {
    pub updated: bool,
}

/// Mark a signal's food exhausted.
pub async fn finished(
    State(state): State<AppState>,
    Path(id): Path<SignalId>,
) -> Result<Json<FinishedResponse>> {
    let updated = state.radar.mark_finished(id).await?;
    Ok(Json(FinishedResponse { updated }))
}
