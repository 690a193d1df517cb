//! Domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier assigned by the store on creation. Opaque and stable.
pub type SignalId = i64;

/// Position used when the broadcaster's location is unavailable
/// (central Kuala Lumpur).
pub const FALLBACK_POSITION: Coordinate = Coordinate {
    lat: 3.1390,
    lng: 101.6869,
};

/// Whether a signal still has food available.
///
/// The transition is one-way in normal flow: once finished, a signal does
/// not go back to active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStatus {
    #[serde(rename = "ACTIVE")]
    Active,
    #[serde(rename = "FINISHED")]
    Finished,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// One broadcast record: available (or exhausted) surplus food at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    /// Store-assigned identifier.
    pub id: SignalId,
    /// Display label of the broadcasting location, upper-cased at creation.
    pub name: String,
    /// Latitude, fixed at creation.
    pub lat: f64,
    /// Longitude, fixed at creation.
    pub lng: f64,
    /// Free-text description of the food offered.
    pub food_desc: String,
    /// Remaining-capacity count.
    pub pax: u32,
    /// ACTIVE while food is available, FINISHED once exhausted.
    pub status: SignalStatus,
    /// Refreshed on every mutation.
    pub last_updated: DateTime<Utc>,
}

impl Signal {
    /// Position of the broadcasting location.
    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn is_active(&self) -> bool {
        self.status == SignalStatus::Active
    }
}

/// Insert payload for a new signal. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDraft {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
    pub food_desc: String,
    pub pax: u32,
    pub status: SignalStatus,
    pub last_updated: DateTime<Utc>,
}

/// Partial update payload; `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pax: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<SignalStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}
