//! Feed orchestration for Rezeki Radar.
//!
//! The [`Radar`] service ties the pieces together: it refetches the signal
//! collection on every change notice, recomputes the feed, alerts on newly
//! active signals, and carries the claim, mark-finished, and broadcast
//! operations to the store.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use chrono::Utc;
//! use claim_ledger::{ClaimLedger, MemoryStorage};
//! use mock_store::MemoryStore;
//! use radar_service::{LogAlerts, Radar, RadarConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let radar = Radar::new(
//!     Arc::new(MemoryStore::seeded(Utc::now())),
//!     ClaimLedger::open(Box::new(MemoryStorage::new())),
//!     Arc::new(LogAlerts),
//!     RadarConfig::default(),
//! );
//!
//! radar.refresh().await;
//! assert_eq!(radar.snapshot().len(), 6);
//! # }
//! ```

pub mod alerts;
pub mod error;
pub mod links;
pub mod radar;

pub use alerts::{alert_body, AlertSink, LogAlerts, NullAlerts};
pub use error::{Result, ServiceError};
pub use links::{gmaps_url, navigation_url, share_text, waze_url, whatsapp_url, Platform};
pub use radar::{BroadcastDraft, ClaimOutcome, Radar, RadarConfig};
