//! Core types and feed engine for the Rezeki Radar food-sharing board.
//!
//! Broadcasters announce surplus food as signals; viewers see them as a
//! filtered, distance-sorted feed. This crate holds the domain model, the
//! geodistance and relative-age helpers, the feed engine itself, and the
//! [`SignalStore`] trait that storage backends implement.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use radar_core::{compute_view, Coordinate, Signal, SignalStatus};
//!
//! let signals = vec![Signal {
//!     id: 1,
//!     name: "MASJID JAMEK".to_string(),
//!     lat: 3.1491,
//!     lng: 101.6945,
//!     food_desc: "Bubur Lambuk".to_string(),
//!     pax: 30,
//!     status: SignalStatus::Active,
//!     last_updated: Utc::now(),
//! }];
//!
//! let viewer = Some(Coordinate::new(3.1390, 101.6869));
//! let feed = compute_view(&signals, viewer, 15.0);
//! assert_eq!(feed.len(), 1);
//! assert!(feed[0].distance_km.unwrap() < 15.0);
//! ```

pub mod error;
pub mod feed;
pub mod geo;
pub mod models;
pub mod store;
pub mod ticker;
pub mod timefmt;

pub use error::StoreError;
pub use feed::{compute_view, FeedStats, NewSignalTracker, SignalView};
pub use models::{
    Coordinate, Signal, SignalChanges, SignalDraft, SignalId, SignalStatus, FALLBACK_POSITION,
};
pub use store::{ChangeStream, SignalStore};
pub use ticker::{ticker_line, ticker_lines};
pub use timefmt::{age_long, age_short};
