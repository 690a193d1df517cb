//! Hosted table API client.
//!
//! This crate implements [`radar_core::SignalStore`] against the hosted
//! relational backend over HTTP. It supports:
//!
//! - Fetching, inserting, and patching signal rows
//! - Receiving table-change notices via Server-Sent Events (SSE)
//! - Health checking and connection monitoring
//!
//! # Example
//!
//! ```no_run
//! use radar_core::SignalStore;
//! use radar_store::{RestStore, StoreConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StoreConfig::default();
//! let store = RestStore::connect(config).await?;
//!
//! let signals = store.fetch_all().await?;
//! println!("{} signals on the board", signals.len());
//!
//! // Refetch whenever the table changes
//! use futures::StreamExt;
//! let mut changes = store.subscribe().await?;
//! while let Some(notice) = changes.next().await {
//!     if notice.is_ok() {
//!         let signals = store.fetch_all().await?;
//!         println!("refetched {} signals", signals.len());
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod changes;
pub mod client;
pub mod config;
pub mod error;

pub use changes::{ChangeFeed, ReconnectConfig};
pub use client::RestStore;
pub use config::StoreConfig;
pub use error::RestError;

/// Crate version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
