//! In-memory store implementation for demo mode and tests.
//!
//! When no hosted backend is configured, [`MemoryStore`] stands in for it:
//! `fetch_all` serves an in-process collection, writes mutate it, and the
//! change feed is a local broadcast channel. [`seed_signals`] provides the
//! fixed demo dataset.
//!
//! # Example
//!
//! ```
//! use chrono::Utc;
//! use mock_store::MemoryStore;
//! use radar_core::SignalStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), radar_core::StoreError> {
//! let store = MemoryStore::seeded(Utc::now());
//! let signals = store.fetch_all().await?;
//! assert_eq!(signals.len(), 6);
//! # Ok(())
//! # }
//! ```

mod memory;
mod seed;

pub use memory::MemoryStore;
pub use seed::seed_signals;
