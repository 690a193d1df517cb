//! In-memory signal store.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::StreamExt;
use tokio::sync::broadcast;
use tokio::sync::RwLock;
use tokio_stream::wrappers::BroadcastStream;
use tracing::debug;

use radar_core::{
    ChangeStream, Signal, SignalChanges, SignalDraft, SignalId, SignalStore, StoreError,
};

use crate::seed::seed_signals;

/// Capacity for buffered change notices.
const CHANGE_BUFFER: usize = 16;

/// An in-process stand-in for the hosted store.
pub struct MemoryStore {
    signals: RwLock<Vec<Signal>>,
    next_id: AtomicI64,
    changes: broadcast::Sender<()>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::with_signals(Vec::new())
    }

    /// Create a store preloaded with the given signals.
    pub fn with_signals(signals: Vec<Signal>) -> Self {
        let next_id = signals.iter().map(|s| s.id).max().unwrap_or(0) + 1;
        let (changes, _) = broadcast::channel(CHANGE_BUFFER);
        Self {
            signals: RwLock::new(signals),
            next_id: AtomicI64::new(next_id),
            changes,
        }
    }

    /// Create a store preloaded with the demo dataset.
    pub fn seeded(now: DateTime<Utc>) -> Self {
        Self::with_signals(seed_signals(now))
    }

    fn notify(&self) {
        // No receivers is fine
        let _ = self.changes.send(());
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SignalStore for MemoryStore {
    async fn fetch_all(&self) -> Result<Vec<Signal>, StoreError> {
        let mut signals = self.signals.read().await.clone();
        signals.sort_by(|a, b| b.last_updated.cmp(&a.last_updated));
        Ok(signals)
    }

    async fn insert(&self, draft: SignalDraft) -> Result<(), StoreError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let signal = Signal {
            id,
            name: draft.name,
            lat: draft.lat,
            lng: draft.lng,
            food_desc: draft.food_desc,
            pax: draft.pax,
            status: draft.status,
            last_updated: draft.last_updated,
        };
        self.signals.write().await.push(signal);
        debug!(id, "Inserted signal");
        self.notify();
        Ok(())
    }

    async fn update(&self, id: SignalId, changes: SignalChanges) -> Result<(), StoreError> {
        {
            let mut signals = self.signals.write().await;
            let signal = signals
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(StoreError::NotFound(id))?;
            if let Some(pax) = changes.pax {
                signal.pax = pax;
            }
            if let Some(status) = changes.status {
                signal.status = status;
            }
            if let Some(last_updated) = changes.last_updated {
                signal.last_updated = last_updated;
            }
        }
        debug!(id, "Updated signal");
        self.notify();
        Ok(())
    }

    async fn subscribe(&self) -> Result<ChangeStream, StoreError> {
        let receiver = self.changes.subscribe();
        // A lagged receiver still means something changed
        let stream = BroadcastStream::new(receiver).map(|_| Ok::<(), StoreError>(()));
        Ok(Box::pin(stream))
    }

    fn name(&self) -> &str {
        "memory"
    }
}
