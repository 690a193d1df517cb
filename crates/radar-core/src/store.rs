//! The repository boundary.

use std::pin::Pin;

use async_trait::async_trait;
use futures::stream::Stream;

use crate::error::StoreError;
use crate::models::{Signal, SignalChanges, SignalDraft, SignalId};

/// Stream of no-payload change notices. Consumers refetch on every item.
pub type ChangeStream = Pin<Box<dyn Stream<Item = Result<(), StoreError>> + Send>>;

/// Storage backend for the signal collection.
///
/// Object-safe so the service can hold `Arc<dyn SignalStore>`;
/// implementations range from the hosted table API to the in-memory demo
/// dataset.
#[async_trait]
pub trait SignalStore: Send + Sync {
    /// Fetch the current signal collection, newest first.
    ///
    /// Consumers re-sort for presentation and must not rely on this order.
    async fn fetch_all(&self) -> Result<Vec<Signal>, StoreError>;

    /// Insert one signal. The store assigns the id.
    async fn insert(&self, draft: SignalDraft) -> Result<(), StoreError>;

    /// Apply a partial update to one signal's mutable fields.
    async fn update(&self, id: SignalId, changes: SignalChanges) -> Result<(), StoreError>;

    /// Subscribe to table changes.
    async fn subscribe(&self) -> Result<ChangeStream, StoreError>;

    /// Human-readable backend name.
    fn name(&self) -> &str;
}
