//! Per-device ledger of claimed signal ids.
//!
//! Once a signal id is recorded here, further claim attempts for it become
//! no-ops on this device. The ledger is a JSON-encoded id list under a fixed
//! storage location, never transmitted to the shared store; corrupt or
//! missing contents load as an empty ledger. There is no expiry and no
//! clear operation in normal flow.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

use thiserror::Error;
use tracing::warn;

use radar_core::SignalId;

/// Default file name for the persisted ledger.
pub const DEFAULT_FILE: &str = "rezeki_claimed.json";

/// Errors from ledger storage.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Underlying storage write failed.
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Backing storage for the ledger. Injected so tests run fully in memory.
pub trait LedgerStorage: Send + Sync {
    /// Read the stored contents, or `None` when nothing is stored yet.
    fn read(&self) -> Option<String>;

    /// Replace the stored contents.
    fn write(&self, contents: &str) -> Result<(), LedgerError>;
}

impl<S: LedgerStorage + ?Sized> LedgerStorage for Arc<S> {
    fn read(&self) -> Option<String> {
        (**self).read()
    }

    fn write(&self, contents: &str) -> Result<(), LedgerError> {
        (**self).write(contents)
    }
}

/// File-backed storage.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LedgerStorage for FileStorage {
    fn read(&self) -> Option<String> {
        std::fs::read_to_string(&self.path).ok()
    }

    fn write(&self, contents: &str) -> Result<(), LedgerError> {
        std::fs::write(&self.path, contents).map_err(|e| LedgerError::Write(e.to_string()))
    }
}

/// In-memory storage, for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryStorage {
    cell: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LedgerStorage for MemoryStorage {
    fn read(&self) -> Option<String> {
        self.cell.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn write(&self, contents: &str) -> Result<(), LedgerError> {
        *self.cell.lock().unwrap_or_else(|e| e.into_inner()) = Some(contents.to_string());
        Ok(())
    }
}

/// The claim dedup set.
///
/// Reads go through an in-memory copy loaded once at open; `record`
/// persists best-effort and keeps the in-memory entry even when
/// persistence fails.
pub struct ClaimLedger {
    storage: Box<dyn LedgerStorage>,
    claimed: Mutex<Vec<SignalId>>,
}

impl ClaimLedger {
    /// Open a ledger over the given storage.
    ///
    /// Missing or malformed contents load as empty; this never fails.
    pub fn open(storage: Box<dyn LedgerStorage>) -> Self {
        let claimed = storage.read().map(|raw| parse(&raw)).unwrap_or_default();
        Self {
            storage,
            claimed: Mutex::new(claimed),
        }
    }

    /// Whether this device already claimed the signal.
    pub fn contains(&self, id: SignalId) -> bool {
        self.lock().contains(&id)
    }

    /// Record a claim. Recording an already-present id is a no-op.
    pub fn record(&self, id: SignalId) {
        let mut claimed = self.lock();
        if claimed.contains(&id) {
            return;
        }
        claimed.push(id);

        match serde_json::to_string(&*claimed) {
            Ok(encoded) => {
                if let Err(err) = self.storage.write(&encoded) {
                    warn!("Failed to persist claim ledger: {}", err);
                }
            }
            Err(err) => warn!("Failed to encode claim ledger: {}", err),
        }
    }

    /// All claimed ids, oldest first.
    pub fn all(&self) -> Vec<SignalId> {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<SignalId>> {
        self.claimed.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Malformed contents are treated as empty, never raised. Duplicates from
/// hand-edited files are dropped, keeping first occurrences.
fn parse(raw: &str) -> Vec<SignalId> {
    let ids: Vec<SignalId> = serde_json::from_str(raw).unwrap_or_default();
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
