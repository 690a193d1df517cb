//! The radar service: refresh cycles, operations, alerting.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use futures::StreamExt;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use claim_ledger::ClaimLedger;
use radar_core::{
    compute_view, ticker_lines, Coordinate, FeedStats, NewSignalTracker, Signal, SignalChanges,
    SignalDraft, SignalId, SignalStatus, SignalStore, SignalView, FALLBACK_POSITION,
};

use crate::alerts::AlertSink;
use crate::error::{Result, ServiceError};
use crate::links::{navigation_url, Platform};

/// Tunables for the radar service.
#[derive(Debug, Clone)]
pub struct RadarConfig {
    /// Distance cap applied when a view does not specify one, in km.
    pub max_distance_km: f64,
    /// Whether this device may mark signals finished.
    pub can_finish: bool,
}

impl Default for RadarConfig {
    fn default() -> Self {
        Self {
            max_distance_km: 15.0,
            can_finish: false,
        }
    }
}

/// A broadcast submission as the user fills it in.
#[derive(Debug, Clone, Deserialize)]
pub struct BroadcastDraft {
    pub name: String,
    pub food_desc: String,
    pub pax: u32,
    pub status: SignalStatus,
}

/// Result of a claim attempt. Everything but `Accepted` is a no-op.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimOutcome {
    /// Claim accepted; the caller should open the navigation link.
    Accepted { navigation_url: String },
    /// This device already claimed the signal.
    AlreadyClaimed,
    /// No capacity left.
    Exhausted,
    /// The id is not in the current snapshot.
    Unknown,
}

/// State guarded by one lock: the diff checkpoint must be read and replaced
/// together with the snapshot it was computed from.
struct FeedState {
    snapshot: Vec<Signal>,
    tracker: NewSignalTracker,
    applied_cycle: u64,
}

/// The signal feed service.
pub struct Radar {
    store: Arc<dyn SignalStore>,
    ledger: ClaimLedger,
    alerts: Arc<dyn AlertSink>,
    config: RadarConfig,
    state: Mutex<FeedState>,
    cycle: AtomicU64,
}

impl Radar {
    pub fn new(
        store: Arc<dyn SignalStore>,
        ledger: ClaimLedger,
        alerts: Arc<dyn AlertSink>,
        config: RadarConfig,
    ) -> Self {
        Self {
            store,
            ledger,
            alerts,
            config,
            state: Mutex::new(FeedState {
                snapshot: Vec::new(),
                tracker: NewSignalTracker::new(),
                applied_cycle: 0,
            }),
            cycle: AtomicU64::new(0),
        }
    }

    /// Refetch the collection and recompute the feed state.
    ///
    /// Each call is one cycle; a cycle that resolves after a newer cycle has
    /// already been applied is discarded. Fetch failures and empty results
    /// degrade to the demo dataset instead of surfacing an error.
    pub async fn refresh(&self) {
        let cycle = self.cycle.fetch_add(1, Ordering::SeqCst) + 1;

        let signals = match self.store.fetch_all().await {
            Ok(signals) if !signals.is_empty() => signals,
            Ok(_) => {
                debug!("Store returned no signals, serving the demo dataset");
                mock_store::seed_signals(Utc::now())
            }
            Err(err) => {
                warn!("Fetch failed ({}), serving the demo dataset", err);
                mock_store::seed_signals(Utc::now())
            }
        };

        let fresh = {
            let mut state = self.lock_state();
            if cycle < state.applied_cycle {
                debug!(
                    cycle,
                    applied = state.applied_cycle,
                    "Discarding stale refresh cycle"
                );
                return;
            }
            state.applied_cycle = cycle;
            let fresh = state.tracker.observe(&signals);
            state.snapshot = signals;
            fresh
        };

        for signal in &fresh {
            self.alerts.notify(signal);
        }
    }

    /// The current snapshot, as last fetched.
    pub fn snapshot(&self) -> Vec<Signal> {
        self.lock_state().snapshot.clone()
    }

    /// The annotated, filtered, ordered feed for a viewer.
    ///
    /// `max_distance_km` falls back to the configured cap when `None`.
    pub fn view(&self, viewer: Option<Coordinate>, max_distance_km: Option<f64>) -> Vec<SignalView> {
        let cap = max_distance_km.unwrap_or(self.config.max_distance_km);
        compute_view(&self.lock_state().snapshot, viewer, cap)
    }

    /// Feed aggregates for the stats surface.
    pub fn stats(&self) -> FeedStats {
        FeedStats::collect(&self.lock_state().snapshot)
    }

    /// Marquee lines for the ticker surface.
    pub fn ticker(&self) -> Vec<String> {
        ticker_lines(&self.lock_state().snapshot, Utc::now())
    }

    /// One signal from the current snapshot.
    pub fn signal(&self, id: SignalId) -> Option<Signal> {
        self.lock_state().snapshot.iter().find(|s| s.id == id).cloned()
    }

    /// Whether this device already claimed the signal.
    pub fn has_claimed(&self, id: SignalId) -> bool {
        self.ledger.contains(id)
    }

    /// All ids this device has claimed, oldest first.
    pub fn claimed_ids(&self) -> Vec<SignalId> {
        self.ledger.all()
    }

    /// Declare intent to attend a signal's location.
    ///
    /// No-ops, reported through the outcome, when this device already
    /// claimed the signal, when capacity is exhausted, or when the id is
    /// unknown. On acceptance the store sees `pax - 1` and a fresh
    /// timestamp, the ledger records the claim, and the platform-keyed
    /// navigation link is returned.
    pub async fn claim(&self, id: SignalId, platform: Platform) -> Result<ClaimOutcome> {
        let signal = match self.lock_state().snapshot.iter().find(|s| s.id == id) {
            Some(signal) => signal.clone(),
            None => return Ok(ClaimOutcome::Unknown),
        };

        if self.ledger.contains(id) {
            debug!(id, "Claim skipped: already claimed on this device");
            return Ok(ClaimOutcome::AlreadyClaimed);
        }
        if signal.pax == 0 {
            debug!(id, "Claim skipped: no capacity left");
            return Ok(ClaimOutcome::Exhausted);
        }

        let changes = SignalChanges {
            pax: Some(signal.pax - 1),
            status: None,
            last_updated: Some(Utc::now()),
        };
        self.store.update(id, changes).await?;
        self.ledger.record(id);
        info!(id, pax = signal.pax - 1, "Claim recorded");

        Ok(ClaimOutcome::Accepted {
            navigation_url: navigation_url(platform, signal.position()),
        })
    }

    /// Mark a signal's food exhausted.
    ///
    /// Gated on the finish capability only; the transition itself is
    /// unconditional and harmless to repeat. Returns whether the store was
    /// updated.
    pub async fn mark_finished(&self, id: SignalId) -> Result<bool> {
        if !self.config.can_finish {
            debug!(id, "Mark-finished skipped: capability not granted");
            return Ok(false);
        }

        let changes = SignalChanges {
            pax: Some(0),
            status: Some(SignalStatus::Finished),
            last_updated: Some(Utc::now()),
        };
        self.store.update(id, changes).await?;
        info!(id, "Signal marked finished");
        Ok(true)
    }

    /// Broadcast a new signal.
    ///
    /// Name and food description must be non-empty after trimming; an
    /// invalid draft is refused before any store call. The name is stored
    /// upper-cased, and the position falls back to the default coordinate
    /// when the broadcaster's location is unknown.
    pub async fn broadcast(
        &self,
        draft: BroadcastDraft,
        viewer: Option<Coordinate>,
    ) -> Result<()> {
        let name = draft.name.trim();
        let food_desc = draft.food_desc.trim();
        if name.is_empty() {
            return Err(ServiceError::InvalidDraft("name is required"));
        }
        if food_desc.is_empty() {
            return Err(ServiceError::InvalidDraft("food description is required"));
        }

        let position = viewer.unwrap_or(FALLBACK_POSITION);
        let signal = SignalDraft {
            name: name.to_uppercase(),
            lat: position.lat,
            lng: position.lng,
            food_desc: food_desc.to_string(),
            pax: draft.pax,
            status: draft.status,
            last_updated: Utc::now(),
        };
        self.store.insert(signal).await?;
        info!("Broadcast submitted");
        Ok(())
    }

    /// Run the feed loop: initial refresh, then refetch per change notice.
    ///
    /// Runs until the shutdown future completes or the change feed ends.
    /// Feed errors are logged and skipped; the last snapshot stays served.
    pub async fn run<S>(&self, shutdown: S) -> Result<()>
    where
        S: std::future::Future<Output = ()> + Send,
    {
        info!(store = self.store.name(), "Starting radar feed loop");
        self.refresh().await;

        let mut changes = self.store.subscribe().await?;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    info!("Shutdown signal received, stopping feed loop");
                    return Ok(());
                }

                notice = changes.next() => {
                    match notice {
                        Some(Ok(())) => {
                            debug!("Change notice received, refreshing");
                            self.refresh().await;
                        }
                        Some(Err(err)) => {
                            warn!("Change feed error: {}", err);
                        }
                        None => {
                            error!("Change feed ended");
                            return Err(ServiceError::FeedEnded);
                        }
                    }
                }
            }
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, FeedState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
