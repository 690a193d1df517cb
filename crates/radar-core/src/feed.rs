//! The feed engine: distance annotation, filtering, ordering, and
//! new-signal detection.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::Serialize;

use crate::geo;
use crate::models::{Coordinate, Signal, SignalId, SignalStatus};

/// A signal annotated with the viewer-relative distance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SignalView {
    #[serde(flatten)]
    pub signal: Signal,
    /// Kilometers from the viewer; `None` when the viewer position is unknown.
    pub distance_km: Option<f64>,
}

/// Compute the annotated, filtered, ordered view list.
///
/// Every signal gets a distance relative to `viewer` (or `None` when the
/// viewer position is unknown). The distance cap only excludes signals with
/// a known distance; unknown-distance entries always pass. Ordering is
/// active-first, then ascending distance where both entries have one; the
/// sort is stable, so ties keep collection order. Identical inputs produce
/// an identical sequence.
pub fn compute_view(
    signals: &[Signal],
    viewer: Option<Coordinate>,
    max_distance_km: f64,
) -> Vec<SignalView> {
    let mut view: Vec<SignalView> = signals
        .iter()
        .map(|signal| SignalView {
            distance_km: viewer.map(|v| geo::distance_km(v, signal.position())),
            signal: signal.clone(),
        })
        .filter(|entry| entry.distance_km.map_or(true, |d| d <= max_distance_km))
        .collect();

    view.sort_by(|a, b| {
        match (a.signal.status, b.signal.status) {
            (SignalStatus::Active, SignalStatus::Finished) => return Ordering::Less,
            (SignalStatus::Finished, SignalStatus::Active) => return Ordering::Greater,
            _ => {}
        }
        match (a.distance_km, b.distance_km) {
            (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => Ordering::Equal,
        }
    });

    view
}

/// Aggregates for the stats surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeedStats {
    /// Signals still broadcasting food.
    pub active_count: usize,
    /// Remaining capacity across active signals.
    pub active_pax: u32,
    /// Remaining capacity across all signals.
    pub total_pax: u32,
}

impl FeedStats {
    pub fn collect(signals: &[Signal]) -> Self {
        let mut stats = Self {
            active_count: 0,
            active_pax: 0,
            total_pax: 0,
        };
        for signal in signals {
            stats.total_pax += signal.pax;
            if signal.is_active() {
                stats.active_count += 1;
                stats.active_pax += signal.pax;
            }
        }
        stats
    }
}

/// Detects signals that appeared since the previous snapshot.
///
/// The first observation only establishes the baseline and reports nothing.
/// Each later observation reports active signals whose id was not seen
/// before, in collection order, then replaces the retained id set with the
/// new snapshot's ids in the same call.
#[derive(Debug, Default)]
pub struct NewSignalTracker {
    seen: Option<HashSet<SignalId>>,
}

impl NewSignalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a snapshot and return the newly-appeared active signals.
    pub fn observe(&mut self, signals: &[Signal]) -> Vec<Signal> {
        let ids: HashSet<SignalId> = signals.iter().map(|s| s.id).collect();
        let fresh = match &self.seen {
            None => Vec::new(),
            Some(previous) => signals
                .iter()
                .filter(|s| s.is_active() && !previous.contains(&s.id))
                .cloned()
                .collect(),
        };
        self.seen = Some(ids);
        fresh
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // Roughly one kilometer of latitude
    const KM_LAT: f64 = 1.0 / 111.195;

    fn signal(id: SignalId, status: SignalStatus, km_north: f64) -> Signal {
        Signal {
            id,
            name: format!("MASJID {id}"),
            lat: km_north * KM_LAT,
            lng: 0.0,
            food_desc: "Nasi Lemak".to_string(),
            pax: 40,
            status,
            last_updated: Utc.with_ymd_and_hms(2026, 3, 14, 21, 0, 0).unwrap(),
        }
    }

    fn origin() -> Coordinate {
        Coordinate::new(0.0, 0.0)
    }

    #[test]
    fn test_active_precedes_finished_then_distance() {
        let signals = vec![
            signal(1, SignalStatus::Active, 2.3),
            signal(2, SignalStatus::Finished, 0.5),
            signal(3, SignalStatus::Active, 0.8),
        ];
        let view = compute_view(&signals, Some(origin()), 5.0);
        let order: Vec<SignalId> = view.iter().map(|v| v.signal.id).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_cap_excludes_known_distances_only() {
        let signals = vec![
            signal(1, SignalStatus::Active, 4.0),
            signal(2, SignalStatus::Active, 20.0),
        ];
        let view = compute_view(&signals, Some(origin()), 15.0);
        let ids: Vec<SignalId> = view.iter().map(|v| v.signal.id).collect();
        assert_eq!(ids, vec![1]);
    }

    #[test]
    fn test_unknown_viewer_keeps_everything() {
        let signals = vec![
            signal(1, SignalStatus::Active, 4.0),
            signal(2, SignalStatus::Active, 500.0),
        ];
        let view = compute_view(&signals, None, 1.0);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|v| v.distance_km.is_none()));
    }

    #[test]
    fn test_unknown_distances_keep_collection_order() {
        let signals = vec![
            signal(5, SignalStatus::Active, 9.0),
            signal(2, SignalStatus::Active, 1.0),
            signal(9, SignalStatus::Active, 4.0),
        ];
        let view = compute_view(&signals, None, 15.0);
        let ids: Vec<SignalId> = view.iter().map(|v| v.signal.id).collect();
        assert_eq!(ids, vec![5, 2, 9]);
    }

    #[test]
    fn test_deterministic_for_identical_inputs() {
        let signals = vec![
            signal(1, SignalStatus::Finished, 1.0),
            signal(2, SignalStatus::Active, 3.0),
            signal(3, SignalStatus::Active, 2.0),
            signal(4, SignalStatus::Finished, 0.5),
        ];
        let first = compute_view(&signals, Some(origin()), 10.0);
        let second = compute_view(&signals, Some(origin()), 10.0);
        assert_eq!(first, second);
    }

    #[test]
    fn test_zero_distance_sorts_first_and_passes_filter() {
        let signals = vec![
            signal(1, SignalStatus::Active, 3.0),
            signal(2, SignalStatus::Active, 0.0),
        ];
        let view = compute_view(&signals, Some(origin()), 1.0);
        // A genuine zero distance is a distance, not an unknown
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].signal.id, 2);
        assert_eq!(view[0].distance_km, Some(0.0));
    }

    #[test]
    fn test_stats_aggregates() {
        let mut exhausted = signal(2, SignalStatus::Finished, 1.0);
        exhausted.pax = 0;
        let mut leftover = signal(3, SignalStatus::Finished, 1.0);
        leftover.pax = 5;
        let signals = vec![signal(1, SignalStatus::Active, 1.0), exhausted, leftover];

        let stats = FeedStats::collect(&signals);
        assert_eq!(stats.active_count, 1);
        assert_eq!(stats.active_pax, 40);
        assert_eq!(stats.total_pax, 45);
    }

    #[test]
    fn test_first_observation_is_baseline_only() {
        let mut tracker = NewSignalTracker::new();
        let signals = vec![
            signal(1, SignalStatus::Active, 1.0),
            signal(2, SignalStatus::Active, 2.0),
        ];
        assert!(tracker.observe(&signals).is_empty());
    }

    #[test]
    fn test_new_active_signal_is_reported_once() {
        let mut tracker = NewSignalTracker::new();
        let mut signals = vec![signal(1, SignalStatus::Active, 1.0)];
        tracker.observe(&signals);

        signals.push(signal(2, SignalStatus::Active, 2.0));
        let fresh = tracker.observe(&signals);
        assert_eq!(fresh.len(), 1);
        assert_eq!(fresh[0].id, 2);

        // Same snapshot again: nothing new
        assert!(tracker.observe(&signals).is_empty());
    }

    #[test]
    fn test_new_finished_signal_is_not_reported() {
        let mut tracker = NewSignalTracker::new();
        tracker.observe(&[signal(1, SignalStatus::Active, 1.0)]);

        let next = vec![
            signal(1, SignalStatus::Active, 1.0),
            signal(2, SignalStatus::Finished, 2.0),
        ];
        assert!(tracker.observe(&next).is_empty());
    }

    #[test]
    fn test_new_signals_reported_in_collection_order() {
        let mut tracker = NewSignalTracker::new();
        tracker.observe(&[signal(1, SignalStatus::Active, 1.0)]);

        let next = vec![
            signal(9, SignalStatus::Active, 9.0),
            signal(1, SignalStatus::Active, 1.0),
            signal(4, SignalStatus::Active, 4.0),
        ];
        let fresh: Vec<SignalId> = tracker.observe(&next).iter().map(|s| s.id).collect();
        assert_eq!(fresh, vec![9, 4]);
    }
}
