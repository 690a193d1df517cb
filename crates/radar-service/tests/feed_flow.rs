//! End-to-end feed flow over the in-memory store: change notices drive
//! refetches, new signals alert, and the view reflects the latest state.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::Utc;
use claim_ledger::{ClaimLedger, MemoryStorage};
use mock_store::MemoryStore;
use radar_core::{Signal, SignalDraft, SignalId, SignalStatus, SignalStore};
use radar_service::{AlertSink, BroadcastDraft, Platform, Radar, RadarConfig};

struct RecordingAlerts {
    seen: Mutex<Vec<SignalId>>,
}

impl RecordingAlerts {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            seen: Mutex::new(Vec::new()),
        })
    }

    fn seen(&self) -> Vec<SignalId> {
        self.seen.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn notify(&self, signal: &Signal) {
        self.seen.lock().unwrap().push(signal.id);
    }
}

async fn settle() {
    tokio::time::sleep(Duration::from_millis(50)).await;
}

#[tokio::test]
async fn test_change_notices_drive_the_feed() {
    let store = Arc::new(MemoryStore::seeded(Utc::now()));
    let alerts = RecordingAlerts::new();
    let radar = Arc::new(Radar::new(
        store.clone(),
        ClaimLedger::open(Box::new(MemoryStorage::new())),
        alerts.clone(),
        RadarConfig {
            max_distance_km: 15.0,
            can_finish: true,
        },
    ));

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let loop_radar = radar.clone();
    let feed_loop = tokio::spawn(async move {
        loop_radar
            .run(async {
                let _ = stop_rx.await;
            })
            .await
    });

    // Initial load happens without any notice
    settle().await;
    assert_eq!(radar.snapshot().len(), 6);
    assert!(alerts.seen().is_empty());

    // A broadcast from elsewhere lands as a change notice and alerts
    store
        .insert(SignalDraft {
            name: "SURAU DAMANSARA".to_string(),
            lat: 3.1478,
            lng: 101.6300,
            food_desc: "Laksa Johor".to_string(),
            pax: 60,
            status: SignalStatus::Active,
            last_updated: Utc::now(),
        })
        .await
        .unwrap();

    settle().await;
    assert_eq!(radar.snapshot().len(), 7);
    assert_eq!(alerts.seen(), vec![7]);

    // Claims flow through the same loop; the refreshed snapshot shows the
    // decrement without an explicit refresh call
    let outcome = radar.claim(7, Platform::Desktop).await.unwrap();
    assert!(matches!(
        outcome,
        radar_service::ClaimOutcome::Accepted { .. }
    ));
    settle().await;
    let snapshot = radar.snapshot();
    assert_eq!(snapshot.iter().find(|s| s.id == 7).unwrap().pax, 59);

    // Broadcasting through the service reaches subscribers too
    radar
        .broadcast(
            BroadcastDraft {
                name: "Surau Sentul".to_string(),
                food_desc: "Bubur Lambuk".to_string(),
                pax: 40,
                status: SignalStatus::Active,
            },
            None,
        )
        .await
        .unwrap();
    settle().await;
    assert_eq!(radar.snapshot().len(), 8);
    assert_eq!(alerts.seen(), vec![7, 8]);

    // Mark-finished flips the entry in the next snapshot
    assert!(radar.mark_finished(7).await.unwrap());
    settle().await;
    let snapshot = radar.snapshot();
    let finished = snapshot.iter().find(|s| s.id == 7).unwrap();
    assert_eq!(finished.status, SignalStatus::Finished);
    assert_eq!(finished.pax, 0);

    let _ = stop_tx.send(());
    feed_loop.await.unwrap().unwrap();
}
