//! Rezeki Radar web server.
//!
//! Serves the signal feed as JSON and accepts broadcast, claim, and
//! mark-finished operations over HTTP. With `RADAR_STORE_URL` set the feed
//! follows the hosted store's change feed; without it the server runs in
//! demo mode over the in-memory dataset.

mod config;
mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::http::{header::CONTENT_TYPE, Method};
use claim_ledger::{ClaimLedger, FileStorage};
use mock_store::MemoryStore;
use radar_core::SignalStore;
use radar_service::{AlertSink, LogAlerts, NullAlerts, Radar, RadarConfig};
use radar_store::{RestStore, StoreConfig};
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    info!(addr = %config.addr, "Starting radar web server");

    // Hosted store when configured, demo dataset otherwise
    let store: Arc<dyn SignalStore> = match &config.store_url {
        Some(url) => {
            let store_config = match &config.store_api_key {
                Some(key) => StoreConfig::with_api_key(url, key),
                None => StoreConfig::new(url),
            };
            Arc::new(RestStore::connect(store_config).await?)
        }
        None => {
            warn!("RADAR_STORE_URL not set, running in demo mode");
            Arc::new(MemoryStore::seeded(chrono::Utc::now()))
        }
    };

    let ledger = ClaimLedger::open(Box::new(FileStorage::new(&config.ledger_path)));

    // Alerting is skipped entirely when disabled, never retried
    let alerts: Arc<dyn AlertSink> = if config.alerts_enabled {
        Arc::new(LogAlerts)
    } else {
        Arc::new(NullAlerts)
    };

    let radar = Arc::new(Radar::new(
        store,
        ledger,
        alerts,
        RadarConfig {
            max_distance_km: config.max_distance_km,
            can_finish: config.allow_finish,
        },
    ));

    // Feed loop: initial load, then refetch per change notice
    let feed_radar = radar.clone();
    tokio::spawn(async move {
        if let Err(err) = feed_radar.run(shutdown_signal()).await {
            error!("Feed loop stopped: {}", err);
        }
    });

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]);

    let app = routes::router().layer(cors).with_state(AppState::new(radar));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    info!(addr = %config.addr, "Radar web server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received terminate signal, shutting down"),
    }
}
