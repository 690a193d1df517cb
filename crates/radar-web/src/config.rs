//! Configuration loaded from environment variables.

use std::env;
use std::net::SocketAddr;

/// Radar web server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server bind address.
    pub addr: SocketAddr,
    /// Hosted store URL; demo mode when unset.
    pub store_url: Option<String>,
    /// API key for the hosted store.
    pub store_api_key: Option<String>,
    /// Path of the persisted claim ledger.
    pub ledger_path: String,
    /// Default distance cap for feed views, in km.
    pub max_distance_km: f64,
    /// Whether this deployment may mark signals finished.
    pub allow_finish: bool,
    /// Whether new-signal alerts are delivered at all.
    pub alerts_enabled: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// | Variable | Description | Default |
    /// |----------|-------------|---------|
    /// | `RADAR_ADDR` | Server bind address | `127.0.0.1:8787` |
    /// | `RADAR_STORE_URL` | Hosted store URL | (unset: demo mode) |
    /// | `RADAR_STORE_API_KEY` | Store API key | (unset) |
    /// | `RADAR_LEDGER_PATH` | Claim ledger file | `rezeki_claimed.json` |
    /// | `RADAR_MAX_DISTANCE_KM` | Default distance cap | `15` |
    /// | `RADAR_ALLOW_FINISH` | Allow mark-finished | `false` |
    /// | `RADAR_ALERTS` | Deliver new-signal alerts | `true` |
    pub fn from_env() -> Result<Self, ConfigError> {
        let addr = env::var("RADAR_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8787".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidAddr)?;

        let store_url = env::var("RADAR_STORE_URL").ok().filter(|v| !v.is_empty());
        let store_api_key = env::var("RADAR_STORE_API_KEY").ok().filter(|v| !v.is_empty());

        let ledger_path = env::var("RADAR_LEDGER_PATH")
            .unwrap_or_else(|_| claim_ledger::DEFAULT_FILE.to_string());

        let max_distance_km = match env::var("RADAR_MAX_DISTANCE_KM") {
            Ok(raw) => raw.parse().map_err(|_| ConfigError::InvalidDistance)?,
            Err(_) => 15.0,
        };

        let allow_finish = env::var("RADAR_ALLOW_FINISH")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let alerts_enabled = env::var("RADAR_ALERTS")
            .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
            .unwrap_or(true);

        Ok(Self {
            addr,
            store_url,
            store_api_key,
            ledger_path,
            max_distance_km,
            allow_finish,
            alerts_enabled,
        })
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid RADAR_ADDR format")]
    InvalidAddr,

    #[error("Invalid RADAR_MAX_DISTANCE_KM value")]
    InvalidDistance,
}
