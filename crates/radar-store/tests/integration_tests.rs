//! Integration tests for radar-store.
//!
//! Tests that need a live table API are ignored by default. Point
//! `RADAR_STORE_URL` at a running backend and run them with:
//!   cargo test --test integration_tests -- --ignored

use radar_store::{RestError, RestStore, StoreConfig};
use std::env;

/// Helper to get the backend URL from the environment.
fn get_store_url() -> Option<String> {
    env::var("RADAR_STORE_URL").ok()
}

// ============================================================================
// Unit tests (no backend required)
// ============================================================================

mod config_tests {
    use super::*;

    #[test]
    fn test_store_config_default() {
        let config = StoreConfig::default();
        assert_eq!(config.base_url, "http://localhost:8090");
        assert!(config.api_key.is_none());
        assert_eq!(config.table, "signals");
    }

    #[test]
    fn test_store_config_new() {
        let config = StoreConfig::new("http://127.0.0.1:9000");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_store_config_with_api_key() {
        let config = StoreConfig::with_api_key("http://localhost:8090", "secret");
        assert_eq!(config.api_key, Some("secret".to_string()));
    }

    #[test]
    fn test_store_config_urls() {
        let config = StoreConfig::new("http://localhost:8090");
        assert_eq!(
            config.rows_url(),
            "http://localhost:8090/api/v1/tables/signals/rows"
        );
        assert_eq!(
            config.row_url(5),
            "http://localhost:8090/api/v1/tables/signals/rows/5"
        );
        assert_eq!(
            config.events_url(),
            "http://localhost:8090/api/v1/tables/signals/events"
        );
        assert_eq!(config.health_url(), "http://localhost:8090/api/v1/health");
    }

    #[test]
    fn test_store_config_with_table() {
        let config = StoreConfig::new("http://localhost:8090").with_table("mosques");
        assert_eq!(
            config.rows_url(),
            "http://localhost:8090/api/v1/tables/mosques/rows"
        );
    }
}

// ============================================================================
// Integration tests (require a running backend)
// ============================================================================

mod connection_tests {
    use super::*;

    /// Test connection failure to a non-existent backend.
    #[tokio::test]
    async fn test_connect_failure() {
        let config = StoreConfig::new("http://127.0.0.1:59999");
        let result = RestStore::connect(config).await;
        assert!(result.is_err());
        match result.unwrap_err() {
            RestError::Http(_) => {} // Expected
            e => panic!("Unexpected error type: {:?}", e),
        }
    }

    /// Test connecting to a running backend.
    #[tokio::test]
    #[ignore = "requires running backend"]
    async fn test_connect() {
        let url = get_store_url().expect("RADAR_STORE_URL not set");
        let store = RestStore::connect(StoreConfig::new(url)).await;
        assert!(store.is_ok(), "Failed to connect: {:?}", store.err());
        assert!(store.unwrap().is_connected());
    }

    /// Test fetching the collection from a running backend.
    #[tokio::test]
    #[ignore = "requires running backend"]
    async fn test_fetch_all() {
        use radar_core::SignalStore;

        let url = get_store_url().expect("RADAR_STORE_URL not set");
        let store = RestStore::connect(StoreConfig::new(url)).await.unwrap();

        let signals = store.fetch_all().await.unwrap();
        println!("fetched {} signals", signals.len());
    }
}
