//! Configuration for the hosted table API.

use radar_core::SignalId;

/// Connection settings for the hosted store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Base URL of the table API (e.g., "http://localhost:8090").
    pub base_url: String,
    /// API key sent as a bearer token; `None` for open deployments.
    pub api_key: Option<String>,
    /// Table holding the signal rows.
    pub table: String,
}

impl StoreConfig {
    /// Create a new configuration with the given base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: None,
            table: "signals".to_string(),
        }
    }

    /// Create configuration with an API key.
    pub fn with_api_key(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::new(base_url)
        }
    }

    /// Use a different table name.
    pub fn with_table(mut self, table: impl Into<String>) -> Self {
        self.table = table.into();
        self
    }

    /// Collection endpoint.
    pub fn rows_url(&self) -> String {
        format!("{}/api/v1/tables/{}/rows", self.base_url, self.table)
    }

    /// Single-row endpoint.
    pub fn row_url(&self, id: SignalId) -> String {
        format!("{}/{}", self.rows_url(), id)
    }

    /// Change feed endpoint.
    pub fn events_url(&self) -> String {
        format!("{}/api/v1/tables/{}/events", self.base_url, self.table)
    }

    /// Health check endpoint.
    pub fn health_url(&self) -> String {
        format!("{}/api/v1/health", self.base_url)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new("http://localhost:8090")
    }
}
