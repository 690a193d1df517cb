//! Hosted table API HTTP client.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use radar_core::{
    ChangeStream, Signal, SignalChanges, SignalDraft, SignalId, SignalStore, StoreError,
};

use crate::changes::{ChangeFeed, ReconnectConfig};
use crate::config::StoreConfig;
use crate::error::RestError;

/// Client for the hosted table API.
#[derive(Clone)]
pub struct RestStore {
    http: Client,
    config: StoreConfig,
    reconnect: ReconnectConfig,
    connected: Arc<AtomicBool>,
}

impl RestStore {
    /// Connect to the table API and verify it is reachable.
    pub async fn connect(config: StoreConfig) -> Result<Self, RestError> {
        Self::connect_with_reconnect(config, ReconnectConfig::default()).await
    }

    /// Connect with a custom change-feed backoff policy.
    pub async fn connect_with_reconnect(
        config: StoreConfig,
        reconnect: ReconnectConfig,
    ) -> Result<Self, RestError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(RestError::Http)?;

        let store = Self {
            http,
            config,
            reconnect,
            connected: Arc::new(AtomicBool::new(false)),
        };

        // Verify connection with health check
        if store.health_check().await? {
            store.connected.store(true, Ordering::SeqCst);
            info!("Connected to table API at {}", store.config.base_url);
        } else {
            return Err(RestError::HealthCheckFailed);
        }

        Ok(store)
    }

    /// Check if currently connected to the API.
    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    /// Perform a health check against the API.
    pub async fn health_check(&self) -> Result<bool, RestError> {
        let url = self.config.health_url();
        debug!("Health check: {}", url);

        match self.authed(self.http.get(&url)).send().await {
            Ok(resp) => {
                let ok = resp.status().is_success();
                self.connected.store(ok, Ordering::SeqCst);
                Ok(ok)
            }
            Err(e) => {
                self.connected.store(false, Ordering::SeqCst);
                Err(RestError::Http(e))
            }
        }
    }

    /// Get the configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.config.api_key {
            Some(key) => request.bearer_auth(key),
            None => request,
        }
    }

    async fn expect_success(resp: reqwest::Response) -> Result<reqwest::Response, RestError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let body = resp.text().await.unwrap_or_default();
        Err(RestError::Api {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl SignalStore for RestStore {
    async fn fetch_all(&self) -> Result<Vec<Signal>, StoreError> {
        let url = format!("{}?order=last_updated.desc", self.config.rows_url());
        debug!("Fetching signals: {}", url);

        let resp = self
            .authed(self.http.get(&url))
            .send()
            .await
            .map_err(RestError::Http)?;
        let resp = Self::expect_success(resp).await?;
        let signals = resp.json::<Vec<Signal>>().await.map_err(RestError::Http)?;

        debug!("Fetched {} signals", signals.len());
        Ok(signals)
    }

    async fn insert(&self, draft: SignalDraft) -> Result<(), StoreError> {
        debug!("Inserting signal: {}", draft.name);

        let resp = self
            .authed(self.http.post(self.config.rows_url()))
            .json(&draft)
            .send()
            .await
            .map_err(RestError::Http)?;
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn update(&self, id: SignalId, changes: SignalChanges) -> Result<(), StoreError> {
        debug!("Updating signal {}", id);

        let resp = self
            .authed(self.http.patch(self.config.row_url(id)))
            .json(&changes)
            .send()
            .await
            .map_err(RestError::Http)?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(StoreError::NotFound(id));
        }
        Self::expect_success(resp).await?;
        Ok(())
    }

    async fn subscribe(&self) -> Result<ChangeStream, StoreError> {
        let feed = ChangeFeed::new(self.config.clone(), self.reconnect.clone())?;
        Ok(Box::pin(feed))
    }

    fn name(&self) -> &str {
        "rest"
    }
}

impl std::fmt::Debug for RestStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestStore")
            .field("config", &self.config)
            .field("connected", &self.is_connected())
            .finish()
    }
}
