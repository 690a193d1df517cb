//! Server-Sent Events change feed.
//!
//! The backend emits a `change` event for every table mutation. Notices
//! carry no payload; consumers refetch the collection.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use futures::stream::Stream;
use reqwest_eventsource::{Event, EventSource, RequestBuilderExt};
use tracing::{debug, error, info, warn};

use radar_core::StoreError;

use crate::config::StoreConfig;
use crate::error::RestError;

/// Backoff policy for re-establishing the change feed.
#[derive(Debug, Clone)]
pub struct ReconnectConfig {
    /// Maximum number of retries (None = infinite).
    pub max_retries: Option<u32>,
    /// Initial delay before first retry.
    pub initial_delay: Duration,
    /// Maximum delay between retries.
    pub max_delay: Duration,
    /// Backoff multiplier for each retry.
    pub backoff_multiplier: f64,
}

impl Default for ReconnectConfig {
    fn default() -> Self {
        Self {
            max_retries: None,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
            backoff_multiplier: 2.0,
        }
    }
}

impl ReconnectConfig {
    /// Calculate delay for a given attempt number.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let delay_ms = self.initial_delay.as_millis() as f64
            * self.backoff_multiplier.powi(attempt as i32);
        let delay = Duration::from_millis(delay_ms as u64);
        delay.min(self.max_delay)
    }

    /// Check if we should retry after the given number of attempts.
    pub fn should_retry(&self, attempts: u32) -> bool {
        self.max_retries.map_or(true, |max| attempts < max)
    }
}

enum FeedState {
    Open(EventSource),
    Backoff(Pin<Box<tokio::time::Sleep>>),
}

/// A stream of no-payload change notices for one table.
///
/// Connection drops are retried with the configured backoff; the stream
/// only yields an error once retries are exhausted.
pub struct ChangeFeed {
    state: FeedState,
    config: StoreConfig,
    reconnect: ReconnectConfig,
    attempts: u32,
}

impl ChangeFeed {
    /// Open the feed for the configured table.
    pub fn new(config: StoreConfig, reconnect: ReconnectConfig) -> Result<Self, RestError> {
        let event_source = Self::open(&config)?;
        Ok(Self {
            state: FeedState::Open(event_source),
            config,
            reconnect,
            attempts: 0,
        })
    }

    fn open(config: &StoreConfig) -> Result<EventSource, RestError> {
        let url = config.events_url();
        info!("Creating SSE connection to {}", url);

        // Separate HTTP client without timeout: the feed is long-lived
        let sse_client = reqwest::Client::builder().build().map_err(RestError::Http)?;

        let mut request = sse_client.get(&url);
        if let Some(key) = &config.api_key {
            request = request.bearer_auth(key);
        }
        request
            .eventsource()
            .map_err(|e| RestError::Sse(e.to_string()))
    }
}

impl Stream for ChangeFeed {
    type Item = Result<(), StoreError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        loop {
            let next_state = match &mut this.state {
                FeedState::Backoff(sleep) => match sleep.as_mut().poll(cx) {
                    Poll::Pending => return Poll::Pending,
                    Poll::Ready(()) => match ChangeFeed::open(&this.config) {
                        Ok(event_source) => Some(FeedState::Open(event_source)),
                        Err(e) => {
                            error!("Change feed reconnect failed: {}", e);
                            return Poll::Ready(Some(Err(StoreError::from(e))));
                        }
                    },
                },
                FeedState::Open(event_source) => match Pin::new(event_source).poll_next(cx) {
                    Poll::Ready(Some(Ok(Event::Open))) => {
                        debug!("SSE connection opened");
                        this.attempts = 0;
                        None
                    }
                    Poll::Ready(Some(Ok(Event::Message(msg)))) => {
                        if msg.event == "change" {
                            debug!("Received change notice");
                            return Poll::Ready(Some(Ok(())));
                        }
                        debug!("Ignoring SSE event type: {}", msg.event);
                        None
                    }
                    Poll::Ready(Some(Err(e))) => {
                        if this.reconnect.should_retry(this.attempts) {
                            let delay = this.reconnect.delay_for_attempt(this.attempts);
                            this.attempts += 1;
                            warn!(
                                "SSE error: {}, reconnecting in {:?} (attempt {})",
                                e, delay, this.attempts
                            );
                            Some(FeedState::Backoff(Box::pin(tokio::time::sleep(delay))))
                        } else {
                            error!("SSE error: {}, retries exhausted", e);
                            return Poll::Ready(Some(Err(StoreError::Subscribe(e.to_string()))));
                        }
                    }
                    Poll::Ready(None) => {
                        info!("SSE stream ended");
                        return Poll::Ready(None);
                    }
                    Poll::Pending => return Poll::Pending,
                },
            };

            if let Some(state) = next_state {
                this.state = state;
            }
        }
    }
}
