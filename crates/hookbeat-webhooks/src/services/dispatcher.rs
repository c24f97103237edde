//! Periodic webhook dispatch worker.
//!
//! On a fixed interval the worker builds one counter event, signs it per
//! subscriber with HMAC-SHA256, and POSTs it to every registered URL.
//! Failures are isolated per subscriber; a bad tick never stops the loop.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tokio::sync::Notify;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

use crate::crypto;
use crate::error::WebhookError;
use crate::models::{HookSubscription, TickEvent, HOOK_NAME_HEADER, HOOK_SIGNATURE_HEADER};
use crate::registry::SubscriptionStore;

/// Default dispatch interval in seconds.
pub const DEFAULT_DISPATCH_PERIOD_SECS: u64 = 30;

/// Default per-delivery timeout in seconds, so one unresponsive
/// subscriber cannot stall a tick indefinitely.
pub const DEFAULT_DELIVERY_TIMEOUT_SECS: u64 = 10;

/// Configuration for the dispatch worker.
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Interval between ticks.
    pub period: Duration,
    /// Upper bound on a single outbound delivery.
    pub delivery_timeout: Duration,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            period: Duration::from_secs(DEFAULT_DISPATCH_PERIOD_SECS),
            delivery_timeout: Duration::from_secs(DEFAULT_DELIVERY_TIMEOUT_SECS),
        }
    }
}

/// Background worker that fans signed tick events out to all subscribers.
pub struct DispatchWorker {
    store: Arc<dyn SubscriptionStore>,
    http_client: Client,
    period: Duration,
    tick_count: AtomicU64,
    shutdown: AtomicBool,
    shutdown_notify: Notify,
}

impl DispatchWorker {
    /// Create a new worker with a shared HTTP client.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Internal` if the HTTP client cannot be built.
    pub fn new(
        store: Arc<dyn SubscriptionStore>,
        config: DispatchConfig,
    ) -> Result<Self, WebhookError> {
        let http_client = Client::builder()
            .timeout(config.delivery_timeout)
            .user_agent(concat!("hookbeat/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| WebhookError::Internal(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            store,
            http_client,
            period: config.period,
            tick_count: AtomicU64::new(0),
            shutdown: AtomicBool::new(false),
            shutdown_notify: Notify::new(),
        })
    }

    /// Run the dispatch loop until shutdown is requested.
    ///
    /// The first tick fires immediately, then every `period`. Ticks are
    /// serialized through this task: a tick that overruns the interval
    /// causes the missed firings to be skipped, never overlapped. An
    /// in-flight tick always completes before the loop exits.
    pub async fn run(&self) {
        info!(period_secs = self.period.as_secs(), "Starting dispatch worker");

        let mut ticker = tokio::time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if self.is_shutdown() {
                        break;
                    }
                    self.tick().await;
                }
                _ = self.shutdown_notify.notified() => {
                    break;
                }
            }
        }

        info!("Dispatch worker stopped");
    }

    /// Request shutdown from any task. No new tick starts afterward.
    pub fn shutdown(&self) {
        info!("Dispatch worker shutdown requested");
        self.shutdown.store(true, Ordering::Release);
        self.shutdown_notify.notify_one();
    }

    /// Whether shutdown has been requested.
    #[must_use]
    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Run a single dispatch cycle and return its sequence number.
    ///
    /// The counter increments exactly once per tick, including ticks with
    /// no subscribers. Payload construction failures are contained here so
    /// the recurring loop survives them.
    pub async fn tick(&self) -> u64 {
        let count = self.tick_count.fetch_add(1, Ordering::SeqCst) + 1;
        let event = TickEvent { count };

        let body = match serde_json::to_vec(&event) {
            Ok(body) => body,
            Err(e) => {
                error!(count, error = %e, "Failed to serialize tick payload, skipping tick");
                return count;
            }
        };

        let subscriptions = self.store.list().await;
        if subscriptions.is_empty() {
            info!(count, "No subscribers registered, nothing to dispatch");
            return count;
        }

        for subscription in &subscriptions {
            self.deliver(subscription, &body).await;
        }

        info!(
            count,
            subscriber_count = subscriptions.len(),
            "Dispatch tick complete"
        );
        count
    }

    /// Deliver one signed payload to one subscriber.
    ///
    /// A transport failure or non-success status is logged as a warning and
    /// does not affect delivery to the remaining subscribers.
    async fn deliver(&self, subscription: &HookSubscription, body: &[u8]) {
        let signature = crypto::sign(body, subscription.secret.as_bytes());

        let result = self
            .http_client
            .post(&subscription.url)
            .header(CONTENT_TYPE, "application/json")
            .header(HOOK_NAME_HEADER, &subscription.name)
            .header(HOOK_SIGNATURE_HEADER, format!("sha256={signature}"))
            .body(body.to_vec())
            .send()
            .await;

        match result {
            Ok(response) if response.status().is_success() => {
                debug!(
                    name = %subscription.name,
                    url = %subscription.url,
                    status = response.status().as_u16(),
                    "Webhook delivered"
                );
            }
            Ok(response) => {
                warn!(
                    name = %subscription.name,
                    url = %subscription.url,
                    status = response.status().as_u16(),
                    "Subscriber returned non-success status"
                );
            }
            Err(e) => {
                warn!(
                    name = %subscription.name,
                    url = %subscription.url,
                    error = %e,
                    "Webhook delivery failed"
                );
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
