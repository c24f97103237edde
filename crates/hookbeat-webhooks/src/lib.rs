//! Webhook notification system with periodic signed dispatch.
//!
//! Provides an in-memory webhook subscription registry, a background worker
//! that fans a counter event out to every subscriber with an HMAC-SHA256
//! signature on a fixed interval, and a receiver that verifies inbound
//! signed messages against the same registry.

pub mod crypto;
pub mod error;
pub mod handlers;
pub mod models;
pub mod registry;
pub mod router;
pub mod services;

pub use error::WebhookError;
pub use models::{HookSubscription, TickEvent};
pub use registry::{InMemoryStore, SubscriptionStore};
pub use router::{webhooks_router, WebhooksState};
pub use services::dispatcher::{DispatchConfig, DispatchWorker};
pub use services::verifier::{InboundVerifier, VerifyOutcome};
