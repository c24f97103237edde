//! Axum router setup for webhook endpoints.

use std::sync::Arc;

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::{receiver, subscriptions};
use crate::registry::SubscriptionStore;
use crate::services::verifier::InboundVerifier;

/// Shared state for webhook handlers.
#[derive(Clone)]
pub struct WebhooksState {
    pub store: Arc<dyn SubscriptionStore>,
    pub verifier: Arc<InboundVerifier>,
}

impl WebhooksState {
    /// Create handler state over a subscription store.
    #[must_use]
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self {
            verifier: Arc::new(InboundVerifier::new(Arc::clone(&store))),
            store,
        }
    }
}

/// Creates the webhook router with all routes.
pub fn webhooks_router(state: WebhooksState) -> Router {
    Router::new()
        // Subscription management
        .route(
            "/hooks",
            post(subscriptions::create_hook_handler).get(subscriptions::list_hooks_handler),
        )
        .route("/hooks/:name", delete(subscriptions::delete_hook_handler))
        // Inbound receivers (two equivalent ingress points)
        .route("/whreceiver", post(receiver::receive_hook_handler))
        .route("/whreceiver2", post(receiver::receive_hook_alternate_handler))
        .with_state(state)
}
