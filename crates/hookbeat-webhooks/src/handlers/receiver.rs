//! Receiver endpoints for inbound signed webhook callbacks.
//!
//! Two routes share one verification path; the second exists purely as an
//! alternate ingress point. Verification failures are reported in the
//! response body, never as HTTP errors.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use tracing::{error, info};

use crate::models::{InboundAck, TickEvent, HOOK_NAME_HEADER, HOOK_SIGNATURE_HEADER, UNSET_HOOK_NAME};
use crate::router::WebhooksState;
use crate::services::verifier::VerifyOutcome;

pub async fn receive_hook_handler(
    State(state): State<WebhooksState>,
    headers: HeaderMap,
    Json(event): Json<TickEvent>,
) -> Json<InboundAck> {
    receive(&state, &headers, &event, "/whreceiver").await
}

pub async fn receive_hook_alternate_handler(
    State(state): State<WebhooksState>,
    headers: HeaderMap,
    Json(event): Json<TickEvent>,
) -> Json<InboundAck> {
    receive(&state, &headers, &event, "/whreceiver2").await
}

async fn receive(
    state: &WebhooksState,
    headers: &HeaderMap,
    event: &TickEvent,
    route: &str,
) -> Json<InboundAck> {
    info!(count = event.count, route, "Received inbound hook message");

    let hook_name = headers
        .get(HOOK_NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or(UNSET_HOOK_NAME);
    let signature = headers
        .get(HOOK_SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());

    // The signature covers the canonical serialization of the payload, so
    // re-serialize the parsed model rather than trusting raw request bytes.
    let outcome = match serde_json::to_vec(event) {
        Ok(body) => state.verifier.handle_inbound(&body, hook_name, signature).await,
        Err(e) => {
            error!(route, error = %e, "Failed to serialize inbound payload for verification");
            VerifyOutcome::Rejected
        }
    };

    Json(InboundAck {
        outcome: outcome.as_str().to_string(),
    })
}
