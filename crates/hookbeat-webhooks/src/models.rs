//! Domain and wire types shared across the webhook system.

use serde::{Deserialize, Serialize};

/// Header carrying the subscriber name on outbound deliveries.
pub const HOOK_NAME_HEADER: &str = "X-Hook-Name";

/// Header carrying the payload signature, prefixed with `sha256=`.
pub const HOOK_SIGNATURE_HEADER: &str = "X-Hook-Signature-256";

/// Subscriber name assumed when an inbound request omits the name header.
pub const UNSET_HOOK_NAME: &str = "unset";

/// A registered webhook subscription.
///
/// `name` is the unique identifier; uniqueness and removal are
/// case-insensitive. `secret` is the shared HMAC signing key and is never
/// logged or echoed back through the API.
#[derive(Clone, PartialEq, Eq)]
pub struct HookSubscription {
    pub name: String,
    pub url: String,
    pub secret: String,
}

impl std::fmt::Debug for HookSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookSubscription")
            .field("name", &self.name)
            .field("url", &self.url)
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Payload delivered to every subscriber on each dispatch tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickEvent {
    /// Process-wide tick sequence number, incremented once per tick.
    pub count: u64,
}

// ---------------------------------------------------------------------------
// API request/response types
// ---------------------------------------------------------------------------

/// Request body for registering a subscription.
#[derive(Clone, Deserialize)]
pub struct CreateHookRequest {
    pub name: String,
    pub url: String,
    pub secret: String,
}

/// Subscription as exposed through the API, with the secret redacted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HookResponse {
    pub name: String,
    pub url: String,
}

/// Acknowledgement returned by the receiver endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InboundAck {
    pub outcome: String,
}
