//! Inbound webhook signature verification.
//!
//! Looks the claimed subscriber up in the registry, recomputes the
//! expected signature with that subscriber's secret, and records the
//! outcome. Verification failures are normal outcomes, never errors that
//! escape this boundary.

use std::sync::Arc;

use tracing::{info, warn};

use crate::crypto;
use crate::registry::SubscriptionStore;

/// Result of verifying one inbound message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// Signature matched the subscriber's secret.
    Accepted,
    /// Signature was missing, malformed, or did not match.
    Rejected,
    /// No registered subscriber matches the claimed name.
    Unknown,
}

impl VerifyOutcome {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
            Self::Unknown => "unknown",
        }
    }
}

/// Verifies inbound signed messages against the subscription registry.
pub struct InboundVerifier {
    store: Arc<dyn SubscriptionStore>,
}

impl InboundVerifier {
    #[must_use]
    pub fn new(store: Arc<dyn SubscriptionStore>) -> Self {
        Self { store }
    }

    /// Verify one inbound message.
    ///
    /// The subscriber lookup is an exact name match. The signature header
    /// may carry a `sha256=` prefix; hex digits compare case-insensitively.
    /// Every outcome is recorded in the log, keyed by subscriber name.
    pub async fn handle_inbound(
        &self,
        body: &[u8],
        claimed_name: &str,
        signature_header: Option<&str>,
    ) -> VerifyOutcome {
        let Some(subscription) = self.store.find_by_name(claimed_name).await else {
            info!(
                subscriber = claimed_name,
                "Inbound message for unknown subscriber"
            );
            return VerifyOutcome::Unknown;
        };

        let Some(candidate) = signature_header else {
            warn!(
                subscriber = %subscription.name,
                "Inbound message missing signature header"
            );
            return VerifyOutcome::Rejected;
        };

        if crypto::verify(body, subscription.secret.as_bytes(), candidate) {
            info!(subscriber = %subscription.name, "Received a valid signed message");
            VerifyOutcome::Accepted
        } else {
            warn!(subscriber = %subscription.name, "Received an invalid signed message");
            VerifyOutcome::Rejected
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
