//! Application configuration loaded from environment variables.
//!
//! Every tunable has a default; a missing or unparsable value falls back
//! rather than failing startup.

use std::env;
use std::str::FromStr;

use hookbeat_webhooks::services::dispatcher::{
    DEFAULT_DELIVERY_TIMEOUT_SECS, DEFAULT_DISPATCH_PERIOD_SECS,
};

/// Runtime configuration for the hookbeat service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Listen host (default `0.0.0.0`).
    pub host: String,
    /// Listen port (default 8080).
    pub port: u16,
    /// Seconds between dispatch ticks (default 30).
    pub dispatch_period_secs: u64,
    /// Per-delivery timeout in seconds (default 10).
    pub delivery_timeout_secs: u64,
    /// Log filter directive (default `info`).
    pub rust_log: String,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: parse_or(env::var("PORT").ok(), 8080),
            dispatch_period_secs: parse_or(
                env::var("DISPATCH_PERIOD_SECS").ok(),
                DEFAULT_DISPATCH_PERIOD_SECS,
            ),
            delivery_timeout_secs: parse_or(
                env::var("DELIVERY_TIMEOUT_SECS").ok(),
                DEFAULT_DELIVERY_TIMEOUT_SECS,
            ),
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

/// Parse an optional string, falling back to `default` when the value is
/// absent or unparsable.
fn parse_or<T: FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|s| s.parse().ok()).unwrap_or(default)
}
