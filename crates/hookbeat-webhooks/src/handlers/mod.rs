//! Axum handlers for subscription management and the receiver endpoints.

pub mod receiver;
pub mod subscriptions;
