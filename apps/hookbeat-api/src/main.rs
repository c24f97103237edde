//! Hookbeat — periodic webhook notifier.
//!
//! Serves the subscription management and receiver endpoints while a
//! background worker fans signed tick events out to every subscriber.

mod config;
mod logging;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Json;
use tokio::signal;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use config::Config;
use hookbeat_webhooks::{
    webhooks_router, DispatchConfig, DispatchWorker, InMemoryStore, SubscriptionStore,
    WebhooksState,
};

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        dispatch_period_secs = config.dispatch_period_secs,
        "Starting hookbeat API"
    );

    let store: Arc<dyn SubscriptionStore> = Arc::new(InMemoryStore::new());

    let worker = match DispatchWorker::new(
        Arc::clone(&store),
        DispatchConfig {
            period: Duration::from_secs(config.dispatch_period_secs),
            delivery_timeout: Duration::from_secs(config.delivery_timeout_secs),
        },
    ) {
        Ok(worker) => Arc::new(worker),
        Err(e) => {
            eprintln!("FATAL: {e}");
            std::process::exit(1);
        }
    };

    let worker_task = {
        let worker = Arc::clone(&worker);
        tokio::spawn(async move { worker.run().await })
    };

    let app = webhooks_router(WebhooksState::new(store))
        .route("/healthz", get(healthz_handler))
        .layer(TraceLayer::new_for_http());

    let addr = match format!("{}:{}", config.host, config.port).parse::<SocketAddr>() {
        Ok(addr) => addr,
        Err(e) => {
            eprintln!("FATAL: Invalid listen address: {e}");
            std::process::exit(1);
        }
    };
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            eprintln!("FATAL: Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };
    info!(%addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!(error = %e, "Server error");
    }

    // Stop scheduling ticks; an in-flight tick completes before the task ends.
    worker.shutdown();
    if let Err(e) = worker_task.await {
        error!(error = %e, "Dispatch worker task failed");
    }

    info!("Server shutdown complete");
}

/// Liveness endpoint.
async fn healthz_handler() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => {}
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
