//! CRUD handlers for webhook subscriptions.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::error::ApiResult;
use crate::models::{CreateHookRequest, HookResponse, HookSubscription};
use crate::router::WebhooksState;

/// Register a new webhook subscription.
///
/// Returns 409 when a subscription with the same name (ignoring case)
/// already exists. The secret is accepted but never echoed back.
pub async fn create_hook_handler(
    State(state): State<WebhooksState>,
    Json(request): Json<CreateHookRequest>,
) -> ApiResult<(StatusCode, Json<HookResponse>)> {
    let subscription = HookSubscription {
        name: request.name,
        url: request.url,
        secret: request.secret,
    };
    let response = HookResponse {
        name: subscription.name.clone(),
        url: subscription.url.clone(),
    };

    state.store.add(subscription).await?;

    info!(name = %response.name, url = %response.url, "Registered webhook subscription");
    Ok((StatusCode::CREATED, Json(response)))
}

/// Delete subscriptions by name, ignoring case.
///
/// Deleting an absent name is not an error.
pub async fn delete_hook_handler(
    State(state): State<WebhooksState>,
    Path(name): Path<String>,
) -> StatusCode {
    let removed = state.store.remove_by_name(&name).await;
    info!(name = %name, removed, "Deleted webhook subscription");
    StatusCode::NO_CONTENT
}

/// List all webhook subscriptions, secrets redacted.
pub async fn list_hooks_handler(State(state): State<WebhooksState>) -> Json<Vec<HookResponse>> {
    let hooks = state
        .store
        .list()
        .await
        .into_iter()
        .map(|s| HookResponse {
            name: s.name,
            url: s.url,
        })
        .collect();

    Json(hooks)
}
