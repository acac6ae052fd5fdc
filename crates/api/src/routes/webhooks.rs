//! Webhook endpoints, all behind the shared bearer secret.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::Json;
use chrono::Utc;
use renohub_core::notify::deliverable_update_email;
use renohub_domain::RenoHubError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(rename = "pageId")]
    page_id: Option<String>,
}

/// Bearer check against the shared secret. An unset secret rejects every
/// call so the endpoints fail closed.
fn authorize(state: &AppState, headers: &HeaderMap) -> Result<(), ApiError> {
    let expected = state
        .config
        .webhook_secret
        .as_deref()
        .ok_or_else(|| RenoHubError::Auth("WEBHOOK_SECRET is not configured".to_string()))?;

    let provided = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "));

    if provided != Some(expected) {
        return Err(RenoHubError::Auth("Invalid webhook token".to_string()).into());
    }
    Ok(())
}

fn require_page_id(payload: WebhookPayload) -> Result<String, ApiError> {
    payload
        .page_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| RenoHubError::InvalidInput("pageId is required".to_string()).into())
}

/// Dedupe run for a single submission page.
pub async fn deliverable(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<WebhookPayload>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers)?;
    let page_id = require_page_id(payload)?;

    let outcome = state.dedupe.process_submission(&page_id, Utc::now().date_naive()).await?;
    Ok(Json(json!({ "success": true, "outcome": outcome })))
}

/// Dedupe every page still titled "New submission".
pub async fn dedupe_sweep(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers)?;

    let outcomes = state.dedupe.sweep(Utc::now().date_naive()).await?;
    Ok(Json(json!({ "processed": outcomes.len(), "outcomes": outcomes })))
}

/// Email the owners about a deliverable update.
pub async fn notify(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(payload): Json<WebhookPayload>,
) -> Result<Json<Value>, ApiError> {
    authorize(&state, &headers)?;
    let page_id = require_page_id(payload)?;

    let notifier = state
        .notifier
        .as_ref()
        .ok_or_else(|| RenoHubError::Config("Mail is not configured".to_string()))?;

    let page = state.notion.retrieve_page(&page_id).await?;
    let message = deliverable_update_email(&page);
    notifier.send(&message).await?;

    info!(page_id, "deliverable notification sent");
    Ok(Json(json!({ "success": true })))
}
