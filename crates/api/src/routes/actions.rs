//! `POST /proxy`: password-gated mutations and the KPI summary.

use std::sync::Arc;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use renohub_core::summary::build_summary_prompt;
use renohub_core::{fields, properties};
use renohub_domain::{norm_key, Kpis, RenoHubError};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProxyRequest {
    action: Option<String>,
    password: Option<String>,
    #[serde(rename = "pageId")]
    page_id: Option<String>,
    #[serde(rename = "gateName")]
    gate_name: Option<String>,
    kpis: Option<Kpis>,
}

pub async fn post_proxy(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ProxyRequest>,
) -> Result<Response, ApiError> {
    let Some(action) = request.action.as_deref() else {
        return summarize(&state, request.kpis.unwrap_or_default()).await;
    };

    // No configured password means no mutations at all.
    let authorized = state
        .config
        .update_password
        .as_deref()
        .is_some_and(|expected| request.password.as_deref() == Some(expected));
    if !authorized {
        return Err(RenoHubError::Auth("Incorrect password".to_string()).into());
    }

    match action {
        "mark_payment_paid" => mark_payment_paid(&state, request.page_id).await,
        "mark_gate_approved" => mark_gate_approved(&state, request.gate_name).await,
        other => {
            Err(RenoHubError::InvalidInput(format!("Unknown action: {other}")).into())
        }
    }
}

async fn summarize(state: &AppState, kpis: Kpis) -> Result<Response, ApiError> {
    let summarizer = state.summarizer.as_ref().ok_or_else(|| {
        RenoHubError::Config("GEMINI_API_KEY is not configured".to_string())
    })?;

    let prompt = build_summary_prompt(&kpis);
    let summary = summarizer.generate(&prompt).await?;
    Ok(Json(json!({ "summary": summary })).into_response())
}

async fn mark_payment_paid(
    state: &AppState,
    page_id: Option<String>,
) -> Result<Response, ApiError> {
    let page_id = page_id
        .ok_or_else(|| RenoHubError::InvalidInput("pageId is required".to_string()))?;

    let today = Utc::now().date_naive();
    state
        .notion
        .update_page(
            &page_id,
            json!({
                "Status": { "status": { "name": "Paid" } },
                "PaidDate": { "date": { "start": today.to_string() } }
            }),
        )
        .await?;

    info!(page_id, "payment marked paid");
    Ok(Json(json!({ "success": true, "message": "Payment marked as paid." })).into_response())
}

/// Approve every required deliverable of one gate. Construction Certificate
/// records track approval in Review Status instead of Status.
async fn mark_gate_approved(
    state: &AppState,
    gate_name: Option<String>,
) -> Result<Response, ApiError> {
    let gate_name = gate_name
        .ok_or_else(|| RenoHubError::InvalidInput("gateName is required".to_string()))?;

    let required = state.config.gates.required_for(&gate_name);
    let pages = state
        .notion
        .query_all(state.config.databases.deliverables.as_deref(), None)
        .await?;

    let mut approved = 0usize;
    for page in &pages {
        let gate = properties::text(page, fields::GATE_AUTO);
        let doc_type = properties::text(page, fields::DELIVERABLE_TYPE);
        let matches = norm_key(&gate) == norm_key(&gate_name)
            && required.iter().any(|req| norm_key(req) == norm_key(&doc_type));
        if !matches {
            continue;
        }

        let category = properties::text(page, fields::CATEGORY);
        let update = if category == "Construction Certificate" {
            json!({ "Review Status": { "select": { "name": "Approved" } } })
        } else {
            json!({ "Status": { "select": { "name": "Approved" } } })
        };
        state.notion.update_page(&page.id, update).await?;
        approved += 1;
    }

    info!(gate = %gate_name, approved, "gate approval applied");
    Ok(Json(json!({
        "success": true,
        "message": format!("All deliverables for {gate_name} approved.")
    }))
    .into_response())
}
