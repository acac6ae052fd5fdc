//! `POST /create-task`: create a deliverable record.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use renohub_core::fields;
use renohub_domain::RenoHubError;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::info;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    title: Option<String>,
    category: Option<String>,
    gate: Option<String>,
    #[serde(rename = "dueDate")]
    due_date: Option<String>,
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<Json<Value>, ApiError> {
    let title = request
        .title
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| RenoHubError::InvalidInput("title is required".to_string()))?;

    let database_id = state.config.databases.deliverables.as_deref().ok_or_else(|| {
        RenoHubError::Config("DELIVERABLES_DB_ID is not configured".to_string())
    })?;

    let mut properties = serde_json::Map::new();
    properties.insert(
        fields::DELIVERABLE_TYPE[0].to_string(),
        json!({ "title": [{ "text": { "content": title } }] }),
    );
    if let Some(category) = request.category {
        properties.insert(
            fields::CATEGORY[0].to_string(),
            json!({ "select": { "name": category } }),
        );
    }
    if let Some(gate) = request.gate {
        properties
            .insert(fields::GATE[0].to_string(), json!({ "multi_select": [{ "name": gate }] }));
    }
    if let Some(due_date) = request.due_date {
        properties.insert(
            fields::TARGET_DUE[0].to_string(),
            json!({ "date": { "start": due_date } }),
        );
    }

    let page = state.notion.create_page(database_id, Value::Object(properties)).await?;
    info!(page_id = %page.id, "deliverable created");

    Ok(Json(json!({ "success": true, "id": page.id, "url": page.url })))
}
