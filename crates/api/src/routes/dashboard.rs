//! `GET /proxy`: the full dashboard payload.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use renohub_core::{finance, reconcile};
use renohub_domain::Dashboard;
use serde_json::json;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Dashboard>, ApiError> {
    let db = &state.config.databases;
    let notion = &state.notion;

    let (budget, actuals, milestones, deliverables, vendors, payments, work_packages, activity_log) =
        tokio::try_join!(
            notion.query_all(db.budget.as_deref(), None),
            notion.query_all(db.actuals.as_deref(), None),
            notion.query_all(db.milestones.as_deref(), None),
            notion.query_all(db.deliverables.as_deref(), None),
            notion.query_all(db.vendor_registry.as_deref(), None),
            notion.query_all(db.payments.as_deref(), None),
            notion.query_all(
                db.work_packages.as_deref(),
                Some(json!({
                    "sorts": [{ "property": "Start Date", "direction": "ascending" }]
                })),
            ),
            notion.query_all(
                db.activity_log.as_deref(),
                Some(json!({
                    "sorts": [{ "property": "Event_Timestamp", "direction": "descending" }],
                    "page_size": 20
                })),
            ),
        )?;

    debug!(
        budget = budget.len(),
        deliverables = deliverables.len(),
        payments = payments.len(),
        work_packages = work_packages.len(),
        "dashboard sources loaded"
    );

    let now = Utc::now();
    let today = now.date_naive();

    let reconciliation = reconcile::reconcile(&deliverables, &state.config.gates);
    let financials = finance::aggregate(
        &budget,
        &actuals,
        &payments,
        &vendors,
        &state.config.budget_rules,
        today,
    );

    let dashboard = renohub_core::dashboard::assemble(
        reconciliation,
        financials,
        &milestones,
        &activity_log,
        today,
        now.to_rfc3339(),
    );
    Ok(Json(dashboard))
}
