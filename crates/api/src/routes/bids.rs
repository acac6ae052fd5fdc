//! `GET /proxy/bids`: vendor bid comparison over the sourcing master list.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use renohub_core::bids::compare_bids;
use renohub_domain::BidsReport;

use crate::error::ApiError;
use crate::state::AppState;

pub async fn get_bids(State(state): State<Arc<AppState>>) -> Result<Json<BidsReport>, ApiError> {
    let pages = state
        .notion
        .query_all(state.config.databases.sourcing_master_list.as_deref(), None)
        .await?;
    Ok(Json(compare_bids(&pages)))
}
