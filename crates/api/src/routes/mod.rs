//! Route table and shared middleware.

use std::sync::Arc;

use axum::extract::Request;
use axum::http::{header, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

mod actions;
mod bids;
mod dashboard;
mod tasks;
mod webhooks;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/proxy", get(dashboard::get_dashboard).post(actions::post_proxy))
        .route("/proxy/bids", get(bids::get_bids))
        .route("/create-task", post(tasks::create_task))
        .route("/webhooks/deliverable", post(webhooks::deliverable))
        .route("/webhooks/dedupe-sweep", post(webhooks::dedupe_sweep))
        .route("/webhooks/notify", post(webhooks::notify))
        .fallback(not_found)
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(preflight))
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}

/// Answer every OPTIONS request with 204 before routing, so preflights never
/// 405 on method-specific routes. Runs outside the CORS layer, so the
/// response carries its own headers.
async fn preflight(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        return (
            StatusCode::NO_CONTENT,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_METHODS, "GET, POST, OPTIONS"),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
            ],
        )
            .into_response();
    }
    next.run(request).await
}

async fn not_found() -> Response {
    (StatusCode::NOT_FOUND, axum::Json(serde_json::json!({ "error": "Not found" })))
        .into_response()
}
