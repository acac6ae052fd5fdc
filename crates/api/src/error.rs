//! Error-to-response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use chrono::Utc;
use renohub_domain::RenoHubError;
use serde_json::json;
use tracing::error;

/// Wrapper giving domain errors an HTTP representation.
///
/// Every error body carries the message and a timestamp so failures are
/// correlatable with server logs.
#[derive(Debug)]
pub struct ApiError(pub RenoHubError);

impl From<RenoHubError> for ApiError {
    fn from(value: RenoHubError) -> Self {
        ApiError(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RenoHubError::Auth(_) => StatusCode::UNAUTHORIZED,
            RenoHubError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            RenoHubError::NotFound(_) => StatusCode::NOT_FOUND,
            RenoHubError::Config(_)
            | RenoHubError::Network(_)
            | RenoHubError::Upstream { .. }
            | RenoHubError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!(error = %self.0, "request failed");
        }

        let body = json!({
            "error": self.0.to_string(),
            "timestamp": Utc::now().to_rfc3339(),
        });
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(error: RenoHubError) -> StatusCode {
        ApiError(error).into_response().status()
    }

    #[test]
    fn domain_errors_map_to_http_statuses() {
        assert_eq!(status_of(RenoHubError::Auth("nope".into())), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(RenoHubError::InvalidInput("missing".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_of(RenoHubError::NotFound("gone".into())), StatusCode::NOT_FOUND);
        assert_eq!(
            status_of(RenoHubError::Upstream { status: 503, message: "down".into() }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
