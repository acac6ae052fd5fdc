//! Conversions from transport errors into domain errors.

use renohub_domain::RenoHubError;
use reqwest::Error as HttpError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub RenoHubError);

impl From<InfraError> for RenoHubError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<RenoHubError> for InfraError {
    fn from(value: RenoHubError) -> Self {
        InfraError(value)
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(http_error_to_domain(value))
    }
}

fn http_error_to_domain(err: HttpError) -> RenoHubError {
    if err.is_timeout() {
        return RenoHubError::Network("HTTP request timed out".into());
    }

    if err.is_connect() {
        return RenoHubError::Network("HTTP connection failure".into());
    }

    if let Some(status) = err.status() {
        let code = status.as_u16();
        let message =
            format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));

        return match code {
            401 | 403 => RenoHubError::Auth(message),
            404 => RenoHubError::NotFound(message),
            429 => RenoHubError::Network(message),
            400..=499 => RenoHubError::InvalidInput(message),
            _ => RenoHubError::Upstream { status: code, message },
        };
    }

    RenoHubError::Network(err.to_string())
}

#[cfg(test)]
mod tests {
    use reqwest::{Client, StatusCode};
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn status_error(status: StatusCode) -> HttpError {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&server)
            .await;

        let client = Client::builder().no_proxy().build().unwrap();
        client.get(server.uri()).send().await.unwrap().error_for_status().unwrap_err()
    }

    #[tokio::test]
    async fn status_401_maps_to_auth_error() {
        let mapped: RenoHubError = InfraError::from(status_error(StatusCode::UNAUTHORIZED).await).into();
        match mapped {
            RenoHubError::Auth(msg) => assert!(msg.contains("401")),
            other => panic!("expected auth error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn status_404_maps_to_not_found() {
        let mapped: RenoHubError = InfraError::from(status_error(StatusCode::NOT_FOUND).await).into();
        assert!(matches!(mapped, RenoHubError::NotFound(_)));
    }

    #[tokio::test]
    async fn server_errors_map_to_upstream_with_status() {
        let mapped: RenoHubError =
            InfraError::from(status_error(StatusCode::SERVICE_UNAVAILABLE).await).into();
        match mapped {
            RenoHubError::Upstream { status, .. } => assert_eq!(status, 503),
            other => panic!("expected upstream error, got {other:?}"),
        }
    }
}
