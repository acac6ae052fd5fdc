//! Gemini text-generation client for the KPI summary.
//!
//! Retry policy: up to 3 attempts, retrying only HTTP 503 with backoff
//! starting at 1000 ms and doubling. Any other non-success status is
//! terminal.

use std::time::Duration;

use async_trait::async_trait;
use renohub_core::SummaryGenerator;
use renohub_domain::{RenoHubError, Result};
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::http::HttpClient;

const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com";
const GEMINI_MAX_ATTEMPTS: usize = 3;
const GEMINI_BASE_BACKOFF: Duration = Duration::from_millis(1000);

pub struct GeminiClient {
    http_client: HttpClient,
    api_key: String,
    model: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .max_attempts(GEMINI_MAX_ATTEMPTS)
            .base_backoff(GEMINI_BASE_BACKOFF)
            .retry_statuses(vec![StatusCode::SERVICE_UNAVAILABLE])
            .build()?;

        Ok(Self { http_client, api_key, model, base_url: GEMINI_API_URL.to_string() })
    }

    /// Point the client at a different host (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    #[cfg(test)]
    fn with_base_backoff(mut self, backoff: Duration) -> Self {
        self.http_client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .max_attempts(GEMINI_MAX_ATTEMPTS)
            .base_backoff(backoff)
            .retry_statuses(vec![StatusCode::SERVICE_UNAVAILABLE])
            .build()
            .expect("http client");
        self
    }

    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = self
            .http_client
            .request(Method::POST, &url)
            .header("Content-Type", "application/json")
            .json(&json!({ "contents": [{ "parts": [{ "text": prompt }] }] }));

        let response = self.http_client.send(request).await?;
        let status = response.status();
        debug!(status = status.as_u16(), model = %self.model, "gemini response");

        if !status.is_success() {
            let message =
                response.text().await.unwrap_or_else(|_| "unreadable body".to_string());
            return Err(RenoHubError::Upstream { status: status.as_u16(), message });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RenoHubError::Internal(format!("invalid gemini response: {e}")))?;

        Ok(parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .unwrap_or_default())
    }
}

#[async_trait]
impl SummaryGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.generate_content(prompt).await
    }
}
