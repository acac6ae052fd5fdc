//! Outbound email over a transactional mail provider's HTTP API.

use async_trait::async_trait;
use renohub_core::notify::EmailMessage;
use renohub_core::Notifier;
use renohub_domain::{MailConfig, RenoHubError, Result};
use reqwest::Method;
use serde_json::json;
use tracing::info;

use crate::http::HttpClient;

pub struct MailClient {
    http_client: HttpClient,
    config: MailConfig,
}

impl MailClient {
    pub fn new(config: MailConfig, http_client: HttpClient) -> Self {
        Self { http_client, config }
    }
}

#[async_trait]
impl Notifier for MailClient {
    async fn send(&self, message: &EmailMessage) -> Result<()> {
        let request = self
            .http_client
            .request(Method::POST, &self.config.api_url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&json!({
                "from": self.config.from,
                "to": self.config.owner_emails,
                "subject": message.subject,
                "text": message.body,
            }));

        let response = self.http_client.send(request).await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_else(|_| "unreadable body".to_string());
            return Err(RenoHubError::Upstream { status, message: body });
        }

        info!(recipients = self.config.owner_emails.len(), "notification email sent");
        Ok(())
    }
}
