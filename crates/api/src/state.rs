//! Shared request-handling state.

use std::sync::Arc;
use std::time::Duration;

use renohub_core::{DedupeService, Notifier, SummaryGenerator};
use renohub_domain::{AppConfig, Result};
use renohub_infra::{GeminiClient, HttpClient, MailClient, NotionClient, NotionDeliverableStore};

const NOTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything a handler needs, built once at startup.
///
/// The Gemini and mail clients are optional; endpoints that need them fail
/// closed when the matching credentials are absent.
pub struct AppState {
    pub config: AppConfig,
    pub notion: Arc<NotionClient>,
    pub dedupe: DedupeService,
    pub summarizer: Option<Arc<dyn SummaryGenerator>>,
    pub notifier: Option<Arc<dyn Notifier>>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Result<Arc<Self>> {
        // Notion calls are single-attempt; only the Gemini client retries.
        let http_client =
            HttpClient::builder().timeout(NOTION_TIMEOUT).max_attempts(1).build()?;
        let notion = Arc::new(NotionClient::new(config.notion_api_key.clone(), http_client));
        Self::with_notion(config, notion)
    }

    /// Wire the remaining services around an existing Notion client.
    /// Integration tests use this to point the client at a mock server.
    pub fn with_notion(config: AppConfig, notion: Arc<NotionClient>) -> Result<Arc<Self>> {
        let store =
            NotionDeliverableStore::new(notion.clone(), config.databases.deliverables.clone());
        let dedupe = DedupeService::new(Arc::new(store));

        let summarizer: Option<Arc<dyn SummaryGenerator>> = match &config.gemini_api_key {
            Some(key) => {
                Some(Arc::new(GeminiClient::new(key.clone(), config.gemini_model.clone())?))
            }
            None => None,
        };

        let notifier: Option<Arc<dyn Notifier>> = match &config.mail {
            Some(mail) => Some(Arc::new(MailClient::new(mail.clone(), HttpClient::new()?))),
            None => None,
        };

        Ok(Arc::new(Self { config, notion, dedupe, summarizer, notifier }))
    }
}
