//! [`DeliverableStore`] implementation over the Notion client.

use std::sync::Arc;

use async_trait::async_trait;
use renohub_core::DeliverableStore;
use renohub_domain::{Page, Result};
use serde_json::{json, Value};

use crate::notion::NotionClient;

pub struct NotionDeliverableStore {
    client: Arc<NotionClient>,
    deliverables_db_id: Option<String>,
}

impl NotionDeliverableStore {
    pub fn new(client: Arc<NotionClient>, deliverables_db_id: Option<String>) -> Self {
        Self { client, deliverables_db_id }
    }
}

#[async_trait]
impl DeliverableStore for NotionDeliverableStore {
    async fn retrieve(&self, page_id: &str) -> Result<Page> {
        self.client.retrieve_page(page_id).await
    }

    async fn find_by_title(&self, title: &str) -> Result<Vec<Page>> {
        let query = json!({
            "filter": {
                "property": "Select Deliverable:",
                "title": { "equals": title }
            }
        });
        self.client.query_all(self.deliverables_db_id.as_deref(), Some(query)).await
    }

    async fn update(&self, page_id: &str, properties: Value) -> Result<()> {
        self.client.update_page(page_id, properties).await
    }

    async fn delete(&self, page_id: &str) -> Result<()> {
        self.client.delete_block(page_id).await
    }
}
