use async_trait::async_trait;
use renohub_domain::{Page, Result};

/// Access to the deliverables database as the dedupe service needs it.
///
/// Implemented over the Notion API in `renohub-infra`; tests substitute an
/// in-memory store.
#[async_trait]
pub trait DeliverableStore: Send + Sync {
    async fn retrieve(&self, page_id: &str) -> Result<Page>;

    /// All pages whose canonical title equals `title` exactly.
    async fn find_by_title(&self, title: &str) -> Result<Vec<Page>>;

    /// Patch the given properties onto a page, leaving others untouched.
    async fn update(&self, page_id: &str, properties: serde_json::Value) -> Result<()>;

    /// Remove a page. An already-deleted page is not an error, so a retried
    /// merge can finish its delete step.
    async fn delete(&self, page_id: &str) -> Result<()>;
}
