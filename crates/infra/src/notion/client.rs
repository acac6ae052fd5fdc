//! Notion REST API client.
//!
//! Notion traffic is not retried: dashboard reads fan out over many
//! databases and a retry storm against a rate-limited workspace makes
//! things worse, so failures surface immediately.

use renohub_domain::constants::NOTION_VERSION;
use renohub_domain::{Page, RenoHubError, Result};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::http::HttpClient;
use crate::notion::types::QueryResponse;

const NOTION_API_URL: &str = "https://api.notion.com";

pub struct NotionClient {
    http_client: HttpClient,
    api_key: String,
    base_url: String,
}

impl NotionClient {
    pub fn new(api_key: String, http_client: HttpClient) -> Self {
        Self { http_client, api_key, base_url: NOTION_API_URL.to_string() }
    }

    /// Point the client at a different host (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Query a database to exhaustion, following pagination cursors.
    ///
    /// `query` is merged into every request body and may carry `filter`,
    /// `sorts` and `page_size` keys. A `None` database id short-circuits to
    /// an empty list so an unconfigured data source degrades instead of
    /// failing the request.
    pub async fn query_all(
        &self,
        database_id: Option<&str>,
        query: Option<Value>,
    ) -> Result<Vec<Page>> {
        let Some(database_id) = database_id else {
            return Ok(Vec::new());
        };

        let url = format!("{}/v1/databases/{}/query", self.base_url, database_id);
        let mut pages = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let mut body = serde_json::Map::new();
            if let Some(Value::Object(query)) = &query {
                body.extend(query.clone());
            }
            if let Some(cursor) = &cursor {
                body.insert("start_cursor".to_string(), json!(cursor));
            }

            let request = self.authed(Method::POST, &url).json(&Value::Object(body));
            let response = self.expect_success(request).await?;
            let batch: QueryResponse = response
                .json()
                .await
                .map_err(|e| RenoHubError::Internal(format!("invalid query response: {e}")))?;

            pages.extend(batch.results);
            if batch.has_more {
                cursor = batch.next_cursor;
            } else {
                break;
            }
        }

        debug!(database_id, count = pages.len(), "queried database");
        Ok(pages)
    }

    pub async fn retrieve_page(&self, page_id: &str) -> Result<Page> {
        let url = format!("{}/v1/pages/{}", self.base_url, page_id);
        let response = self.expect_success(self.authed(Method::GET, &url)).await?;
        response.json().await.map_err(|e| RenoHubError::Internal(format!("invalid page: {e}")))
    }

    pub async fn update_page(&self, page_id: &str, properties: Value) -> Result<()> {
        let url = format!("{}/v1/pages/{}", self.base_url, page_id);
        let request =
            self.authed(Method::PATCH, &url).json(&json!({ "properties": properties }));
        self.expect_success(request).await?;
        Ok(())
    }

    pub async fn create_page(&self, database_id: &str, properties: Value) -> Result<Page> {
        let url = format!("{}/v1/pages", self.base_url);
        let request = self.authed(Method::POST, &url).json(&json!({
            "parent": { "database_id": database_id },
            "properties": properties,
        }));
        let response = self.expect_success(request).await?;
        response
            .json()
            .await
            .map_err(|e| RenoHubError::Internal(format!("invalid created page: {e}")))
    }

    /// Soft-delete: Notion archives pages rather than removing them.
    pub async fn archive_page(&self, page_id: &str) -> Result<()> {
        let url = format!("{}/v1/pages/{}", self.base_url, page_id);
        let request = self.authed(Method::PATCH, &url).json(&json!({ "archived": true }));
        self.expect_success(request).await?;
        Ok(())
    }

    /// Hard-delete a page as a block. "Already gone" is tolerated so retried
    /// merge flows converge.
    pub async fn delete_block(&self, block_id: &str) -> Result<()> {
        let url = format!("{}/v1/blocks/{}", self.base_url, block_id);
        let response = self.http_client.send(self.authed(Method::DELETE, &url)).await?;

        if response.status() == StatusCode::NOT_FOUND {
            warn!(block_id, "delete target already gone");
            return Ok(());
        }
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }
        Ok(())
    }

    fn authed(&self, method: Method, url: &str) -> RequestBuilder {
        self.http_client
            .request(method, url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Notion-Version", NOTION_VERSION)
            .header("Content-Type", "application/json")
    }

    async fn expect_success(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = self.http_client.send(request).await?;
        if !response.status().is_success() {
            return Err(upstream_error(response).await);
        }
        Ok(response)
    }
}

async fn upstream_error(response: reqwest::Response) -> RenoHubError {
    let status = response.status().as_u16();
    let message = response.text().await.unwrap_or_else(|_| "unreadable body".to_string());
    RenoHubError::Upstream { status, message }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_client(base_url: String) -> NotionClient {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .max_attempts(1)
            .build()
            .expect("http client");
        NotionClient::new("test-notion-key".to_string(), http_client).with_base_url(base_url)
    }

    #[tokio::test]
    async fn query_all_follows_pagination_cursors() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/db-1/query"))
            .and(header("Authorization", "Bearer test-notion-key"))
            .and(header("Notion-Version", NOTION_VERSION))
            .and(body_partial_json(json!({ "start_cursor": "c2" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": "p2", "properties": {} }],
                "has_more": false,
                "next_cursor": null
            })))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/v1/databases/db-1/query"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [{ "id": "p1", "properties": {} }],
                "has_more": true,
                "next_cursor": "c2"
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let pages = client.query_all(Some("db-1"), None).await.expect("pages");

        let ids: Vec<_> = pages.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2"]);
    }

    #[tokio::test]
    async fn query_body_keys_are_forwarded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/databases/db-1/query"))
            .and(body_partial_json(json!({
                "sorts": [{ "property": "Event_Timestamp", "direction": "descending" }],
                "page_size": 20
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [],
                "has_more": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let query = json!({
            "sorts": [{ "property": "Event_Timestamp", "direction": "descending" }],
            "page_size": 20
        });
        client.query_all(Some("db-1"), Some(query)).await.expect("pages");
    }

    #[tokio::test]
    async fn missing_database_id_returns_empty() {
        let client = test_client("http://127.0.0.1:1".to_string());
        let pages = client.query_all(None, None).await.expect("pages");
        assert!(pages.is_empty());
    }

    #[tokio::test]
    async fn non_success_surfaces_upstream_error_with_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/databases/db-1/query"))
            .respond_with(ResponseTemplate::new(400).set_body_string("validation_error"))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.query_all(Some("db-1"), None).await.unwrap_err();
        match err {
            RenoHubError::Upstream { status, message } => {
                assert_eq!(status, 400);
                assert!(message.contains("validation_error"));
            }
            other => panic!("expected upstream error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn update_page_patches_properties() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/pages/p1"))
            .and(body_partial_json(json!({
                "properties": { "Status": { "select": { "name": "Paid" } } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "p1" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        client
            .update_page("p1", json!({ "Status": { "select": { "name": "Paid" } } }))
            .await
            .expect("update");
    }

    #[tokio::test]
    async fn create_page_posts_parent_and_properties() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/pages"))
            .and(body_partial_json(json!({ "parent": { "database_id": "db-1" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "new-page", "properties": {}
            })))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let page = client.create_page("db-1", json!({})).await.expect("page");
        assert_eq!(page.id, "new-page");
    }

    #[tokio::test]
    async fn archive_page_patches_the_archived_flag() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/v1/pages/p1"))
            .and(body_partial_json(json!({ "archived": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "p1" })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        client.archive_page("p1").await.expect("archive");
    }

    #[tokio::test]
    async fn delete_tolerates_already_gone() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/blocks/b1"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        client.delete_block("b1").await.expect("tolerated");
    }

    #[tokio::test]
    async fn delete_surfaces_other_failures() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/blocks/b1"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let client = test_client(server.uri());
        let err = client.delete_block("b1").await.unwrap_err();
        assert!(matches!(err, RenoHubError::Upstream { status: 500, .. }));
    }
}
