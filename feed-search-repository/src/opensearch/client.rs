//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    cluster::ClusterHealthParts,
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesExistsParts},
    DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::Value;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::queries::{build_search_query, parse_search_response};
use crate::types::ClusterHealth;
use feed_search_shared::{PostDocument, SearchQuery, SearchResponse};

/// OpenSearch client implementation.
///
/// Provides full-text search capabilities using OpenSearch as the backend.
/// The underlying client pools its connections and is safe to share between
/// tasks.
///
/// # Example
///
/// ```ignore
/// let client = OpenSearchClient::new("http://localhost:9200")?;
/// let health = client.health_check().await?;
/// println!("cluster is {:?}", health.status);
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client for the specified URL.
    ///
    /// No request is sent; reachability is established by `health_check`.
    ///
    /// # Arguments
    ///
    /// * `url` - The OpenSearch server URL (e.g., "http://localhost:9200")
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or the transport cannot be built
    pub fn new(url: &str) -> Result<Self, SearchError> {
        let parsed_url = Url::parse(url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch client");

        Ok(Self { client })
    }

    /// Read the body of a failed response for the error message.
    async fn failure_body(response: Response) -> String {
        let status = response.status_code();
        let body = response.text().await.unwrap_or_default();
        format!("status {}: {}", status, body)
    }
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    #[instrument(skip(self))]
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        match response.status_code().as_u16() {
            200 => Ok(true),
            404 => Ok(false),
            _ => Err(SearchError::index_creation(format!(
                "Index existence check failed with {}",
                Self::failure_body(response).await
            ))),
        }
    }

    #[instrument(skip(self, body))]
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(body.clone())
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        if !response.status_code().is_success() {
            let message = Self::failure_body(response).await;
            error!(index = %index, error = %message, "Create index request failed");
            return Err(SearchError::index_creation(format!(
                "Create index failed with {}",
                message
            )));
        }

        info!(index = %index, "Created search index");
        Ok(())
    }

    #[instrument(skip(self, document), fields(id = %document.id))]
    async fn index_document(
        &self,
        index: &str,
        document: &PostDocument,
    ) -> Result<(), SearchError> {
        let body = serde_json::to_value(document)
            .map_err(|e| SearchError::serialization(e.to_string()))?;

        let response = self
            .client
            .index(IndexParts::IndexId(index, &document.id))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::index(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(SearchError::index(format!(
                "Index failed with {}",
                Self::failure_body(response).await
            )));
        }

        debug!(id = %document.id, "Document indexed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, id))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();

        if status.as_u16() == 404 {
            return Err(SearchError::not_found(id));
        }

        if !status.is_success() {
            return Err(SearchError::delete(format!(
                "Delete failed with {}",
                Self::failure_body(response).await
            )));
        }

        debug!(id = %id, "Document deleted");
        Ok(())
    }

    #[instrument(skip(self, query), fields(filter = query.filter.name(), page = query.page))]
    async fn search(&self, index: &str, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let body = build_search_query(query);

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if status.as_u16() == 404 {
            return Err(SearchError::index_not_found(index));
        }
        if !status.is_success() {
            return Err(SearchError::query(format!(
                "Search failed with {}",
                Self::failure_body(response).await
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let result = parse_search_response(&body)?;
        debug!(total = result.total, returned = result.hits.len(), "Search completed");
        Ok(result)
    }

    async fn health_check(&self) -> Result<ClusterHealth, SearchError> {
        let response = self
            .client
            .cluster()
            .health(ClusterHealthParts::None)
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        if !response.status_code().is_success() {
            return Err(SearchError::connection(format!(
                "Health check failed with {}",
                Self::failure_body(response).await
            )));
        }

        response
            .json::<ClusterHealth>()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))
    }
}
