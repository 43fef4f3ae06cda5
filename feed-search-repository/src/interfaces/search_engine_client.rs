//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, in-memory, etc.).

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::SearchError;
use crate::types::ClusterHealth;
use feed_search_shared::{PostDocument, SearchQuery, SearchResponse};

/// Abstract interface for search engine operations.
///
/// This trait is the whole surface the feed search facade needs from a
/// search engine. Implementations can be swapped for different backends
/// (OpenSearch, in-memory) enabling easy testing and running without a
/// cluster.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>`. Whether a failure is
/// propagated or only logged is decided by the caller.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index exists
    /// * `Ok(false)` - If it does not
    /// * `Err(SearchError)` - If the check itself fails
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError>;

    /// Create an index with the given settings and mappings body.
    ///
    /// # Arguments
    ///
    /// * `index` - Name of the index to create
    /// * `body` - The `settings` and `mappings` document
    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError>;

    /// Index a single document under its id.
    ///
    /// If a document with the same id already exists, it is replaced.
    async fn index_document(&self, index: &str, document: &PostDocument)
        -> Result<(), SearchError>;

    /// Delete a document by id.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the document was deleted
    /// * `Err(SearchError::NotFound)` - If no document had that id
    /// * `Err(SearchError)` - If the deletion fails
    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError>;

    /// Execute a search query against the index.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let query = SearchQuery::new("hello world", 10);
    /// let response = client.search("posts", &query).await?;
    /// println!("Found {} results", response.total);
    /// ```
    async fn search(&self, index: &str, query: &SearchQuery)
        -> Result<SearchResponse, SearchError>;

    /// Fetch cluster health. Any successful response means the engine is reachable.
    async fn health_check(&self) -> Result<ClusterHealth, SearchError>;
}
