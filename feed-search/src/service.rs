//! The feed search facade.
//!
//! Index provisioning and document writes are best effort: the post store is
//! the source of truth, so a failed write to the search index is logged and
//! never reaches the caller. Searches and connection checks propagate their
//! errors so callers can report an unavailable search engine.

use std::future::Future;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokio::sync::OnceCell;
use tracing::{debug, error, info, instrument};

use crate::config::SearchSettings;
use crate::readiness::Readiness;
use crate::FeedSearchError;
use feed_search_repository::{get_index_settings, ClusterHealth, SearchEngineClient, SearchError};
use feed_search_shared::{PostDocument, SearchFilter, SearchQuery, SearchResponse};

/// A search result as handed to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultLink {
    pub id: String,
    pub url: String,
}

/// One page of search results.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResults {
    /// Total number of matching posts across all pages.
    pub results: u64,
    /// Results on this page, in ranking order.
    pub values: Vec<SearchResultLink>,
}

/// Search facade over a search engine client.
pub struct FeedSearch {
    pub(crate) client: Arc<dyn SearchEngineClient>,
    pub(crate) settings: SearchSettings,
    pub(crate) readiness: OnceCell<Readiness>,
}

impl FeedSearch {
    /// Create a facade. The engine is not contacted until the first call.
    pub fn new(client: Arc<dyn SearchEngineClient>, settings: SearchSettings) -> Self {
        Self {
            client,
            settings,
            readiness: OnceCell::new(),
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    /// Make sure the posts index exists, creating it with the autocomplete
    /// analysis settings if it does not.
    ///
    /// An existing index is left untouched. Failures are logged, not returned;
    /// later document writes against a missing index fail on their own.
    #[instrument(skip(self), fields(index = %self.settings.index_name))]
    pub async fn ensure_index(&self) {
        let index = &self.settings.index_name;

        match self.client.index_exists(index).await {
            Ok(true) => {
                debug!("Search index already exists");
            }
            Ok(false) => {
                info!("Creating search index");
                if let Err(e) = self.client.create_index(index, &get_index_settings()).await {
                    error!(error = %e, "Failed to create search index");
                }
            }
            Err(e) => {
                error!(error = %e, "Failed to check for search index");
            }
        }
    }

    /// Write a post into the search index under its id.
    pub async fn index_document(&self, document: &PostDocument) {
        let index = &self.settings.index_name;
        log_failure(self.client.index_document(index, document), |e| {
            error!(id = %document.id, error = %e, "Failed to index document");
        })
        .await;
    }

    /// Remove a post from the search index.
    ///
    /// A post that was never indexed is not an error worth reporting.
    pub async fn delete_document(&self, id: &str) {
        let index = &self.settings.index_name;
        log_failure(self.client.delete_document(index, id), |e| {
            if e.is_not_found() {
                debug!(id = %id, "Document to delete was not indexed");
            } else {
                error!(id = %id, error = %e, "Failed to delete document");
            }
        })
        .await;
    }

    /// Search posts.
    ///
    /// # Arguments
    ///
    /// * `text` - Query text; every term must match
    /// * `filter` - Filter name, `"post"` when `None`; unknown names search posts
    /// * `page` - Zero-based page, 0 when `None`
    /// * `per_page` - Page size, the configured default when `None`
    ///
    /// Pages past the engine's result window return the last page inside it.
    pub async fn search(
        &self,
        text: &str,
        filter: Option<&str>,
        page: Option<u64>,
        per_page: Option<u64>,
    ) -> Result<SearchResults, FeedSearchError> {
        let query = SearchQuery {
            text: text.to_string(),
            filter: filter.map(SearchFilter::from_name).unwrap_or_default(),
            page: page.unwrap_or(0),
            per_page: per_page.unwrap_or(self.settings.per_page),
        };

        let response = self
            .client
            .search(&self.settings.index_name, &query)
            .await?;

        Ok(self.to_results(response))
    }

    /// Fetch the search engine's health.
    pub async fn check_connection(&self) -> Result<ClusterHealth, FeedSearchError> {
        Ok(self.client.health_check().await?)
    }

    fn to_results(&self, response: SearchResponse) -> SearchResults {
        let base = self.settings.base_url.trim_end_matches('/');
        let values = response
            .hits
            .into_iter()
            .map(|hit| SearchResultLink {
                url: format!("{}/{}", base, hit.id),
                id: hit.id,
            })
            .collect();

        SearchResults {
            results: response.total,
            values,
        }
    }
}

/// Await an engine write and log its failure instead of returning it.
async fn log_failure<F, L>(operation: F, on_error: L)
where
    F: Future<Output = Result<(), SearchError>>,
    L: FnOnce(&SearchError),
{
    if let Err(e) = operation.await {
        on_error(&e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{capture_logs, post, MockEngine};
    use feed_search_repository::InMemorySearchEngine;

    fn search_over(client: Arc<dyn SearchEngineClient>) -> FeedSearch {
        let settings = SearchSettings::default().with_base_url("https://blog.example/posts/");
        FeedSearch::new(client, settings)
    }

    #[tokio::test]
    async fn test_ensure_index_creates_missing_index() {
        let engine = Arc::new(MockEngine::new());
        let search = search_over(engine.clone());

        search.ensure_index().await;

        assert_eq!(engine.exists_calls(), 1);
        assert_eq!(engine.create_calls(), 1);
        let body = engine.created_body().await.unwrap();
        assert_eq!(
            body["settings"]["analysis"]["tokenizer"]["autocomplete"]["type"],
            "edge_ngram"
        );
    }

    #[tokio::test]
    async fn test_ensure_index_is_idempotent() {
        let engine = Arc::new(MockEngine::new());
        let search = search_over(engine.clone());

        search.ensure_index().await;
        search.ensure_index().await;

        assert_eq!(engine.exists_calls(), 2);
        assert_eq!(engine.create_calls(), 1);
    }

    #[tokio::test]
    async fn test_ensure_index_existing_index_untouched() {
        let engine = Arc::new(MockEngine::new().with_existing_index());
        let search = search_over(engine.clone());

        search.ensure_index().await;

        assert_eq!(engine.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_ensure_index_swallows_failures() {
        let engine = Arc::new(MockEngine::new().failing());
        let search = search_over(engine.clone());

        // Returns normally even though the existence check fails
        search.ensure_index().await;

        assert_eq!(engine.exists_calls(), 1);
        assert_eq!(engine.create_calls(), 0);
    }

    #[tokio::test]
    async fn test_ensure_index_swallows_create_failure() {
        let engine = Arc::new(MockEngine::new().failing_create());
        let search = search_over(engine.clone());
        let (_guard, logs) = capture_logs();

        search.ensure_index().await;

        assert_eq!(engine.exists_calls(), 1);
        assert_eq!(engine.create_calls(), 1);
        assert!(logs.contents().contains("Failed to create search index"));
    }

    #[tokio::test]
    async fn test_document_writes_never_fail() {
        let engine = Arc::new(MockEngine::new().failing());
        let search = search_over(engine.clone());
        let (_guard, logs) = capture_logs();

        search.index_document(&post("p-1", "hello")).await;
        search.delete_document("p-2").await;

        assert_eq!(engine.index_calls(), 1);
        assert_eq!(engine.delete_calls(), 1);

        let output = logs.contents();
        let indexed = output
            .lines()
            .find(|line| line.contains("Failed to index document"))
            .unwrap();
        assert!(indexed.contains("id=p-1"), "{indexed}");
        let deleted = output
            .lines()
            .find(|line| line.contains("Failed to delete document"))
            .unwrap();
        assert!(deleted.contains("id=p-2"), "{deleted}");
    }

    #[tokio::test]
    async fn test_delete_unknown_document() {
        let engine = Arc::new(InMemorySearchEngine::new());
        let search = search_over(engine.clone());
        search.ensure_index().await;

        search.delete_document("never-indexed").await;

        assert_eq!(engine.document_count("posts").await, Some(0));
    }

    #[tokio::test]
    async fn test_index_then_search() {
        let engine = Arc::new(InMemorySearchEngine::new());
        let search = search_over(engine.clone());
        search.ensure_index().await;

        search.index_document(&post("p-1", "hello world")).await;
        search.index_document(&post("p-2", "hello")).await;

        let results = search.search("hello world", None, None, None).await.unwrap();

        assert_eq!(results.results, 1);
        assert_eq!(
            results.values,
            vec![SearchResultLink {
                id: "p-1".to_string(),
                url: "https://blog.example/posts/p-1".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_search_after_delete() {
        let engine = Arc::new(InMemorySearchEngine::new());
        let search = search_over(engine);
        search.ensure_index().await;

        search.index_document(&post("p-1", "hello world")).await;
        search.delete_document("p-1").await;

        let results = search.search("hello", None, None, None).await.unwrap();
        assert_eq!(results, SearchResults::default());
    }

    #[tokio::test]
    async fn test_search_builds_query_from_arguments() {
        let engine = Arc::new(MockEngine::new());
        let search = search_over(engine.clone());

        search
            .search("ada", Some("author"), Some(2000), Some(10))
            .await
            .unwrap();
        search.search("rust", Some("unknown"), None, None).await.unwrap();

        let queries = engine.queries().await;
        assert_eq!(queries[0].filter, SearchFilter::Author);
        assert_eq!(queries[0].offset(), 9990);
        assert_eq!(queries[1].filter, SearchFilter::Post);
        assert_eq!(queries[1].page, 0);
        assert_eq!(queries[1].per_page, 10);
    }

    #[tokio::test]
    async fn test_search_propagates_failures() {
        let engine = Arc::new(MockEngine::new().failing());
        let search = search_over(engine);

        let result = search.search("hello", None, None, None).await;

        assert!(matches!(result, Err(FeedSearchError::SearchError(_))));
    }

    #[tokio::test]
    async fn test_search_on_missing_index_fails() {
        let search = search_over(Arc::new(InMemorySearchEngine::new()));

        let result = search.search("hello", None, None, None).await;

        assert!(matches!(
            result,
            Err(FeedSearchError::SearchError(SearchError::IndexNotFound(_)))
        ));
    }

    #[test]
    fn test_results_serialize_to_external_shape() {
        let results = SearchResults {
            results: 1,
            values: vec![SearchResultLink {
                id: "p-1".to_string(),
                url: "https://blog.example/posts/p-1".to_string(),
            }],
        };

        let value = serde_json::to_value(&results).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "results": 1,
                "values": [{ "id": "p-1", "url": "https://blog.example/posts/p-1" }]
            })
        );
    }
}
