//! Dependency initialization and wiring for feed search.

use std::sync::Arc;
use tracing::{info, warn};

use crate::config::SearchSettings;
use crate::service::FeedSearch;
use crate::FeedSearchError;
use feed_search_repository::{InMemorySearchEngine, OpenSearchClient, SearchEngineClient};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The configured search facade, not yet confirmed ready.
    pub search: Arc<FeedSearch>,
}

impl Dependencies {
    /// Initialize all dependencies from environment variables.
    pub fn from_env() -> Result<Self, FeedSearchError> {
        Self::new(SearchSettings::from_env()?)
    }

    /// Initialize all dependencies from settings.
    ///
    /// Picks the in-memory engine when `settings.mock` is set, OpenSearch
    /// otherwise. The engine is not contacted here; call
    /// [`FeedSearch::wait_until_ready`] before use.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(FeedSearchError)` - If the OpenSearch client cannot be built
    pub fn new(settings: SearchSettings) -> Result<Self, FeedSearchError> {
        info!(
            opensearch_url = %settings.opensearch_url,
            index = %settings.index_name,
            mock = settings.mock,
            "Initializing dependencies"
        );

        let client: Arc<dyn SearchEngineClient> = if settings.mock {
            warn!("Search mock mode enabled, documents are kept in memory only");
            Arc::new(InMemorySearchEngine::new())
        } else {
            let client = OpenSearchClient::new(&settings.opensearch_url).map_err(|e| {
                FeedSearchError::config(format!("Failed to create OpenSearch client: {}", e))
            })?;
            Arc::new(client)
        };

        Ok(Self {
            search: Arc::new(FeedSearch::new(client, settings)),
        })
    }
}
