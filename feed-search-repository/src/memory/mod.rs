//! In-memory implementation of the search engine client.
//!
//! Used when running without a search cluster (mock mode) and by tests. It
//! keeps documents per index in memory and answers searches with simple
//! case-insensitive term matching where every query term must be present in
//! one of the searched fields.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::types::{ClusterHealth, HealthStatus};
use feed_search_shared::{PostDocument, SearchHit, SearchQuery, SearchResponse};

/// A single in-memory index.
#[derive(Debug, Default)]
struct MemoryIndex {
    /// The settings and mappings the index was created with.
    #[cfg_attr(not(test), allow(dead_code))]
    body: Value,
    documents: BTreeMap<String, PostDocument>,
}

/// Search engine that lives entirely in process memory.
#[derive(Debug, Default)]
pub struct InMemorySearchEngine {
    indices: RwLock<HashMap<String, MemoryIndex>>,
}

impl InMemorySearchEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents held in an index, or `None` if it does not exist.
    pub async fn document_count(&self, index: &str) -> Option<usize> {
        self.indices
            .read()
            .await
            .get(index)
            .map(|idx| idx.documents.len())
    }

    /// The body an index was created with.
    #[cfg(test)]
    pub async fn index_body(&self, index: &str) -> Option<Value> {
        self.indices
            .read()
            .await
            .get(index)
            .map(|idx| idx.body.clone())
    }
}

/// Split text into lowercase alphanumeric terms.
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|term| !term.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Score a document: `None` if any term is missing, otherwise the number of
/// term occurrences across the searched fields.
fn score(document: &PostDocument, fields: &[&str], terms: &[String]) -> Option<usize> {
    let tokens: Vec<String> = fields
        .iter()
        .filter_map(|field| document.field(field))
        .flat_map(tokenize)
        .collect();

    let mut total = 0;
    for term in terms {
        let occurrences = tokens.iter().filter(|token| *token == term).count();
        if occurrences == 0 {
            return None;
        }
        total += occurrences;
    }
    Some(total)
}

#[async_trait]
impl SearchEngineClient for InMemorySearchEngine {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchError> {
        Ok(self.indices.read().await.contains_key(index))
    }

    async fn create_index(&self, index: &str, body: &Value) -> Result<(), SearchError> {
        let mut indices = self.indices.write().await;
        if indices.contains_key(index) {
            return Err(SearchError::index_creation(format!(
                "Index {} already exists",
                index
            )));
        }

        indices.insert(
            index.to_string(),
            MemoryIndex {
                body: body.clone(),
                documents: BTreeMap::new(),
            },
        );
        debug!(index = %index, "Created in-memory index");
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        document: &PostDocument,
    ) -> Result<(), SearchError> {
        let mut indices = self.indices.write().await;
        let idx = indices
            .get_mut(index)
            .ok_or_else(|| SearchError::index_not_found(index))?;

        idx.documents.insert(document.id.clone(), document.clone());
        Ok(())
    }

    async fn delete_document(&self, index: &str, id: &str) -> Result<(), SearchError> {
        let mut indices = self.indices.write().await;
        let idx = indices
            .get_mut(index)
            .ok_or_else(|| SearchError::index_not_found(index))?;

        idx.documents
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| SearchError::not_found(id))
    }

    async fn search(&self, index: &str, query: &SearchQuery) -> Result<SearchResponse, SearchError> {
        let indices = self.indices.read().await;
        let idx = indices
            .get(index)
            .ok_or_else(|| SearchError::index_not_found(index))?;

        let terms = tokenize(&query.text);
        if terms.is_empty() {
            return Ok(SearchResponse::default());
        }

        let fields = query.fields();
        let mut matches: Vec<(&PostDocument, usize)> = idx
            .documents
            .values()
            .filter_map(|doc| score(doc, fields, &terms).map(|s| (doc, s)))
            .collect();

        if query.sort().is_some() {
            // The only explicit sort is newest first
            matches.sort_by_key(|(doc, _)| Reverse(doc.published));
        } else {
            matches.sort_by_key(|(_, s)| Reverse(*s));
        }

        let total = matches.len() as u64;
        let hits = matches
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.per_page as usize)
            .map(|(doc, _)| SearchHit { id: doc.id.clone() })
            .collect();

        Ok(SearchResponse { total, hits })
    }

    async fn health_check(&self) -> Result<ClusterHealth, SearchError> {
        Ok(ClusterHealth {
            cluster_name: "in-memory".to_string(),
            status: HealthStatus::Green,
            number_of_nodes: 1,
        })
    }
}
