//! Engine-neutral search results.

use serde::{Deserialize, Serialize};

/// A single matching document. Only the id is carried back from the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub id: String,
}

/// One page of hits plus the total number of matching documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    /// Total matches across all pages.
    pub total: u64,
    /// Hits on the requested page, in ranking order.
    pub hits: Vec<SearchHit>,
}
