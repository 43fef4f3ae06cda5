//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using OpenSearch as the backend.

mod client;
mod index_config;
mod queries;

pub use client::OpenSearchClient;
pub use index_config::{
    get_index_settings, AUTOCOMPLETE_ANALYZER, AUTOCOMPLETE_SEARCH_ANALYZER, DEFAULT_INDEX_NAME,
};
pub use queries::{build_search_query, parse_search_response};
