//! # Feed Search Repository
//!
//! This crate provides the interface for talking to the search engine and
//! two implementations of it: OpenSearch, and an in-memory engine used when
//! running without a search cluster. It also owns the index settings and
//! mappings the posts index is created with.

pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod opensearch;
pub mod types;

pub use errors::SearchError;
pub use interfaces::SearchEngineClient;
pub use memory::InMemorySearchEngine;
pub use opensearch::{get_index_settings, OpenSearchClient};
pub use types::{ClusterHealth, HealthStatus};
