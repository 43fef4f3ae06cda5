//! # Feed Search
//!
//! Search indexing for the blog feed aggregator.
//!
//! This crate is the facade the rest of the system calls: it provisions the
//! posts index, mirrors posts into it, runs paginated searches and holds
//! startup back until the search engine answers.

pub mod config;
pub mod readiness;
pub mod service;

#[cfg(test)]
mod test_support;

pub use config::{Dependencies, SearchSettings};
pub use service::{FeedSearch, SearchResultLink, SearchResults};

use feed_search_repository::SearchError;
use thiserror::Error;

/// Errors surfaced by the feed search facade.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FeedSearchError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The search engine could not be reached in time.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Search error.
    #[error("Search error: {0}")]
    SearchError(#[from] SearchError),
}

impl FeedSearchError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }
}
