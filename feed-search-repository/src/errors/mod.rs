//! Error types for the feed search repository.

mod search_error;

pub use search_error::SearchError;
