//! # Feed Search Shared
//!
//! Types shared between the search engine repository and the feed search
//! facade: the indexed post projection, search queries with their filter and
//! pagination rules, and the engine-neutral search response.

pub mod document;
pub mod query;
pub mod response;

pub use document::PostDocument;
pub use query::{
    fields_for_filter, pagination_offset, sort_for_filter, SearchFilter, SearchQuery,
    SortDirection, SortOrder, MAX_RESULT_WINDOW,
};
pub use response::{SearchHit, SearchResponse};
