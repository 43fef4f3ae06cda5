//! Search query parameters and the rules that turn them into engine inputs.
//!
//! Filters are a closed set. Each filter kind maps to the fields it searches
//! and the sort order it applies; names that are not in the table fall back
//! to [`SearchFilter::Post`].

/// Largest `offset + size` the search engine serves for a single query.
pub const MAX_RESULT_WINDOW: u64 = 10_000;

/// Fields searched when no specific filter applies.
const POST_FIELDS: &[&str] = &["text", "title"];

/// Fields searched by the author filter.
const AUTHOR_FIELDS: &[&str] = &["author"];

/// The kinds of search a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchFilter {
    /// Full-text search over post text and title, ranked by relevance.
    #[default]
    Post,
    /// Search by author name, newest first.
    Author,
}

/// Filter names recognized by [`SearchFilter::from_name`].
const FILTER_NAMES: &[(&str, SearchFilter)] = &[
    ("post", SearchFilter::Post),
    ("author", SearchFilter::Author),
];

impl SearchFilter {
    /// Resolve a filter by name. Unknown names resolve to the default filter.
    pub fn from_name(name: &str) -> Self {
        FILTER_NAMES
            .iter()
            .find(|(known, _)| *known == name)
            .map(|(_, filter)| *filter)
            .unwrap_or_default()
    }

    /// The name of this filter.
    pub fn name(self) -> &'static str {
        match self {
            SearchFilter::Post => "post",
            SearchFilter::Author => "author",
        }
    }

    /// Fields the query text is matched against.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            SearchFilter::Post => POST_FIELDS,
            SearchFilter::Author => AUTHOR_FIELDS,
        }
    }

    /// Explicit sort order, or `None` to keep the engine's relevance ranking.
    pub fn sort(self) -> Option<SortOrder> {
        match self {
            SearchFilter::Post => None,
            SearchFilter::Author => Some(SortOrder::descending("published")),
        }
    }
}

/// Direction of a sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Sort on a single field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub field: &'static str,
    pub direction: SortDirection,
}

impl SortOrder {
    /// Sort by `field`, largest value first.
    pub fn descending(field: &'static str) -> Self {
        Self {
            field,
            direction: SortDirection::Desc,
        }
    }
}

/// Fields searched for the named filter.
pub fn fields_for_filter(filter: &str) -> &'static [&'static str] {
    SearchFilter::from_name(filter).fields()
}

/// Sort order for the named filter.
pub fn sort_for_filter(filter: &str) -> Option<SortOrder> {
    SearchFilter::from_name(filter).sort()
}

/// Compute the result offset for a page.
///
/// The naive offset is `page * per_page`. When that page would end past
/// `max_result_window` the offset is pulled back to `max_result_window -
/// per_page`, so a page beyond the window returns the last page inside it
/// instead of an engine error. Callers asking for very deep pages therefore
/// get earlier results than they asked for; this is not reported.
pub fn pagination_offset(page: u64, per_page: u64, max_result_window: u64) -> u64 {
    let offset = page.saturating_mul(per_page);
    if offset.saturating_add(per_page) > max_result_window {
        max_result_window.saturating_sub(per_page)
    } else {
        offset
    }
}

/// A single search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Free text to match; every term must match.
    pub text: String,
    /// Which fields to search and how to order the results.
    pub filter: SearchFilter,
    /// Zero-based page number.
    pub page: u64,
    /// Results per page.
    pub per_page: u64,
}

impl SearchQuery {
    /// Create a post search for the first page.
    pub fn new(text: impl Into<String>, per_page: u64) -> Self {
        Self {
            text: text.into(),
            filter: SearchFilter::Post,
            page: 0,
            per_page,
        }
    }

    /// Set the filter.
    pub fn with_filter(mut self, filter: SearchFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Set the page number.
    pub fn with_page(mut self, page: u64) -> Self {
        self.page = page;
        self
    }

    /// Offset of the first result, clamped to [`MAX_RESULT_WINDOW`].
    pub fn offset(&self) -> u64 {
        pagination_offset(self.page, self.per_page, MAX_RESULT_WINDOW)
    }

    pub fn fields(&self) -> &'static [&'static str] {
        self.filter.fields()
    }

    pub fn sort(&self) -> Option<SortOrder> {
        self.filter.sort()
    }
}
