//! OpenSearch query builders.
//!
//! This module turns a [`SearchQuery`] into an OpenSearch search body and
//! reads the hits back out of the response.

use serde_json::{json, Value};

use crate::errors::SearchError;
use feed_search_shared::{SearchHit, SearchQuery, SearchResponse};

/// Build an OpenSearch search body from a SearchQuery.
///
/// The body:
/// - matches with `simple_query_string` over the filter's fields, requiring
///   every term to match (`default_operator: and`)
/// - returns only the `id` field of each document
/// - pages with `from`/`size`, `from` already clamped to the result window
/// - sorts only when the filter asks for it, otherwise keeps relevance order
pub fn build_search_query(query: &SearchQuery) -> Value {
    let mut body = json!({
        "_source": ["id"],
        "from": query.offset(),
        "size": query.per_page,
        "query": {
            "simple_query_string": {
                "query": query.text,
                "fields": query.fields(),
                "default_operator": "and"
            }
        }
    });

    if let Some(sort) = query.sort() {
        body["sort"] = json!([
            { sort.field: { "order": sort.direction.as_str() } }
        ]);
    }

    body
}

/// Parse a search response body into total and hits.
pub fn parse_search_response(body: &Value) -> Result<SearchResponse, SearchError> {
    let hits = body
        .get("hits")
        .ok_or_else(|| SearchError::parse("Response has no hits section"))?;

    // OpenSearch reports `{ "value": n, "relation": "eq" }`; older clusters a bare number
    let total = match &hits["total"] {
        Value::Number(n) => n.as_u64(),
        other => other["value"].as_u64(),
    }
    .ok_or_else(|| SearchError::parse("Response has no hit total"))?;

    let hits = hits["hits"]
        .as_array()
        .map(|hits| hits.iter().filter_map(parse_hit).collect())
        .unwrap_or_default();

    Ok(SearchResponse { total, hits })
}

/// Extract the id of a single hit, preferring the stored `id` field.
fn parse_hit(hit: &Value) -> Option<SearchHit> {
    let id = hit["_source"]["id"]
        .as_str()
        .or_else(|| hit["_id"].as_str())?;

    Some(SearchHit { id: id.to_string() })
}
