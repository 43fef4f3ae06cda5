//! OpenSearch index configuration and mappings.
//!
//! This module defines the index settings and mappings for the posts index.

use serde_json::{json, Value};

/// Default name of the posts index.
pub const DEFAULT_INDEX_NAME: &str = "posts";

/// Index-time analyzer that expands tokens into their prefixes.
pub const AUTOCOMPLETE_ANALYZER: &str = "autocomplete";

/// Search-time analyzer paired with [`AUTOCOMPLETE_ANALYZER`].
pub const AUTOCOMPLETE_SEARCH_ANALYZER: &str = "autocomplete_search";

/// Get the index settings and mappings for the posts index.
///
/// The configuration includes:
/// - **autocomplete** analyzer: `edge_ngram` tokenizer (1 to 20 characters,
///   letters and digits only) followed by `lowercase` and `remove_duplicates`
/// - **autocomplete_search** analyzer: plain `lowercase` tokenizer, so the
///   query is not expanded into prefixes a second time
/// - `text` and `title` indexed with the standard analyzer plus an
///   `autocomplete` sub-field using the analyzer pair above
/// - `published` as a date for newest-first sorting
pub fn get_index_settings() -> Value {
    json!({
        "settings": {
            "analysis": {
                "analyzer": {
                    AUTOCOMPLETE_ANALYZER: {
                        "tokenizer": "autocomplete",
                        "filter": ["lowercase", "remove_duplicates"]
                    },
                    AUTOCOMPLETE_SEARCH_ANALYZER: {
                        "tokenizer": "lowercase"
                    }
                },
                "tokenizer": {
                    "autocomplete": {
                        "type": "edge_ngram",
                        "min_gram": 1,
                        "max_gram": 20,
                        "token_chars": ["letter", "digit"]
                    }
                }
            }
        },
        "mappings": {
            "properties": {
                "id": {
                    "type": "keyword"
                },
                "text": autocomplete_text_field(),
                "title": autocomplete_text_field(),
                "author": {
                    "type": "text"
                },
                "published": {
                    "type": "date"
                }
            }
        }
    })
}

/// A standard-analyzed text field with an autocomplete sub-field.
fn autocomplete_text_field() -> Value {
    json!({
        "type": "text",
        "fields": {
            "autocomplete": {
                "type": "text",
                "analyzer": AUTOCOMPLETE_ANALYZER,
                "search_analyzer": AUTOCOMPLETE_SEARCH_ANALYZER
            }
        }
    })
}
