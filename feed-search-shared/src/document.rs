//! The searchable projection of a post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A post as it is stored in the search index.
///
/// The upstream post store owns the post and assigns its `id`; the index only
/// mirrors the fields needed to search it. The `id` is stored in the document
/// body as well as used as the document key so searches can project it alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostDocument {
    /// Identifier assigned by the upstream store.
    pub id: String,
    /// Body text of the post.
    pub text: String,
    /// Post title.
    pub title: String,
    /// Publication timestamp.
    pub published: DateTime<Utc>,
    /// Free-text author name.
    pub author: String,
}

impl PostDocument {
    /// Create a new post document.
    pub fn new(
        id: impl Into<String>,
        text: impl Into<String>,
        title: impl Into<String>,
        published: DateTime<Utc>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            title: title.into(),
            published,
            author: author.into(),
        }
    }

    /// Look up a searchable text field by its index field name.
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "id" => Some(&self.id),
            "text" => Some(&self.text),
            "title" => Some(&self.title),
            "author" => Some(&self.author),
            _ => None,
        }
    }
}
