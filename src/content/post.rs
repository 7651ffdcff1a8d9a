//! Post models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Post metadata as used by list views; the body is not loaded here
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Unique identifier derived from the source filename (extension stripped)
    pub slug: String,

    /// Post title
    pub title: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// Short summary shown in list views
    pub excerpt: Option<String>,

    /// Post author
    pub author: Option<String>,

    /// Cover image URL
    pub cover_image: Option<String>,

    /// Post tags, in front-matter order
    pub tags: Vec<String>,

    /// Pinned posts sort ahead of all others regardless of date
    pub pinned: bool,

    /// Explicit channel override
    pub channel: Option<String>,

    /// Explicit column override
    pub column: Option<String>,

    /// Last modification date
    pub last_modified: Option<DateTime<Local>>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Post {
    /// Create a post with minimal required fields
    pub fn new(slug: String, title: String, date: DateTime<Local>) -> Self {
        Self {
            slug,
            title,
            date,
            excerpt: None,
            author: None,
            cover_image: None,
            tags: Vec::new(),
            pinned: false,
            channel: None,
            column: None,
            last_modified: None,
            extra: HashMap::new(),
        }
    }
}

/// A fully loaded post: metadata plus the raw markup body
///
/// Returned by single-post retrieval only; list views stay metadata-only.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub slug: String,
    pub frontmatter: Post,
    /// Raw markup body; rendering is the presentation layer's concern
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::frontmatter::parse_date_string;

    #[test]
    fn test_new_post_defaults() {
        let date = parse_date_string("2024-01-01").unwrap();
        let post = Post::new("hello".to_string(), "Hello".to_string(), date);
        assert_eq!(post.slug, "hello");
        assert!(!post.pinned);
        assert!(post.tags.is_empty());
        assert!(post.channel.is_none());
    }
}
