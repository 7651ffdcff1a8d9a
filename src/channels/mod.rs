//! Channel and column classification
//!
//! Posts are grouped into a two-level taxonomy: channels at the top, columns
//! within a channel. A post's placement is a derived view: an explicit
//! front-matter override wins, otherwise the first configured column (in
//! declaration order) whose tag list intersects the post's tags.

pub mod validate;

use indexmap::IndexMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::content::Post;

/// A sub-category within a channel, matched by its classification tags
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub description: String,
    /// Tags that classify a post into this column (exact string match)
    pub tags: Vec<String>,
    pub cover: Option<String>,
}

/// A top-level content category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Channel {
    pub name: String,
    pub description: String,
    pub icon: String,
    /// Columns in declaration order; order decides tag-match tie-breaks
    pub columns: IndexMap<String, Column>,
}

/// Where a tag leads, with its declaration ordinal for tie-breaking
#[derive(Debug, Clone)]
struct TagTarget {
    ord: usize,
    channel: String,
    column: String,
}

/// The static channel/column taxonomy with a precomputed tag index
///
/// Channels and columns keep declaration order (`IndexMap`); the index maps
/// each tag to its first-declared (channel, column) pair, so resolution is a
/// lookup instead of a nested scan while preserving first-match semantics.
#[derive(Debug, Clone)]
pub struct ChannelsConfig {
    channels: IndexMap<String, Channel>,
    tag_index: HashMap<String, TagTarget>,
}

impl ChannelsConfig {
    /// Build a configuration and its tag index
    pub fn new(channels: IndexMap<String, Channel>) -> Self {
        let mut tag_index: HashMap<String, TagTarget> = HashMap::new();
        let mut ord = 0usize;
        for (channel_key, channel) in &channels {
            for (column_key, column) in &channel.columns {
                for tag in &column.tags {
                    // First declaration wins for tags claimed twice
                    tag_index.entry(tag.clone()).or_insert_with(|| TagTarget {
                        ord,
                        channel: channel_key.clone(),
                        column: column_key.clone(),
                    });
                }
                ord += 1;
            }
        }
        Self {
            channels,
            tag_index,
        }
    }

    /// Channels in declaration order
    pub fn channels(&self) -> impl Iterator<Item = (&str, &Channel)> {
        self.channels.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Look up a channel by key
    pub fn channel(&self, key: &str) -> Option<&Channel> {
        self.channels.get(key)
    }

    /// Look up a column by (channel, column) keys
    pub fn column(&self, channel_key: &str, column_key: &str) -> Option<&Column> {
        self.channels.get(channel_key)?.columns.get(column_key)
    }

    /// Resolve the channel a post belongs to
    ///
    /// A valid explicit `channel` override wins; an override naming an
    /// unknown channel is ignored. Otherwise the first configured column
    /// whose tags intersect the post's tags decides, else `None`.
    pub fn resolve_channel(&self, post: &Post) -> Option<&str> {
        if let Some(channel) = &post.channel {
            if let Some((key, _)) = self.channels.get_key_value(channel) {
                return Some(key.as_str());
            }
        }
        self.match_tags(&post.tags).map(|t| t.channel.as_str())
    }

    /// Resolve the (channel, column) pair a post belongs to
    ///
    /// An explicit override is honored only when both keys are present and
    /// name an existing column; otherwise tag matching applies.
    pub fn resolve_column(&self, post: &Post) -> Option<(&str, &str)> {
        if let (Some(channel), Some(column)) = (&post.channel, &post.column) {
            if let Some(ch) = self.channels.get(channel) {
                if ch.columns.contains_key(column) {
                    let (channel_key, ch) = self.channels.get_key_value(channel)?;
                    let (column_key, _) = ch.columns.get_key_value(column)?;
                    return Some((channel_key.as_str(), column_key.as_str()));
                }
            }
        }
        self.match_tags(&post.tags)
            .map(|t| (t.channel.as_str(), t.column.as_str()))
    }

    /// First-declared (channel, column) pair intersecting the given tags
    fn match_tags(&self, tags: &[String]) -> Option<&TagTarget> {
        tags.iter()
            .filter_map(|tag| self.tag_index.get(tag.as_str()))
            .min_by_key(|target| target.ord)
    }
}

impl Default for ChannelsConfig {
    fn default() -> Self {
        DEFAULT_CHANNELS.clone()
    }
}

fn column(name: &str, description: &str, tags: &[&str], cover: Option<&str>) -> Column {
    Column {
        name: name.to_string(),
        description: description.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        cover: cover.map(|c| c.to_string()),
    }
}

lazy_static! {
    /// Built-in taxonomy; embedders may construct their own `ChannelsConfig`
    pub static ref DEFAULT_CHANNELS: ChannelsConfig = {
        let mut channels = IndexMap::new();

        let mut tech_columns = IndexMap::new();
        tech_columns.insert(
            "go".to_string(),
            column(
                "The Road to Go Mastery",
                "Articles on the Go language and its ecosystem",
                &["Go", "golang"],
                Some("/images/columns/go_cover.png"),
            ),
        );
        tech_columns.insert(
            "general".to_string(),
            column(
                "General Engineering",
                "Engineering notes beyond any single language",
                &["tech", "programming", "engineering"],
                None,
            ),
        );
        tech_columns.insert(
            "product".to_string(),
            column(
                "Product and Design",
                "Product design and user experience",
                &["product", "design", "UX", "UI"],
                Some("/images/columns/product_cover.png"),
            ),
        );
        channels.insert(
            "tech".to_string(),
            Channel {
                name: "Tech".to_string(),
                description: "Technical writing and study notes".to_string(),
                icon: "/images/channels/tech.svg".to_string(),
                columns: tech_columns,
            },
        );

        let mut life_columns = IndexMap::new();
        life_columns.insert(
            "japan".to_string(),
            column(
                "Travels in Japan",
                "Trip records and cultural notes from Japan",
                &["japan", "japan-travel"],
                Some("/images/columns/japan_cover.jpg"),
            ),
        );
        life_columns.insert(
            "thoughts".to_string(),
            column(
                "Year in Review",
                "Annual summaries and retrospectives",
                &["year-in-review", "thoughts", "retrospective"],
                None,
            ),
        );
        life_columns.insert(
            "misc".to_string(),
            column(
                "Miscellany",
                "Notes and loose thoughts",
                &["misc", "notes", "essay"],
                None,
            ),
        );
        channels.insert(
            "life".to_string(),
            Channel {
                name: "Life".to_string(),
                description: "Life, travel, and reflection".to_string(),
                icon: "/images/channels/life.jpg".to_string(),
                columns: life_columns,
            },
        );

        ChannelsConfig::new(channels)
    };
}


#[cfg(test)]
mod tests {
    use super::test_support::{post_with_tags, test_config};
    use super::*;

    #[test]
    fn test_tag_fallback_resolves_channel_and_column() {
        let config = test_config();
        let post = post_with_tags("a", &["Go"]);
        assert_eq!(config.resolve_channel(&post), Some("tech"));
        assert_eq!(config.resolve_column(&post), Some(("tech", "go")));
        // Determinism across repeated calls
        assert_eq!(config.resolve_column(&post), Some(("tech", "go")));
    }

    #[test]
    fn test_explicit_override_beats_tag_match() {
        let config = test_config();
        let mut post = post_with_tags("a", &["Go"]);
        post.channel = Some("life".to_string());
        post.column = Some("japan".to_string());
        assert_eq!(config.resolve_channel(&post), Some("life"));
        assert_eq!(config.resolve_column(&post), Some(("life", "japan")));
    }

    #[test]
    fn test_invalid_override_falls_back_to_tags() {
        let config = test_config();
        let mut post = post_with_tags("a", &["japan"]);
        post.channel = Some("nonexistent".to_string());
        assert_eq!(config.resolve_channel(&post), Some("life"));

        post.column = Some("nonexistent".to_string());
        assert_eq!(config.resolve_column(&post), Some(("life", "japan")));
    }

    #[test]
    fn test_column_override_requires_channel() {
        let config = test_config();
        let mut post = post_with_tags("a", &["Go"]);
        post.column = Some("japan".to_string());
        // Column alone is not honored; tags decide
        assert_eq!(config.resolve_column(&post), Some(("tech", "go")));
    }

    #[test]
    fn test_no_match_is_none() {
        let config = test_config();
        let post = post_with_tags("a", &["unclassified"]);
        assert_eq!(config.resolve_channel(&post), None);
        assert_eq!(config.resolve_column(&post), None);

        let untagged = post_with_tags("b", &[]);
        assert_eq!(config.resolve_column(&untagged), None);
    }

    #[test]
    fn test_declaration_order_breaks_cross_column_ties() {
        let config = test_config();
        // "programming" belongs to tech/general, "japan" to life/japan;
        // tech/general is declared earlier, so it wins regardless of the
        // post's tag order
        let post = post_with_tags("a", &["japan", "programming"]);
        assert_eq!(config.resolve_column(&post), Some(("tech", "general")));
    }

    #[test]
    fn test_duplicate_tag_first_declaration_wins() {
        let mut channels = IndexMap::new();
        let mut columns = IndexMap::new();
        columns.insert(
            "first".to_string(),
            column("First", "first", &["shared"], None),
        );
        columns.insert(
            "second".to_string(),
            column("Second", "second", &["shared"], None),
        );
        channels.insert(
            "ch".to_string(),
            Channel {
                name: "Ch".to_string(),
                description: "channel".to_string(),
                icon: "/ch.svg".to_string(),
                columns,
            },
        );
        let config = ChannelsConfig::new(channels);

        let post = post_with_tags("a", &["shared"]);
        assert_eq!(config.resolve_column(&post), Some(("ch", "first")));
    }

    #[test]
    fn test_tag_match_is_exact() {
        let config = test_config();
        // Tag matching does not trim or fold case
        let post = post_with_tags("a", &["go", " Go "]);
        assert_eq!(config.resolve_column(&post), None);
    }

    #[test]
    fn test_default_config_is_consistent() {
        let config = ChannelsConfig::default();
        assert!(config.channel("tech").is_some());
        assert!(config.column("tech", "go").is_some());
        assert!(config.column("life", "japan").is_some());
    }
}
