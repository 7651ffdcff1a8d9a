//! Query layer - derived, memoized views over the post set
//!
//! Every view is a pure function of the content directory's current state;
//! staleness comes only from the TTL cache layered on top. List results are
//! shared as `Arc`s, so a cache hit returns the identical allocation.

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::cache::{cache_key, TtlCache};
use crate::channels::ChannelsConfig;
use crate::config::CacheSettings;
use crate::content::{ContentStore, Document, Post};

/// Cache type for the full sorted post list
pub const SORTED_POSTS: &str = "sorted-posts";
/// Cache type for channel-filtered lists
pub const POSTS_BY_CHANNEL: &str = "posts-by-channel";
/// Cache type for column-filtered lists
pub const POSTS_BY_COLUMN: &str = "posts-by-column";
/// Cache type for single-post documents
pub const POST_DATA: &str = "post-data";

/// Values the shared query cache can hold
#[derive(Clone)]
pub enum CacheValue {
    Posts(Arc<Vec<Post>>),
    Document(Arc<Document>),
}

/// The process-wide query cache
pub type QueryCache = TtlCache<CacheValue>;

/// Read-only queries over the content store, classified and memoized
///
/// This is the entire contract the presentation layer depends on:
/// `all_posts_sorted`, `posts_by_channel`, `posts_by_column`, `unique_tags`,
/// `read_one`, and `list_slugs`.
pub struct QueryEngine {
    store: ContentStore,
    channels: Arc<ChannelsConfig>,
    cache: Arc<QueryCache>,
    settings: CacheSettings,
}

impl QueryEngine {
    /// Create an engine over a store, taxonomy, and shared cache
    pub fn new(
        store: ContentStore,
        channels: Arc<ChannelsConfig>,
        cache: Arc<QueryCache>,
        settings: CacheSettings,
    ) -> Self {
        Self {
            store,
            channels,
            cache,
            settings,
        }
    }

    /// The channel/column taxonomy this engine classifies against
    pub fn channels(&self) -> &ChannelsConfig {
        &self.channels
    }

    /// The shared cache, for invalidation and housekeeping
    pub fn cache(&self) -> &Arc<QueryCache> {
        &self.cache
    }

    /// Every post, pinned first, then by date descending
    ///
    /// The sort is stable: equal (pinned, date) keys keep their input order.
    /// Pinned status dominates recency.
    pub fn all_posts_sorted(&self) -> Arc<Vec<Post>> {
        let key = cache_key(SORTED_POSTS, &[]);
        if let Some(CacheValue::Posts(posts)) = self.cache.get(&key) {
            return posts;
        }

        let mut posts = self.store.read_all();
        posts.sort_by(|a, b| b.pinned.cmp(&a.pinned).then_with(|| b.date.cmp(&a.date)));
        let posts = Arc::new(posts);

        self.cache.insert(
            key,
            CacheValue::Posts(posts.clone()),
            Some(self.settings.sorted_posts_ttl()),
        );
        posts
    }

    /// Posts whose resolved channel equals `channel_key`
    ///
    /// An empty key is a documented passthrough: the full sorted list.
    pub fn posts_by_channel(&self, channel_key: &str) -> Arc<Vec<Post>> {
        if channel_key.is_empty() {
            return self.all_posts_sorted();
        }

        let key = cache_key(POSTS_BY_CHANNEL, &[channel_key]);
        if let Some(CacheValue::Posts(posts)) = self.cache.get(&key) {
            return posts;
        }

        let all = self.all_posts_sorted();
        let posts: Vec<Post> = all
            .iter()
            .filter(|post| self.channels.resolve_channel(post) == Some(channel_key))
            .cloned()
            .collect();
        let posts = Arc::new(posts);

        self.cache.insert(
            key,
            CacheValue::Posts(posts.clone()),
            Some(self.settings.filter_ttl()),
        );
        posts
    }

    /// Posts whose resolved (channel, column) pair matches both keys
    ///
    /// Either key empty is the same passthrough as `posts_by_channel`.
    pub fn posts_by_column(&self, channel_key: &str, column_key: &str) -> Arc<Vec<Post>> {
        if channel_key.is_empty() || column_key.is_empty() {
            return self.all_posts_sorted();
        }

        let key = cache_key(POSTS_BY_COLUMN, &[channel_key, column_key]);
        if let Some(CacheValue::Posts(posts)) = self.cache.get(&key) {
            return posts;
        }

        let all = self.all_posts_sorted();
        let posts: Vec<Post> = all
            .iter()
            .filter(|post| {
                self.channels.resolve_column(post) == Some((channel_key, column_key))
            })
            .cloned()
            .collect();
        let posts = Arc::new(posts);

        self.cache.insert(
            key,
            CacheValue::Posts(posts.clone()),
            Some(self.settings.filter_ttl()),
        );
        posts
    }

    /// Every tag across every post: trimmed, deduplicated (exact match,
    /// case-sensitive), lexicographically sorted
    ///
    /// Not cached itself; it derives from the cached sorted list.
    pub fn unique_tags(&self) -> Vec<String> {
        let mut tags = BTreeSet::new();
        for post in self.all_posts_sorted().iter() {
            for tag in &post.tags {
                let trimmed = tag.trim();
                if !trimmed.is_empty() {
                    tags.insert(trimmed.to_string());
                }
            }
        }
        tags.into_iter().collect()
    }

    /// One post with its body, or `None` for an unknown slug
    ///
    /// Absent posts are not cached; a slug that appears later is picked up
    /// on the next call.
    pub fn read_one(&self, slug: &str) -> Option<Arc<Document>> {
        let key = cache_key(POST_DATA, &[slug]);
        if let Some(CacheValue::Document(doc)) = self.cache.get(&key) {
            return Some(doc);
        }

        let doc = Arc::new(self.store.read_one(slug)?);
        self.cache.insert(
            key,
            CacheValue::Document(doc.clone()),
            Some(self.settings.post_ttl()),
        );
        Some(doc)
    }

    /// One slug per content file; uncached
    pub fn list_slugs(&self) -> Vec<String> {
        self.store.list_slugs()
    }
}
