//! columnist: a channel/column blog content engine
//!
//! Reads frontmatter posts from a content directory, classifies them into a
//! channel/column taxonomy by explicit overrides or tag matching, and serves
//! sorted and filtered views through a TTL cache.

pub mod cache;
pub mod channels;
pub mod commands;
pub mod config;
pub mod content;
pub mod query;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use cache::SweeperHandle;
use channels::ChannelsConfig;
use query::{QueryCache, QueryEngine};

/// The main application: configuration, taxonomy, and the shared cache
///
/// The cache has an explicit lifecycle: constructed here, shared by every
/// engine, cleared or dropped with this struct. There is no hidden global
/// state.
#[derive(Clone)]
pub struct Columnist {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
    /// Channel/column taxonomy
    pub channels: Arc<ChannelsConfig>,
    /// Shared query cache
    pub cache: Arc<QueryCache>,
}

impl Columnist {
    /// Create an instance from a directory, with the built-in taxonomy
    ///
    /// Reads `_config.yml` from the base directory when present.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        Self::with_channels(base_dir, ChannelsConfig::default())
    }

    /// Create an instance with a caller-provided taxonomy
    pub fn with_channels<P: AsRef<Path>>(base_dir: P, channels: ChannelsConfig) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        for finding in channels::validate::validate_config(&channels) {
            tracing::debug!("channel config: {}", finding);
        }

        let content_dir = base_dir.join(&config.content_dir);
        let cache = Arc::new(QueryCache::with_default_ttl(config.cache.default_ttl()));

        Ok(Self {
            config,
            base_dir,
            content_dir,
            channels: Arc::new(channels),
            cache,
        })
    }

    /// Build a query engine sharing this instance's cache and taxonomy
    pub fn query(&self) -> QueryEngine {
        QueryEngine::new(
            content::ContentStore::new(&self.content_dir),
            self.channels.clone(),
            self.cache.clone(),
            self.config.cache.clone(),
        )
    }

    /// Start the periodic cache sweeper; stops when the handle is dropped
    pub fn start_sweeper(&self) -> SweeperHandle {
        cache::spawn_sweeper(self.cache.clone(), self.config.cache.sweep_interval())
    }
}
