//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,

    // Directory
    pub content_dir: String,

    // Caching
    #[serde(default)]
    pub cache: CacheSettings,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Columnist".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),

            content_dir: "content/blog".to_string(),

            cache: CacheSettings::default(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Cache lifetimes, in seconds
///
/// Differentiated per query: the full sorted list tolerates more staleness
/// than the filtered views, single-post lookups the most.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheSettings {
    pub default_ttl: u64,
    pub sorted_posts_ttl: u64,
    pub filter_ttl: u64,
    pub post_ttl: u64,
    pub sweep_interval: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            default_ttl: 5 * 60,
            sorted_posts_ttl: 10 * 60,
            filter_ttl: 8 * 60,
            post_ttl: 15 * 60,
            sweep_interval: 60,
        }
    }
}

impl CacheSettings {
    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn sorted_posts_ttl(&self) -> Duration {
        Duration::from_secs(self.sorted_posts_ttl)
    }

    pub fn filter_ttl(&self) -> Duration {
        Duration::from_secs(self.filter_ttl)
    }

    pub fn post_ttl(&self) -> Duration {
        Duration::from_secs(self.post_ttl)
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }
}
