//! Configuration module

pub mod site;

pub use site::{CacheSettings, SiteConfig};
