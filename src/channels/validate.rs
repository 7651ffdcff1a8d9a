//! Advisory validation for the channel configuration and post classification
//!
//! Findings never affect resolution; they exist so configuration mistakes
//! and unclassifiable posts surface during development (`columnist check`).

use std::collections::HashMap;
use std::fmt;

use super::ChannelsConfig;
use crate::content::Post;

/// How serious a finding is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Something is wrong and should be fixed (e.g. an override that can
    /// never resolve)
    Error,
    /// Worth a look, but the system behaves deterministically anyway
    Warning,
}

/// One validation finding
#[derive(Debug, Clone)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    fn error(message: String) -> Self {
        Self {
            severity: Severity::Error,
            message,
        }
    }

    fn warning(message: String) -> Self {
        Self {
            severity: Severity::Warning,
            message,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.severity {
            Severity::Error => write!(f, "error: {}", self.message),
            Severity::Warning => write!(f, "warning: {}", self.message),
        }
    }
}

/// Check the channel configuration for consistency
///
/// The type system already guarantees shape (names are strings, tags are
/// string lists), so this checks the semantic rules: nothing empty, and tag
/// sets effectively disjoint across columns.
pub fn validate_config(config: &ChannelsConfig) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut tag_owners: HashMap<&str, String> = HashMap::new();

    for (channel_key, channel) in config.channels() {
        if channel.name.trim().is_empty() {
            findings.push(Finding::error(format!(
                "channel '{}' has an empty name",
                channel_key
            )));
        }
        if channel.description.trim().is_empty() {
            findings.push(Finding::warning(format!(
                "channel '{}' has an empty description",
                channel_key
            )));
        }
        if channel.columns.is_empty() {
            findings.push(Finding::error(format!(
                "channel '{}' has no columns",
                channel_key
            )));
        }

        for (column_key, column) in &channel.columns {
            let qualified = format!("{}.{}", channel_key, column_key);
            if column.name.trim().is_empty() {
                findings.push(Finding::error(format!(
                    "column '{}' has an empty name",
                    qualified
                )));
            }
            if column.description.trim().is_empty() {
                findings.push(Finding::warning(format!(
                    "column '{}' has an empty description",
                    qualified
                )));
            }
            if column.tags.is_empty() {
                findings.push(Finding::warning(format!(
                    "column '{}' has no classification tags; only explicit overrides can reach it",
                    qualified
                )));
            }
            for tag in &column.tags {
                if tag.trim().is_empty() {
                    findings.push(Finding::error(format!(
                        "column '{}' contains a blank tag",
                        qualified
                    )));
                    continue;
                }
                match tag_owners.get(tag.as_str()) {
                    Some(owner) if owner != &qualified => {
                        findings.push(Finding::warning(format!(
                            "tag '{}' in column '{}' is shadowed by column '{}' (first declaration wins)",
                            tag, qualified, owner
                        )));
                    }
                    Some(_) => {}
                    None => {
                        tag_owners.insert(tag.as_str(), qualified.clone());
                    }
                }
            }
        }
    }

    findings
}

/// Check one post's classification fields against the configuration
pub fn validate_post(post: &Post, config: &ChannelsConfig) -> Vec<Finding> {
    let mut findings = Vec::new();

    if let Some(channel) = &post.channel {
        if config.channel(channel).is_none() {
            findings.push(Finding::error(format!(
                "post '{}': channel '{}' does not exist",
                post.slug, channel
            )));
        }
    }

    if let Some(column) = &post.column {
        match &post.channel {
            Some(channel) if config.channel(channel).is_some() => {
                if config.column(channel, column).is_none() {
                    findings.push(Finding::error(format!(
                        "post '{}': column '{}' does not exist in channel '{}'",
                        post.slug, column, channel
                    )));
                }
            }
            Some(_) => {
                // Unknown channel already reported above
            }
            None => {
                findings.push(Finding::warning(format!(
                    "post '{}': column '{}' specified without a channel",
                    post.slug, column
                )));
            }
        }
    }

    if post.channel.is_none() && post.column.is_none() && config.resolve_column(post).is_none() {
        findings.push(Finding::warning(format!(
            "post '{}': no override and no tag matches any column; it will only appear in the unfiltered list",
            post.slug
        )));
    }

    findings
}

/// Aggregate result of validating a post set
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub total_posts: usize,
    pub clean_posts: usize,
    pub findings: Vec<Finding>,
}

impl ValidationReport {
    /// Whether any error-level finding was recorded
    pub fn has_errors(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == Severity::Error)
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        let errors = self
            .findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
            .count();
        let warnings = self.findings.len() - errors;
        format!(
            "{}/{} posts clean, {} errors, {} warnings",
            self.clean_posts, self.total_posts, errors, warnings
        )
    }
}

/// Validate every post's classification
pub fn validate_posts(posts: &[Post], config: &ChannelsConfig) -> ValidationReport {
    let mut findings = Vec::new();
    let mut clean_posts = 0;

    for post in posts {
        let post_findings = validate_post(post, config);
        if post_findings.is_empty() {
            clean_posts += 1;
        }
        findings.extend(post_findings);
    }

    ValidationReport {
        total_posts: posts.len(),
        clean_posts,
        findings,
    }
}
