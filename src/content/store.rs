//! Content store - enumerates and parses content files

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

use super::{Document, FrontMatter, Post};

/// Recognized content file extensions, in lookup priority order
///
/// When both exist for the same slug, the first-checked extension wins.
pub const CONTENT_EXTENSIONS: [&str; 2] = ["md", "markdown"];

/// Reads posts from a flat content directory
///
/// Purely derived from the file system's current state at call time; the
/// store never writes back to source files.
#[derive(Debug, Clone)]
pub struct ContentStore {
    content_dir: PathBuf,
}

impl ContentStore {
    /// Create a store over a content directory
    pub fn new<P: Into<PathBuf>>(content_dir: P) -> Self {
        Self {
            content_dir: content_dir.into(),
        }
    }

    /// The directory this store reads from
    pub fn content_dir(&self) -> &Path {
        &self.content_dir
    }

    /// List one slug per content file, extension stripped
    ///
    /// A missing content directory yields an empty list, not an error.
    pub fn list_slugs(&self) -> Vec<String> {
        self.content_files()
            .iter()
            .filter_map(|path| path.file_stem().and_then(|s| s.to_str()))
            .map(|s| s.to_string())
            .collect()
    }

    /// Parse metadata for every content file; bodies are not loaded
    ///
    /// Each file is parsed independently: a corrupt file is skipped with a
    /// warning and the scan continues.
    pub fn read_all(&self) -> Vec<Post> {
        let mut posts = Vec::new();
        for path in self.content_files() {
            match self.read_metadata(&path) {
                Ok(post) => posts.push(post),
                Err(e) => {
                    tracing::warn!("Failed to load post {:?}: {:#}", path, e);
                }
            }
        }
        posts
    }

    /// Load a single post with its body, trying each recognized extension
    ///
    /// Returns `None` when no file matches the slug or when parsing fails;
    /// parse failures are logged, not propagated.
    pub fn read_one(&self, slug: &str) -> Option<Document> {
        let path = CONTENT_EXTENSIONS
            .iter()
            .map(|ext| self.content_dir.join(format!("{}.{}", slug, ext)))
            .find(|p| p.exists());

        let Some(path) = path else {
            tracing::warn!(
                "Post with slug \"{}\" not found in {:?}",
                slug,
                self.content_dir
            );
            return None;
        };

        match self.read_document(slug, &path) {
            Ok(doc) => Some(doc),
            Err(e) => {
                tracing::warn!("Failed to parse post \"{}\": {:#}", slug, e);
                None
            }
        }
    }

    /// Enumerate content files in deterministic (sorted) order
    ///
    /// Directory iteration order is platform-dependent; sorting gives the
    /// query layer a stable input order for its stable sort.
    fn content_files(&self) -> Vec<PathBuf> {
        let entries = match fs::read_dir(&self.content_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(
                    "Content directory {:?} not readable, returning no posts: {}",
                    self.content_dir,
                    e
                );
                return Vec::new();
            }
        };

        let mut files: Vec<PathBuf> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_content_file(p))
            .collect();
        files.sort();
        files
    }

    fn read_metadata(&self, path: &Path) -> Result<Post> {
        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .context("invalid file name")?
            .to_string();

        let content = fs::read_to_string(path)?;
        let (fm, _body) = FrontMatter::parse(&content)?;
        Ok(self.build_post(slug, fm, path))
    }

    fn read_document(&self, slug: &str, path: &Path) -> Result<Document> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;
        Ok(Document {
            slug: slug.to_string(),
            frontmatter: self.build_post(slug.to_string(), fm, path),
            content: body.to_string(),
        })
    }

    fn build_post(&self, slug: String, fm: FrontMatter, path: &Path) -> Post {
        let file_modified = fs::metadata(path)
            .and_then(|m| m.modified())
            .ok()
            .map(DateTime::<Local>::from);

        // Front-matter date wins; fall back to file mtime, then now
        let date = fm
            .parse_date()
            .unwrap_or_else(|| file_modified.unwrap_or_else(Local::now));

        let last_modified = fm.parse_last_modified().or(file_modified);

        let title = fm.title.unwrap_or_else(|| slug.clone());

        let mut post = Post::new(slug, title, date);
        post.excerpt = fm.excerpt;
        post.author = fm.author;
        post.cover_image = fm.cover_image;
        post.tags = fm.tags;
        post.pinned = fm.pinned;
        post.channel = fm.channel;
        post.column = fm.column;
        post.last_modified = last_modified;
        post.extra = fm.extra;
        post
    }
}

/// Check if a file has a recognized content extension
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| CONTENT_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write_post(dir: &Path, name: &str, content: &str) {
        fs::write(dir.join(name), content).unwrap();
    }

    fn store_with(posts: &[(&str, &str)]) -> (TempDir, ContentStore) {
        let tmp = TempDir::new().unwrap();
        for (name, content) in posts {
            write_post(tmp.path(), name, content);
        }
        let store = ContentStore::new(tmp.path());
        (tmp, store)
    }

    #[test]
    fn test_list_slugs_strips_extensions() {
        let (_tmp, store) = store_with(&[
            ("hello.md", "---\ntitle: Hello\n---\nBody"),
            ("world.markdown", "---\ntitle: World\n---\nBody"),
            ("notes.txt", "ignored"),
        ]);
        let mut slugs = store.list_slugs();
        slugs.sort();
        assert_eq!(slugs, vec!["hello", "world"]);
    }

    #[test]
    fn test_missing_directory_returns_empty() {
        let store = ContentStore::new("/nonexistent/content/blog");
        assert!(store.list_slugs().is_empty());
        assert!(store.read_all().is_empty());
    }

    #[test]
    fn test_read_all_parses_metadata_without_body() {
        let (_tmp, store) = store_with(&[(
            "post.md",
            "---\ntitle: A Post\ndate: 2024-01-15\ntags:\n  - Go\npinned: true\n---\nThe body",
        )]);
        let posts = store.read_all();
        assert_eq!(posts.len(), 1);
        let post = &posts[0];
        assert_eq!(post.slug, "post");
        assert_eq!(post.title, "A Post");
        assert_eq!(post.tags, vec!["Go"]);
        assert!(post.pinned);
    }

    #[test]
    fn test_read_all_skips_corrupt_file() {
        let (_tmp, store) = store_with(&[
            ("good.md", "---\ntitle: Good\ndate: 2024-01-01\n---\nBody"),
            ("bad.md", "---\ntitle: [unclosed\ndate: oops\n---\nBody"),
        ]);
        let posts = store.read_all();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "good");
    }

    #[test]
    fn test_read_one_returns_document_with_body() {
        let (_tmp, store) = store_with(&[(
            "full.md",
            "---\ntitle: Full\ndate: 2024-01-01\n---\nThe full body text.",
        )]);
        let doc = store.read_one("full").unwrap();
        assert_eq!(doc.slug, "full");
        assert_eq!(doc.frontmatter.title, "Full");
        assert!(doc.content.contains("The full body text."));
    }

    #[test]
    fn test_read_one_missing_slug_is_none() {
        let (_tmp, store) = store_with(&[]);
        assert!(store.read_one("nonexistent-slug").is_none());
    }

    #[test]
    fn test_read_one_extension_priority() {
        let (_tmp, store) = store_with(&[
            ("dup.md", "---\ntitle: From md\n---\nmd body"),
            ("dup.markdown", "---\ntitle: From markdown\n---\nmarkdown body"),
        ]);
        let doc = store.read_one("dup").unwrap();
        assert_eq!(doc.frontmatter.title, "From md");
    }

    #[test]
    fn test_read_one_alternate_extension() {
        let (_tmp, store) = store_with(&[("alt.markdown", "---\ntitle: Alt\n---\nBody")]);
        let doc = store.read_one("alt").unwrap();
        assert_eq!(doc.frontmatter.title, "Alt");
    }

    #[test]
    fn test_read_one_corrupt_file_is_none() {
        let (_tmp, store) = store_with(&[("bad.md", "---\ntitle: [unclosed\n---\nBody")]);
        assert!(store.read_one("bad").is_none());
    }
}
