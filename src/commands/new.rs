//! Create a new post file

use anyhow::Result;
use std::fs;

use crate::Columnist;

/// Scaffold a content file with a front-matter block
pub fn run(app: &Columnist, title: &str, tags: &[String]) -> Result<()> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    fs::create_dir_all(&app.content_dir)?;
    let file_path = app.content_dir.join(format!("{}.md", slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let tag_lines: String = tags
        .iter()
        .map(|tag| format!("  - {}\n", tag))
        .collect();
    let tags_block = if tag_lines.is_empty() {
        "tags: []\n".to_string()
    } else {
        format!("tags:\n{}", tag_lines)
    };

    let content = format!(
        "---\ntitle: {}\ndate: {}\nauthor: {}\nexcerpt: \"\"\n{}---\n",
        title,
        now.format("%Y-%m-%d %H:%M:%S"),
        app.config.author,
        tags_block
    );

    fs::write(&file_path, content)?;
    println!("Created: {:?}", file_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_post_is_readable_by_the_store() {
        let tmp = TempDir::new().unwrap();
        let app = Columnist::new(tmp.path()).unwrap();
        run(&app, "Hello World", &["Go".to_string()]).unwrap();

        let doc = app.query().read_one("hello-world").unwrap();
        assert_eq!(doc.frontmatter.title, "Hello World");
        assert_eq!(doc.frontmatter.tags, vec!["Go"]);
    }

    #[test]
    fn test_new_post_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let app = Columnist::new(tmp.path()).unwrap();
        run(&app, "Hello", &[]).unwrap();
        assert!(run(&app, "Hello", &[]).is_err());
    }
}
