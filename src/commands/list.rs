//! List site content

use anyhow::Result;

use crate::Columnist;

/// List site content by type
pub fn run(app: &Columnist, content_type: &str) -> Result<()> {
    let engine = app.query();

    match content_type {
        "post" | "posts" => {
            let posts = engine.all_posts_sorted();
            println!("Posts ({}):", posts.len());
            for post in posts.iter() {
                let pin = if post.pinned { "*" } else { " " };
                let placement = match engine.channels().resolve_column(post) {
                    Some((channel, column)) => format!("{}/{}", channel, column),
                    None => "-".to_string(),
                };
                println!(
                    " {} {} - {} [{}]",
                    pin,
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    placement
                );
            }
        }
        "tag" | "tags" => {
            let posts = engine.all_posts_sorted();
            let tags = engine.unique_tags();
            println!("Tags ({}):", tags.len());
            for tag in tags {
                let count = posts
                    .iter()
                    .filter(|p| p.tags.iter().any(|t| t.trim() == tag))
                    .count();
                println!("  {} ({})", tag, count);
            }
        }
        "channel" | "channels" => {
            for (key, channel) in engine.channels().channels() {
                let count = engine.posts_by_channel(key).len();
                println!("{} ({}): {} posts - {}", channel.name, key, count, channel.description);
            }
        }
        "column" | "columns" => {
            for (channel_key, channel) in engine.channels().channels() {
                println!("{} ({}):", channel.name, channel_key);
                for (column_key, column) in &channel.columns {
                    let count = engine.posts_by_column(channel_key, column_key).len();
                    println!(
                        "  {} ({}): {} posts [tags: {}]",
                        column.name,
                        column_key,
                        count,
                        column.tags.join(", ")
                    );
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, channel, column",
                content_type
            );
        }
    }

    Ok(())
}
