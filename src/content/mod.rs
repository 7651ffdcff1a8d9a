//! Content module - reads and parses post files

pub mod frontmatter;
pub mod post;
pub mod store;

pub use frontmatter::FrontMatter;
pub use post::{Document, Post};
pub use store::ContentStore;
