//! Content module - posts, front-matter, and markdown rendering

mod error;
mod frontmatter;
mod markdown;
mod post;
pub mod store;

pub use error::ContentError;
pub use frontmatter::FrontMatter;
pub use markdown::MarkdownRenderer;
pub use post::{Post, PostSummary};
