//! Content module - blog posts, their front-matter, and the listing/detail pipeline

mod blog;
mod error;
mod frontmatter;
pub mod loader;
mod markdown;
mod post;

pub use blog::Blog;
pub use error::ContentError;
pub use frontmatter::{parse_date, FrontMatter};
pub use loader::ContentSource;
pub use markdown::{MarkdownRenderer, Renderer};
pub use post::{normalize_route, ContentItem, PostDetail, PostSummary};
