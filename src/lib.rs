//! folio: a static portfolio site generator
//!
//! Markdown posts with front-matter are turned into a blog listing page and
//! one detail page per post, rendered through embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod generator;
pub mod helpers;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};

use content::{Blog, ContentSource, MarkdownRenderer};

/// Site configuration file, relative to the base directory
pub const CONFIG_FILE: &str = "_config.yml";

/// The main site handle
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts
    pub posts_dir: PathBuf,
    /// Files copied verbatim into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Create a new site from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let posts_dir = base_dir.join(&config.posts_dir);
        let static_dir = base_dir.join(&config.static_dir);
        let public_dir = base_dir.join(&config.public_dir);

        Ok(Self {
            config,
            base_dir,
            posts_dir,
            static_dir,
            public_dir,
        })
    }

    /// Snapshot the posts directory into a blog
    pub fn load_blog(&self) -> Result<Blog> {
        let source = ContentSource::load(&self.base_dir, &self.posts_dir)?;
        let renderer = MarkdownRenderer::with_options(&self.config.highlight);
        Ok(Blog::new(source, renderer, self.config.date_format.as_deref()))
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<()> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_new_without_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.posts_dir, tmp.path().join("posts"));
        assert_eq!(folio.public_dir, tmp.path().join("public"));
    }

    #[test]
    fn test_new_reads_config_dirs() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join(CONFIG_FILE),
            "posts_dir: content/blog\npublic_dir: dist\n",
        )
        .unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.posts_dir, tmp.path().join("content/blog"));
        assert_eq!(folio.public_dir, tmp.path().join("dist"));
    }

    #[test]
    fn test_load_blog_round_trip() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(
            posts.join("first.md"),
            "---\ntitle: First\ndate: 2024-01-01\ndescription: One\npath: /first\n---\nHello *there*\n",
        )
        .unwrap();

        let blog = Folio::new(tmp.path()).unwrap().load_blog().unwrap();
        let summaries = blog.list_posts().unwrap();
        assert_eq!(summaries.len(), 1);

        let detail = blog.resolve_post(&summaries[0].path).unwrap();
        assert_eq!(detail.title, "First");
        assert_eq!(detail.body_html, "<p>Hello <em>there</em></p>\n");
    }
}
