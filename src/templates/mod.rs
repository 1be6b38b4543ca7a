//! Built-in site templates using the Tera template engine
//!
//! The listing and detail views are embedded in the binary. Class names come
//! from the configured style map so the markup carries no styling decisions.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::content::{PostDetail, PostSummary};
use crate::helpers::url_for;

/// Template renderer with the embedded site templates
pub struct TemplateRenderer {
    tera: Tera,
    base: Context,
}

impl TemplateRenderer {
    /// Create a new renderer with all site templates loaded
    pub fn new(config: &SiteConfig) -> Result<Self> {
        let mut tera = Tera::default();

        // URLs would be mangled by HTML escaping; templates escape text
        // fields explicitly instead
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("post.html", include_str!("site/post.html")),
            (
                "partials/header.html",
                include_str!("site/partials/header.html"),
            ),
            (
                "partials/post_card.html",
                include_str!("site/partials/post_card.html"),
            ),
        ])?;

        let url_config = config.clone();
        tera.register_filter(
            "url_for",
            move |value: &tera::Value, _args: &HashMap<String, tera::Value>| {
                let path = tera::try_get_value!("url_for", "value", String, value);
                Ok(tera::Value::String(url_for(&url_config, &path)))
            },
        );

        Ok(Self {
            tera,
            base: base_context(config),
        })
    }

    /// Render the blog listing page
    pub fn render_listing(&self, posts: &[PostSummary]) -> Result<String> {
        let mut context = self.base.clone();
        context.insert("posts", posts);
        self.render("blog.html", &context)
    }

    /// Render a single post page
    pub fn render_post(&self, post: &PostDetail) -> Result<String> {
        let mut context = self.base.clone();
        context.insert("post", post);
        self.render("post.html", &context)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Site-wide values every page can use
#[derive(Debug, Clone, Serialize)]
pub struct ConfigData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub blog_path: String,
}

fn base_context(config: &SiteConfig) -> Context {
    let config_data = ConfigData {
        title: config.title.clone(),
        description: config.description.clone(),
        author: config.author.clone(),
        blog_path: config.blog_path.clone(),
    };

    let mut context = Context::new();
    context.insert("config", &config_data);
    context.insert("menu", &config.menu);
    context.insert("styles", &config.style_map());
    context
}
