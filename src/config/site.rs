//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,

    // URL
    pub url: String,
    pub root: String,
    /// Route of the blog listing page
    pub blog_path: String,

    // Directory
    pub posts_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    /// Moment-style format for displayed post dates; unset shows dates as written
    pub date_format: Option<String>,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Presentation
    #[serde(default = "default_menu")]
    pub menu: Vec<MenuItem>,
    /// Style identifier -> class name, merged over the built-in defaults
    #[serde(default)]
    pub styles: BTreeMap<String, String>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "My Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),
            blog_path: "/blog".to_string(),

            posts_dir: "posts".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            date_format: None,
            highlight: HighlightConfig::default(),

            menu: default_menu(),
            styles: BTreeMap::new(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Style map handed to templates: defaults overlaid with configured names
    pub fn style_map(&self) -> BTreeMap<String, String> {
        let mut styles: BTreeMap<String, String> = DEFAULT_STYLES
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        for (key, value) in &self.styles {
            styles.insert(key.clone(), value.clone());
        }
        styles
    }
}

/// Class names used by the built-in templates
const DEFAULT_STYLES: &[(&str, &str)] = &[
    ("container", "container"),
    ("name", "name"),
    ("name_link", "name-link"),
    ("nav_links", "nav-links"),
    ("nav_link_item", "nav-link-item"),
    ("line", "line"),
    ("headline", "headline"),
    ("post", "post"),
    ("post_title", "post-title"),
    ("post_description", "post-description"),
    ("post_date", "post-date"),
    ("post_body", "post-body"),
    ("return_link", "return-link"),
];

/// A header navigation entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem {
            name: "About Me".to_string(),
            path: "/about".to_string(),
        },
        MenuItem {
            name: "My Projects".to_string(),
            path: "/projects".to_string(),
        },
    ]
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}
