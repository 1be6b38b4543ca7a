//! Generator module - two-phase build of the blog into static HTML
//!
//! Phase one plans the route table from the content snapshot. Phase two
//! resolves and renders each route on its own, so one broken post never
//! stops the other pages from being written.

use anyhow::{anyhow, bail, Result};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

use crate::content::{normalize_route, Blog, ContentError, Renderer};
use crate::templates::TemplateRenderer;
use crate::Folio;

/// A page the build will produce
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Route {
    /// The blog index at the configured listing path
    Listing(String),
    /// One post, keyed by its front-matter path
    Detail(String),
}

impl Route {
    pub fn path(&self) -> &str {
        match self {
            Route::Listing(path) | Route::Detail(path) => path,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Listing(path) => write!(f, "listing {}", path),
            Route::Detail(path) => write!(f, "post {}", path),
        }
    }
}

/// A route that could not be generated
#[derive(Debug)]
pub struct RouteFailure {
    pub route: Route,
    pub error: anyhow::Error,
}

/// Outcome of a build
#[derive(Debug, Default)]
pub struct BuildReport {
    pub pages_written: usize,
    pub assets_copied: usize,
    pub failures: Vec<RouteFailure>,
}

impl BuildReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Static site generator using the built-in templates
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        let renderer = TemplateRenderer::new(&folio.config)?;

        Ok(Self {
            folio: folio.clone(),
            renderer,
        })
    }

    /// Phase one: the listing route plus one detail route per declared path.
    ///
    /// Duplicate declarations produce a single route; resolving it reports
    /// the conflict.
    pub fn plan<R: Renderer>(&self, blog: &Blog<R>) -> Vec<Route> {
        let details: BTreeSet<String> = blog
            .source()
            .items()
            .iter()
            .filter_map(|item| item.declared_route())
            .collect();

        let mut routes = vec![Route::Listing(self.listing_path())];
        routes.extend(details.into_iter().map(Route::Detail));
        routes
    }

    /// Phase two: render every planned route into the public directory
    pub fn generate<R: Renderer>(&self, blog: &Blog<R>) -> Result<BuildReport> {
        fs::create_dir_all(&self.folio.public_dir)?;

        let mut report = BuildReport {
            assets_copied: self.copy_static_assets()?,
            ..BuildReport::default()
        };

        let routes = self.plan(blog);
        tracing::info!("Planned {} routes", routes.len());

        for route in routes {
            let result = self
                .render_route(blog, &route)
                .and_then(|html| self.write_page(route.path(), &html));

            match result {
                Ok(output) => {
                    tracing::debug!("Generated {}: {:?}", route, output);
                    report.pages_written += 1;
                }
                Err(error) => {
                    tracing::error!("Failed to generate {}: {:#}", route, error);
                    report.failures.push(RouteFailure { route, error });
                }
            }
        }

        Ok(report)
    }

    /// Resolve a route's data and render it
    pub fn render_route<R: Renderer>(&self, blog: &Blog<R>, route: &Route) -> Result<String> {
        match route {
            Route::Listing(_) => {
                let posts = blog.list_posts()?;
                self.renderer.render_listing(&posts)
            }
            Route::Detail(path) if *path == self.listing_path() => {
                Err(self.listing_collision(blog, path).into())
            }
            Route::Detail(path) => {
                let post = blog.resolve_post(path)?;
                self.renderer.render_post(&post)
            }
        }
    }

    fn listing_path(&self) -> String {
        normalize_route(&self.folio.config.blog_path)
    }

    /// A post claiming the listing route conflicts with the site config
    fn listing_collision<R: Renderer>(&self, blog: &Blog<R>, path: &str) -> ContentError {
        let mut sources: Vec<PathBuf> = blog
            .source()
            .items()
            .iter()
            .filter(|item| item.declared_route().as_deref() == Some(path))
            .map(|item| item.source.clone())
            .collect();
        sources.push(PathBuf::from(crate::CONFIG_FILE));

        ContentError::AmbiguousPath {
            path: path.to_string(),
            sources,
        }
    }

    /// Write a page to `<public>/<route>/index.html`
    fn write_page(&self, route: &str, html: &str) -> Result<PathBuf> {
        let relative = Path::new(route.trim_start_matches('/'));
        if relative
            .components()
            .any(|c| !matches!(c, Component::Normal(_)))
        {
            bail!("Route {:?} escapes the public directory", route);
        }

        let output_path = self.folio.public_dir.join(relative).join("index.html");
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, html)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;

        Ok(output_path)
    }

    /// Copy the static directory (stylesheets, images) into public
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.exists() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative = entry.path().strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
            copied += 1;
        }

        tracing::debug!("Copied {} static files", copied);
        Ok(copied)
    }
}
