//! Content items and the summary/detail shapes derived from them

use chrono::NaiveDateTime;
use serde::Serialize;
use std::path::PathBuf;

use super::frontmatter::{parse_date, FrontMatter};
use super::ContentError;

/// One markdown file from the posts directory
#[derive(Debug, Clone)]
pub struct ContentItem {
    /// Source file, relative to the site base directory
    pub source: PathBuf,
    pub front_matter: FrontMatter,
    /// Markdown below the front-matter block
    pub body: String,
    /// Why the front-matter block could not be read, if it could not
    pub front_matter_error: Option<String>,
}

impl ContentItem {
    /// Split raw file content into front-matter and body
    pub fn parse(source: impl Into<PathBuf>, raw: &str) -> Result<Self, ContentError> {
        let item = Self::read(source, raw);
        item.check_front_matter()?;
        Ok(item)
    }

    /// Like [`parse`](Self::parse), but keeps a file whose front-matter is
    /// malformed. Every field accessor on such an item reports
    /// [`ContentError::InvalidFrontmatter`] and it declares no route.
    pub fn read(source: impl Into<PathBuf>, raw: &str) -> Self {
        let source = source.into();
        match FrontMatter::parse(raw) {
            Ok((front_matter, body)) => Self {
                source,
                front_matter,
                body: body.to_string(),
                front_matter_error: None,
            },
            Err(e) => Self {
                source,
                front_matter: FrontMatter::default(),
                body: raw.to_string(),
                front_matter_error: Some(e.to_string()),
            },
        }
    }

    pub fn check_front_matter(&self) -> Result<(), ContentError> {
        match &self.front_matter_error {
            Some(message) => Err(ContentError::InvalidFrontmatter {
                file: self.source.clone(),
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn title(&self) -> Result<&str, ContentError> {
        self.require("title", &self.front_matter.title, false)
    }

    pub fn description(&self) -> Result<&str, ContentError> {
        self.require("description", &self.front_matter.description, true)
    }

    /// The `date` field exactly as written
    pub fn raw_date(&self) -> Result<&str, ContentError> {
        self.require("date", &self.front_matter.date, false)
    }

    /// Publication date, parsed for ordering
    pub fn date(&self) -> Result<NaiveDateTime, ContentError> {
        let raw = self.raw_date()?;
        parse_date(raw).ok_or_else(|| ContentError::InvalidDate {
            file: self.source.clone(),
            value: raw.to_string(),
        })
    }

    /// Normalised route declared by the `path` field
    pub fn route(&self) -> Result<String, ContentError> {
        self.require("path", &self.front_matter.path, false)
            .map(normalize_route)
    }

    /// Like [`route`](Self::route), but `None` when the field is absent
    pub fn declared_route(&self) -> Option<String> {
        self.route().ok()
    }

    fn require<'a>(
        &'a self,
        field: &'static str,
        value: &'a Option<String>,
        allow_blank: bool,
    ) -> Result<&'a str, ContentError> {
        self.check_front_matter()?;
        match value.as_deref() {
            Some(v) if allow_blank || !v.trim().is_empty() => Ok(v),
            _ => Err(ContentError::MissingFrontmatterField {
                file: self.source.clone(),
                field,
            }),
        }
    }
}

/// A post as shown on the listing page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostSummary {
    pub title: String,
    /// Display-formatted date
    pub date: String,
    pub description: String,
    pub path: String,
    /// Parsed date the listing is ordered by
    #[serde(skip)]
    pub published: NaiveDateTime,
}

/// A post as shown on its own page
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostDetail {
    pub title: String,
    pub date: String,
    pub path: String,
    /// Rendered markdown, trusted as-is
    pub body_html: String,
}

/// Canonical form of a route: leading slash, no trailing slash
pub fn normalize_route(path: &str) -> String {
    let trimmed = path.trim().trim_matches('/');
    format!("/{}", trimmed)
}
