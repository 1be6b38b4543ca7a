//! Blog index builder and post detail resolver
//!
//! Both operations are pure reads over a [`ContentSource`] snapshot, so a
//! `Blog` can be shared between any number of page renders.

use chrono::NaiveDateTime;

use super::{
    normalize_route, ContentError, ContentItem, ContentSource, MarkdownRenderer, PostDetail,
    PostSummary, Renderer,
};
use crate::helpers::format_naive_date;

/// The blog over one content snapshot
pub struct Blog<R = MarkdownRenderer> {
    source: ContentSource,
    renderer: R,
    date_format: Option<String>,
}

impl<R: Renderer> Blog<R> {
    /// `date_format` uses moment-style tokens (`MMMM D, YYYY`). Without one,
    /// dates are shown exactly as written in the front-matter.
    pub fn new(source: ContentSource, renderer: R, date_format: Option<&str>) -> Self {
        Self {
            source,
            renderer,
            date_format: date_format.map(str::to_string),
        }
    }

    pub fn source(&self) -> &ContentSource {
        &self.source
    }

    /// Summaries of every post, newest first.
    ///
    /// Posts sharing a date are ordered by path. Any post missing a required
    /// field fails the whole listing.
    pub fn list_posts(&self) -> Result<Vec<PostSummary>, ContentError> {
        let mut posts = self
            .source
            .items()
            .iter()
            .map(|item| self.summarize(item))
            .collect::<Result<Vec<_>, _>>()?;

        posts.sort_by(|a, b| {
            b.published
                .cmp(&a.published)
                .then_with(|| a.path.cmp(&b.path))
        });

        Ok(posts)
    }

    /// Look up the single post declaring `path` and render its body
    pub fn resolve_post(&self, path: &str) -> Result<PostDetail, ContentError> {
        let item = self.find(path)?;

        let title = item.title()?.to_string();
        let date = self.display_date(item, &item.date()?)?;
        let path = item.route()?;
        let body_html = self
            .renderer
            .render(&item.body)
            .map_err(|e| ContentError::Render {
                file: item.source.clone(),
                message: e.to_string(),
            })?;

        Ok(PostDetail {
            title,
            date,
            path,
            body_html,
        })
    }

    fn find(&self, path: &str) -> Result<&ContentItem, ContentError> {
        let wanted = normalize_route(path);
        let matches: Vec<&ContentItem> = self
            .source
            .items()
            .iter()
            .filter(|item| item.declared_route().as_deref() == Some(wanted.as_str()))
            .collect();

        match matches.as_slice() {
            [] => Err(ContentError::PostNotFound { path: wanted }),
            [item] => Ok(*item),
            _ => Err(ContentError::AmbiguousPath {
                path: wanted,
                sources: matches.iter().map(|item| item.source.clone()).collect(),
            }),
        }
    }

    fn summarize(&self, item: &ContentItem) -> Result<PostSummary, ContentError> {
        let title = item.title()?.to_string();
        let published = item.date()?;
        let description = item.description()?.to_string();
        let path = item.route()?;

        Ok(PostSummary {
            title,
            date: self.display_date(item, &published)?,
            description,
            path,
            published,
        })
    }

    fn display_date(
        &self,
        item: &ContentItem,
        published: &NaiveDateTime,
    ) -> Result<String, ContentError> {
        match &self.date_format {
            Some(format) => Ok(format_naive_date(published, format)),
            None => Ok(item.raw_date()?.trim().to_string()),
        }
    }
}
