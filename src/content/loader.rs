//! Content loader - reads the posts directory into an immutable snapshot

use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{ContentError, ContentItem};

/// Read-only snapshot of every content item
#[derive(Debug, Clone, Default)]
pub struct ContentSource {
    items: Vec<ContentItem>,
}

impl ContentSource {
    /// Load every markdown file under `posts_dir`.
    ///
    /// Source paths are recorded relative to `base_dir` and items are kept in
    /// source path order. A missing directory is an empty source. Files with
    /// malformed front-matter are kept and report the problem when read.
    pub fn load(base_dir: &Path, posts_dir: &Path) -> Result<Self, ContentError> {
        if !posts_dir.exists() {
            tracing::debug!("No posts directory at {:?}", posts_dir);
            return Ok(Self::default());
        }

        let mut items = Vec::new();

        for entry in WalkDir::new(posts_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ContentError::Io {
                path: e.path().unwrap_or(posts_dir).to_path_buf(),
                error: e.into(),
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || !is_markdown_file(path) {
                continue;
            }

            let raw = fs::read_to_string(path).map_err(|error| ContentError::Io {
                path: path.to_path_buf(),
                error,
            })?;
            let source = path.strip_prefix(base_dir).unwrap_or(path);
            let item = ContentItem::read(source, &raw);
            if let Err(e) = item.check_front_matter() {
                tracing::warn!("{}", e);
            }
            items.push(item);
        }

        tracing::debug!("Loaded {} content items from {:?}", items.len(), posts_dir);
        Ok(Self { items })
    }

    /// Build a source from items already in memory
    pub fn from_items(items: Vec<ContentItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[ContentItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_missing_directory_is_empty() {
        let tmp = TempDir::new().unwrap();
        let source = ContentSource::load(tmp.path(), &tmp.path().join("posts")).unwrap();
        assert!(source.is_empty());
    }

    #[test]
    fn test_load_posts_recursively_in_path_order() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        fs::create_dir_all(posts.join("2024")).unwrap();
        fs::write(posts.join("b.md"), "---\ntitle: B\n---\nbody b").unwrap();
        fs::write(posts.join("2024/a.markdown"), "---\ntitle: A\n---\nbody a").unwrap();
        fs::write(posts.join("notes.txt"), "not content").unwrap();

        let source = ContentSource::load(tmp.path(), &posts).unwrap();
        let sources: Vec<_> = source.items().iter().map(|i| i.source.clone()).collect();
        assert_eq!(
            sources,
            vec![
                PathBuf::from("posts/2024/a.markdown"),
                PathBuf::from("posts/b.md")
            ]
        );
        assert_eq!(source.items()[1].body, "body b");
    }

    #[test]
    fn test_malformed_frontmatter_is_kept() {
        let tmp = TempDir::new().unwrap();
        let posts = tmp.path().join("posts");
        fs::create_dir_all(&posts).unwrap();
        fs::write(posts.join("bad.md"), "---\ntitle: [oops\n---\n").unwrap();
        fs::write(posts.join("good.md"), "---\ntitle: Good\n---\n").unwrap();

        let source = ContentSource::load(tmp.path(), &posts).unwrap();
        assert_eq!(source.len(), 2);
        assert_eq!(source.items()[1].title().unwrap(), "Good");
        match source.items()[0].check_front_matter().unwrap_err() {
            ContentError::InvalidFrontmatter { file, .. } => {
                assert_eq!(file, PathBuf::from("posts/bad.md"))
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
