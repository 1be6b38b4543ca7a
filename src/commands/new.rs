//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::content::{normalize_route, FrontMatter};
use crate::Folio;

/// Write a new post with every required front-matter field filled in
pub fn create_post(
    folio: &Folio,
    title: &str,
    path: Option<&str>,
    description: Option<&str>,
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let route = match path {
        Some(p) => normalize_route(p),
        None => normalize_route(&format!(
            "{}/{}",
            folio.config.blog_path.trim_end_matches('/'),
            slug
        )),
    };

    let front_matter = FrontMatter {
        title: Some(title.to_string()),
        date: Some(chrono::Local::now().format("%Y-%m-%d").to_string()),
        description: Some(description.unwrap_or_default().to_string()),
        path: Some(route),
        ..FrontMatter::default()
    };
    let content = format!("---\n{}---\n\n", serde_yaml::to_string(&front_matter)?);

    fs::create_dir_all(&folio.posts_dir)?;
    let file_path = folio.posts_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentItem;
    use tempfile::TempDir;

    #[test]
    fn test_new_post_is_listable() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let file = create_post(&folio, "Hello: World", None, Some("First post")).unwrap();
        assert_eq!(file, folio.posts_dir.join("hello-world.md"));

        let raw = fs::read_to_string(&file).unwrap();
        let item = ContentItem::parse("posts/hello-world.md", &raw).unwrap();
        assert_eq!(item.title().unwrap(), "Hello: World");
        assert_eq!(item.description().unwrap(), "First post");
        assert_eq!(item.route().unwrap(), "/blog/hello-world");
        assert!(item.date().is_ok());
    }

    #[test]
    fn test_explicit_path_and_empty_description() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        let file = create_post(&folio, "Notes", Some("notes/"), None).unwrap();
        let raw = fs::read_to_string(&file).unwrap();
        let item = ContentItem::parse("posts/notes.md", &raw).unwrap();
        assert_eq!(item.route().unwrap(), "/notes");
        assert_eq!(item.description().unwrap(), "");
    }

    #[test]
    fn test_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let folio = Folio::new(tmp.path()).unwrap();

        create_post(&folio, "Twice", None, None).unwrap();
        assert!(create_post(&folio, "Twice", None, None).is_err());
    }
}
