//! Initialize a new portfolio site

use anyhow::Result;
use std::fs;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# Site
title: My Portfolio
description: A static web site presenting my software development portfolio
author: John Doe

# URL
url: http://example.com
root: /
blog_path: /blog

# Directory
posts_dir: posts
static_dir: static
public_dir: public

# Writing
# Dates are shown as written in each post unless a format is set, e.g.
# date_format: MMMM D, YYYY
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# Header navigation
menu:
  - name: About Me
    path: /about
  - name: My Projects
    path: /projects

# Class names used by the templates, e.g.
# styles:
#   post_title: postTitle
styles: {}
"#;

const SAMPLE_POST: &str = r#"---
title: Hello World
date: 2024-01-01
description: The first post on this site.
path: /blog/hello-world
---

Welcome! This post was created by `folio init`.

```rust
fn main() {
    println!("Hello, world!");
}
```
"#;

const DEFAULT_CSS: &str = r#"body { font-family: sans-serif; margin: 0 auto; max-width: 48rem; }
.container { display: flex; justify-content: space-between; align-items: center; }
.nav-links { display: flex; list-style: none; gap: 1rem; }
.headline { font-size: 2rem; margin: 1rem 0; }
.post { margin-bottom: 2rem; }
.post-title { font-size: 1.5rem; font-weight: bold; }
.post-date { color: #666; }
.return-link { margin: 1rem 0; }
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    fs::create_dir_all(target_dir.join("posts"))?;
    fs::create_dir_all(target_dir.join("static/css"))?;

    write_if_missing(&target_dir.join(crate::CONFIG_FILE), DEFAULT_CONFIG)?;
    write_if_missing(&target_dir.join("posts/hello-world.md"), SAMPLE_POST)?;
    write_if_missing(&target_dir.join("static/css/site.css"), DEFAULT_CSS)?;

    Ok(())
}

fn write_if_missing(path: &Path, content: &str) -> Result<()> {
    if path.exists() {
        tracing::info!("Keeping existing {:?}", path);
        return Ok(());
    }
    fs::write(path, content)?;
    tracing::debug!("Created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Folio;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_buildable_site() {
        let tmp = TempDir::new().unwrap();
        init_site(tmp.path()).unwrap();

        let folio = Folio::new(tmp.path()).unwrap();
        assert_eq!(folio.config.title, "My Portfolio");
        assert_eq!(folio.config.menu.len(), 2);

        folio.generate().unwrap();
        let listing = fs::read_to_string(folio.public_dir.join("blog/index.html")).unwrap();
        assert!(listing.contains("Hello World"));
        assert!(folio
            .public_dir
            .join("blog/hello-world/index.html")
            .exists());
        assert!(folio.public_dir.join("css/site.css").exists());
    }

    #[test]
    fn test_init_keeps_existing_files() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(crate::CONFIG_FILE), "title: Mine\n").unwrap();

        init_site(tmp.path()).unwrap();
        let config = fs::read_to_string(tmp.path().join(crate::CONFIG_FILE)).unwrap();
        assert_eq!(config, "title: Mine\n");
    }
}
