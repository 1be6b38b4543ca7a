//! List blog posts in index order

use anyhow::Result;
use std::io::Write;

use crate::Folio;

/// Print every post as it appears on the listing page
pub fn run(folio: &Folio) -> Result<()> {
    let mut stdout = std::io::stdout().lock();
    write_listing(folio, &mut stdout)
}

fn write_listing(folio: &Folio, out: &mut impl Write) -> Result<()> {
    let blog = folio.load_blog()?;
    let posts = blog.list_posts()?;

    writeln!(out, "Posts ({}):", posts.len())?;
    for post in posts {
        writeln!(out, "  {} - {} [{}]", post.date, post.title, post.path)?;
    }

    Ok(())
}
