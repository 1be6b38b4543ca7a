//! Errors raised by the content pipeline

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Build-time failures of the listing and detail pipeline.
///
/// None of these are recovered from inside the pipeline: each one halts the
/// page that needed the offending content item.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("{}: missing required front-matter field `{field}`", .file.display())]
    MissingFrontmatterField {
        file: PathBuf,
        field: &'static str,
    },

    #[error("no post declares path `{path}`")]
    PostNotFound { path: String },

    #[error("path `{path}` is declared by more than one item: {}", SourceList(.sources))]
    AmbiguousPath { path: String, sources: Vec<PathBuf> },

    #[error("{}: invalid front-matter: {message}", .file.display())]
    InvalidFrontmatter { file: PathBuf, message: String },

    #[error("{}: unrecognised date `{value}`", .file.display())]
    InvalidDate { file: PathBuf, value: String },

    #[error("{}: failed to render markdown: {message}", .file.display())]
    Render { file: PathBuf, message: String },

    #[error("failed to read {}: {error}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        error: std::io::Error,
    },
}

/// Comma-separated display of source files
struct SourceList<'a>(&'a [PathBuf]);

impl fmt::Display for SourceList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, source) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", source.display())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ambiguous_path_lists_every_source() {
        let err = ContentError::AmbiguousPath {
            path: "/x".to_string(),
            sources: vec![PathBuf::from("a.md"), PathBuf::from("b.md")],
        };
        assert_eq!(
            err.to_string(),
            "path `/x` is declared by more than one item: a.md, b.md"
        );
    }

    #[test]
    fn test_missing_field_names_source_and_field() {
        let err = ContentError::MissingFrontmatterField {
            file: PathBuf::from("posts/hello.md"),
            field: "description",
        };
        let msg = err.to_string();
        assert!(msg.contains("posts/hello.md"));
        assert!(msg.contains("`description`"));
    }
}
