//! URL helper functions

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::config::SiteConfig;

/// Characters escaped inside a single path segment
const SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'%');

/// Generate a link to a route under the site root
///
/// # Examples
/// ```ignore
/// url_for(&config, "/blog") // -> "/portfolio/blog"
/// ```
pub fn url_for(config: &SiteConfig, path: &str) -> String {
    let root = config.root.trim_end_matches('/');
    let path = path.trim_start_matches('/');

    if path.is_empty() {
        format!("{}/", root)
    } else {
        format!("{}/{}", root, encode_path(path))
    }
}

/// Percent-encode each segment of a path, keeping the separators
pub fn encode_path(path: &str) -> String {
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SEGMENT).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(root: &str) -> SiteConfig {
        SiteConfig {
            root: root.to_string(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn test_url_for() {
        let config = test_config("/");
        assert_eq!(url_for(&config, "/blog"), "/blog");
        assert_eq!(url_for(&config, "/"), "/");
    }

    #[test]
    fn test_url_for_with_root() {
        let config = test_config("/portfolio/");
        assert_eq!(url_for(&config, "/blog"), "/portfolio/blog");
        assert_eq!(url_for(&config, ""), "/portfolio/");
    }

    #[test]
    fn test_encode_path() {
        assert_eq!(encode_path("my post/part 1"), "my%20post/part%201");
        assert_eq!(encode_path("café"), "caf%C3%A9");
    }
}
