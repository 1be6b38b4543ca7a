//! Markdown rendering with syntax highlighting

use anyhow::Result;
use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use syntect::highlighting::ThemeSet;
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;

/// Turns a markdown body into HTML
pub trait Renderer {
    fn render(&self, markdown: &str) -> Result<String>;
}

/// Markdown renderer with syntax highlighting
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
    theme_name: String,
    highlight: bool,
    line_numbers: bool,
}

impl MarkdownRenderer {
    /// Create a new markdown renderer
    pub fn new() -> Self {
        Self::with_options(&HighlightConfig::default())
    }

    /// Create with custom settings
    pub fn with_options(config: &HighlightConfig) -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
            theme_name: config.theme.clone(),
            highlight: config.enable,
            line_numbers: config.line_number,
        }
    }

    fn options() -> Options {
        Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
    }

    /// Highlight a code block
    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");

        let syntax = self
            .syntax_set
            .find_syntax_by_token(lang)
            .or_else(|| self.syntax_set.find_syntax_by_extension(lang))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());

        let Some(theme) = self.theme_set.themes.get(&self.theme_name) else {
            tracing::warn!("Unknown highlight theme {:?}", self.theme_name);
            return plain_code_block(code, lang);
        };

        match highlighted_html_for_string(code, &self.syntax_set, syntax, theme) {
            Ok(highlighted) if self.line_numbers => add_line_numbers(&highlighted, lang),
            Ok(highlighted) => format!(
                r#"<figure class="highlight {}">{}</figure>"#,
                lang, highlighted
            ),
            Err(e) => {
                tracing::debug!("Highlighting failed for {}: {}", lang, e);
                plain_code_block(code, lang)
            }
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn render(&self, markdown: &str) -> Result<String> {
        let parser = Parser::new_ext(markdown, Self::options());

        let mut events: Vec<Event> = Vec::new();
        // Some(lang) while inside a fenced or indented code block
        let mut code_block: Option<Option<String>> = None;
        let mut code = String::new();

        for event in parser {
            match event {
                Event::Start(Tag::CodeBlock(kind)) if self.highlight => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(lang) => lang
                            .split_whitespace()
                            .next()
                            .filter(|l| !l.is_empty())
                            .map(str::to_string),
                        CodeBlockKind::Indented => None,
                    };
                    code_block = Some(lang);
                    code.clear();
                }
                Event::End(TagEnd::CodeBlock) if code_block.is_some() => {
                    let lang = code_block.take().flatten();
                    let highlighted = self.highlight_code(&code, lang.as_deref());
                    events.push(Event::Html(CowStr::from(highlighted)));
                }
                Event::Text(text) if code_block.is_some() => code.push_str(&text),
                _ => events.push(event),
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());

        Ok(html_output)
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn plain_code_block(code: &str, lang: &str) -> String {
    format!(
        r#"<pre><code class="language-{}">{}</code></pre>"#,
        lang,
        html_escape(code)
    )
}

/// Add line numbers to highlighted code
fn add_line_numbers(code: &str, lang: &str) -> String {
    let lines: Vec<&str> = code.lines().collect();

    let gutter = (1..=lines.len())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        lang,
        gutter,
        lines.join("\n")
    )
}

/// Simple HTML escaping
fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic_markdown() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("# Hello World\n\nThis is a test.").unwrap();
        assert!(html.contains("<h1>Hello World</h1>"));
        assert!(html.contains("<p>This is a test.</p>"));
    }

    #[test]
    fn test_render_code_block() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("```rust\nfn main() {}\n```").unwrap();
        assert!(html.contains(r#"<figure class="highlight rust">"#));
        assert!(!html.contains("```"));
    }

    #[test]
    fn test_line_numbers() {
        let renderer = MarkdownRenderer::with_options(&HighlightConfig {
            line_number: true,
            ..HighlightConfig::default()
        });
        let html = renderer.render("```js\nlet a = 1;\nlet b = 2;\n```").unwrap();
        assert!(html.contains(r#"<span class="line-number">2</span>"#));
    }

    #[test]
    fn test_highlight_disabled_keeps_plain_code() {
        let renderer = MarkdownRenderer::with_options(&HighlightConfig {
            enable: false,
            ..HighlightConfig::default()
        });
        let html = renderer.render("```rust\nlet x = 1 < 2;\n```").unwrap();
        assert!(html.contains(r#"<code class="language-rust">"#));
        assert!(html.contains("1 &lt; 2"));
    }

    #[test]
    fn test_unknown_theme_falls_back_to_escaped_block() {
        let renderer = MarkdownRenderer::with_options(&HighlightConfig {
            theme: "no-such-theme".to_string(),
            ..HighlightConfig::default()
        });
        let html = renderer.render("```\n<b>\n```").unwrap();
        assert!(html.contains(r#"<code class="language-text">&lt;b&gt;"#));
    }

    #[test]
    fn test_render_is_deterministic() {
        let renderer = MarkdownRenderer::new();
        let md = "Some *text* with `code`.\n\n```python\nprint('hi')\n```";
        assert_eq!(renderer.render(md).unwrap(), renderer.render(md).unwrap());
    }

    #[test]
    fn test_tables_enabled() {
        let renderer = MarkdownRenderer::new();
        let html = renderer.render("| a | b |\n|---|---|\n| 1 | 2 |").unwrap();
        assert!(html.contains("<table>"));
    }
}
