//! Source highlighting.

use std::fmt::Write;

/// Turns source text into HTML.
///
/// Implementations must escape anything they do not mark up.
pub trait Highlighter: Send + Sync {
    /// Highlight a short snippet, such as a default value.
    fn highlight(&self, code: &str) -> String;

    /// Highlight a whole declaring file. Line `N` must be reachable through
    /// the fragment `#N`.
    fn highlight_file(&self, source: &str) -> String;
}

const TAB_WIDTH: usize = 4;

fn expand_tabs(line: &str) -> String {
    line.replace('\t', &" ".repeat(TAB_WIDTH))
}

/// Escapes and numbers lines without colouring tokens.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl Highlighter for PlainHighlighter {
    fn highlight(&self, code: &str) -> String {
        escape_html(&expand_tabs(code))
    }

    fn highlight_file(&self, source: &str) -> String {
        let lines: Vec<&str> = source.lines().collect();
        let width = lines.len().to_string().len();
        let mut html = String::with_capacity(source.len() * 2);
        for (idx, line) in lines.iter().enumerate() {
            let n = idx + 1;
            let _ = writeln!(
                html,
                "<span id=\"{n}\" class=\"line\"><a href=\"#{n}\">{n:>width$}: </a>{}</span>",
                escape_html(&expand_tabs(line))
            );
        }
        html
    }
}

/// Escape text for use in HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
