//! Documentation comment formatting.
//!
//! Comments are CommonMark. Raw HTML inside a comment is shown as text,
//! except for `<code>` which marks a code sample. Code blocks, fenced or
//! wrapped in `<code>…</code>`, go through the source highlighter.

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::highlight::Highlighter;

fn options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH
}

fn code_block(source: &str, highlighter: &dyn Highlighter) -> Event<'static> {
    let code = highlighter.highlight(source.trim_matches('\n'));
    Event::Html(CowStr::from(format!("<pre><code>{code}</code></pre>\n")))
}

fn raw_block(raw: String, highlighter: &dyn Highlighter) -> Event<'static> {
    let sample = raw
        .trim()
        .strip_prefix("<code>")
        .and_then(|rest| rest.strip_suffix("</code>"));
    match sample {
        Some(source) => code_block(source, highlighter),
        None => Event::Text(CowStr::from(raw)),
    }
}

fn is_code_tag(raw: &str) -> bool {
    raw.eq_ignore_ascii_case("<code>") || raw.eq_ignore_ascii_case("</code>")
}

fn events<'a>(text: &'a str, highlighter: &dyn Highlighter) -> Vec<Event<'a>> {
    let mut out = Vec::new();
    let mut code: Option<String> = None;
    let mut raw: Option<String> = None;

    for event in Parser::new_ext(text, options()) {
        match event {
            Event::Start(Tag::CodeBlock(_)) => code = Some(String::new()),
            Event::End(TagEnd::CodeBlock) => {
                if let Some(source) = code.take() {
                    out.push(code_block(&source, highlighter));
                }
            }
            Event::Start(Tag::HtmlBlock) => raw = Some(String::new()),
            Event::End(TagEnd::HtmlBlock) => {
                if let Some(block) = raw.take() {
                    out.push(raw_block(block, highlighter));
                }
            }
            Event::Text(chunk) => match code.as_mut() {
                Some(buf) => buf.push_str(&chunk),
                None => out.push(Event::Text(chunk)),
            },
            Event::Html(html) => match raw.as_mut() {
                Some(buf) => buf.push_str(&html),
                None => out.push(Event::Text(html)),
            },
            Event::InlineHtml(html) if is_code_tag(&html) => out.push(Event::Html(html)),
            Event::InlineHtml(html) => out.push(Event::Text(html)),
            other => out.push(other),
        }
    }
    out
}

/// Format a documentation comment as block HTML.
#[must_use]
pub fn to_html(text: &str, highlighter: &dyn Highlighter) -> String {
    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, events(text.trim(), highlighter).into_iter());
    out
}

/// Format a one-line comment without the surrounding paragraph.
#[must_use]
pub fn to_inline_html(text: &str, highlighter: &dyn Highlighter) -> String {
    let mut out = String::with_capacity(text.len() * 3 / 2);
    let inline = events(text.trim(), highlighter)
        .into_iter()
        .filter(|event| !matches!(event, Event::Start(Tag::Paragraph) | Event::End(TagEnd::Paragraph)));
    html::push_html(&mut out, inline);
    out.trim_end().to_owned()
}
