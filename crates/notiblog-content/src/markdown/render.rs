//! Markdown to HTML rendering with heading anchors.
//!
//! Renders with `pulldown-cmark` and stamps every heading with the same id
//! [`extract_table_of_contents`](super::toc::extract_table_of_contents)
//! derives for it, so outline links resolve against the rendered page.
//!
//! # Example
//!
//! ```rust
//! use notiblog_content::markdown::render::render_html;
//!
//! let html = render_html("# Intro\n\nHello **world**.\n\n## Intro");
//! assert!(html.contains(r#"<h1 id="intro">Intro</h1>"#));
//! assert!(html.contains(r#"<h2 id="intro-1">Intro</h2>"#));
//! assert!(html.contains("<strong>world</strong>"));
//! ```

use std::collections::HashMap;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, TagEnd, html};

use super::toc::{HeadingIds, heading_id, scan_headings};

/// Markdown extensions enabled for post bodies.
fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_MATH
}

/// Render Markdown to an HTML fragment with anchored headings.
///
/// ATX headings get the id from the outline of the same text. Headings the
/// outline does not list (setext underlines, headings inside block quotes or
/// list items) get an id derived from their rendered text that does not
/// collide with any outline id.
pub fn render_html(markdown: &str) -> String {
    let outline: HashMap<usize, String> = scan_headings(markdown)
        .into_iter()
        .map(|(line_no, item)| (line_no, item.id))
        .collect();

    let mut fallback_ids = HeadingIds::new();
    for id in outline.values() {
        fallback_ids.reserve(id);
    }

    let line_starts = line_starts(markdown);
    let mut events: Vec<Event<'_>> = Vec::new();
    let mut pending: Option<PendingHeading> = None;

    for (event, range) in Parser::new_ext(markdown, options()).into_offset_iter() {
        match event {
            Event::Start(Tag::Heading { id: None, .. }) => {
                let line_no = line_of(&line_starts, range.start);
                pending = Some(PendingHeading {
                    index: events.len(),
                    outline_id: outline.get(&line_no).cloned(),
                    text: String::new(),
                });
                events.push(event);
            }
            Event::End(TagEnd::Heading(_)) => {
                if let Some(heading) = pending.take() {
                    let id = match heading.outline_id {
                        Some(id) => id,
                        None => fallback_ids.claim(heading_id(heading.text.trim())),
                    };
                    set_heading_id(&mut events[heading.index], id);
                }
                events.push(event);
            }
            Event::Text(ref text) | Event::Code(ref text) => {
                if let Some(heading) = pending.as_mut() {
                    heading.text.push_str(text);
                }
                events.push(event);
            }
            _ => events.push(event),
        }
    }

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    log::debug!("Rendered {} bytes of markdown to HTML", markdown.len());
    out
}

struct PendingHeading {
    index: usize,
    outline_id: Option<String>,
    text: String,
}

fn set_heading_id(event: &mut Event<'_>, new_id: String) {
    if let Event::Start(Tag::Heading { id, .. }) = event {
        *id = Some(CowStr::from(new_id));
    }
}

/// Byte offsets at which each line begins.
fn line_starts(text: &str) -> Vec<usize> {
    std::iter::once(0)
        .chain(text.match_indices('\n').map(|(i, _)| i + 1))
        .collect()
}

/// Zero-based line containing byte `offset`.
fn line_of(line_starts: &[usize], offset: usize) -> usize {
    match line_starts.binary_search(&offset) {
        Ok(line) => line,
        Err(next) => next.saturating_sub(1),
    }
}

// ============================================================================
// Tests
// ============================================================================
