//! Table-of-contents extraction.
//!
//! Scans Markdown for ATX heading lines (`#` through `######`) and derives a
//! URL-safe anchor id for each one. Ids are unique within a single
//! extraction: a repeated candidate gets the first free `-1`, `-2`, …
//! suffix.
//!
//! # Example
//!
//! ```rust
//! use notiblog_content::markdown::toc::extract_table_of_contents;
//!
//! let toc = extract_table_of_contents("# Intro\n## Intro\n### Details");
//! let ids: Vec<_> = toc.iter().map(|item| item.id.as_str()).collect();
//! assert_eq!(ids, ["intro", "intro-1", "details"]);
//! ```
//!
//! The scan is purely line-based. Heading markers inside fenced code blocks
//! are reported like any other line starting with `#`.

use std::collections::HashSet;
use std::sync::LazyLock;

use notiblog_core::TableOfContentsItem;
use regex::Regex;

static HEADING_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})[ \t]+(.+)$").expect("Invalid heading line regex"));

static NON_ID_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\p{Alphabetic}\p{N}\s-]").expect("Invalid id character regex")
});

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

static HYPHEN_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-{2,}").expect("Invalid hyphen regex"));

/// Extract a flat outline of every ATX heading, in source order.
///
/// Each item carries its heading `level` so callers can indent visually;
/// use [`nest_table_of_contents`] to build a tree instead.
///
/// # Example
///
/// ```rust
/// use notiblog_content::markdown::toc::extract_table_of_contents;
///
/// let toc = extract_table_of_contents("Intro text\n\n## Setup\n\n#### Linux");
/// assert_eq!(toc.len(), 2);
/// assert_eq!((toc[0].id.as_str(), toc[0].level), ("setup", 2));
/// assert_eq!((toc[1].id.as_str(), toc[1].level), ("linux", 4));
///
/// assert!(extract_table_of_contents("no headings here").is_empty());
/// ```
pub fn extract_table_of_contents(markdown: &str) -> Vec<TableOfContentsItem> {
    scan_headings(markdown)
        .into_iter()
        .map(|(_, item)| item)
        .collect()
}

/// Extract headings together with their zero-based line numbers.
pub(crate) fn scan_headings(markdown: &str) -> Vec<(usize, TableOfContentsItem)> {
    let mut ids = HeadingIds::new();

    markdown
        .lines()
        .enumerate()
        .filter_map(|(line_no, line)| {
            let (level, text) = parse_heading_line(line)?;
            let id = ids.claim(heading_id(text));
            Some((line_no, TableOfContentsItem::new(id, text, level)))
        })
        .collect()
}

/// Parse one line as an ATX heading, returning its level and trimmed text.
fn parse_heading_line(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING_LINE.captures(line)?;
    let level = caps.get(1)?.as_str().len() as u8;
    let text = caps.get(2)?.as_str().trim();
    Some((level, text))
}

/// Derive the candidate anchor id for a heading.
///
/// Lowercases, drops every character that is not a letter, digit,
/// whitespace or hyphen, turns whitespace runs into a hyphen, then
/// collapses repeated hyphens.
///
/// # Example
///
/// ```rust
/// use notiblog_content::markdown::toc::heading_id;
///
/// assert_eq!(heading_id("What's New in 2.0?"), "whats-new-in-20");
/// assert_eq!(heading_id("Rust -- Ownership"), "rust-ownership");
/// assert_eq!(heading_id("시작하기 전에"), "시작하기-전에");
/// ```
pub fn heading_id(text: &str) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_ID_CHARS.replace_all(&lowered, "");
    let hyphenated = WHITESPACE_RUN.replace_all(&stripped, "-");
    HYPHEN_RUN.replace_all(&hyphenated, "-").into_owned()
}

/// Set of anchor ids already handed out during one extraction.
#[derive(Debug, Default)]
pub(crate) struct HeadingIds {
    used: HashSet<String>,
}

impl HeadingIds {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Return `candidate`, or `candidate-N` for the first free `N >= 1`,
    /// and mark the result as used.
    ///
    /// A heading whose own text already ends in `-N` can take a suffix
    /// that a later duplicate would otherwise have used; the later one
    /// simply moves on to the next free number.
    pub(crate) fn claim(&mut self, candidate: String) -> String {
        if !self.used.contains(&candidate) {
            self.used.insert(candidate.clone());
            return candidate;
        }

        let mut suffix = 1usize;
        loop {
            let id = format!("{candidate}-{suffix}");
            if self.used.insert(id.clone()) {
                return id;
            }
            suffix += 1;
        }
    }

    /// Mark an id as used without checking for collisions.
    pub(crate) fn reserve(&mut self, id: &str) {
        self.used.insert(id.to_string());
    }
}

/// Nest a flat outline into a tree keyed on heading level.
///
/// Each heading becomes a child of the closest preceding heading with a
/// smaller level; headings with no such ancestor are roots. Source order is
/// preserved among siblings.
///
/// # Example
///
/// ```rust
/// use notiblog_content::markdown::toc::{extract_table_of_contents, nest_table_of_contents};
///
/// let flat = extract_table_of_contents("# A\n## A.1\n## A.2\n# B");
/// let tree = nest_table_of_contents(flat);
/// assert_eq!(tree.len(), 2);
/// assert_eq!(tree[0].children.len(), 2);
/// assert!(tree[1].children.is_empty());
/// ```
pub fn nest_table_of_contents(items: Vec<TableOfContentsItem>) -> Vec<TableOfContentsItem> {
    let mut roots = Vec::new();
    let mut open: Vec<TableOfContentsItem> = Vec::new();

    for item in items {
        while open.last().is_some_and(|top| top.level >= item.level) {
            close_top(&mut open, &mut roots);
        }
        open.push(item);
    }

    while !open.is_empty() {
        close_top(&mut open, &mut roots);
    }

    roots
}

fn close_top(open: &mut Vec<TableOfContentsItem>, roots: &mut Vec<TableOfContentsItem>) {
    if let Some(done) = open.pop() {
        match open.last_mut() {
            Some(parent) => parent.children.push(done),
            None => roots.push(done),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
