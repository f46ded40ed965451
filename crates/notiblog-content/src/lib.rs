//! Markdown processing for notiblog post bodies.
//!
//! Post bodies arrive as Markdown converted from the remote page blocks.
//! This crate derives the navigable outline of a body and renders it to
//! HTML with anchors the outline can link to.
//!
//! # Modules
//!
//! - [`markdown`]: Outline extraction and HTML rendering
//!   - [`markdown::toc`]: ATX heading scan, id disambiguation, nesting
//!   - [`markdown::render`]: `pulldown-cmark` rendering with heading ids
//!
//! # Example
//!
//! ```rust
//! use notiblog_content::extract_table_of_contents;
//!
//! let toc = extract_table_of_contents("# Intro\n## Intro\n### Details");
//! let ids: Vec<_> = toc.iter().map(|item| item.id.as_str()).collect();
//! assert_eq!(ids, ["intro", "intro-1", "details"]);
//! assert_eq!(toc[1].level, 2);
//! ```

pub mod markdown;

// Re-export commonly used functions
pub use markdown::{extract_table_of_contents, heading_id, nest_table_of_contents, render_html};

// Re-export the outline item for convenience
pub use notiblog_core::TableOfContentsItem;
