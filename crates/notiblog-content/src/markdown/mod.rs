//! Markdown utilities for post bodies.
//!
//! - [`toc`]: Table-of-contents extraction and nesting
//! - [`render`]: HTML rendering with heading anchors that match the outline
//!
//! # Example
//!
//! ```rust
//! use notiblog_content::markdown::{extract_table_of_contents, render_html};
//!
//! let body = "# Hello\n\nFirst post.";
//! let toc = extract_table_of_contents(body);
//! let html = render_html(body);
//! assert!(html.contains(&format!(r#"id="{}""#, toc[0].id)));
//! ```

pub mod render;
pub mod toc;

// Re-export key functions
pub use render::render_html;
pub use toc::{extract_table_of_contents, heading_id, nest_table_of_contents};
