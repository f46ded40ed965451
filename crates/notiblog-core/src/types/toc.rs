//! Table-of-contents entries.

use serde::{Deserialize, Serialize};

/// One heading of a post's outline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableOfContentsItem {
    /// Anchor id, unique within one extraction
    pub id: String,

    /// Heading text
    pub text: String,

    /// Heading level, 1 through 6
    pub level: u8,

    /// Nested sub-headings; empty in a flat outline
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TableOfContentsItem>,
}

impl TableOfContentsItem {
    /// Creates a leaf entry.
    pub fn new(id: impl Into<String>, text: impl Into<String>, level: u8) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            level,
            children: Vec::new(),
        }
    }
}
