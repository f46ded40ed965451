//! Tag filter entries.

use serde::{Deserialize, Serialize};

use crate::util::ids::normalize_id;

/// Identifier of the aggregate entry covering every post.
pub const ALL_TAG_ID: &str = "all";

/// Display label of the aggregate entry.
pub const DEFAULT_ALL_LABEL: &str = "전체";

/// One entry of the tag filter list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagFilterItem {
    /// `"all"` or the normalized tag name
    pub id: String,

    /// Display label
    pub name: String,

    /// Number of published posts carrying the tag
    pub count: usize,
}

impl TagFilterItem {
    /// Creates the entry for a concrete tag; the id is derived from the name.
    pub fn tag(name: impl Into<String>, count: usize) -> Self {
        let name = name.into();
        Self {
            id: normalize_id(&name),
            name,
            count,
        }
    }

    /// Creates the aggregate entry covering every post.
    pub fn all(label: impl Into<String>, count: usize) -> Self {
        Self {
            id: ALL_TAG_ID.to_string(),
            name: label.into(),
            count,
        }
    }
}
