//! notiblog core: shared types, errors, and utilities.
//!
//! This crate provides the foundational types used across all notiblog
//! crates. It has no internal notiblog dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`types`]: `Post`, `TagFilterItem`, `TableOfContentsItem`
//! - [`util`]: ID and date utilities

pub mod error;
pub mod types;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use types::{
    ALL_TAG_ID, AdjacentPosts, DEFAULT_ALL_LABEL, Post, PostContent, TableOfContentsItem,
    TagFilterItem,
};

// Convenience re-exports from util
pub use util::ids::normalize_id;
