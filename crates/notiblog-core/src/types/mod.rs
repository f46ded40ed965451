//! Domain types shared by every notiblog crate.

mod post;
mod tag;
mod toc;

pub use post::{AdjacentPosts, Post, PostContent};
pub use tag::{ALL_TAG_ID, DEFAULT_ALL_LABEL, TagFilterItem};
pub use toc::TableOfContentsItem;
