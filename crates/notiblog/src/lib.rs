//! # notiblog
//!
//! A blog content layer over a Notion database.
//!
//! [`Blog`] lists published posts (optionally by tag), fetches one post with
//! its Markdown body, finds adjacent posts and aggregates tag statistics.
//! Markdown helpers for tables of contents and HTML rendering live in
//! [`content`]; the Notion client and the [`ContentSource`] seam in
//! [`notion`].
//!
//! ```no_run
//! use std::sync::Arc;
//! use notiblog::{Blog, NotionClient};
//!
//! # async fn run() -> notiblog::Result<()> {
//! let blog = Blog::new(Arc::new(NotionClient::from_env()?));
//! for post in blog.list_published_posts(Some("rust")).await? {
//!     println!("{} {}", post.slug, post.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod blog;
pub mod tags;

pub use notiblog_content as content;
pub use notiblog_core as core;
pub use notiblog_notion as notion;

pub use blog::{Blog, BlogOptions};
pub use tags::aggregate_tags;

pub use notiblog_content::{extract_table_of_contents, nest_table_of_contents, render_html};
pub use notiblog_core::{
    AdjacentPosts, Error, Post, PostContent, Result, TableOfContentsItem, TagFilterItem,
};
pub use notiblog_notion::{ContentSource, MemorySource, NotionClient, NotionConfig, PropertyNames};
