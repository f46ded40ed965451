//! # notiblog-notion
//!
//! Notion as a content source for notiblog.
//!
//! This crate provides:
//! - [`NotionClient`]: database queries and block trees over the REST API,
//!   with bearer auth, cursor pagination and retry on rate limits
//! - [`map_page`]: page record to [`notiblog_core::Post`] mapping
//! - [`blocks`]: block tree to Markdown conversion
//! - [`ContentSource`]: the query seam, implemented by [`NotionClient`] and
//!   the in-memory [`MemorySource`]

#![warn(clippy::all)]

pub mod blocks;
pub mod client;
pub mod config;
pub mod mapper;
pub mod query;
pub mod source;

pub use client::NotionClient;
pub use config::{NotionConfig, PropertyNames};
pub use mapper::map_page;
pub use query::{Direction, Filter, QueryRequest, QueryResponse, Sort};
pub use source::{ContentSource, MemorySource};
