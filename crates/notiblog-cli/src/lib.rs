//! # notiblog-cli
//!
//! Command-line reader for a Notion-backed blog.
//!
//! - `posts`, `post`, `tags`: read the blog through the Notion API
//! - `toc`: outline a local Markdown file
//! - `config`: manage `~/.config/notiblog/config.toml`

#![warn(clippy::all)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;

pub use cli::Cli;
pub use commands::run;
pub use config::BlogConfig;
