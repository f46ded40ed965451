//! Command implementations.
//!
//! Each command fetches through a [`Blog`] and hands the result to a
//! `write_*` function, so output formatting is testable without a network.

use std::io::{Read, Write};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use chrono::{Local, NaiveDateTime};
use notiblog::core::util::dates::{format_date, format_date_detailed, format_relative_time};
use notiblog::{
    Blog, NotionClient, Post, PostContent, TableOfContentsItem, TagFilterItem,
    extract_table_of_contents, nest_table_of_contents, render_html,
};
use serde::Serialize;

use crate::cli::{Cli, Command};
use crate::config::BlogConfig;
use crate::config_handlers::handle_config_command;

/// How `post` presents a found post.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostView {
    /// Header and Markdown body
    Body,
    /// Outline of the body
    Toc,
    /// Body rendered to HTML
    Html,
}

impl PostView {
    fn from_flags(toc: bool, html: bool) -> Self {
        match (toc, html) {
            (true, _) => Self::Toc,
            (false, true) => Self::Html,
            (false, false) => Self::Body,
        }
    }
}

/// Runs a parsed command line.
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config_path = cli.config.as_deref();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Command::Config { action } => {
            handle_config_command(config_path, action, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Toc { file, nested, json } => {
            let markdown = read_input(&file)?;
            cmd_toc(&markdown, nested, json, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Posts { tag, json } => {
            let blog = connect(config_path)?;
            cmd_posts(&blog, tag.as_deref(), json, &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Post {
            slug,
            toc,
            html,
            json,
        } => {
            let blog = connect(config_path)?;
            let view = PostView::from_flags(toc, html);
            if cmd_post(&blog, &slug, view, json, &mut stdout).await? {
                Ok(ExitCode::SUCCESS)
            } else {
                eprintln!("Post not found: {slug}");
                Ok(ExitCode::FAILURE)
            }
        }
        Command::Tags { json } => {
            let blog = connect(config_path)?;
            cmd_tags(&blog, json, &mut stdout).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Builds a [`Blog`] over the Notion API from the loaded configuration.
pub fn connect(config_path: Option<&str>) -> anyhow::Result<Blog> {
    let config = BlogConfig::load(config_path)?;
    let client = NotionClient::new(config.notion.clone())
        .context("Notion connection is not configured; see `notiblog config init`")?;
    tracing::debug!(?client, "Connected");
    Ok(Blog::with_options(Arc::new(client), config.blog_options()))
}

fn read_input(file: &str) -> anyhow::Result<String> {
    if file == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(file).with_context(|| format!("Failed to read {file}"))
    }
}

// ============================================================================
// Commands
// ============================================================================

/// `posts`: lists published posts.
pub async fn cmd_posts(
    blog: &Blog,
    tag: Option<&str>,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let posts = blog.list_published_posts(tag).await?;
    if json {
        write_json(out, &posts)
    } else {
        write_posts(out, &posts, Local::now().naive_local())
    }
}

/// `post`: shows one post. Returns `false` when the slug is not found.
pub async fn cmd_post(
    blog: &Blog,
    slug: &str,
    view: PostView,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<bool> {
    let Some(found) = blog.get_post_by_slug(slug).await? else {
        return Ok(false);
    };
    write_post(out, &found, view, json)?;
    Ok(true)
}

/// `tags`: shows tag statistics.
pub async fn cmd_tags(blog: &Blog, json: bool, out: &mut impl Write) -> anyhow::Result<()> {
    let stats = blog.tag_stats().await?;
    if json {
        write_json(out, &stats)
    } else {
        write_tags(out, &stats)
    }
}

/// `toc`: extracts the outline of a Markdown document.
pub fn cmd_toc(
    markdown: &str,
    nested: bool,
    json: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mut items = extract_table_of_contents(markdown);
    if nested {
        items = nest_table_of_contents(items);
    }
    if json {
        write_json(out, &items)
    } else {
        write_toc(out, &items, nested)
    }
}

// ============================================================================
// Output
// ============================================================================

fn write_json<T: Serialize + ?Sized>(out: &mut impl Write, value: &T) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

/// One line per post: date, relative age, slug, title and tags.
pub fn write_posts(out: &mut impl Write, posts: &[Post], now: NaiveDateTime) -> anyhow::Result<()> {
    if posts.is_empty() {
        writeln!(out, "No published posts.")?;
        return Ok(());
    }
    for post in posts {
        let date = post.date.as_deref();
        write!(
            out,
            "{}  ({})  {}  {}",
            format_date(date),
            format_relative_time(date, now),
            post.slug,
            post.title
        )?;
        if !post.tags.is_empty() {
            write!(out, "  [{}]", post.tags.join(", "))?;
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes a found post in the requested view.
pub fn write_post(
    out: &mut impl Write,
    found: &PostContent,
    view: PostView,
    json: bool,
) -> anyhow::Result<()> {
    match (view, json) {
        (PostView::Body, true) => write_json(out, found),
        (PostView::Toc, true) => write_json(
            out,
            &nest_table_of_contents(extract_table_of_contents(&found.content)),
        ),
        (PostView::Html, true) => write_json(
            out,
            &serde_json::json!({ "post": found.post, "html": render_html(&found.content) }),
        ),
        (PostView::Body, false) => {
            write_post_header(out, &found.post)?;
            writeln!(out)?;
            writeln!(out, "{}", found.content)?;
            Ok(())
        }
        (PostView::Toc, false) => {
            let items = nest_table_of_contents(extract_table_of_contents(&found.content));
            write_toc(out, &items, true)
        }
        (PostView::Html, false) => {
            write!(out, "{}", render_html(&found.content))?;
            Ok(())
        }
    }
}

fn write_post_header(out: &mut impl Write, post: &Post) -> anyhow::Result<()> {
    writeln!(out, "# {}", post.title)?;
    if !post.description.is_empty() {
        writeln!(out, "{}", post.description)?;
    }
    let mut meta = vec![format_date_detailed(post.date.as_deref())];
    if !post.author.is_empty() {
        meta.push(post.author.clone());
    }
    if post.was_modified() {
        meta.push(format!("수정: {}", format_date(post.modified_date.as_deref())));
    }
    writeln!(out, "{}", meta.join(" · "))?;
    if !post.tags.is_empty() {
        let tags: Vec<String> = post.tags.iter().map(|t| format!("#{t}")).collect();
        writeln!(out, "{}", tags.join(" "))?;
    }
    Ok(())
}

/// Tab-separated tag name and count, aggregate entry first.
pub fn write_tags(out: &mut impl Write, stats: &[TagFilterItem]) -> anyhow::Result<()> {
    for item in stats {
        writeln!(out, "{}\t{}", item.name, item.count)?;
    }
    Ok(())
}

/// Outline as a Markdown list linking to heading anchors.
///
/// Flat outlines indent by heading level; nested ones by depth.
pub fn write_toc(
    out: &mut impl Write,
    items: &[TableOfContentsItem],
    nested: bool,
) -> anyhow::Result<()> {
    fn walk(
        out: &mut impl Write,
        items: &[TableOfContentsItem],
        depth: usize,
        nested: bool,
    ) -> std::io::Result<()> {
        for item in items {
            let indent = if nested {
                depth
            } else {
                usize::from(item.level.saturating_sub(1))
            };
            writeln!(out, "{}- [{}](#{})", "  ".repeat(indent), item.text, item.id)?;
            walk(out, &item.children, depth + 1, nested)?;
        }
        Ok(())
    }
    walk(out, items, 0, nested)?;
    Ok(())
}
