//! Common test utilities and harness for notiblog integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use notiblog::notion::{ContentSource, MemorySource, QueryRequest, QueryResponse};
use notiblog::{Blog, Error, Result};
use serde_json::{Value, json};

/// Builder for raw page records in the default database schema.
#[derive(Debug, Clone)]
pub struct PageBuilder {
    id: String,
    title: String,
    slug: Option<String>,
    status: String,
    date: Option<String>,
    tags: Vec<String>,
    author: Option<String>,
}

impl PageBuilder {
    /// A published, untagged, undated page.
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            title: format!("Post {id}"),
            slug: None,
            status: "Published".to_string(),
            date: None,
            tags: Vec::new(),
            author: None,
        }
    }

    pub fn slug(mut self, slug: &str) -> Self {
        self.slug = Some(slug.to_string());
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn draft(mut self) -> Self {
        self.status = "Draft".to_string();
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.date = Some(date.to_string());
        self
    }

    pub fn tags(mut self, tags: &[&str]) -> Self {
        self.tags = tags.iter().map(|t| t.to_string()).collect();
        self
    }

    pub fn author(mut self, name: &str) -> Self {
        self.author = Some(name.to_string());
        self
    }

    pub fn build(&self) -> Value {
        let tags: Vec<Value> = self.tags.iter().map(|t| json!({ "name": t })).collect();
        let slug: Vec<Value> = self
            .slug
            .iter()
            .map(|s| json!({ "type": "text", "plain_text": s }))
            .collect();
        let people: Vec<Value> = self.author.iter().map(|n| json!({ "name": n })).collect();
        json!({
            "object": "page",
            "id": self.id,
            "cover": null,
            "properties": {
                "Title": {
                    "type": "title",
                    "title": [{ "type": "text", "plain_text": self.title }]
                },
                "Description": { "type": "rich_text", "rich_text": [] },
                "Tags": { "type": "multi_select", "multi_select": tags },
                "Author": { "type": "people", "people": people },
                "Date": {
                    "type": "date",
                    "date": self.date.as_ref().map(|d| json!({ "start": d }))
                },
                "Modified Date": { "type": "date", "date": null },
                "Slug": { "type": "rich_text", "rich_text": slug },
                "Status": { "type": "select", "select": { "name": self.status } }
            }
        })
    }
}

/// A small blog: four published posts across three tags, plus one draft.
pub fn sample_source() -> MemorySource {
    MemorySource::new()
        .with_page(
            PageBuilder::new("p1")
                .slug("hello-rust")
                .date("2024-01-10")
                .tags(&["Rust", "Intro"])
                .author("Kim")
                .build(),
            "# Hello\n\nFirst post.\n\n## Setup\n\n## Setup\n",
        )
        .with_page(
            PageBuilder::new("p2")
                .slug("async-notes")
                .date("2024-03-05")
                .tags(&["Rust", "Async"])
                .build(),
            "## Futures\n\n### Pinning\n",
        )
        .with_page(
            PageBuilder::new("p3")
                .slug("draft-post")
                .date("2024-04-01")
                .tags(&["Rust"])
                .draft()
                .build(),
            "unpublished",
        )
        .with_page(
            PageBuilder::new("p4")
                .date("2023-11-20")
                .tags(&["Intro"])
                .build(),
            "no headings here",
        )
        .with_page(
            PageBuilder::new("p5")
                .slug("next-js-tips")
                .date("2024-02-14")
                .tags(&["Next JS"])
                .build(),
            "# 시작하기\n",
        )
}

/// Test harness owning a blog over an in-memory source.
pub struct TestHarness {
    pub blog: Blog,
}

impl TestHarness {
    /// Harness over [`sample_source`].
    pub fn new() -> Self {
        Self::with_source(sample_source())
    }

    pub fn with_source(source: impl ContentSource + 'static) -> Self {
        Self {
            blog: Blog::new(Arc::new(source)),
        }
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// A source whose every call fails with the configured status.
pub struct FailingSource {
    pub status: u16,
    pub calls: AtomicUsize,
}

impl FailingSource {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            calls: AtomicUsize::new(0),
        }
    }

    fn fail(&self) -> Error {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Error::api(self.status, "service_unavailable", "upstream unavailable")
    }
}

#[async_trait]
impl ContentSource for FailingSource {
    async fn query_database(&self, _request: &QueryRequest) -> Result<QueryResponse> {
        Err(self.fail())
    }

    async fn page_markdown(&self, _page_id: &str) -> Result<String> {
        Err(self.fail())
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// A source that answers queries but fails to load page bodies.
pub struct BrokenBodies(pub MemorySource);

#[async_trait]
impl ContentSource for BrokenBodies {
    async fn query_database(&self, request: &QueryRequest) -> Result<QueryResponse> {
        self.0.query_database(request).await
    }

    async fn page_markdown(&self, page_id: &str) -> Result<String> {
        Err(Error::transport(format!("connection reset loading {page_id}")))
    }

    fn name(&self) -> &str {
        "broken-bodies"
    }
}
