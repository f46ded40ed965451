//! Content source abstraction.
//!
//! [`ContentSource`] is the seam between the blog service and the remote
//! database. [`NotionClient`] implements it over HTTP; [`MemorySource`]
//! answers the same queries from records held in memory, for tests and
//! offline rendering.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use notiblog_core::{Error, Result};
use serde_json::Value;

use crate::client::NotionClient;
use crate::query::{QueryRequest, QueryResponse};

/// A queryable store of page records with Markdown bodies.
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Runs one page of a database query.
    async fn query_database(&self, request: &QueryRequest) -> Result<QueryResponse>;

    /// Renders the body of a page as Markdown.
    async fn page_markdown(&self, page_id: &str) -> Result<String>;

    /// Source name for logging.
    fn name(&self) -> &str;

    /// Runs a query to completion, following cursors across pages.
    async fn query_all(&self, request: &QueryRequest) -> Result<Vec<Value>> {
        let mut records = Vec::new();
        let mut seen = HashSet::new();
        let mut page = self.query_database(request).await?;

        loop {
            records.append(&mut page.results);
            let Some(cursor) = page.continuation().map(str::to_string) else {
                break;
            };
            if !seen.insert(cursor.clone()) {
                tracing::warn!(source = self.name(), %cursor, "Cursor repeated, stopping");
                break;
            }
            page = self
                .query_database(&request.at_cursor(Some(cursor)))
                .await?;
        }

        tracing::debug!(source = self.name(), records = records.len(), "Query complete");
        Ok(records)
    }
}

#[async_trait]
impl ContentSource for NotionClient {
    async fn query_database(&self, request: &QueryRequest) -> Result<QueryResponse> {
        NotionClient::query_database(self, request).await
    }

    async fn page_markdown(&self, page_id: &str) -> Result<String> {
        NotionClient::page_markdown(self, page_id).await
    }

    fn name(&self) -> &str {
        "notion"
    }
}

/// In-memory content source.
///
/// Filters and sorts are evaluated locally with the same semantics as the
/// API. Cursors are record offsets.
///
/// ```
/// use notiblog_notion::{ContentSource, MemorySource, QueryRequest};
/// use serde_json::json;
///
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// let source = MemorySource::new()
///     .with_page(json!({ "id": "a" }), "# Hello");
/// let records = source.query_all(&QueryRequest::new()).await.unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(source.page_markdown("a").await.unwrap(), "# Hello");
/// # });
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Value>,
    bodies: HashMap<String, String>,
    page_size: Option<usize>,
}

impl MemorySource {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a page record with its Markdown body.
    pub fn with_page(mut self, record: Value, markdown: impl Into<String>) -> Self {
        self.push_page(record, markdown);
        self
    }

    /// Adds a page record with its Markdown body.
    pub fn push_page(&mut self, record: Value, markdown: impl Into<String>) {
        if let Some(id) = record.get("id").and_then(Value::as_str) {
            self.bodies.insert(id.to_string(), markdown.into());
        }
        self.pages.push(record);
    }

    /// Caps results per query page, regardless of the requested size.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size.max(1));
        self
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no records are stored.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[async_trait]
impl ContentSource for MemorySource {
    async fn query_database(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let mut matched: Vec<&Value> = self
            .pages
            .iter()
            .filter(|page| request.filter.as_ref().is_none_or(|f| f.matches(page)))
            .collect();

        // Stable, so later sorts only break ties left by earlier ones.
        matched.sort_by(|a, b| {
            request
                .sorts
                .iter()
                .map(|sort| sort.compare(a, b))
                .find(|ordering| ordering.is_ne())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let start = match &request.start_cursor {
            Some(cursor) => cursor.parse::<usize>().map_err(|_| {
                Error::api(
                    400,
                    "validation_error",
                    format!("invalid start_cursor '{cursor}'"),
                )
            })?,
            None => 0,
        };
        let requested = request.page_size.map_or(usize::MAX, |n| n.max(1) as usize);
        let size = self.page_size.map_or(requested, |cap| cap.min(requested));
        let end = start.saturating_add(size).min(matched.len());

        let results: Vec<Value> = matched
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|page| (*page).clone())
            .collect();
        let has_more = end < matched.len();

        Ok(QueryResponse {
            results,
            next_cursor: has_more.then(|| end.to_string()),
            has_more,
        })
    }

    async fn page_markdown(&self, page_id: &str) -> Result<String> {
        self.bodies.get(page_id).cloned().ok_or_else(|| {
            Error::api(
                404,
                "object_not_found",
                format!("Could not find block with ID: {page_id}"),
            )
        })
    }

    fn name(&self) -> &str {
        "memory"
    }
}
