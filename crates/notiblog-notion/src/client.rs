//! HTTP client for the Notion REST API.

use std::collections::HashSet;
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use backon::{ExponentialBuilder, Retryable};
use notiblog_core::{Error, Result};
use reqwest::{Client, Method, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::blocks::{Block, blocks_to_markdown};
use crate::config::NotionConfig;
use crate::query::{QueryRequest, QueryResponse};

const USER_AGENT: &str = concat!("notiblog/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Error object returned by the API for non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    message: String,
}

/// One page of block children.
#[derive(Debug, Deserialize)]
struct BlockChildren {
    #[serde(default)]
    results: Vec<Block>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    has_more: bool,
}

/// Notion API client bound to one database.
///
/// Every request carries the bearer token and `Notion-Version` header from
/// the config. Rate-limited (429), 5xx and transport failures are retried
/// with exponential backoff up to `max_retries` times.
#[derive(Debug, Clone)]
pub struct NotionClient {
    http: Client,
    config: NotionConfig,
}

impl NotionClient {
    /// Creates a client after validating `config`.
    pub fn new(config: NotionConfig) -> Result<Self> {
        config.validate()?;
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::transport_with_source("Failed to build HTTP client", e))?;
        Ok(Self { http, config })
    }

    /// Creates a client from `NOTION_TOKEN` and `NOTION_DATABASE_ID`.
    pub fn from_env() -> Result<Self> {
        Self::new(NotionConfig::from_env()?)
    }

    /// The client's configuration.
    pub fn config(&self) -> &NotionConfig {
        &self.config
    }

    /// Runs one page of a database query.
    ///
    /// Uses the configured page size when the request leaves it unset.
    pub async fn query_database(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let mut body = request.clone();
        body.page_size.get_or_insert(self.config.page_size);
        let body = serde_json::to_value(&body)?;
        let path = format!("databases/{}/query", self.config.database_id);

        let response: QueryResponse = self.send(Method::POST, &path, &[], Some(&body)).await?;
        tracing::debug!(
            database_id = %self.config.database_id,
            results = response.results.len(),
            has_more = response.has_more,
            "Queried database"
        );
        Ok(response)
    }

    /// Lists all direct children of a block, following cursors.
    pub async fn block_children(&self, block_id: &str) -> Result<Vec<Block>> {
        let path = format!("blocks/{block_id}/children");
        let page_size = self.config.page_size.to_string();
        let mut blocks = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen = HashSet::new();

        loop {
            let mut query = vec![("page_size", page_size.clone())];
            if let Some(c) = &cursor {
                query.push(("start_cursor", c.clone()));
            }

            let page: BlockChildren = self.send(Method::GET, &path, &query, None).await?;
            blocks.extend(page.results);

            match page.next_cursor.filter(|_| page.has_more) {
                Some(next) if seen.insert(next.clone()) => cursor = Some(next),
                Some(next) => {
                    tracing::warn!(block_id, cursor = %next, "Cursor repeated, stopping");
                    break;
                }
                None => break,
            }
        }

        Ok(blocks)
    }

    /// Fetches the block tree under `block_id`, descending into every block
    /// that reports children.
    pub fn block_tree<'a>(&'a self, block_id: &'a str) -> BoxFuture<'a, Result<Vec<Block>>> {
        Box::pin(async move {
            let mut blocks = self.block_children(block_id).await?;
            for block in &mut blocks {
                if block.wants_children() {
                    block.children = self.block_tree(&block.id).await?;
                }
            }
            Ok(blocks)
        })
    }

    /// Renders a page body as Markdown.
    pub async fn page_markdown(&self, page_id: &str) -> Result<String> {
        let blocks = self.block_tree(page_id).await?;
        let markdown = blocks_to_markdown(&blocks);
        tracing::debug!(
            page_id,
            blocks = blocks.len(),
            bytes = markdown.len(),
            "Converted page to markdown"
        );
        Ok(markdown)
    }

    /// Sends a request, retrying transient failures.
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T> {
        let endpoint = self.config.endpoint(path);
        let url = endpoint.as_str();
        let backoff = ExponentialBuilder::default()
            .with_min_delay(Duration::from_millis(self.config.retry_min_delay_ms))
            .with_max_times(self.config.max_retries)
            .with_jitter();

        (|| self.send_once(method.clone(), url, query, body))
            .retry(backoff)
            .when(Error::is_retryable)
            .notify(|err, delay| {
                tracing::warn!(url, error = %err, ?delay, "Retrying Notion request");
            })
            .await
    }

    async fn send_once<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        query: &[(&str, String)],
        body: Option<&Value>,
    ) -> Result<T> {
        let mut request = self
            .http
            .request(method, url)
            .bearer_auth(&self.config.token)
            .header("Notion-Version", &self.config.notion_version);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::transport_with_source(format!("Request to {url} failed"), e))?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(|e| {
            Error::transport_with_source(format!("Reading response from {url} failed"), e)
        })?;

        if !status.is_success() {
            return Err(api_error(status, &bytes));
        }
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Builds an [`Error::Api`] from a failed response body.
fn api_error(status: StatusCode, body: &[u8]) -> Error {
    match serde_json::from_slice::<ApiError>(body) {
        Ok(err) if !err.code.is_empty() || !err.message.is_empty() => {
            Error::api(status.as_u16(), err.code, err.message)
        }
        _ => Error::api(
            status.as_u16(),
            status
                .canonical_reason()
                .unwrap_or("unknown")
                .to_lowercase()
                .replace(' ', "_"),
            String::from_utf8_lossy(body).into_owned(),
        ),
    }
}
