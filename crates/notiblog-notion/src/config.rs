//! Client configuration and database schema names.

use std::fmt;

use notiblog_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Environment variable holding the integration token.
pub const TOKEN_ENV: &str = "NOTION_TOKEN";

/// Environment variable holding the posts database id.
pub const DATABASE_ID_ENV: &str = "NOTION_DATABASE_ID";

/// Environment variable overriding the API base URL.
pub const API_BASE_URL_ENV: &str = "NOTION_API_BASE_URL";

/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Connection settings for the Notion API.
#[derive(Clone, Serialize, Deserialize)]
pub struct NotionConfig {
    /// Integration token sent as a bearer credential.
    #[serde(default)]
    pub token: String,

    /// Id of the database holding the posts.
    #[serde(default)]
    pub database_id: String,

    /// API root, without the `/v1` suffix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Value of the `Notion-Version` header.
    #[serde(default = "default_notion_version")]
    pub notion_version: String,

    /// Records requested per query page (1–100).
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Retries after a rate-limited or failed request.
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// First retry delay in milliseconds; later delays grow exponentially.
    #[serde(default = "default_retry_min_delay_ms")]
    pub retry_min_delay_ms: u64,
}

fn default_api_base_url() -> String {
    "https://api.notion.com".to_string()
}

fn default_notion_version() -> String {
    "2022-06-28".to_string()
}

fn default_page_size() -> u32 {
    MAX_PAGE_SIZE
}

fn default_max_retries() -> usize {
    3
}

fn default_retry_min_delay_ms() -> u64 {
    500
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            database_id: String::new(),
            api_base_url: default_api_base_url(),
            notion_version: default_notion_version(),
            page_size: default_page_size(),
            max_retries: default_max_retries(),
            retry_min_delay_ms: default_retry_min_delay_ms(),
        }
    }
}

impl fmt::Debug for NotionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NotionConfig")
            .field("token", &if self.token.is_empty() { "" } else { "***" })
            .field("database_id", &self.database_id)
            .field("api_base_url", &self.api_base_url)
            .field("notion_version", &self.notion_version)
            .field("page_size", &self.page_size)
            .field("max_retries", &self.max_retries)
            .field("retry_min_delay_ms", &self.retry_min_delay_ms)
            .finish()
    }
}

impl NotionConfig {
    /// Creates a config with the given credentials and default settings.
    pub fn new(token: impl Into<String>, database_id: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            database_id: database_id.into(),
            ..Default::default()
        }
    }

    /// Builds a config from `NOTION_TOKEN`, `NOTION_DATABASE_ID` and the
    /// optional `NOTION_API_BASE_URL`.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Replaces settings with any values present in the environment.
    pub fn apply_env_overrides(&mut self) {
        if let Some(token) = non_empty_env(TOKEN_ENV) {
            self.token = token;
        }
        if let Some(database_id) = non_empty_env(DATABASE_ID_ENV) {
            self.database_id = database_id;
        }
        if let Some(base_url) = non_empty_env(API_BASE_URL_ENV) {
            self.api_base_url = base_url;
        }
    }

    /// Checks that credentials are present and settings are in range.
    pub fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::config(format!(
                "Notion token is not set (config `notion.token` or {TOKEN_ENV})"
            )));
        }
        if self.database_id.trim().is_empty() {
            return Err(Error::config(format!(
                "Notion database id is not set (config `notion.database_id` or {DATABASE_ID_ENV})"
            )));
        }
        if self.page_size == 0 || self.page_size > MAX_PAGE_SIZE {
            return Err(Error::config(format!(
                "page_size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                self.page_size
            )));
        }
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://")
        {
            return Err(Error::config(format!(
                "api_base_url must be an http(s) URL, got '{}'",
                self.api_base_url
            )));
        }
        Ok(())
    }

    /// Joins an API path onto the base URL.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/v1/{path}", self.api_base_url.trim_end_matches('/'))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Property names of the posts database.
///
/// Defaults match the blog template: `Title`, `Description`, `Tags`,
/// `Author`, `Date`, `Modified Date`, `Slug`, and a `Status` select whose
/// published option is `Published`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyNames {
    /// Title property (`title` type)
    pub title: String,
    /// Summary property (`rich_text` type)
    pub description: String,
    /// Tag property (`multi_select` type)
    pub tags: String,
    /// Author property (`people` type)
    pub author: String,
    /// Publish date property (`date` type)
    pub date: String,
    /// Modification date property (`date` type)
    pub modified_date: String,
    /// Slug property (`rich_text` type)
    pub slug: String,
    /// Status property (`select` type)
    pub status: String,
    /// Status option marking a post as published
    pub published: String,
}

impl Default for PropertyNames {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            description: "Description".to_string(),
            tags: "Tags".to_string(),
            author: "Author".to_string(),
            date: "Date".to_string(),
            modified_date: "Modified Date".to_string(),
            slug: "Slug".to_string(),
            status: "Status".to_string(),
            published: "Published".to_string(),
        }
    }
}
