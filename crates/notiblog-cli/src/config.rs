//! Configuration file for the `notiblog` binary.
//!
//! ```toml
//! [notion]
//! token = "secret_..."
//! database_id = "..."
//!
//! [schema]
//! slug = "Slug"
//! published = "Published"
//!
//! [blog]
//! all_label = "전체"
//! ```
//!
//! `NOTION_TOKEN`, `NOTION_DATABASE_ID` and `NOTION_API_BASE_URL` override
//! the file.

use std::path::{Path, PathBuf};

use notiblog::core::DEFAULT_ALL_LABEL;
use notiblog::notion::config::{API_BASE_URL_ENV, DATABASE_ID_ENV, TOKEN_ENV};
use notiblog::{BlogOptions, Error, NotionConfig, PropertyNames, Result};
use serde::{Deserialize, Serialize};

/// Project name, used for the config directory.
pub const PROJECT_NAME: &str = "notiblog";

/// Full configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BlogConfig {
    /// Notion connection
    #[serde(default)]
    pub notion: NotionConfig,

    /// Database property names
    #[serde(default)]
    pub schema: PropertyNames,

    /// Presentation settings
    #[serde(default)]
    pub blog: BlogSection,
}

/// `[blog]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogSection {
    /// Label of the aggregate tag entry
    #[serde(default = "default_all_label")]
    pub all_label: String,
}

fn default_all_label() -> String {
    DEFAULT_ALL_LABEL.to_string()
}

impl Default for BlogSection {
    fn default() -> Self {
        Self {
            all_label: default_all_label(),
        }
    }
}

impl BlogConfig {
    /// `<config_dir>/notiblog/config.toml`.
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join("config.toml"))
    }

    /// The explicit path if given, otherwise the default location.
    pub fn resolve_config_path(config_path: Option<&str>) -> Option<PathBuf> {
        match config_path {
            Some(path) => Some(PathBuf::from(path)),
            None => Self::default_config_path(),
        }
    }

    /// Loads the config file and applies environment overrides.
    ///
    /// A missing file at the default location yields defaults; a missing
    /// file given explicitly is an error.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = match Self::resolve_config_path(config_path) {
            Some(path) if path.exists() => Self::from_file(&path)?,
            Some(path) if config_path.is_some() => {
                return Err(Error::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            _ => Self::default(),
        };
        config.notion.apply_env_overrides();
        Ok(config)
    }

    /// Parses a config file without environment overrides.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
        toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Serializes the config as pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Connection settings as environment variables.
    pub fn to_env_vars(&self) -> Vec<(String, String)> {
        vec![
            (TOKEN_ENV.to_string(), self.notion.token.clone()),
            (DATABASE_ID_ENV.to_string(), self.notion.database_id.clone()),
            (API_BASE_URL_ENV.to_string(), self.notion.api_base_url.clone()),
        ]
    }

    /// Options for the blog service.
    pub fn blog_options(&self) -> BlogOptions {
        BlogOptions {
            properties: self.schema.clone(),
            all_label: self.blog.all_label.clone(),
        }
    }
}
