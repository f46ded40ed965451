//! Command-line arguments.

use clap::{Parser, Subcommand};

/// Read a Notion-backed blog from the command line.
#[derive(Parser, Debug)]
#[command(name = "notiblog", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "NOTIBLOG_CONFIG")]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List published posts, newest first
    Posts {
        /// Only posts carrying this exact tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one published post by slug
    Post {
        /// URL slug of the post
        slug: String,

        /// Print the table of contents instead of the body
        #[arg(long, conflicts_with = "html")]
        toc: bool,

        /// Print the body rendered to HTML
        #[arg(long)]
        html: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Show tag statistics
    Tags {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Extract the table of contents from a Markdown file
    Toc {
        /// Markdown file, or `-` for stdin
        #[arg(default_value = "-")]
        file: String,

        /// Nest entries under their parent headings
        #[arg(long)]
        nested: bool,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the resolved config file path
    Path,

    /// Print a value by dotted key (e.g. `notion.page_size`)
    Get {
        /// Dotted key
        key: String,
    },

    /// Set a value by dotted key in the config file
    Set {
        /// Dotted key
        key: String,
        /// New value; booleans and numbers are detected
        value: String,
    },

    /// Write a default config file
    Init {
        /// Target path instead of the default location
        #[arg(long)]
        file: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the configuration as environment variables
    Export {
        /// Format as `--env KEY=VALUE` for `docker run`
        #[arg(long)]
        docker_env: bool,
    },
}

/// Crates whose debug records `--verbose` shows.
const VERBOSE_TARGETS: [&str; 4] = [
    "notiblog",
    "notiblog_cli",
    "notiblog_notion",
    "notiblog_content",
];

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_log_filter(&self) -> String {
        if self.verbose {
            std::iter::once("info".to_string())
                .chain(VERBOSE_TARGETS.iter().map(|t| format!("{t}=debug")))
                .collect::<Vec<_>>()
                .join(",")
        } else {
            "warn".to_string()
        }
    }
}
