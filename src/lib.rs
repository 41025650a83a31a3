//! Search-Digest: a one-shot web search to HTML renderer
//!
//! This crate runs a single query against a custom search JSON API, walks the
//! decoded response, pulls the link, title and snippet out of every result
//! item, and writes them as an HTML fragment named after the search term.

pub mod config;
pub mod output;
pub mod search;
pub mod tree;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Search-Digest operations
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("Credential error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] search::FetchError),

    #[error("Parse error: {0}")]
    Parse(#[from] tree::TreeError),

    #[error("Write error: {0}")]
    Write(#[from] output::WriteError),
}

/// Configuration and credential errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Cannot locate home directory: HOME is not set")]
    NoHomeDir,

    #[error("Credentials file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read credentials file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed credentials file {}: {message}", path.display())]
    Malformed { path: PathBuf, message: String },

    #[error("Missing required entry '{0}' in credentials file")]
    MissingEntry(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Search-Digest operations
pub type Result<T> = std::result::Result<T, SearchError>;

// Re-export commonly used types
pub use config::{Credentials, SearchConfig};
pub use search::{run_search, SearchPipeline, SearchRequest};
