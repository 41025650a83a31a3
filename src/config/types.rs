use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Name of the credentials file looked up in the user's home directory
pub const CREDENTIALS_FILE_NAME: &str = "search-digest.properties";

/// Custom search JSON API endpoint
pub const DEFAULT_ENDPOINT: &str = "https://www.googleapis.com/customsearch/v1";

/// Request timeout applied when none is configured
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API credentials loaded from the credentials file
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// API key (`key` entry)
    pub api_key: String,

    /// Custom search engine identifier (`cx` entry)
    pub search_engine_id: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("search_engine_id", &self.search_engine_id)
            .finish()
    }
}

/// Runtime settings for a search run
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Base URL of the search API; query parameters are appended to it
    pub endpoint: String,

    /// Directory the result file is written into
    pub output_dir: PathBuf,

    /// Overall timeout for the search request
    pub timeout: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            output_dir: PathBuf::from("."),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl SearchConfig {
    /// Creates the default configuration writing into `output_dir`
    pub fn with_output_dir(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }
}
