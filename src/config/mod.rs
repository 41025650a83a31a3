//! Configuration module for Search-Digest
//!
//! This module locates and loads the credentials file (a `key=value`
//! properties file holding the API `key` and search engine `cx`), and
//! carries the runtime settings of a search run.
//!
//! # Example
//!
//! ```no_run
//! use search_digest::config::{credentials_path, load_credentials};
//!
//! let credentials = load_credentials(&credentials_path().unwrap()).unwrap();
//! println!("Search engine: {}", credentials.search_engine_id);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Credentials, SearchConfig, CREDENTIALS_FILE_NAME, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{credentials_path, load_credentials, parse_credentials};

pub use validation::{validate_credentials, validate_search_config};
