//! HTTP fetcher for the search API
//!
//! This module handles the single request of a run:
//! - Building the HTTP client with a user agent and timeouts
//! - Issuing the GET request (the search API rejects POST)
//! - Classifying transport failures and non-success statuses

use crate::search::request::redact_url;
use reqwest::header::ACCEPT;
use reqwest::{Client, Method};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Longest response excerpt kept in a status error
const BODY_EXCERPT_LEN: usize = 200;

/// Errors that can occur while fetching search results
///
/// URLs carried by these errors have the API key redacted.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Connection failed for {url}: {source}")]
    Connect { url: String, source: reqwest::Error },

    #[error("HTTP {status} from {url}: {excerpt}")]
    Status {
        url: String,
        status: u16,
        excerpt: String,
    },
}

impl FetchError {
    /// The HTTP status code, when the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Result type for fetch operations
pub type FetchResult<T> = Result<T, FetchError>;

/// Builds an HTTP client for the search API
///
/// # Arguments
///
/// * `timeout` - Overall request timeout
///
/// # Example
///
/// ```no_run
/// use search_digest::search::build_http_client;
/// use std::time::Duration;
///
/// let client = build_http_client(Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(timeout: Duration) -> FetchResult<Client> {
    let user_agent = format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .connect_timeout(timeout.min(Duration::from_secs(10)))
        .gzip(true)
        .brotli(true)
        .build()
        .map_err(FetchError::Client)
}

/// Fetches the search results for a fully built request URL
///
/// Exactly one GET request is issued; there is no retry. Any transport
/// failure or non-2xx status is returned as an error.
///
/// # Arguments
///
/// * `client` - The HTTP client to use
/// * `url` - The request URL, including credentials
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The response body
/// * `Err(FetchError)` - The request failed or the status was not a success
pub async fn fetch_results(client: &Client, url: &Url) -> FetchResult<Vec<u8>> {
    let display_url = redact_url(url);

    let response = client
        .request(Method::GET, url.clone())
        .header(ACCEPT, "application/json")
        .send()
        .await
        .map_err(|e| classify_error(&display_url, e))?;

    let status = response.status();
    if !status.is_success() {
        // Body is best effort; the status alone decides the outcome
        let body = response.text().await.unwrap_or_default();
        return Err(FetchError::Status {
            url: display_url,
            status: status.as_u16(),
            excerpt: excerpt(&body),
        });
    }

    let body = response
        .bytes()
        .await
        .map_err(|e| classify_error(&display_url, e))?;

    tracing::debug!("Received {} bytes (HTTP {})", body.len(), status.as_u16());
    Ok(body.to_vec())
}

fn classify_error(url: &str, error: reqwest::Error) -> FetchError {
    if error.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if error.is_connect() {
        FetchError::Connect {
            url: url.to_string(),
            source: error,
        }
    } else {
        FetchError::Http {
            url: url.to_string(),
            source: error,
        }
    }
}

/// Collapses whitespace and truncates a response body for error messages
fn excerpt(body: &str) -> String {
    let collapsed = body.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= BODY_EXCERPT_LEN {
        return collapsed;
    }
    let truncated: String = collapsed.chars().take(BODY_EXCERPT_LEN).collect();
    format!("{}...", truncated)
}
