//! Search module for querying the search API and producing the result page
//!
//! This module contains the request side of a run:
//! - Building the request URL from the term and credentials
//! - Issuing the single GET request
//! - Orchestrating decode, extraction, aggregation and writing

mod fetcher;
mod pipeline;
mod request;

pub use fetcher::{build_http_client, fetch_results, FetchError, FetchResult};
pub use pipeline::{render_document, SearchPipeline};
pub use request::{redact_url, SearchRequest};

use crate::config::{Credentials, SearchConfig};
use std::path::PathBuf;

/// Runs a complete search
///
/// This is the one-call entry point. It will:
/// 1. Build the request for `term`
/// 2. Fetch the results with a single GET request
/// 3. Decode the response and extract every result item
/// 4. Write `search-result_<term>.html` into the configured output directory
///
/// # Arguments
///
/// * `term` - The search term, used verbatim in the header and file name
/// * `api_key` - The search API key
/// * `search_engine_id` - The custom search engine identifier (`cx`)
/// * `config` - Endpoint, output directory and timeout for the run
///
/// # Returns
///
/// * `Ok(PathBuf)` - The run completed; path of the written file
/// * `Err(SearchError)` - The run failed and no file was written
pub async fn run_search(
    term: &str,
    api_key: &str,
    search_engine_id: &str,
    config: SearchConfig,
) -> crate::Result<PathBuf> {
    let credentials = Credentials {
        api_key: api_key.to_string(),
        search_engine_id: search_engine_id.to_string(),
    };
    let request = SearchRequest::new(term, &credentials)?;
    let pipeline = SearchPipeline::new(config)?;

    pipeline.run(&request).await
}
