//! The search pipeline
//!
//! A run is strictly sequential: build URL, fetch, decode, extract each item
//! in response order, aggregate, render, write. Steps up to and including
//! decoding are fatal; a missing field only leaves that field empty.

use crate::config::{validate_search_config, SearchConfig};
use crate::output::{
    render_fragment, render_header, result_file_name, write_results, ResultAggregator, SearchHit,
};
use crate::search::fetcher::{build_http_client, fetch_results};
use crate::search::request::{redact_url, SearchRequest};
use crate::tree::ResponseTree;
use reqwest::Client;
use std::path::PathBuf;

/// Runs searches against one configured endpoint and output directory
///
/// # Example
///
/// ```no_run
/// use search_digest::{Credentials, SearchConfig, SearchPipeline, SearchRequest};
///
/// # async fn example() -> search_digest::Result<()> {
/// let credentials = Credentials {
///     api_key: "YOUR_API_KEY".to_string(),
///     search_engine_id: "YOUR_CX".to_string(),
/// };
/// let pipeline = SearchPipeline::new(SearchConfig::default())?;
/// let path = pipeline.run(&SearchRequest::new("rust", &credentials)?).await?;
/// println!("Wrote {}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct SearchPipeline {
    config: SearchConfig,
    client: Client,
}

impl SearchPipeline {
    /// Creates a pipeline, validating the configuration and building the HTTP client
    pub fn new(config: SearchConfig) -> crate::Result<Self> {
        validate_search_config(&config)?;
        let client = build_http_client(config.timeout)?;

        Ok(Self { config, client })
    }

    /// Runs one search and writes the result page
    ///
    /// # Returns
    ///
    /// * `Ok(PathBuf)` - Path of the written `search-result_<term>.html`
    /// * `Err(SearchError)` - The run was aborted; no file was written
    pub async fn run(&self, request: &SearchRequest) -> crate::Result<PathBuf> {
        let term = request.term();

        // Reject unusable file names before spending a request
        result_file_name(term)?;

        let url = request.url(&self.config.endpoint)?;
        tracing::info!("Searching for '{}'", term);
        tracing::debug!("GET {}", redact_url(&url));

        let body = fetch_results(&self.client, &url).await?;
        let tree = ResponseTree::from_slice(&body)?;
        tracing::debug!(
            "Decoded {} response with {} item(s)",
            tree.kind().unwrap_or("untyped"),
            tree.item_count()
        );

        let document = render_document(term, &tree);
        let path = write_results(&self.config.output_dir, term, &document)?;

        tracing::info!(
            "Wrote {} result(s) for '{}' to {}",
            tree.item_count(),
            term,
            path.display()
        );
        Ok(path)
    }
}

/// Renders the full result page for a decoded response
///
/// The page is the header followed by one fragment per result item, in the
/// order the items appear in the response. A response without items yields
/// the header alone.
pub fn render_document(term: &str, tree: &ResponseTree) -> String {
    let mut aggregator = ResultAggregator::new();

    for item in tree.items() {
        let hit = SearchHit::from(&item);

        let missing = hit.missing_fields();
        if !missing.is_empty() {
            tracing::warn!(
                "Result {} is missing {}; rendering empty value(s)",
                item.index(),
                missing.join(", ")
            );
        }
        tracing::debug!("Result {}: {}", item.index(), hit.link);

        aggregator.append(render_fragment(&hit));
    }

    if aggregator.is_empty() {
        tracing::info!("No results for '{}'", term);
    }

    aggregator.build(&render_header(term))
}
