//! Search-Digest main entry point
//!
//! This is the command-line interface for the Search-Digest result renderer.

use anyhow::Context;
use clap::Parser;
use search_digest::config::{credentials_path, load_credentials, SearchConfig, DEFAULT_ENDPOINT};
use search_digest::run_search;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Search-Digest: render a web search as an HTML page
///
/// Runs one query against a custom search engine and writes the results to
/// `search-result_<TERM>.html`. The API key and engine id are read from
/// `$HOME/search-digest.properties` (entries `key` and `cx`).
#[derive(Parser, Debug)]
#[command(name = "search-digest")]
#[command(version = "1.0.0")]
#[command(about = "Render a web search as an HTML page", long_about = None)]
struct Cli {
    /// The search term (quote it to search for several words; may start with '-')
    #[arg(value_name = "TERM", allow_hyphen_values = true)]
    term: String,

    /// Read credentials from this file instead of $HOME/search-digest.properties
    #[arg(long, value_name = "PATH")]
    credentials: Option<PathBuf>,

    /// Directory to write the result page into
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 30)]
    timeout_secs: u64,

    /// Search API endpoint
    #[arg(long, hide = true, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let path = handle_search(cli).await?;
    println!("{}", path.display());

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("search_digest=info,warn"),
            1 => EnvFilter::new("search_digest=debug,info"),
            2 => EnvFilter::new("search_digest=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads credentials, runs the search and returns the written file
async fn handle_search(cli: Cli) -> anyhow::Result<PathBuf> {
    let path = match cli.credentials {
        Some(path) => path,
        None => credentials_path()?,
    };
    tracing::debug!("Loading credentials from: {}", path.display());
    let credentials = load_credentials(&path)
        .with_context(|| format!("Failed to load credentials from {}", path.display()))?;

    let config = SearchConfig {
        endpoint: cli.endpoint,
        output_dir: cli.output_dir,
        timeout: Duration::from_secs(cli.timeout_secs),
    };

    let path = run_search(
        &cli.term,
        &credentials.api_key,
        &credentials.search_engine_id,
        config,
    )
    .await?;
    Ok(path)
}
