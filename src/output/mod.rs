//! Output module for rendering and writing search results
//!
//! This module handles:
//! - Rendering one HTML fragment per result item and the page header
//! - Accumulating fragments in response order
//! - Writing the finished document to `search-result_<term>.html`

mod aggregator;
mod render;
mod writer;

pub use aggregator::ResultAggregator;
pub use render::{render_fragment, render_header};
pub use writer::{result_file_name, write_results, WriteError, WriteResult};

use crate::tree::ResultItem;

/// The fields extracted from one result item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchHit {
    /// Result URL
    pub link: String,

    /// HTML-formatted title, as supplied by the API
    pub title: String,

    /// HTML-formatted snippet, as supplied by the API
    pub snippet: String,
}

impl SearchHit {
    /// Returns the names of the fields that came back empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.link.is_empty() {
            missing.push("link");
        }
        if self.title.is_empty() {
            missing.push("htmlTitle");
        }
        if self.snippet.is_empty() {
            missing.push("htmlSnippet");
        }
        missing
    }
}

impl From<&ResultItem<'_>> for SearchHit {
    fn from(item: &ResultItem<'_>) -> Self {
        Self {
            link: item.link(),
            title: item.title(),
            snippet: item.snippet(),
        }
    }
}
