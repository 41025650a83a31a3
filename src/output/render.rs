//! HTML rendering of the page header and per-item fragments

use crate::output::SearchHit;
use html_escape::{encode_double_quoted_attribute, encode_text};

/// Renders the page header for a search term
///
/// The term is inserted literally, exactly as supplied on input.
///
/// ```
/// use search_digest::output::render_header;
///
/// assert_eq!(render_header("cats"), "Search results for '<b>cats</b>':<p/>\n");
/// ```
pub fn render_header(term: &str) -> String {
    format!("Search results for '<b>{}</b>':<p/>\n", term)
}

/// Renders one result item as an HTML fragment
///
/// Title and snippet are already HTML from the API and are inserted as-is.
/// The link is escaped for the attribute and text positions it appears in.
pub fn render_fragment(hit: &SearchHit) -> String {
    format!(
        "<p><a href=\"{}\">{}</a><br/>{}<br/><small>{}</small></p>\n",
        encode_double_quoted_attribute(&hit.link),
        hit.title,
        hit.snippet,
        encode_text(&hit.link),
    )
}
