//! Response tree for decoded search API payloads
//!
//! The search API answers with a JSON document. This module decodes it once
//! into a read-only [`ResponseTree`] and exposes the result items as
//! borrowed [`ResultItem`] views. Field lookups go through [`FieldQuery`].

mod query;

pub use query::{extract, FieldQuery, QueryError};

use serde_json::Value;
use thiserror::Error;

/// Errors raised while decoding a response body
#[derive(Debug, Error)]
pub enum TreeError {
    #[error("Response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected a JSON object at the document root, found {0}")]
    Shape(&'static str),
}

/// Result type for tree operations
pub type TreeResult<T> = Result<T, TreeError>;

/// Name of the root entry holding the result items
pub const ITEMS_KEY: &str = "items";

/// A decoded search API response
#[derive(Debug, Clone)]
pub struct ResponseTree {
    root: Value,
}

impl ResponseTree {
    /// Decodes a response body into a tree
    ///
    /// # Arguments
    ///
    /// * `bytes` - The raw response body
    ///
    /// # Returns
    ///
    /// * `Ok(ResponseTree)` - The body is a JSON object
    /// * `Err(TreeError)` - The body is not JSON, or its root is not an object
    ///
    /// # Example
    ///
    /// ```
    /// use search_digest::tree::ResponseTree;
    ///
    /// let tree = ResponseTree::from_slice(br#"{"kind":"customsearch#search","items":[{"link":"http://a"}]}"#).unwrap();
    /// assert_eq!(tree.kind(), Some("customsearch#search"));
    /// assert_eq!(tree.items().count(), 1);
    /// ```
    pub fn from_slice(bytes: &[u8]) -> TreeResult<Self> {
        let root: Value = serde_json::from_slice(bytes)?;
        Self::from_value(root)
    }

    /// Wraps an already decoded JSON value
    pub fn from_value(root: Value) -> TreeResult<Self> {
        if !root.is_object() {
            return Err(TreeError::Shape(node_kind(&root)));
        }
        Ok(Self { root })
    }

    /// Returns the `kind` metadata entry of the envelope, if present
    pub fn kind(&self) -> Option<&str> {
        self.root.get("kind").and_then(Value::as_str)
    }

    /// Iterates over the result items in response order
    ///
    /// An absent `items` entry, or one that is not an array, yields no items.
    pub fn items(&self) -> impl Iterator<Item = ResultItem<'_>> {
        self.root
            .get(ITEMS_KEY)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .enumerate()
            .map(|(index, node)| ResultItem { index, node })
    }

    /// Returns the number of result items
    pub fn item_count(&self) -> usize {
        self.items().count()
    }
}

/// A borrowed view of one element of the response's items array
#[derive(Debug, Clone, Copy)]
pub struct ResultItem<'a> {
    index: usize,
    node: &'a Value,
}

impl ResultItem<'_> {
    /// Position of the item in the response (zero-based)
    pub fn index(&self) -> usize {
        self.index
    }

    /// Evaluates a query scoped to this item
    pub fn field(&self, query: &FieldQuery) -> String {
        extract(self.node, query)
    }

    /// The result URL (`link`)
    pub fn link(&self) -> String {
        self.field(&FieldQuery::descendant("link"))
    }

    /// The HTML-formatted title supplied by the API (`htmlTitle`)
    pub fn title(&self) -> String {
        self.field(&FieldQuery::descendant("htmlTitle"))
    }

    /// The HTML-formatted snippet supplied by the API (`htmlSnippet`)
    pub fn snippet(&self) -> String {
        self.field(&FieldQuery::descendant("htmlSnippet"))
    }
}

/// Describes the kind of a JSON node for error messages
fn node_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
