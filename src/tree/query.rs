//! Path queries over response tree nodes
//!
//! A query is a list of steps separated by `/`:
//!
//! - `name` or `/name` selects the child entry `name`
//! - `//name` selects every entry `name` at any depth below the current node
//! - `*` matches any entry name
//!
//! Arrays are transparent: a step applied to an array applies to each of its
//! elements in order. Evaluation returns the first scalar reached in document
//! order, so `//link` on a result item yields its top-level `link` before any
//! nested one.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors raised when parsing a query string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Query is empty")]
    Empty,

    #[error("Query '{query}' has an empty step at position {position}")]
    EmptyStep { query: String, position: usize },

    #[error("Query '{0}' uses more than two consecutive slashes")]
    TooManySlashes(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Child(String),
    Descendant(String),
}

impl Step {
    fn name(&self) -> &str {
        match self {
            Step::Child(name) | Step::Descendant(name) => name,
        }
    }

    fn matches(&self, key: &str) -> bool {
        let name = self.name();
        name == "*" || name == key
    }
}

/// A parsed path query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldQuery {
    steps: Vec<Step>,
}

impl FieldQuery {
    /// Parses a query string such as `items/link` or `//htmlSnippet`
    pub fn parse(query: &str) -> Result<Self, QueryError> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return Err(QueryError::Empty);
        }

        let mut steps = Vec::new();
        let mut rest = trimmed;

        while !rest.is_empty() {
            let slashes = rest.len() - rest.trim_start_matches('/').len();
            rest = &rest[slashes..];

            let end = rest.find('/').unwrap_or(rest.len());
            let name = &rest[..end];
            rest = &rest[end..];

            if slashes > 2 {
                return Err(QueryError::TooManySlashes(trimmed.to_string()));
            }
            if name.is_empty() {
                return Err(QueryError::EmptyStep {
                    query: trimmed.to_string(),
                    position: steps.len(),
                });
            }

            let step = if slashes == 2 {
                Step::Descendant(name.to_string())
            } else {
                Step::Child(name.to_string())
            };
            steps.push(step);
        }

        Ok(Self { steps })
    }

    /// A single-step query selecting the child entry `name`
    pub fn child(name: impl Into<String>) -> Self {
        Self {
            steps: vec![Step::Child(name.into())],
        }
    }

    /// A single-step query selecting `name` anywhere below the node
    pub fn descendant(name: impl Into<String>) -> Self {
        Self {
            steps: vec![Step::Descendant(name.into())],
        }
    }
}

impl FromStr for FieldQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            match step {
                Step::Child(name) => write!(f, "/{}", name)?,
                Step::Descendant(name) => write!(f, "//{}", name)?,
            }
        }
        Ok(())
    }
}

/// Evaluates `query` against `node` and returns the first matching scalar
///
/// Strings are returned verbatim, numbers and booleans in their JSON text
/// form, and `null` as an empty string. Objects and arrays reached by the
/// final step are looked through for scalars. No match yields an empty
/// string.
///
/// # Example
///
/// ```
/// use search_digest::tree::{extract, FieldQuery};
/// use serde_json::json;
///
/// let item = json!({"link": "http://a", "pagemap": {"metatags": [{"og:title": "A"}]}});
/// assert_eq!(extract(&item, &FieldQuery::descendant("link")), "http://a");
/// assert_eq!(extract(&item, &"//og:title".parse().unwrap()), "A");
/// assert_eq!(extract(&item, &FieldQuery::child("htmlSnippet")), "");
/// ```
pub fn extract(node: &Value, query: &FieldQuery) -> String {
    first_scalar(node, &query.steps).unwrap_or_default()
}

fn first_scalar(node: &Value, steps: &[Step]) -> Option<String> {
    if let Value::Array(elements) = node {
        return elements
            .iter()
            .find_map(|element| first_scalar(element, steps));
    }

    let Some((step, rest)) = steps.split_first() else {
        return scalar_text(node);
    };

    let Value::Object(entries) = node else {
        return None;
    };

    match step {
        Step::Child(_) => entries
            .iter()
            .filter(|(key, _)| step.matches(key))
            .find_map(|(_, child)| first_scalar(child, rest)),
        Step::Descendant(_) => entries.iter().find_map(|(key, child)| {
            let here = if step.matches(key) {
                first_scalar(child, rest)
            } else {
                None
            };
            here.or_else(|| first_scalar(child, steps))
        }),
    }
}

fn scalar_text(node: &Value) -> Option<String> {
    match node {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null => Some(String::new()),
        Value::Array(elements) => elements.iter().find_map(scalar_text),
        Value::Object(entries) => entries.values().find_map(scalar_text),
    }
}
