use crate::config::{validate_credentials, Credentials};
use crate::{ConfigError, SearchError};
use url::Url;

/// An immutable search request: the term plus the credentials it is sent with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    term: String,
    credentials: Credentials,
}

impl SearchRequest {
    /// Creates a request for `term`
    ///
    /// # Returns
    ///
    /// * `Ok(SearchRequest)` - The term is non-blank and the credentials are valid
    /// * `Err(SearchError::Argument)` - The term is empty or whitespace only
    /// * `Err(SearchError::Config)` - The credentials fail validation
    pub fn new(term: impl Into<String>, credentials: &Credentials) -> crate::Result<Self> {
        let term = term.into();
        if term.trim().is_empty() {
            return Err(SearchError::Argument(
                "search term cannot be empty".to_string(),
            ));
        }

        validate_credentials(credentials)?;

        Ok(Self {
            term,
            credentials: credentials.clone(),
        })
    }

    /// The search term exactly as supplied
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The API key
    pub fn api_key(&self) -> &str {
        &self.credentials.api_key
    }

    /// The custom search engine identifier
    pub fn search_engine_id(&self) -> &str {
        &self.credentials.search_engine_id
    }

    /// Builds the request URL against `endpoint`
    ///
    /// Appends `q`, `key` and `cx` (in that order) to any query the endpoint
    /// already carries. Values are form-urlencoded, so spaces become `+`.
    ///
    /// # Example
    ///
    /// ```
    /// use search_digest::{Credentials, SearchRequest};
    ///
    /// let credentials = Credentials {
    ///     api_key: "k".to_string(),
    ///     search_engine_id: "c".to_string(),
    /// };
    /// let request = SearchRequest::new("rust lang", &credentials).unwrap();
    /// let url = request.url("https://www.googleapis.com/customsearch/v1").unwrap();
    /// assert_eq!(url.as_str(), "https://www.googleapis.com/customsearch/v1?q=rust+lang&key=k&cx=c");
    /// ```
    pub fn url(&self, endpoint: &str) -> Result<Url, ConfigError> {
        let mut url = Url::parse(endpoint)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint '{}': {}", endpoint, e)))?;

        url.query_pairs_mut()
            .append_pair("q", &self.term)
            .append_pair("key", self.api_key())
            .append_pair("cx", self.search_engine_id());

        Ok(url)
    }
}

/// Returns the URL as a string with the `key` parameter masked, for logs and errors
pub fn redact_url(url: &Url) -> String {
    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| {
            let value = if name == "key" {
                "REDACTED".to_string()
            } else {
                value.into_owned()
            };
            (name.into_owned(), value)
        })
        .collect();

    if !pairs.is_empty() {
        redacted.query_pairs_mut().clear().extend_pairs(pairs);
    }

    redacted.to_string()
}
