use crate::config::types::{Credentials, SearchConfig};
use crate::ConfigError;
use url::Url;

/// Validates loaded credentials
///
/// Both entries must be non-blank and may not contain whitespace.
pub fn validate_credentials(credentials: &Credentials) -> Result<(), ConfigError> {
    validate_entry("key", &credentials.api_key)?;
    validate_entry("cx", &credentials.search_engine_id)?;
    Ok(())
}

fn validate_entry(name: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!(
            "credentials entry '{}' cannot be empty",
            name
        )));
    }

    if value.chars().any(char::is_whitespace) {
        return Err(ConfigError::Validation(format!(
            "credentials entry '{}' must not contain whitespace",
            name
        )));
    }

    Ok(())
}

/// Validates the runtime settings of a search run
pub fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    let endpoint = Url::parse(&config.endpoint)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid endpoint '{}': {}", config.endpoint, e)))?;

    if endpoint.scheme() != "https" && endpoint.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "Endpoint must use http or https, got '{}'",
            endpoint.scheme()
        )));
    }

    if config.timeout.is_zero() {
        return Err(ConfigError::Validation(
            "timeout must be greater than zero".to_string(),
        ));
    }

    if config.output_dir.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output directory cannot be empty".to_string(),
        ));
    }

    Ok(())
}
