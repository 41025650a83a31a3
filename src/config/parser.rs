use crate::config::types::{Credentials, CREDENTIALS_FILE_NAME};
use crate::config::validation::validate_credentials;
use crate::ConfigError;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::{Path, PathBuf};

/// Returns the default credentials file location: `$HOME/search-digest.properties`
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the credentials file (it may not exist yet)
/// * `Err(ConfigError::NoHomeDir)` - `HOME` is unset or empty
pub fn credentials_path() -> Result<PathBuf, ConfigError> {
    credentials_path_in(std::env::var_os("HOME"))
}

fn credentials_path_in(home: Option<OsString>) -> Result<PathBuf, ConfigError> {
    let home = home
        .filter(|home| !home.is_empty())
        .ok_or(ConfigError::NoHomeDir)?;

    Ok(PathBuf::from(home).join(CREDENTIALS_FILE_NAME))
}

/// Loads and validates the credentials file at the given path
///
/// The file uses Java properties syntax (`key=value` or `key: value`, `#`
/// and `!` comment lines). Values are taken literally: no environment
/// substitution and no quote stripping. Two entries are required: `key`
/// (the API key) and `cx` (the search engine identifier). Other entries
/// are ignored.
///
/// # Arguments
///
/// * `path` - Path to the credentials file
///
/// # Returns
///
/// * `Ok(Credentials)` - Successfully loaded and validated credentials
/// * `Err(ConfigError)` - Missing file, unreadable or malformed content,
///   or a missing/empty required entry
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use search_digest::config::load_credentials;
///
/// let credentials = load_credentials(Path::new("/home/me/search-digest.properties")).unwrap();
/// println!("cx = {}", credentials.search_engine_id);
/// ```
pub fn load_credentials(path: &Path) -> Result<Credentials, ConfigError> {
    let credentials = parse_credentials(path)?;

    validate_credentials(&credentials)?;

    tracing::debug!("Loaded credentials from {}", path.display());
    Ok(credentials)
}

/// Parses the credentials file without validating entry contents
///
/// When an entry appears more than once the last occurrence wins.
pub fn parse_credentials(path: &Path) -> Result<Credentials, ConfigError> {
    let file = File::open(path).map_err(|source| match source.kind() {
        ErrorKind::NotFound => ConfigError::NotFound(path.to_path_buf()),
        _ => ConfigError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let mut entries =
        java_properties::read(BufReader::new(file)).map_err(|e| ConfigError::Malformed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

    let api_key = entries.remove("key");
    let search_engine_id = entries.remove("cx");
    for name in entries.keys() {
        tracing::debug!("Ignoring unknown credentials entry '{}'", name);
    }

    Ok(Credentials {
        api_key: api_key.ok_or(ConfigError::MissingEntry("key"))?,
        search_engine_id: search_engine_id.ok_or(ConfigError::MissingEntry("cx"))?,
    })
}
