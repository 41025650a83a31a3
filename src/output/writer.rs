//! Writes the finished document to `search-result_<term>.html`

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing the result file
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("Invalid output file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: &'static str },

    #[error("Output directory does not exist: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type for write operations
pub type WriteResult<T> = Result<T, WriteError>;

/// Builds the result file name for a search term
///
/// The term is used verbatim. Terms that would turn the name into more than
/// a single path component are rejected.
///
/// ```
/// use search_digest::output::result_file_name;
///
/// assert_eq!(result_file_name("rust").unwrap(), "search-result_rust.html");
/// assert_eq!(result_file_name("two words").unwrap(), "search-result_two words.html");
/// assert!(result_file_name("../etc").is_err());
/// ```
pub fn result_file_name(term: &str) -> WriteResult<String> {
    let name = format!("search-result_{}.html", term);

    let reason = if term.contains('/') || term.contains('\\') {
        Some("search term contains a path separator")
    } else if term.contains('\0') {
        Some("search term contains a NUL character")
    } else {
        None
    };

    match reason {
        Some(reason) => Err(WriteError::InvalidFileName { name, reason }),
        None => Ok(name),
    }
}

/// Writes `content` to `<output_dir>/search-result_<term>.html`
///
/// An existing file is overwritten. If writing fails after the file was
/// created, the partial file is removed before the error is returned.
///
/// # Arguments
///
/// * `output_dir` - Existing directory to write into
/// * `term` - The search term the file is named after
/// * `content` - The full document
///
/// # Returns
///
/// * `Ok(PathBuf)` - Path of the written file
/// * `Err(WriteError)` - Invalid name, missing directory, or IO failure
pub fn write_results(output_dir: &Path, term: &str, content: &str) -> WriteResult<PathBuf> {
    let file_name = result_file_name(term)?;

    if !output_dir.is_dir() {
        return Err(WriteError::MissingDirectory(output_dir.to_path_buf()));
    }

    let path = output_dir.join(file_name);
    let io_error = |source| WriteError::Io {
        path: path.clone(),
        source,
    };

    let mut file = File::create(&path).map_err(io_error)?;
    if let Err(source) = file.write_all(content.as_bytes()).and_then(|_| file.sync_all()) {
        drop(file);
        if let Err(e) = std::fs::remove_file(&path) {
            tracing::warn!("Failed to remove partial file {}: {}", path.display(), e);
        }
        return Err(io_error(source));
    }

    tracing::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(path)
}
