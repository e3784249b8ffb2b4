//! Error types
//!
//! Every failure in the stability build is fatal to the run; nothing is
//! retried. The variants exist so callers can tell which file or which
//! table row was at fault.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for stability-etch operations
pub type StabilityResult<T> = Result<T, StabilityError>;

/// Main error type for stability-etch
#[derive(Debug, Error)]
pub enum StabilityError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// IO error on a known file
    #[error("IO error on {}: {source}", .path.display())]
    FileIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Malformed JSON in a known file
    #[error("Malformed JSON in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be parsed
    #[error("Invalid configuration file: {0}")]
    Toml(#[from] toml::de::Error),

    /// Marker pattern failed to compile
    #[error("Invalid marker pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// A body row of the rendered table does not have the expected shape
    #[error("Malformed stability row {row}: {reason}")]
    MalformedRow { row: usize, reason: String },

    /// Target file has no marker pair (strict mode)
    #[error("Stability markers not found in {}", .0.display())]
    MarkersNotFound(PathBuf),
}

impl StabilityError {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        StabilityError::Config(message.into())
    }

    /// Create a malformed row error
    pub fn malformed_row(row: usize, reason: impl Into<String>) -> Self {
        StabilityError::MalformedRow {
            row,
            reason: reason.into(),
        }
    }

    /// Attach a path to an IO error
    pub fn file_io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        StabilityError::FileIo {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Attach a path to a JSON error
    pub fn json(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        StabilityError::Json {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Whether this error means the file itself was missing
    pub fn is_not_found(&self) -> bool {
        match self {
            StabilityError::Io(e) | StabilityError::FileIo { source: e, .. } => {
                e.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_row_display() {
        let err = StabilityError::malformed_row(3, "expected 2 cells, found 1");
        assert_eq!(
            err.to_string(),
            "Malformed stability row 3: expected 2 cells, found 1"
        );
    }

    #[test]
    fn test_file_io_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = StabilityError::file_io("out/doc/api/all.json", io);
        assert!(err.is_not_found());
        assert!(err.to_string().contains("out/doc/api/all.json"));
    }

    #[test]
    fn test_config_error() {
        let err = StabilityError::config("markers must differ");
        assert!(!err.is_not_found());
        assert_eq!(err.to_string(), "Configuration error: markers must differ");
    }
}
