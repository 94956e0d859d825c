//! Error types for aclfs-cli

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Result type alias for aclfs-cli operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that abort a run.
///
/// Per-line failures are reported in the output and never surface here.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Error from aclfs-core
    #[error("Core error: {0}")]
    Core(#[from] aclfs_core::Error),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {message}")]
    Config {
        /// Description of the problem
        message: String,
    },

    /// I/O failure on a named file
    #[error("I/O error on {}: {source}", path.display())]
    IoPath {
        /// The file being read or written
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// I/O failure on standard streams
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wrap an I/O error with the path it occurred on.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoPath {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
