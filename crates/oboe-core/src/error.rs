//! Error types for the Oboe exporter.
//!
//! All errors in the system are represented by the [`Error`] enum.
//! This ensures composable error handling across crates.

use std::io;
use std::path::PathBuf;
use thiserror::Error as ThisError;

/// The core error type for all export operations.
#[derive(ThisError, Debug)]
pub enum Error {
    /// File system error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Note file not found during the corpus scan
    #[error("File not found: {path}")]
    FileNotFound { path: PathBuf },

    /// HTML template not found at startup
    #[error("Cannot find a template at path \"{path}\"")]
    TemplateNotFound { path: PathBuf },

    /// Invalid file path (outside vault, no file name, etc.)
    #[error("Invalid file path: {reason}")]
    InvalidPath { reason: String },

    /// Invalid configuration
    #[error("Configuration error: {reason}")]
    ConfigError { reason: String },

    /// Template could not be applied to a note
    #[error("Template error: {reason}")]
    TemplateError { reason: String },
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an IO error
    pub fn io(err: io::Error) -> Self {
        Error::Io(err)
    }

    /// Create a file not found error
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Error::FileNotFound { path: path.into() }
    }

    /// Create a template not found error
    pub fn template_not_found(path: impl Into<PathBuf>) -> Self {
        Error::TemplateNotFound { path: path.into() }
    }

    /// Create an invalid path error
    pub fn invalid_path(reason: impl Into<String>) -> Self {
        Error::InvalidPath {
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config_error(reason: impl Into<String>) -> Self {
        Error::ConfigError {
            reason: reason.into(),
        }
    }

    /// Create a template error
    pub fn template_error(reason: impl Into<String>) -> Self {
        Error::TemplateError {
            reason: reason.into(),
        }
    }

    /// Map a read failure on `path` to [`Error::FileNotFound`] when the file is
    /// missing, [`Error::Io`] otherwise.
    pub fn from_read(err: io::Error, path: impl Into<PathBuf>) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            Error::file_not_found(path)
        } else {
            Error::Io(err)
        }
    }
}
