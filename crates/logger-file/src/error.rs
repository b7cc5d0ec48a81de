//! Error types for file-based logging

use std::io;
use std::path::PathBuf;

/// Result type for file logger operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during file logging.
///
/// Only [`Error::Configuration`] ever reaches callers as a `Result`; the
/// I/O variants are caught where they occur, reported to stderr, and
/// converted into the boolean `write` contract.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error occurred
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Failed to create log directory
    #[error("failed to create log directory at {path}: {source}")]
    CreateDirectory {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying error
        source: io::Error,
    },

    /// Failed to rotate log file
    #[error("failed to rotate log file: {0}")]
    Rotation(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),
}
