//! Error types for storage operations.

use std::io;
use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The named file does not exist.
    #[error("file not found: {name}")]
    NotFound {
        /// The requested file name (without extension).
        name: String,
    },

    /// Exclusive creation found an existing file.
    #[error("file already exists: {name}")]
    AlreadyExists {
        /// The file name (without extension).
        name: String,
    },

    /// The database directory has not been created.
    #[error("database directory does not exist: {root}")]
    RootMissing {
        /// Display form of the directory.
        root: String,
    },
}

impl StorageError {
    /// Returns true if this error means "the file is not there".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } | Self::RootMissing { .. } => true,
            Self::Io(e) => e.kind() == io::ErrorKind::NotFound,
            Self::AlreadyExists { .. } => false,
        }
    }
}
