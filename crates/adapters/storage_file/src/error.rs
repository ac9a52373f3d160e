//! Storage-specific error type wrapping filesystem errors.

use std::path::PathBuf;

use wefield_domain::error::FieldServiceError;

/// Errors originating from the file storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// The data directory could not be created.
    #[error("failed to create data directory {}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Reading the document failed for a reason other than absence.
    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Writing or renaming the temporary file failed.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The storage key would escape the data directory.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),
}

impl From<StorageError> for FieldServiceError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
