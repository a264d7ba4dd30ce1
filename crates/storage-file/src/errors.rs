//! Storage-specific error types for the file backend.
//!
//! These wrap `std::io` errors and are converted to the backend-agnostic
//! error types defined in `cambio-core` before being returned to callers.

use thiserror::Error;

use cambio_core::errors::{Error, StorageError};

/// Errors raised by the file-backed snapshot store.
#[derive(Error, Debug)]
pub enum FileStoreError {
    #[error("Failed to read {0}: {1}")]
    Read(String, #[source] std::io::Error),

    #[error("Failed to write {0}: {1}")]
    Write(String, #[source] std::io::Error),

    #[error("Invalid store key: {0}")]
    InvalidKey(String),
}

impl From<FileStoreError> for Error {
    fn from(err: FileStoreError) -> Self {
        match err {
            FileStoreError::Read(path, e) => {
                Error::Storage(StorageError::ReadFailed(format!("{}: {}", path, e)))
            }
            FileStoreError::Write(path, e) => {
                Error::Storage(StorageError::WriteFailed(format!("{}: {}", path, e)))
            }
            FileStoreError::InvalidKey(key) => {
                Error::Storage(StorageError::ReadFailed(format!("invalid key: {}", key)))
            }
        }
    }
}
