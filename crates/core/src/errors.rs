//! Core error types for Cambio.
//!
//! This module defines storage-agnostic error types. Backend-specific errors
//! (file IO, serialization) are converted to these types by the storage layer.

use thiserror::Error;

use crate::convert::ConvertError;
use crate::rates::RatesError;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the application.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Rate acquisition failed: {0}")]
    Rates(#[from] RatesError),

    #[error("Conversion failed: {0}")]
    Convert(#[from] ConvertError),

    #[error("Storage operation failed: {0}")]
    Storage(#[from] StorageError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Backend-agnostic error type for snapshot store operations.
///
/// Uses `String` for all details, allowing the storage layer to convert its
/// own error types into this format.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Reading a stored value failed.
    #[error("Failed to read from store: {0}")]
    ReadFailed(String),

    /// Writing a value failed.
    #[error("Failed to write to store: {0}")]
    WriteFailed(String),

    /// The stored bytes could not be decoded.
    #[error("Stored data is not valid: {0}")]
    Corrupt(String),
}

// === From implementations for common error types ===

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(StorageError::ReadFailed(err.to_string()))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(StorageError::Corrupt(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
