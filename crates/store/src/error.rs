//! Error types for the stores and their persistence adapters.

use std::path::PathBuf;

use shopfront_core::{ProductIdError, QuantityError};
use thiserror::Error;

/// Errors raised by a [`PersistenceBridge`](crate::PersistenceBridge).
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing medium failed.
    #[error("storage I/O error for key '{key}' at {path}: {source}")]
    Io {
        key: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The collection could not be encoded.
    #[error("failed to serialize '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key cannot be used as a storage name.
    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

/// Errors returned by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The caller supplied an argument outside the operation's domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The write-through persistence call failed; in-memory state was
    /// rolled back.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl From<QuantityError> for StoreError {
    fn from(err: QuantityError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

impl From<ProductIdError> for StoreError {
    fn from(err: ProductIdError) -> Self {
        Self::InvalidArgument(err.to_string())
    }
}

/// Result type alias for `StoreError`.
pub type Result<T> = std::result::Result<T, StoreError>;
