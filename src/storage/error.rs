//! Storage Errors
//!
//! Infrastructure failures only. "Not found" is never an error in the
//! repository contract — it is an empty vec or `None`.

use thiserror::Error;

/// Result alias for repository operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-level errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Failed to reach the backing store
    #[error("storage connection error: {0}")]
    Connection(String),

    /// Failed to read from the backing store
    #[error("storage read error: {0}")]
    Read(String),

    /// Failed to write to the backing store
    #[error("storage write error: {0}")]
    Write(String),

    /// Invariant violation or unexpected backend state
    #[error("storage internal error: {0}")]
    Internal(String),
}

impl StorageError {
    /// Create a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a read error.
    #[must_use]
    pub fn read(msg: impl Into<String>) -> Self {
        Self::Read(msg.into())
    }

    /// Create a write error.
    #[must_use]
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
