//! MemoryStorage port for the persisted preference record.
//!
//! Storage is a single opaque text record under a fixed key. The preference
//! store owns encoding and decoding; adapters only move bytes.

use async_trait::async_trait;

/// Errors that can occur during record storage operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// Underlying read, write or delete failed.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// Stored bytes are not valid text.
    #[error("stored record is not valid UTF-8: {0}")]
    Undecodable(String),

    /// Record could not be encoded for writing.
    #[error("storage serialization error: {0}")]
    Serialization(String),
}

impl StorageError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

/// Durable key-value storage for the preference record.
#[async_trait]
pub trait MemoryStorage: Send + Sync {
    /// Reads the record. `Ok(None)` when nothing has been stored yet,
    /// `Err(StorageError::Undecodable)` when the stored bytes are not text.
    async fn load(&self) -> Result<Option<String>, StorageError>;

    /// Replaces the record.
    async fn save(&self, record: &str) -> Result<(), StorageError>;

    /// Deletes the record. Deleting a missing record succeeds.
    async fn remove(&self) -> Result<(), StorageError>;
}
