//! Storage abstraction trait

use async_trait::async_trait;
use mockcode_core::StoredUpload;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Append-only upload namespace.
///
/// Concurrent requests share one backend; each `store` call writes a new key
/// and nothing is ever updated in place.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Persist `data` under a freshly generated key derived from `original_filename`.
    async fn store(&self, original_filename: &str, data: Vec<u8>) -> StorageResult<StoredUpload>;
}
