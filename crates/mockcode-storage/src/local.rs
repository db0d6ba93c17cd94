use crate::keys::{generate_key, validate_key};
use crate::traits::{Storage, StorageError, StorageResult};
use async_trait::async_trait;
use mockcode_core::StoredUpload;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    public_prefix: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Directory uploads are written to (e.g., "uploads")
    /// * `public_prefix` - Relative URL the directory is served under (e.g., "/uploads")
    pub async fn new(base_path: impl Into<PathBuf>, public_prefix: &str) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            public_prefix: format!("/{}", public_prefix.trim_matches('/')),
        })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    fn public_path(&self, key: &str) -> String {
        format!("{}/{}", self.public_prefix, key)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(&self, original_filename: &str, data: Vec<u8>) -> StorageResult<StoredUpload> {
        let key = generate_key(original_filename);
        let path = self.key_to_path(&key)?;
        let size = data.len();
        let start = std::time::Instant::now();

        // create_new: keys are write-once, an existing file is never overwritten
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                ))
            })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredUpload {
            public_path: self.public_path(&key),
            key,
            path,
            size_bytes: size as u64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_local_storage_store() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/uploads").await.unwrap();

        let data = b"\xFF\xD8\xFFjpeg bytes".to_vec();
        let stored = storage.store("mockup.jpg", data.clone()).await.unwrap();

        assert!(stored.key.ends_with("-mockup.jpg"));
        assert!(stored.public_path.starts_with("/uploads/"));
        assert_eq!(stored.public_path, format!("/uploads/{}", stored.key));
        assert_eq!(stored.size_bytes, data.len() as u64);
        assert_eq!(stored.path, dir.path().join(&stored.key));

        let on_disk = tokio::fs::read(&stored.path).await.unwrap();
        assert_eq!(on_disk, data);
    }

    #[tokio::test]
    async fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("uploads");
        let storage = LocalStorage::new(&nested, "uploads").await.unwrap();

        let stored = storage.store("x.png", vec![1, 2, 3]).await.unwrap();
        assert!(nested.join(&stored.key).exists());
        assert!(stored.public_path.starts_with("/uploads/"));
    }

    #[tokio::test]
    async fn test_same_name_stored_twice_keeps_both() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/uploads").await.unwrap();

        let first = storage.store("same.jpg", b"first".to_vec()).await.unwrap();
        let second = storage.store("same.jpg", b"second".to_vec()).await.unwrap();

        assert_ne!(first.key, second.key);
        assert_eq!(tokio::fs::read(&first.path).await.unwrap(), b"first");
        assert_eq!(tokio::fs::read(&second.path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn test_hostile_filename_stays_inside_base() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/uploads").await.unwrap();

        let stored = storage
            .store("../../outside.jpg", b"data".to_vec())
            .await
            .unwrap();
        assert_eq!(stored.path.parent(), Some(dir.path()));
    }

    #[tokio::test]
    async fn test_long_filename_is_stored() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path(), "/uploads").await.unwrap();

        let long_name = format!("{}.jpg", "a".repeat(250));
        let stored = storage
            .store(&long_name, b"long name".to_vec())
            .await
            .unwrap();

        assert!(stored.key.len() <= 255);
        assert!(stored.key.ends_with(".jpg"));
        assert_eq!(tokio::fs::read(&stored.path).await.unwrap(), b"long name");
    }

    #[tokio::test]
    async fn test_write_failure_is_upload_failed() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path().join("gone"), "/uploads")
            .await
            .unwrap();
        tokio::fs::remove_dir(storage.base_path()).await.unwrap();

        let result = storage.store("x.jpg", b"data".to_vec()).await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
    }
}
