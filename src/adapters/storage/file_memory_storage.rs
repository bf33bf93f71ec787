//! File-based Memory Storage Adapter
//!
//! Keeps the preference record as a single JSON file named after the storage
//! key inside the configured directory.

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::domain::memory::STORAGE_KEY;
use crate::ports::{MemoryStorage, StorageError};

/// File-based storage for the preference record
#[derive(Debug, Clone)]
pub struct FileMemoryStorage {
    base_path: PathBuf,
}

impl FileMemoryStorage {
    /// Create a new file storage rooted at a directory
    ///
    /// # Example
    /// ```ignore
    /// let storage = FileMemoryStorage::new(".reply-coach");
    /// ```
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Path of the record file
    pub fn record_path(&self) -> PathBuf {
        self.base_path.join(format!("{}.json", STORAGE_KEY))
    }
}

#[async_trait]
impl MemoryStorage for FileMemoryStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        match fs::read(self.record_path()).await {
            Ok(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| StorageError::Undecodable(e.to_string())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, record: &str) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await?;

        // Write beside the target then rename, so a crash never leaves half a record.
        let path = self.record_path();
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, record).await?;
        fs::rename(&tmp, &path).await?;

        Ok(())
    }

    async fn remove(&self) -> Result<(), StorageError> {
        match fs::remove_file(self.record_path()).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_storage_load_missing_record() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileMemoryStorage::new(temp_dir.path());

        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_file_storage_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileMemoryStorage::new(temp_dir.path().join("nested"));

        storage.save("{\"myName\":\"Ana\"}").await.unwrap();

        assert_eq!(
            storage.load().await.unwrap().as_deref(),
            Some("{\"myName\":\"Ana\"}")
        );
        assert!(storage.record_path().ends_with("MBTI_CHAT_MEMORY_V1.json"));
        assert!(!storage.record_path().with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_storage_save_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileMemoryStorage::new(temp_dir.path());

        storage.save("first").await.unwrap();
        storage.save("second").await.unwrap();

        assert_eq!(storage.load().await.unwrap().as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn test_file_storage_remove() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileMemoryStorage::new(temp_dir.path());

        storage.save("{}").await.unwrap();
        storage.remove().await.unwrap();

        assert_eq!(storage.load().await.unwrap(), None);
        // Removing again is fine.
        storage.remove().await.unwrap();
    }

    #[tokio::test]
    async fn test_file_storage_unreadable_record_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileMemoryStorage::new(temp_dir.path());
        std::fs::create_dir_all(storage.record_path()).unwrap();

        assert!(matches!(storage.load().await, Err(StorageError::Io(_))));
    }

    #[tokio::test]
    async fn test_file_storage_non_utf8_record_is_undecodable() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileMemoryStorage::new(temp_dir.path());
        std::fs::write(storage.record_path(), [0xff, 0xfe, 0x7b]).unwrap();

        assert!(matches!(
            storage.load().await,
            Err(StorageError::Undecodable(_))
        ));
    }
}
