//! In-memory Memory Storage Adapter
//!
//! Holds the record in memory. Counts operations and can be told to fail,
//! which is what the preference store tests lean on.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::ports::{MemoryStorage, StorageError};

/// In-memory storage for the preference record
#[derive(Debug, Clone, Default)]
pub struct InMemoryMemoryStorage {
    record: Arc<RwLock<Option<String>>>,
    saves: Arc<AtomicUsize>,
    removes: Arc<AtomicUsize>,
    fail_load: Arc<AtomicBool>,
    fail_save: Arc<AtomicBool>,
    fail_remove: Arc<AtomicBool>,
}

impl InMemoryMemoryStorage {
    /// Create empty storage
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage already holding a record
    pub fn with_record(record: impl Into<String>) -> Self {
        Self {
            record: Arc::new(RwLock::new(Some(record.into()))),
            ..Self::default()
        }
    }

    /// Current record, if any
    pub async fn record(&self) -> Option<String> {
        self.record.read().await.clone()
    }

    /// Number of successful saves
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of successful removes
    pub fn remove_count(&self) -> usize {
        self.removes.load(Ordering::SeqCst)
    }

    /// Make every load fail
    pub fn fail_loads(&self, fail: bool) {
        self.fail_load.store(fail, Ordering::SeqCst);
    }

    /// Make every save fail
    pub fn fail_saves(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }

    /// Make every remove fail
    pub fn fail_removes(&self, fail: bool) {
        self.fail_remove.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl MemoryStorage for InMemoryMemoryStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        if self.fail_load.load(Ordering::SeqCst) {
            return Err(StorageError::io("injected load failure"));
        }
        Ok(self.record.read().await.clone())
    }

    async fn save(&self, record: &str) -> Result<(), StorageError> {
        if self.fail_save.load(Ordering::SeqCst) {
            return Err(StorageError::io("injected save failure"));
        }
        *self.record.write().await = Some(record.to_string());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn remove(&self) -> Result<(), StorageError> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(StorageError::io("injected remove failure"));
        }
        *self.record.write().await = None;
        self.removes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_storage_starts_empty() {
        let storage = InMemoryMemoryStorage::new();
        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_memory_storage_save_load_remove() {
        let storage = InMemoryMemoryStorage::new();

        storage.save("{}").await.unwrap();
        assert_eq!(storage.load().await.unwrap().as_deref(), Some("{}"));
        assert_eq!(storage.save_count(), 1);

        storage.remove().await.unwrap();
        assert_eq!(storage.record().await, None);
        assert_eq!(storage.remove_count(), 1);
    }

    #[tokio::test]
    async fn test_memory_storage_with_record() {
        let storage = InMemoryMemoryStorage::with_record("seed");
        assert_eq!(storage.load().await.unwrap().as_deref(), Some("seed"));
    }

    #[tokio::test]
    async fn test_memory_storage_injected_failures() {
        let storage = InMemoryMemoryStorage::new();
        storage.fail_loads(true);
        storage.fail_saves(true);
        storage.fail_removes(true);

        assert!(storage.load().await.is_err());
        assert!(storage.save("x").await.is_err());
        assert!(storage.remove().await.is_err());
        assert_eq!(storage.save_count(), 0);
        assert_eq!(storage.record().await, None);
    }

    #[tokio::test]
    async fn test_memory_storage_clones_share_state() {
        let storage = InMemoryMemoryStorage::new();
        let clone = storage.clone();
        clone.save("shared").await.unwrap();

        assert_eq!(storage.record().await.as_deref(), Some("shared"));
        assert_eq!(storage.save_count(), 1);
    }
}
