//! InMemoryColdStore - テスト・組み込み用の cold tier

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ArchiveKey, TierError};
use crate::ports::ColdStore;

#[derive(Debug, Default)]
pub struct InMemoryColdStore {
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryColdStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stored keys, sorted.
    pub async fn keys(&self) -> Vec<String> {
        let objects = self.objects.lock().await;
        let mut keys: Vec<String> = objects.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub async fn contains(&self, key: &ArchiveKey) -> bool {
        self.objects.lock().await.contains_key(key.as_str())
    }
}

#[async_trait]
impl ColdStore for InMemoryColdStore {
    async fn put(&self, key: &ArchiveKey, bytes: Vec<u8>) -> Result<(), TierError> {
        let mut objects = self.objects.lock().await;
        objects.insert(key.as_str().to_string(), bytes);
        Ok(())
    }

    async fn get(&self, key: &ArchiveKey) -> Result<Option<Vec<u8>>, TierError> {
        Ok(self.objects.lock().await.get(key.as_str()).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_ARCHIVE_PREFIX, RecordId};

    #[tokio::test]
    async fn put_then_get() {
        let store = InMemoryColdStore::new();
        let key = ArchiveKey::for_record(DEFAULT_ARCHIVE_PREFIX, &RecordId::new("A1"));

        assert!(store.get(&key).await.unwrap().is_none());
        store.put(&key, b"{}".to_vec()).await.unwrap();

        assert_eq!(store.get(&key).await.unwrap(), Some(b"{}".to_vec()));
        assert_eq!(store.keys().await, vec!["billing-archive/A1.json".to_string()]);
    }

    #[tokio::test]
    async fn put_overwrites() {
        let store = InMemoryColdStore::new();
        let key = ArchiveKey::for_record(DEFAULT_ARCHIVE_PREFIX, &RecordId::new("A1"));

        store.put(&key, b"old".to_vec()).await.unwrap();
        store.put(&key, b"new".to_vec()).await.unwrap();
        assert_eq!(store.get(&key).await.unwrap(), Some(b"new".to_vec()));
    }
}
