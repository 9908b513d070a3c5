//! FsColdStore - ローカルディレクトリを Blob storage に見立てた cold tier
//!
//! キー `billing-archive/A1.json` は `<root>/billing-archive/A1.json` に対応します。

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::fs::{read_optional, resolve_key, write_atomic};
use crate::domain::{ArchiveKey, TierError};
use crate::ports::ColdStore;

#[derive(Debug, Clone)]
pub struct FsColdStore {
    root: PathBuf,
}

impl FsColdStore {
    /// The directory is created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ColdStore for FsColdStore {
    async fn put(&self, key: &ArchiveKey, bytes: Vec<u8>) -> Result<(), TierError> {
        let path = resolve_key(&self.root, key.as_str())?;
        write_atomic(&path, &bytes).await
    }

    async fn get(&self, key: &ArchiveKey) -> Result<Option<Vec<u8>>, TierError> {
        let path = resolve_key(&self.root, key.as_str())?;
        read_optional(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DEFAULT_ARCHIVE_PREFIX, RecordId};

    #[tokio::test]
    async fn objects_land_under_the_prefix_directory() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsColdStore::new(dir.path());
        let key = ArchiveKey::for_record(DEFAULT_ARCHIVE_PREFIX, &RecordId::new("A1"));

        store.put(&key, b"{\"id\":\"A1\"}".to_vec()).await.unwrap();

        let on_disk = std::fs::read(dir.path().join("billing-archive").join("A1.json")).unwrap();
        assert_eq!(on_disk, b"{\"id\":\"A1\"}");
        assert_eq!(store.get(&key).await.unwrap(), Some(on_disk));
    }

    #[tokio::test]
    async fn missing_object_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsColdStore::new(dir.path().join("never-created"));
        let key = ArchiveKey::for_record(DEFAULT_ARCHIVE_PREFIX, &RecordId::new("Z9"));

        assert!(store.get(&key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn ids_that_climb_out_of_the_root_are_refused() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsColdStore::new(dir.path().join("cold"));
        let key = ArchiveKey::for_record("", &RecordId::new("../../outside"));

        let err = store.put(&key, b"x".to_vec()).await.unwrap_err();
        assert!(matches!(err, TierError::InvalidKey { .. }));
        assert!(!dir.path().join("outside.json").exists());
    }
}
