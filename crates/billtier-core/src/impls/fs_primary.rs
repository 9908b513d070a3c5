//! FsPrimaryStore - `<root>/<id>.json` を 1 レコードとするディレクトリ型 hot tier
//!
//! CLI からローカルで動かすための実装です。`older_than` は毎回ディレクトリを
//! 全走査します（ページングなし）。

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::fs;

use super::fs::{read_optional, remove_if_exists, resolve_key, write_atomic};
use crate::domain::{BillingRecord, RecordId, TierError};
use crate::ports::PrimaryStore;

const DOCUMENT_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct FsPrimaryStore {
    root: PathBuf,
}

impl FsPrimaryStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a record document. Records are normally created by another
    /// system; this is for seeding and tests.
    pub async fn insert(&self, record: &BillingRecord) -> Result<(), TierError> {
        let path = self.document_path(&record.id)?;
        write_atomic(&path, &record.to_json_bytes()?).await
    }

    fn document_path(&self, id: &RecordId) -> Result<PathBuf, TierError> {
        if id.as_str().contains(['/', '\\']) {
            return Err(TierError::InvalidKey {
                key: id.to_string(),
                reason: "record ids may not contain path separators",
            });
        }
        resolve_key(&self.root, &format!("{id}.{DOCUMENT_EXTENSION}"))
    }
}

#[async_trait]
impl PrimaryStore for FsPrimaryStore {
    async fn get(&self, id: &RecordId) -> Result<Option<BillingRecord>, TierError> {
        let path = self.document_path(id)?;
        match read_optional(&path).await? {
            Some(bytes) => Ok(Some(BillingRecord::from_json_bytes(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<BillingRecord>, TierError> {
        let mut entries = match fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(TierError::io(&self.root, e)),
        };

        let mut selected = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| TierError::io(&self.root, e))?
        {
            // temp files from write_atomic end in `.tmp.<pid>.<n>`
            let path = entry.path();
            if !path.extension().is_some_and(|ext| ext == DOCUMENT_EXTENSION) {
                continue;
            }

            let Some(bytes) = read_optional(&path).await? else {
                // removed between listing and reading
                continue;
            };
            let record = BillingRecord::from_json_bytes(&bytes)?;
            if record.is_older_than(cutoff) {
                selected.push(record);
            }
        }

        selected.sort_by(|a, b| {
            (a.record_date.instant(), &a.id).cmp(&(b.record_date.instant(), &b.id))
        });
        Ok(selected)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), TierError> {
        let path = self.document_path(id)?;
        remove_if_exists(&path).await
    }
}
