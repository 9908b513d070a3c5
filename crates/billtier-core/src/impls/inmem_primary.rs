//! InMemoryPrimaryStore - テスト・組み込み用の hot tier

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::domain::{BillingRecord, RecordId, TierError};
use crate::ports::PrimaryStore;

/// HashMap ベースの PrimaryStore
///
/// レコードの作成は外部の責務なので trait には含めず、
/// シード用に `insert` だけを inherent method として持ちます。
#[derive(Debug, Default)]
pub struct InMemoryPrimaryStore {
    records: Mutex<HashMap<RecordId, BillingRecord>>,
}

impl InMemoryPrimaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a record.
    pub async fn insert(&self, record: BillingRecord) {
        let mut records = self.records.lock().await;
        records.insert(record.id.clone(), record);
    }

    pub async fn contains(&self, id: &RecordId) -> bool {
        self.records.lock().await.contains_key(id)
    }

    pub async fn len(&self) -> usize {
        self.records.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.lock().await.is_empty()
    }
}

#[async_trait]
impl PrimaryStore for InMemoryPrimaryStore {
    async fn get(&self, id: &RecordId) -> Result<Option<BillingRecord>, TierError> {
        Ok(self.records.lock().await.get(id).cloned())
    }

    async fn older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<BillingRecord>, TierError> {
        let records = self.records.lock().await;
        let mut selected: Vec<BillingRecord> = records
            .values()
            .filter(|record| record.is_older_than(cutoff))
            .cloned()
            .collect();
        // HashMap order is arbitrary
        selected.sort_by(|a, b| {
            (a.record_date.instant(), &a.id).cmp(&(b.record_date.instant(), &b.id))
        });
        Ok(selected)
    }

    async fn delete(&self, id: &RecordId) -> Result<(), TierError> {
        self.records.lock().await.remove(id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn day(d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, d, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn get_returns_inserted_record() {
        let store = InMemoryPrimaryStore::new();
        store.insert(BillingRecord::new("A1", day(1))).await;

        let found = store.get(&RecordId::new("A1")).await.unwrap();
        assert_eq!(found.map(|r| r.id), Some(RecordId::new("A1")));
        assert!(store.get(&RecordId::new("nope")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn older_than_is_strict_and_ordered() {
        let store = InMemoryPrimaryStore::new();
        store.insert(BillingRecord::new("late", day(3))).await;
        store.insert(BillingRecord::new("edge", day(10))).await;
        store.insert(BillingRecord::new("early", day(1))).await;
        store.insert(BillingRecord::new("fresh", day(20))).await;

        let old = store.older_than(day(10)).await.unwrap();
        let ids: Vec<&str> = old.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["early", "late"]);
    }

    #[tokio::test]
    async fn delete_missing_id_is_a_no_op() {
        let store = InMemoryPrimaryStore::new();
        store.insert(BillingRecord::new("A1", day(1))).await;

        store.delete(&RecordId::new("B2")).await.unwrap();
        assert_eq!(store.len().await, 1);

        store.delete(&RecordId::new("A1")).await.unwrap();
        assert!(store.is_empty().await);
    }
}
