//! Archiver - hot tier から古いレコードを cold tier へ移す
//!
//! # 手順（1 レコードずつ逐次）
//! 1. cutoff = now - retention を計算
//! 2. `recordDate < cutoff` のレコードを hot tier から全件取得
//! 3. 各レコードを cold tier に書き込み、その後 hot tier から削除
//!
//! copy と delete はアトミックではなく、補償もしません。
//! 途中で失敗すると実行は止まり、それまでに移したレコードは cold 側に残ります。

use std::sync::Arc;

use chrono::TimeDelta;
use tracing::{debug, info, warn};

use crate::domain::{ArchiveError, ArchiveKey, ArchiveReport, TierError};
use crate::ports::{Clock, ColdStore, PrimaryStore};

/// Moves aged records from the primary store to cold storage.
pub struct Archiver {
    primary: Arc<dyn PrimaryStore>,
    cold: Arc<dyn ColdStore>,
    clock: Arc<dyn Clock>,
    retention: TimeDelta,
    archive_prefix: String,
}

impl Archiver {
    pub fn new(
        primary: Arc<dyn PrimaryStore>,
        cold: Arc<dyn ColdStore>,
        clock: Arc<dyn Clock>,
        retention: TimeDelta,
        archive_prefix: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            cold,
            clock,
            retention,
            archive_prefix: archive_prefix.into(),
        }
    }

    pub fn retention(&self) -> TimeDelta {
        self.retention
    }

    /// Archive every record older than the cutoff.
    ///
    /// # Errors
    /// Stops at the first failing call. See [`ArchiveError`] for what is left
    /// behind in each case.
    pub async fn run(&self) -> Result<ArchiveReport, ArchiveError> {
        let cutoff = self
            .clock
            .now()
            .checked_sub_signed(self.retention)
            .ok_or(ArchiveError::Cutoff {
                retention: self.retention,
            })?;

        let candidates = self
            .primary
            .older_than(cutoff)
            .await
            .map_err(|source| ArchiveError::Query { cutoff, source })?;
        debug!(%cutoff, candidates = candidates.len(), "selected records for archival");

        let mut archived = Vec::with_capacity(candidates.len());
        for record in candidates {
            let key = ArchiveKey::for_record(&self.archive_prefix, &record.id);

            let copied = match record.to_json_bytes() {
                Ok(bytes) => self.cold.put(&key, bytes).await,
                Err(e) => Err(TierError::from(e)),
            };
            if let Err(source) = copied {
                let err = ArchiveError::Copy {
                    id: record.id,
                    archived: archived.len(),
                    source,
                };
                warn!(error = %err, "archive run aborted");
                return Err(err);
            }

            if let Err(source) = self.primary.delete(&record.id).await {
                let err = ArchiveError::Delete {
                    id: record.id,
                    archived: archived.len(),
                    source,
                };
                warn!(error = %err, "archive run aborted; record is now in both tiers");
                return Err(err);
            }

            debug!(id = %record.id, %key, "archived record");
            archived.push(record.id);
        }

        info!("{} records archived to cold storage", archived.len());
        Ok(ArchiveReport { cutoff, archived })
    }
}
