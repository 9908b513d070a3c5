//! TieringBuilder - ストアと設定のワイヤリング
//!
//! # Fail-fast 設計
//! - hot/cold どちらかのストアが未設定なら build() で BuildError
//! - retention が 0 日、または MAX_RETENTION_DAYS 超なら BuildError

use std::sync::Arc;

use chrono::TimeDelta;

use super::archiver::Archiver;
use super::retriever::Retriever;
use crate::config::{DEFAULT_RETENTION_DAYS, MAX_RETENTION_DAYS, TieringConfig};
use crate::domain::DEFAULT_ARCHIVE_PREFIX;
use crate::ports::{Clock, ColdStore, PrimaryStore, SystemClock};

/// BuildError は構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("missing {0} store. Both tiers must be configured before build().")]
    MissingStore(&'static str),

    #[error("retention must be between 1 and {max} days, got {0}", max = MAX_RETENTION_DAYS)]
    InvalidRetention(u32),
}

/// TieringBuilder は Archiver と Retriever を同じストアで組み立てる
///
/// # 使用例
/// ```ignore
/// let tiering = TieringBuilder::new()
///     .primary(Arc::new(FsPrimaryStore::new("data/hot")))
///     .cold(Arc::new(FsColdStore::new("data/cold")))
///     .build()?;
/// let report = tiering.archiver.run().await?;
/// ```
pub struct TieringBuilder {
    primary: Option<Arc<dyn PrimaryStore>>,
    cold: Option<Arc<dyn ColdStore>>,
    clock: Arc<dyn Clock>,
    retention_days: u32,
    archive_prefix: String,
}

impl TieringBuilder {
    pub fn new() -> Self {
        Self {
            primary: None,
            cold: None,
            clock: Arc::new(SystemClock),
            retention_days: DEFAULT_RETENTION_DAYS,
            archive_prefix: DEFAULT_ARCHIVE_PREFIX.to_string(),
        }
    }

    /// Take retention and prefix from configuration. Stores are still wired
    /// explicitly.
    pub fn from_config(config: &TieringConfig) -> Self {
        Self::new()
            .retention_days(config.retention_days)
            .archive_prefix(config.archive_prefix.clone())
    }

    pub fn primary(mut self, store: Arc<dyn PrimaryStore>) -> Self {
        self.primary = Some(store);
        self
    }

    pub fn cold(mut self, store: Arc<dyn ColdStore>) -> Self {
        self.cold = Some(store);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn retention_days(mut self, days: u32) -> Self {
        self.retention_days = days;
        self
    }

    pub fn archive_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.archive_prefix = prefix.into();
        self
    }

    pub fn build(self) -> Result<Tiering, BuildError> {
        let primary = self.primary.ok_or(BuildError::MissingStore("primary"))?;
        let cold = self.cold.ok_or(BuildError::MissingStore("cold"))?;
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention_days) {
            return Err(BuildError::InvalidRetention(self.retention_days));
        }

        let retention = TimeDelta::days(i64::from(self.retention_days));
        Ok(Tiering {
            archiver: Archiver::new(
                primary.clone(),
                cold.clone(),
                self.clock,
                retention,
                self.archive_prefix.clone(),
            ),
            retriever: Retriever::new(primary, cold, self.archive_prefix),
        })
    }
}

impl Default for TieringBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// The two operations, sharing one pair of stores.
pub struct Tiering {
    pub archiver: Archiver,
    pub retriever: Retriever,
}
