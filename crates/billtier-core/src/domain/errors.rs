//! Errors - ストレージ層とアーカイブ実行のエラー
//!
//! # 分類
//! - `TierError`: 各ストアの呼び出し失敗（I/O, 壊れた JSON, 不正なキー）
//! - `ArchiveError`: Archiver の実行が途中で止まった理由と、その時点までの進捗
//!
//! どちらの層にも存在しないレコードはエラーではなく `Lookup::NotFound` です。

use std::path::PathBuf;

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

use super::ids::RecordId;

#[derive(Debug, Error)]
pub enum TierError {
    #[error("storage I/O failure at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed billing record: {0}")]
    Codec(#[from] serde_json::Error),

    #[error("invalid storage key {key:?}: {reason}")]
    InvalidKey { key: String, reason: &'static str },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

impl TierError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Why an archive run stopped.
///
/// Copy and delete are two separate calls per record and nothing is rolled
/// back. `archived` counts the records fully moved before the failure; those
/// stay in cold storage only.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("retention of {retention} puts the cutoff before the earliest representable date")]
    Cutoff { retention: TimeDelta },

    #[error("failed to select records older than {cutoff}: {source}")]
    Query {
        cutoff: DateTime<Utc>,
        #[source]
        source: TierError,
    },

    #[error("failed to copy {id} to cold storage after archiving {archived} record(s): {source}")]
    Copy {
        id: RecordId,
        archived: usize,
        #[source]
        source: TierError,
    },

    /// The record was copied, so it now exists in both tiers.
    #[error(
        "copied {id} to cold storage but failed to delete it from the primary store after archiving {archived} record(s): {source}"
    )]
    Delete {
        id: RecordId,
        archived: usize,
        #[source]
        source: TierError,
    },
}

impl ArchiveError {
    /// Records fully moved before the run stopped.
    pub fn archived(&self) -> usize {
        match self {
            Self::Cutoff { .. } | Self::Query { .. } => 0,
            Self::Copy { archived, .. } | Self::Delete { archived, .. } => *archived,
        }
    }

    /// The record being processed when the run stopped, if any.
    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            Self::Cutoff { .. } | Self::Query { .. } => None,
            Self::Copy { id, .. } | Self::Delete { id, .. } => Some(id),
        }
    }
}
