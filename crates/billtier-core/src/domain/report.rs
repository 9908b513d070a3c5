//! ArchiveReport - 1 回のアーカイブ実行の結果

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::RecordId;

/// Summary of a completed archive run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchiveReport {
    /// Records dated strictly before this instant were selected.
    pub cutoff: DateTime<Utc>,

    /// Moved records, in the order they were processed.
    pub archived: Vec<RecordId>,
}

impl ArchiveReport {
    pub fn count(&self) -> usize {
        self.archived.len()
    }
}
