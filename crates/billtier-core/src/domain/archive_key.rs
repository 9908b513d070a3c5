//! ArchiveKey - cold storage 上のオブジェクトキー
//!
//! キーは `<prefix>/<id>.json` の形に固定です。Archiver と Retriever は
//! 必ずこの型を経由してキーを作るため、書き込み先と読み出し先が一致します。

use std::fmt;

use super::ids::RecordId;

/// Prefix used when no other is configured.
pub const DEFAULT_ARCHIVE_PREFIX: &str = "billing-archive";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArchiveKey(String);

impl ArchiveKey {
    /// Derive the cold-storage key of a record.
    pub fn for_record(prefix: &str, id: &RecordId) -> Self {
        let prefix = prefix.trim_end_matches('/');
        if prefix.is_empty() {
            Self(format!("{id}.json"))
        } else {
            Self(format!("{prefix}/{id}.json"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArchiveKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
