//! ColdStore port - cold tier（Blob / オブジェクトストレージ）
//!
//! アーカイブ済みレコードを `ArchiveKey` 単位のオブジェクトとして保存します。
//! 本番では Blob Storage / S3 などが実装します。

use async_trait::async_trait;

use crate::domain::{ArchiveKey, TierError};

/// ColdStore はキー指定でオブジェクトを読み書きする
///
/// 中身はただのバイト列で、JSON へのエンコード/デコードは呼び出し側の責務です。
#[async_trait]
pub trait ColdStore: Send + Sync {
    /// Write (or overwrite) the object at `key`.
    async fn put(&self, key: &ArchiveKey, bytes: Vec<u8>) -> Result<(), TierError>;

    /// Read the object at `key`; `None` when nothing is stored there.
    async fn get(&self, key: &ArchiveKey) -> Result<Option<Vec<u8>>, TierError>;
}
