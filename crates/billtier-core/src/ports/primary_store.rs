//! PrimaryStore port - hot tier（ドキュメントストア）
//!
//! 直近のレコードを保持する低レイテンシのストアです。
//! 本番では Cosmos DB などのドキュメント DB が実装します。

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{BillingRecord, RecordId, TierError};

/// PrimaryStore は hot tier のレコードを管理
///
/// # 前提
/// - `older_than` はページングなしで該当レコードをすべて返す
/// - `delete` は存在しない ID に対しても成功扱い
#[async_trait]
pub trait PrimaryStore: Send + Sync {
    /// Point lookup by identifier.
    async fn get(&self, id: &RecordId) -> Result<Option<BillingRecord>, TierError>;

    /// Every record whose `recordDate` is strictly before `cutoff`.
    async fn older_than(&self, cutoff: DateTime<Utc>) -> Result<Vec<BillingRecord>, TierError>;

    async fn delete(&self, id: &RecordId) -> Result<(), TierError>;
}
