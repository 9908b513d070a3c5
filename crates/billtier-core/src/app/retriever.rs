//! Retriever - hot tier 優先、なければ cold tier から取得

use std::sync::Arc;

use tracing::debug;

use crate::domain::{ArchiveKey, BillingRecord, Lookup, RecordId, TierError};
use crate::ports::{ColdStore, PrimaryStore};

/// Looks a record up in the primary store, then in cold storage.
pub struct Retriever {
    primary: Arc<dyn PrimaryStore>,
    cold: Arc<dyn ColdStore>,
    archive_prefix: String,
}

impl Retriever {
    pub fn new(
        primary: Arc<dyn PrimaryStore>,
        cold: Arc<dyn ColdStore>,
        archive_prefix: impl Into<String>,
    ) -> Self {
        Self {
            primary,
            cold,
            archive_prefix: archive_prefix.into(),
        }
    }

    /// The hot copy wins whenever it exists. A miss in both tiers is
    /// `Lookup::NotFound`; only store failures and undecodable cold objects
    /// are errors.
    pub async fn get(&self, id: &RecordId) -> Result<Lookup, TierError> {
        if let Some(record) = self.primary.get(id).await? {
            debug!(%id, "served from primary store");
            return Ok(Lookup::hot(record));
        }

        let key = ArchiveKey::for_record(&self.archive_prefix, id);
        match self.cold.get(&key).await? {
            Some(bytes) => {
                let record = BillingRecord::from_json_bytes(&bytes)?;
                debug!(%id, %key, "served from cold storage");
                Ok(Lookup::cold(record))
            }
            None => {
                debug!(%id, "not found in either tier");
                Ok(Lookup::NotFound)
            }
        }
    }
}
