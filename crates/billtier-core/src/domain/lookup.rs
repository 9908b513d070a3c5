//! Lookup result of the Retriever.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::record::BillingRecord;

/// Message carried by the not-found body.
pub const NOT_FOUND_MESSAGE: &str = "Record not found in hot or cold storage.";

/// Storage tier a record was served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Hot,
    Cold,
}

/// Outcome of a lookup across both tiers.
///
/// A miss in both tiers is a value, not an error: store failures are
/// reported separately through `TierError`.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup {
    Found { tier: Tier, record: BillingRecord },
    NotFound,
}

impl Lookup {
    pub fn hot(record: BillingRecord) -> Self {
        Self::Found {
            tier: Tier::Hot,
            record,
        }
    }

    pub fn cold(record: BillingRecord) -> Self {
        Self::Found {
            tier: Tier::Cold,
            record,
        }
    }

    pub fn tier(&self) -> Option<Tier> {
        match self {
            Self::Found { tier, .. } => Some(*tier),
            Self::NotFound => None,
        }
    }

    pub fn record(&self) -> Option<&BillingRecord> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }

    pub fn into_record(self) -> Option<BillingRecord> {
        match self {
            Self::Found { record, .. } => Some(record),
            Self::NotFound => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    /// Response body: the record itself, or `{"error": ...}` on a miss.
    pub fn to_json(&self) -> Result<Value, serde_json::Error> {
        match self {
            Self::Found { record, .. } => serde_json::to_value(record),
            Self::NotFound => Ok(json!({ "error": NOT_FOUND_MESSAGE })),
        }
    }
}
