//! Domain model (record, ids, archive keys, lookup results, errors).

pub mod archive_key;
pub mod errors;
pub mod ids;
pub mod lookup;
pub mod record;
pub mod report;

pub use archive_key::{ArchiveKey, DEFAULT_ARCHIVE_PREFIX};
pub use errors::{ArchiveError, TierError};
pub use ids::RecordId;
pub use lookup::{Lookup, NOT_FOUND_MESSAGE, Tier};
pub use record::{BillingRecord, RecordDate};
pub use report::ArchiveReport;
