//! Domain identifiers.
//!
//! RecordId は外部システムが採番した請求レコードの ID をそのまま保持します。
//! hot/cold どちらの層でも同じ値を使い、cold 側のキーもここから導出されます。

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a billing record.
///
/// The value is opaque: it is assigned by whoever created the record and is
/// never generated or rewritten here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for RecordId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_is_the_raw_value() {
        let id = RecordId::new("A1");
        assert_eq!(id.to_string(), "A1");
        assert_eq!(id.as_str(), "A1");
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = RecordId::from("B2");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"B2\"");

        let back: RecordId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
