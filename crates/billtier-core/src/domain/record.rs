//! Billing record - hot/cold 間で移動する唯一のエンティティ。

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::ids::RecordId;

/// The `recordDate` of a record.
///
/// Comparisons use the parsed instant, but the value is written back exactly
/// as it was read, so an archived copy keeps its original offset and
/// precision. Anything that is not RFC 3339 is rejected when decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDate {
    instant: DateTime<Utc>,
    raw: String,
}

impl RecordDate {
    pub fn parse(raw: impl Into<String>) -> Result<Self, chrono::ParseError> {
        let raw = raw.into();
        let instant = DateTime::parse_from_rfc3339(&raw)?.with_timezone(&Utc);
        Ok(Self { instant, raw })
    }

    pub fn instant(&self) -> DateTime<Utc> {
        self.instant
    }

    /// The date text as stored.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl From<DateTime<Utc>> for RecordDate {
    fn from(instant: DateTime<Utc>) -> Self {
        Self {
            instant,
            raw: instant.to_rfc3339_opts(SecondsFormat::AutoSi, true),
        }
    }
}

impl fmt::Display for RecordDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl Serialize for RecordDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for RecordDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

/// A billing record as stored in either tier.
///
/// Only `id` and `recordDate` are interpreted. Every other field is kept in
/// `attributes` and written back unchanged, so archival never drops billing
/// data it does not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BillingRecord {
    pub id: RecordId,

    #[serde(rename = "recordDate")]
    pub record_date: RecordDate,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl BillingRecord {
    pub fn new(id: impl Into<RecordId>, record_date: impl Into<RecordDate>) -> Self {
        Self {
            id: id.into(),
            record_date: record_date.into(),
            attributes: Map::new(),
        }
    }

    /// Attach an extra billing attribute (amount, customer, ...).
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// True when the record date is strictly before `cutoff`.
    pub fn is_older_than(&self, cutoff: DateTime<Utc>) -> bool {
        self.record_date.instant() < cutoff
    }

    pub fn to_json_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }

    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};
    use rstest::rstest;
    use serde_json::json;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn wire_format_uses_record_date_and_keeps_extra_fields() {
        let record = BillingRecord::new("A1", at(1))
            .with_attribute("amount", json!(42.5))
            .with_attribute("customer", json!({"name": "acme"}));

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["id"], "A1");
        assert_eq!(value["recordDate"], "2024-03-01T00:00:00Z");
        assert_eq!(value["amount"], 42.5);
        assert_eq!(value["customer"]["name"], "acme");
        assert!(value.get("attributes").is_none());
    }

    #[test]
    fn decodes_documents_written_elsewhere() {
        let raw = br#"{"id":"C3","recordDate":"2024-03-02T10:00:00Z","currency":"EUR"}"#;
        let record = BillingRecord::from_json_bytes(raw).unwrap();

        assert_eq!(record.id, RecordId::new("C3"));
        assert_eq!(record.attributes.get("currency"), Some(&json!("EUR")));

        let bytes = record.to_json_bytes().unwrap();
        assert_eq!(BillingRecord::from_json_bytes(&bytes).unwrap(), record);
    }

    #[test]
    fn record_date_text_survives_reencoding() {
        let raw = br#"{"id":"A1","recordDate":"2024-01-01T10:00:00.250+02:00"}"#;
        let record = BillingRecord::from_json_bytes(raw).unwrap();

        assert_eq!(
            record.record_date.instant(),
            Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap() + TimeDelta::milliseconds(250)
        );
        let value: Value = serde_json::from_slice(&record.to_json_bytes().unwrap()).unwrap();
        assert_eq!(value["recordDate"], "2024-01-01T10:00:00.250+02:00");
    }

    #[rstest]
    #[case::date_only("2024-01-01")]
    #[case::no_offset("2024-01-01T10:00:00")]
    #[case::not_a_date("yesterday")]
    fn non_rfc3339_dates_are_rejected(#[case] date: &str) {
        let raw = format!(r#"{{"id":"A1","recordDate":"{date}"}}"#);
        assert!(BillingRecord::from_json_bytes(raw.as_bytes()).is_err());
    }

    #[test]
    fn missing_record_date_is_rejected() {
        let raw = br#"{"id":"C3","currency":"EUR"}"#;
        assert!(BillingRecord::from_json_bytes(raw).is_err());
    }

    #[rstest]
    #[case::before(TimeDelta::seconds(-1), true)]
    #[case::exactly_at(TimeDelta::zero(), false)]
    #[case::after(TimeDelta::seconds(1), false)]
    fn age_comparison_is_strict(#[case] offset: TimeDelta, #[case] expected: bool) {
        let cutoff = at(10);
        let record = BillingRecord::new("X", cutoff + offset);
        assert_eq!(record.is_older_than(cutoff), expected);
    }
}
