#![forbid(unsafe_code)]

//! User records and bootstrap normalization.

use serde_json::Value;

use crate::path;

/// Stable identifier for a record within a session.
pub type RecordId = u64;

/// One user entity as returned by the data source.
///
/// The payload is kept as raw JSON and read through the dotted-path
/// accessor, so attributes the source omits degrade to the empty sentinel
/// instead of failing to deserialize.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: RecordId,
    data: Value,
}

impl Record {
    #[must_use]
    pub fn new(id: RecordId, data: Value) -> Self {
        Self { id, data }
    }

    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn data(&self) -> &Value {
        &self.data
    }

    /// Display form of the attribute at `path`, empty on any failure.
    #[must_use]
    pub fn field(&self, path: &str) -> String {
        path::display_field(&self.data, path)
    }

    /// The record's display name.
    #[must_use]
    pub fn name(&self) -> String {
        self.field("name")
    }
}

/// Assign identifiers to raw source objects.
///
/// A record keeps the source's numeric `id` when present and non-zero;
/// otherwise it gets its 1-based ordinal position. After this pass every
/// record in the working set has a non-zero identifier.
#[must_use]
pub fn normalize_records(raw: Vec<Value>) -> Vec<Record> {
    raw.into_iter()
        .enumerate()
        .map(|(index, value)| {
            let ordinal = index as RecordId + 1;
            let id = value
                .get("id")
                .and_then(Value::as_u64)
                .filter(|&id| id != 0)
                .unwrap_or(ordinal);
            Record::new(id, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_source_id() {
        let records = normalize_records(vec![json!({ "id": 7, "name": "Ana" })]);
        assert_eq!(records[0].id(), 7);
    }

    #[test]
    fn missing_id_gets_ordinal() {
        let records = normalize_records(vec![
            json!({ "id": 1, "name": "Ana" }),
            json!({ "id": 2, "name": "Bo" }),
            json!({ "name": "Cy" }),
        ]);
        assert_eq!(records[2].id(), 3);
    }

    #[test]
    fn zero_id_gets_ordinal() {
        let records = normalize_records(vec![json!({ "id": 0, "name": "Ana" })]);
        assert_eq!(records[0].id(), 1);
    }

    #[test]
    fn non_numeric_id_gets_ordinal() {
        let records = normalize_records(vec![json!({ "id": "x", "name": "Ana" })]);
        assert_eq!(records[0].id(), 1);
    }

    #[test]
    fn every_record_has_nonzero_id() {
        let records = normalize_records(vec![json!({}), json!({}), json!({})]);
        assert!(records.iter().all(|r| r.id() != 0));
    }

    #[test]
    fn field_reads_through_payload() {
        let record = Record::new(1, json!({ "address": { "city": "Rio" } }));
        assert_eq!(record.field("address.city"), "Rio");
        assert_eq!(record.field("address.zip"), "");
    }
}
