#![forbid(unsafe_code)]

//! Reducing the record set to matches for a field/value pair.

use crate::record::Record;

/// Records whose display form at `field` equals `value`.
///
/// An empty field or value means "no filter applied": the full set comes
/// back unchanged, in source order. Both sides of the comparison are
/// display strings, so mixed scalar types compare by their text form. The
/// empty result is a valid outcome, not an error.
#[must_use]
pub fn apply_filter<'a>(records: &'a [Record], field: &str, value: &str) -> Vec<&'a Record> {
    if field.is_empty() || value.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|record| record.field(field) == value)
        .collect()
}
