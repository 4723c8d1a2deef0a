#![forbid(unsafe_code)]

//! Deriving the distinct value set for a chosen field.

use std::cmp::Ordering;

use crate::record::Record;

/// Case-aware lexicographic comparison of option values.
///
/// Case-insensitive primary key with a case-sensitive tiebreak, so "ana"
/// and "Ana" sort together but remain distinct. Equal only for identical
/// strings, which keeps duplicates adjacent for `dedup`.
#[must_use]
pub fn compare_values(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Distinct values observed for `path` across `records`, sorted ascending.
///
/// Empty display forms are excluded; an empty chosen path produces an empty
/// list. The result is derived — callers recompute whenever the chosen
/// field or the record set changes.
#[must_use]
pub fn derive_options(records: &[Record], path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    let mut values: Vec<String> = records
        .iter()
        .map(|record| record.field(path))
        .filter(|value| !value.is_empty())
        .collect();
    values.sort_by(|a, b| compare_values(a, b));
    values.dedup();
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::normalize_records;
    use serde_json::json;

    fn records() -> Vec<Record> {
        normalize_records(vec![
            json!({ "id": 1, "name": "Ana", "address": { "city": "Rio" } }),
            json!({ "id": 2, "name": "bo", "address": { "city": "Rio" } }),
            json!({ "id": 3, "name": "Cy", "address": { "city": "alta" } }),
            json!({ "id": 4, "name": "Dee" }),
        ])
    }

    #[test]
    fn distinct_and_sorted() {
        let options = derive_options(&records(), "address.city");
        assert_eq!(options, vec!["alta", "Rio"]);
    }

    #[test]
    fn case_insensitive_order_with_tiebreak() {
        let options = derive_options(&records(), "name");
        assert_eq!(options, vec!["Ana", "bo", "Cy", "Dee"]);
    }

    #[test]
    fn empty_path_yields_nothing() {
        assert!(derive_options(&records(), "").is_empty());
    }

    #[test]
    fn missing_values_are_excluded() {
        // Record 4 has no address; only three city values exist, two equal.
        let options = derive_options(&records(), "address.city");
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn empty_record_set_yields_nothing() {
        assert!(derive_options(&[], "name").is_empty());
    }

    #[test]
    fn numbers_coerce_to_strings() {
        let records = normalize_records(vec![
            json!({ "id": 10, "rank": 2 }),
            json!({ "id": 11, "rank": 10 }),
        ]);
        // String comparison, as the source does: "10" sorts before "2".
        assert_eq!(derive_options(&records, "rank"), vec!["10", "2"]);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn output_is_sorted_and_unique(values in proptest::collection::vec("[a-zA-Z0-9 ]{0,12}", 0..40)) {
                let records = normalize_records(
                    values.iter().map(|v| json!({ "name": v })).collect(),
                );
                let options = derive_options(&records, "name");
                for pair in options.windows(2) {
                    prop_assert_eq!(compare_values(&pair[0], &pair[1]), std::cmp::Ordering::Less);
                }
                prop_assert!(options.iter().all(|v| !v.is_empty()));
            }
        }
    }
}
