#![forbid(unsafe_code)]

//! Dotted-path access into a record's JSON payload.
//!
//! `resolve` walks an object graph one segment at a time and reports absence
//! as `None` instead of an error; `display_field` further collapses absence,
//! null, and non-scalar endpoints into the empty-string sentinel. The pair
//! is total: no record/path combination can make either panic.

use serde_json::Value;

/// Resolve a dotted path against a JSON value.
///
/// Splits `path` on `.` and walks the object graph in order. Returns `None`
/// when the path is empty, an intermediate segment is missing, or the
/// current value is not an object.
#[must_use]
pub fn resolve<'a>(root: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return None;
    }
    let mut current = root;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

/// String form of a scalar JSON value.
///
/// Strings render verbatim; numbers and booleans use their canonical text
/// form. Null, arrays, and objects collapse to the empty sentinel — the
/// filterable catalog only ever points at scalars, and anything else is
/// treated as "no value here".
#[must_use]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// Resolve `path` against `root` and coerce the result to its display form.
///
/// Empty string on any failure; never panics.
#[must_use]
pub fn display_field(root: &Value, path: &str) -> String {
    resolve(root, path).map_or_else(String::new, display_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "id": 1,
            "name": "Ana",
            "address": { "city": "Rio" },
            "company": { "name": "Acme" },
            "active": true,
        })
    }

    // ── resolve ─────────────────────────────────────────────────────

    #[test]
    fn resolve_top_level() {
        let v = sample();
        assert_eq!(resolve(&v, "name"), Some(&json!("Ana")));
    }

    #[test]
    fn resolve_nested() {
        let v = sample();
        assert_eq!(resolve(&v, "address.city"), Some(&json!("Rio")));
    }

    #[test]
    fn resolve_missing_segment_is_none() {
        let v = sample();
        assert_eq!(resolve(&v, "address.zip"), None);
        assert_eq!(resolve(&v, "unknown"), None);
    }

    #[test]
    fn resolve_through_scalar_is_none() {
        let v = sample();
        assert_eq!(resolve(&v, "name.first"), None);
    }

    #[test]
    fn resolve_empty_path_is_none() {
        let v = sample();
        assert_eq!(resolve(&v, ""), None);
    }

    #[test]
    fn resolve_doubled_dot_is_none() {
        let v = sample();
        assert_eq!(resolve(&v, "address..city"), None);
    }

    // ── display forms ───────────────────────────────────────────────

    #[test]
    fn display_string_verbatim() {
        let v = sample();
        assert_eq!(display_field(&v, "name"), "Ana");
    }

    #[test]
    fn display_number_canonical() {
        let v = sample();
        assert_eq!(display_field(&v, "id"), "1");
    }

    #[test]
    fn display_bool_canonical() {
        let v = sample();
        assert_eq!(display_field(&v, "active"), "true");
    }

    #[test]
    fn display_missing_is_empty() {
        let v = sample();
        assert_eq!(display_field(&v, "no.such.path"), "");
    }

    #[test]
    fn display_null_is_empty() {
        let v = json!({ "phone": null });
        assert_eq!(display_field(&v, "phone"), "");
    }

    #[test]
    fn display_container_is_empty() {
        let v = sample();
        assert_eq!(display_field(&v, "address"), "");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // Total over arbitrary paths: absence always collapses to the
            // sentinel, and nothing panics.
            #[test]
            fn accessor_is_total(path in "[a-z.]{0,20}") {
                let v = sample();
                let display = display_field(&v, &path);
                if resolve(&v, &path).is_none() {
                    prop_assert_eq!(display, "");
                }
            }

            #[test]
            fn unknown_segments_are_empty(segment in "[A-Z]{1,8}") {
                let v = sample();
                prop_assert_eq!(display_field(&v, &segment), "");
                let nested = format!("address.{segment}");
                prop_assert_eq!(display_field(&v, &nested), "");
            }
        }
    }
}
