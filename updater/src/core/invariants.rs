//! Id uniqueness check for record sequences.
//!
//! The updater itself never enforces uniqueness; callers that want the
//! single-match guarantee run this first.

use std::fmt::Debug;

use serde_json::Value;

use crate::core::keyed::Keyed;
use crate::core::record::{UpdateError, ids_equal, record_ids};

/// Report every record whose id already appeared earlier in `list`.
///
/// Messages are stable and ordered by the index of the repeated record.
/// Comparison is `PartialEq` only, so this is quadratic in the worst case.
pub fn validate_unique_ids<T>(list: &[T]) -> Vec<String>
where
    T: Keyed,
    T::Id: Debug,
{
    let mut errors = Vec::new();
    for (index, item) in list.iter().enumerate() {
        let first = list[..index]
            .iter()
            .position(|earlier| earlier.id() == item.id());
        if let Some(first) = first {
            errors.push(format!(
                "duplicate id {:?} at index {} (first seen at index {})",
                item.id(),
                index,
                first
            ));
        }
    }
    errors
}

/// JSON form of [`validate_unique_ids`], keyed by `id_field`.
///
/// Ids compare with [`ids_equal`], so `1` and `1.0` collide. Records without
/// `id_field` are ignored. Shape errors are returned as [`UpdateError::Type`].
pub fn validate_unique_record_ids(list: &Value, id_field: &str) -> Result<Vec<String>, UpdateError> {
    let ids = record_ids(list, id_field)?;
    let mut errors = Vec::new();
    for (index, id) in ids.iter().enumerate() {
        let Some(id) = id else {
            continue;
        };
        let first = ids[..index]
            .iter()
            .position(|earlier| earlier.is_some_and(|earlier| ids_equal(earlier, id)));
        if let Some(first) = first {
            errors.push(format!(
                "duplicate id {} at index {} (first seen at index {})",
                id, index, first
            ));
        }
    }
    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::items;
    use serde_json::json;

    #[test]
    fn unique_ids_pass() {
        assert!(validate_unique_ids(&items(&[(1, 0), (2, 0), (3, 0)])).is_empty());
    }

    #[test]
    fn empty_list_passes() {
        let list: Vec<crate::test_support::Item> = Vec::new();
        assert!(validate_unique_ids(&list).is_empty());
    }

    /// Each repeat is reported against the first occurrence.
    #[test]
    fn duplicates_reported_in_order() {
        let errors = validate_unique_ids(&items(&[(1, 0), (2, 0), (1, 0), (1, 0)]));
        assert_eq!(
            errors,
            vec![
                "duplicate id 1 at index 2 (first seen at index 0)".to_string(),
                "duplicate id 1 at index 3 (first seen at index 0)".to_string(),
            ]
        );
    }

    #[test]
    fn record_ids_duplicates_reported_as_json() {
        let list = json!([{"id": "a"}, {"id": 1}, {"id": "a"}, {"name": "no id"}, {}]);
        let errors = validate_unique_record_ids(&list, "id").expect("validate");
        assert_eq!(
            errors,
            vec!["duplicate id \"a\" at index 2 (first seen at index 0)".to_string()]
        );
    }

    #[test]
    fn record_ids_duplicates_compare_numerically() {
        let list: Value = serde_json::from_str(r#"[{"id": 1}, {"id": 1.0}]"#).expect("parse");
        let errors = validate_unique_record_ids(&list, "id").expect("validate");
        assert_eq!(
            errors,
            vec!["duplicate id 1.0 at index 1 (first seen at index 0)".to_string()]
        );
    }

    #[test]
    fn record_ids_check_rejects_non_array() {
        let err = validate_unique_record_ids(&json!("items"), "id").expect_err("type error");
        assert!(matches!(err, UpdateError::Type { .. }));
    }
}
