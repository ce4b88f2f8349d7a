//! Immutable update-by-key over ordered sequences.

use crate::core::keyed::Keyed;

/// Return a new sequence where every record whose id equals `id` is replaced
/// by `update_fn(record)`.
///
/// Length and order are preserved. Records that do not match are cloned into
/// the output unchanged; for `Rc`/`Arc` elements that is a pointer copy, so the
/// output shares them with `list`. `update_fn` runs once per match, in order.
/// Duplicate ids are not rejected here: each matching record is transformed.
pub fn update_list_item<T, F>(list: &[T], id: &T::Id, mut update_fn: F) -> Vec<T>
where
    T: Keyed + Clone,
    F: FnMut(&T) -> T,
{
    list.iter()
        .map(|item| {
            if item.id() == id {
                update_fn(item)
            } else {
                item.clone()
            }
        })
        .collect()
}

/// Fallible form of [`update_list_item`].
///
/// The first error returned by `update_fn` aborts the pass; no partially
/// updated sequence is produced.
pub fn try_update_list_item<T, F, E>(list: &[T], id: &T::Id, mut update_fn: F) -> Result<Vec<T>, E>
where
    T: Keyed + Clone,
    F: FnMut(&T) -> Result<T, E>,
{
    list.iter()
        .map(|item| {
            if item.id() == id {
                update_fn(item)
            } else {
                Ok(item.clone())
            }
        })
        .collect()
}

/// Indices of records whose id equals `id`, in sequence order.
pub fn matching_positions<T: Keyed>(list: &[T], id: &T::Id) -> Vec<usize> {
    list.iter()
        .enumerate()
        .filter(|(_, item)| item.id() == id)
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Item, item, items};
    use std::rc::Rc;
    use std::sync::Arc;

    fn add_five(item: &Item) -> Item {
        Item {
            value: item.value + 5,
            ..item.clone()
        }
    }

    /// Matching record is replaced in place; the other keeps its values.
    #[test]
    fn update_replaces_matching_record() {
        let list = items(&[(1, 10), (2, 20)]);
        let updated = update_list_item(&list, &2, add_five);

        assert_eq!(updated, vec![item(1, 10), item(2, 25)]);
        assert_eq!(updated[1].name, "Item 2");
    }

    #[test]
    fn update_of_empty_list_is_empty() {
        let list: Vec<Item> = Vec::new();
        let updated = update_list_item(&list, &1, add_five);
        assert!(updated.is_empty());
    }

    /// Missing id yields a copy and never calls the transform.
    #[test]
    fn update_without_match_copies_and_skips_transform() {
        let list = items(&[(1, 10), (2, 20)]);
        let mut calls = 0;
        let updated = update_list_item(&list, &99, |item| {
            calls += 1;
            item.clone()
        });

        assert_eq!(updated, list);
        assert_eq!(calls, 0);
    }

    /// Input is left untouched.
    #[test]
    fn update_does_not_mutate_input() {
        let list = items(&[(1, 10), (2, 20)]);
        let before = list.clone();
        let _ = update_list_item(&list, &1, add_five);
        assert_eq!(list, before);
    }

    /// Duplicate ids are transformed independently, in order.
    #[test]
    fn update_transforms_every_duplicate_in_order() {
        let list = items(&[(3, 1), (4, 2), (3, 3)]);
        let mut seen = Vec::new();
        let updated = update_list_item(&list, &3, |item| {
            seen.push(item.value);
            add_five(item)
        });

        assert_eq!(seen, vec![1, 3]);
        assert_eq!(updated, vec![item(3, 6), item(4, 2), item(3, 8)]);
    }

    /// Unmatched `Arc` elements are shared with the input, not deep-copied.
    #[test]
    fn update_shares_unmatched_arc_elements() {
        let list: Vec<Arc<Item>> = items(&[(1, 10), (2, 20), (3, 30)])
            .into_iter()
            .map(Arc::new)
            .collect();
        let updated = update_list_item(&list, &2, |item| Arc::new(add_five(item)));

        assert!(Arc::ptr_eq(&list[0], &updated[0]));
        assert!(!Arc::ptr_eq(&list[1], &updated[1]));
        assert!(Arc::ptr_eq(&list[2], &updated[2]));
        assert_eq!(updated[1].value, 25);
    }

    #[test]
    fn update_shares_unmatched_rc_elements() {
        let list: Vec<Rc<Item>> = items(&[(1, 10), (2, 20)]).into_iter().map(Rc::new).collect();
        let updated = update_list_item(&list, &1, |item| Rc::new(add_five(item)));

        assert!(Rc::ptr_eq(&list[1], &updated[1]));
        assert_eq!(Rc::strong_count(&list[1]), 2);
        assert_eq!(updated[0].value, 15);
    }

    /// Transform error aborts the pass and skips later matches.
    #[test]
    fn try_update_propagates_first_error() {
        let list = items(&[(1, 10), (1, 20), (1, 30)]);
        let mut calls = 0;
        let result: Result<Vec<Item>, String> = try_update_list_item(&list, &1, |item| {
            calls += 1;
            if item.value == 20 {
                Err(format!("cannot update value {}", item.value))
            } else {
                Ok(add_five(item))
            }
        });

        assert_eq!(result, Err("cannot update value 20".to_string()));
        assert_eq!(calls, 2);
    }

    #[test]
    fn try_update_succeeds_like_infallible_form() {
        let list = items(&[(1, 10), (2, 20)]);
        let result: Result<Vec<Item>, String> =
            try_update_list_item(&list, &2, |item| Ok(add_five(item)));
        assert_eq!(result, Ok(update_list_item(&list, &2, add_five)));
    }

    /// Without a match the transform is never invoked, so it cannot fail.
    #[test]
    fn try_update_without_match_never_fails() {
        let list = items(&[(1, 10)]);
        let result: Result<Vec<Item>, &str> = try_update_list_item(&list, &2, |_| Err("boom"));
        assert_eq!(result, Ok(list));
    }

    #[test]
    fn matching_positions_reports_all_matches() {
        let list = items(&[(5, 0), (6, 0), (5, 0)]);
        assert_eq!(matching_positions(&list, &5), vec![0, 2]);
        assert!(matching_positions(&list, &7).is_empty());
    }

    /// Works with unsized ids such as `str`.
    #[test]
    fn update_matches_unsized_ids() {
        #[derive(Clone, Debug, PartialEq)]
        struct Tag {
            key: String,
            hits: u32,
        }

        impl Keyed for Tag {
            type Id = str;

            fn id(&self) -> &str {
                &self.key
            }
        }

        let list = vec![
            Tag {
                key: "a".to_string(),
                hits: 0,
            },
            Tag {
                key: "b".to_string(),
                hits: 0,
            },
        ];
        let updated = update_list_item(&list, "b", |tag| Tag {
            hits: tag.hits + 1,
            ..tag.clone()
        });

        assert_eq!(updated[0].hits, 0);
        assert_eq!(updated[1].hits, 1);
    }
}
