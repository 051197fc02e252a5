//! Aggregate flags computed from the item list.
//!
//! Every function is pure and recomputed on each read. An empty list yields
//! `false` for every flag.

use crate::item::Item;

/// Every item is checked
#[must_use]
pub fn all_agreed(items: &[Item]) -> bool {
    !items.is_empty() && items.iter().all(|item| item.checked)
}

/// Exactly the required items are checked
///
/// Required items must be checked and optional items must be unchecked.
#[must_use]
pub fn required_only_agreed(items: &[Item]) -> bool {
    !items.is_empty() && items.iter().all(|item| item.checked == item.required)
}

/// Some, but not all, items are checked
#[must_use]
pub fn partially_agreed(items: &[Item]) -> bool {
    items.iter().any(|item| item.checked) && !all_agreed(items)
}

/// No item is checked
#[must_use]
pub fn none_agreed(items: &[Item]) -> bool {
    !items.is_empty() && items.iter().all(|item| !item.checked)
}

/// Every required item is checked, so the user may proceed
///
/// Vacuously true for a list without required items.
#[must_use]
pub fn play_enabled(items: &[Item]) -> bool {
    !items.is_empty() && items.iter().filter(|item| item.required).all(|item| item.checked)
}

/// Ids of the checked items, in list order
#[must_use]
pub fn checked_ids(items: &[Item]) -> Vec<i32> {
    items
        .iter()
        .filter(|item| item.checked)
        .map(|item| item.id)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn defaults() -> Vec<Item> {
        vec![
            Item::required(1, "Term 1"),
            Item::required(2, "Term 2"),
            Item::optional(3, "Term 3"),
        ]
    }

    fn arb_items() -> impl Strategy<Value = Vec<Item>> {
        prop::collection::vec((any::<bool>(), any::<bool>()), 0..12).prop_map(|flags| {
            flags
                .into_iter()
                .enumerate()
                .map(|(index, (checked, required))| {
                    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
                    let id = index as i32 + 1;
                    Item::new(id, format!("Term {id}"), required).with_checked(checked)
                })
                .collect()
        })
    }

    #[test]
    fn empty_list_has_no_flags() {
        assert!(!all_agreed(&[]));
        assert!(!required_only_agreed(&[]));
        assert!(!partially_agreed(&[]));
        assert!(!none_agreed(&[]));
        assert!(!play_enabled(&[]));
    }

    #[test]
    fn fresh_defaults_are_none_agreed() {
        let items = defaults();
        assert!(none_agreed(&items));
        assert!(!all_agreed(&items));
        assert!(!partially_agreed(&items));
        assert!(!play_enabled(&items));
    }

    #[test]
    fn required_only_is_strict() {
        let items: Vec<Item> = defaults()
            .iter()
            .map(|item| item.with_checked(item.required))
            .collect();
        assert!(required_only_agreed(&items));
        assert!(play_enabled(&items));
        assert!(partially_agreed(&items));

        // Checking the optional term too breaks the strict reading
        let all: Vec<Item> = items.iter().map(|item| item.with_checked(true)).collect();
        assert!(!required_only_agreed(&all));
        assert!(all_agreed(&all));
        assert!(play_enabled(&all));
    }

    #[test]
    fn optional_only_lists_enable_play() {
        let items = vec![Item::optional(1, "a"), Item::optional(2, "b")];
        assert!(play_enabled(&items));
        assert!(required_only_agreed(&items));
        assert!(none_agreed(&items));
    }

    #[test]
    fn checked_ids_keep_list_order() {
        let items = vec![
            Item::optional(5, "e").with_checked(true),
            Item::optional(2, "b"),
            Item::required(9, "i").with_checked(true),
        ];
        assert_eq!(checked_ids(&items), vec![5, 9]);
    }

    proptest! {
        #[test]
        fn all_agreed_matches_definition(items in arb_items()) {
            let expected = !items.is_empty() && items.iter().all(|i| i.checked);
            prop_assert_eq!(all_agreed(&items), expected);
        }

        #[test]
        fn none_agreed_matches_definition(items in arb_items()) {
            let expected = !items.is_empty() && items.iter().all(|i| !i.checked);
            prop_assert_eq!(none_agreed(&items), expected);
        }

        #[test]
        fn all_and_none_exclusive(items in arb_items()) {
            prop_assert!(!(all_agreed(&items) && none_agreed(&items)));
        }

        #[test]
        fn partial_excludes_extremes(items in arb_items()) {
            if partially_agreed(&items) {
                prop_assert!(!all_agreed(&items));
                prop_assert!(!none_agreed(&items));
            }
        }

        #[test]
        fn all_agreed_implies_play_enabled(items in arb_items()) {
            if all_agreed(&items) {
                prop_assert!(play_enabled(&items));
            }
        }

        #[test]
        fn required_only_implies_play_enabled(items in arb_items()) {
            if required_only_agreed(&items) {
                prop_assert!(play_enabled(&items));
            }
        }
    }
}
