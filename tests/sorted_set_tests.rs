//! Behavioral tests for `SortedArraySet`.
//!
//! These tests exercise the public surface end to end: construction
//! paths, navigation queries, range views, ordering, equality, and the
//! windowed-view behavior observable through them.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use ordset::{Comparator, SortedArraySet, SortedSetError};
use rstest::rstest;

// =============================================================================
// Construction
// =============================================================================

#[rstest]
fn test_from_elements_sorts_and_removes_duplicates() {
    let set = SortedArraySet::from_elements(vec![3, 1, 2, 1, 3]);
    assert_eq!(set.len(), 3);
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
}

#[rstest]
fn test_from_elements_on_empty_input() {
    let set: SortedArraySet<i32> = SortedArraySet::from_elements(Vec::new());
    assert!(set.is_empty());
    assert_eq!(set, SortedArraySet::new());
}

#[rstest]
fn test_with_comparator_orders_by_strategy() {
    let set = SortedArraySet::with_comparator(
        Comparator::<i32>::natural().reversed(),
        vec![2, 5, 1, 5],
    );
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![5, 2, 1]);
    assert_eq!(set.first(), Some(&5));
    assert_eq!(set.last(), Some(&1));
}

#[rstest]
fn test_from_sorted_vec_trusts_but_verifies() {
    assert!(SortedArraySet::from_sorted_vec(vec![1, 2, 3]).is_ok());
    assert_eq!(
        SortedArraySet::from_sorted_vec(vec![1, 3, 3, 4]).unwrap_err(),
        SortedSetError::Unsorted { position: 2 }
    );
}

#[rstest]
fn test_from_sorted_vec_with_reversed_comparator() {
    let descending = Comparator::<i32>::natural().reversed();
    assert!(SortedArraySet::from_sorted_vec_with(descending.clone(), vec![3, 2, 1]).is_ok());
    assert_eq!(
        SortedArraySet::from_sorted_vec_with(descending, vec![1, 2]).unwrap_err(),
        SortedSetError::Unsorted { position: 1 }
    );
}

#[rstest]
fn test_from_btree_set_adopts_sorted_order() {
    let source: BTreeSet<&str> = ["pear", "apple", "fig"].into_iter().collect();
    let set = SortedArraySet::from(source);
    assert_eq!(
        set.iter().copied().collect::<Vec<_>>(),
        vec!["apple", "fig", "pear"]
    );
}

#[rstest]
fn test_collect_from_iterator() {
    let set: SortedArraySet<i32> = (0..10).rev().collect();
    assert_eq!(set.iter().copied().collect::<Vec<_>>(), (0..10).collect::<Vec<_>>());
}

// =============================================================================
// Navigation
// =============================================================================

#[rstest]
fn test_navigation_table() {
    let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);

    assert_eq!(set.floor(&4), Some(&3));
    assert_eq!(set.ceiling(&4), Some(&5));
    assert_eq!(set.lower(&3), Some(&1));
    assert_eq!(set.higher(&3), Some(&5));
    assert_eq!(set.floor(&0), None);
    assert_eq!(set.higher(&7), None);
    assert_eq!(set.lower(&1), None);
    assert_eq!(set.ceiling(&8), None);
}

#[rstest]
fn test_navigation_on_exact_matches() {
    let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    assert_eq!(set.floor(&5), Some(&5));
    assert_eq!(set.ceiling(&5), Some(&5));
    assert_eq!(set.lower(&5), Some(&3));
    assert_eq!(set.higher(&5), Some(&7));
}

#[rstest]
fn test_membership_and_index() {
    let set = SortedArraySet::from_elements(vec![10, 20, 30]);
    assert!(set.contains(&20));
    assert!(!set.contains(&25));
    assert_eq!(set.index_of(&30), Some(2));
    assert_eq!(set.index_of(&5), None);
    assert_eq!(set.get(1), Some(&20));
    assert_eq!(set.get(3), None);
}

// =============================================================================
// Range views
// =============================================================================

#[rstest]
fn test_sub_set_flag_combinations() {
    let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);

    let closed_open = set.sub_set(&1, true, &5, false).unwrap();
    assert_eq!(closed_open.iter().copied().collect::<Vec<_>>(), vec![1, 3]);

    let open_closed = set.sub_set(&1, false, &5, true).unwrap();
    assert_eq!(open_closed.iter().copied().collect::<Vec<_>>(), vec![3, 5]);

    let absent_bounds = set.sub_set(&2, true, &6, true).unwrap();
    assert_eq!(absent_bounds.iter().copied().collect::<Vec<_>>(), vec![3, 5]);
}

#[rstest]
fn test_sub_set_spanning_everything_equals_self() {
    let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    let whole = set.sub_set(&1, true, &7, true).unwrap();
    assert_eq!(whole, set);
}

#[rstest]
fn test_head_and_tail_sets() {
    let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    assert_eq!(
        set.head_set(&4, true).iter().copied().collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert_eq!(
        set.tail_set(&4, true).iter().copied().collect::<Vec<_>>(),
        vec![5, 7]
    );
    assert!(set.head_set(&0, true).is_empty());
    assert!(set.tail_set(&8, true).is_empty());
}

#[rstest]
fn test_nested_range_views() {
    let set: SortedArraySet<i32> = (1..=10).collect();
    let middle = set.sub_set(&3, true, &8, true).unwrap();
    let inner = middle.tail_set(&5, true);
    assert_eq!(inner.iter().copied().collect::<Vec<_>>(), vec![5, 6, 7, 8]);
    assert_eq!(inner.first(), Some(&5));
    assert_eq!(inner.floor(&9), Some(&8));
}

#[rstest]
fn test_take_and_drop_table() {
    let set = SortedArraySet::from_elements(vec![1, 2, 3, 4]);

    assert_eq!(set.take(2).iter().copied().collect::<Vec<_>>(), vec![1, 2]);
    assert_eq!(set.drop(2).iter().copied().collect::<Vec<_>>(), vec![3, 4]);
    assert!(set.take(0).is_empty());
    assert!(set.drop(4).is_empty());
    assert_eq!(set.take(4), set);
    assert_eq!(set.take(100), set);
    assert_eq!(set.drop(0), set);
    assert!(set.drop(100).is_empty());
}

// =============================================================================
// Descending views
// =============================================================================

#[rstest]
fn test_descending_set_round_trip() {
    let set = SortedArraySet::from_elements(vec![2, 4, 6]);
    let descending = set.descending_set();
    assert_eq!(descending.iter().copied().collect::<Vec<_>>(), vec![6, 4, 2]);

    let round_trip = descending.descending_set();
    assert_eq!(round_trip, set);
    assert_eq!(
        round_trip.iter().copied().collect::<Vec<_>>(),
        set.iter().copied().collect::<Vec<_>>()
    );
    assert!(!round_trip.comparator().is_reversed());
}

#[rstest]
fn test_descending_iterator_matches_descending_set() {
    let set = SortedArraySet::from_elements(vec![1, 2, 3]);
    let from_iterator: Vec<i32> = set.descending_iter().copied().collect();
    let from_view: Vec<i32> = set.descending_set().iter().copied().collect();
    assert_eq!(from_iterator, from_view);
}

#[rstest]
fn test_descending_sub_set() {
    let descending = SortedArraySet::from_elements(vec![1, 3, 5, 7]).descending_set();
    // Bounds are expressed in the descending order: from 7 down to 3.
    let range = descending.sub_set(&7, true, &3, true).unwrap();
    assert_eq!(range.iter().copied().collect::<Vec<_>>(), vec![7, 5, 3]);
}

// =============================================================================
// Ordering, equality, traversal
// =============================================================================

#[rstest]
#[case(vec![1, 2], vec![1, 2, 3], Ordering::Less)]
#[case(vec![1, 2, 3], vec![1, 2], Ordering::Greater)]
#[case(vec![1, 2, 3], vec![1, 2, 3], Ordering::Equal)]
#[case(vec![1, 3], vec![1, 2], Ordering::Greater)]
#[case(vec![], vec![1], Ordering::Less)]
#[case(vec![], vec![], Ordering::Equal)]
fn test_compare_to(
    #[case] left: Vec<i32>,
    #[case] right: Vec<i32>,
    #[case] expected: Ordering,
) {
    let left = SortedArraySet::from_elements(left);
    let right = SortedArraySet::from_elements(right);
    assert_eq!(left.compare_to(&right), expected);
}

#[rstest]
fn test_compare_to_against_plain_sequence() {
    let set = SortedArraySet::from_elements(vec![1, 2, 3]);
    assert_eq!(set.compare_to([1, 2, 3].iter()), Ordering::Equal);
    assert_eq!(set.compare_to([1, 2].iter()), Ordering::Greater);
}

#[rstest]
fn test_equality_ignores_traversal_order() {
    let ascending = SortedArraySet::from_elements(vec![1, 2, 3]);
    let descending = ascending.descending_set();
    assert_eq!(ascending, descending);
}

#[rstest]
fn test_corresponds_against_mapped_sequence() {
    let set = SortedArraySet::from_elements(vec![1, 2, 3]);
    let doubled = vec![2, 4, 6];
    assert!(set.corresponds(doubled.iter(), |element, other| element * 2 == *other));
    assert!(!set.corresponds(doubled[..2].iter(), |element, other| element * 2 == *other));
}

#[rstest]
fn test_bounded_for_each() {
    let set: SortedArraySet<i32> = (0..6).collect();

    let mut seen = Vec::new();
    set.for_each_in(2, 5, |element| seen.push(*element)).unwrap();
    assert_eq!(seen, vec![2, 3, 4]);

    let mut indexed = Vec::new();
    set.for_each_with_index_in(2, 4, |index, element| indexed.push((index, *element)))
        .unwrap();
    assert_eq!(indexed, vec![(2, 2), (3, 3)]);

    assert!(matches!(
        set.for_each_in(4, 2, |_| {}),
        Err(SortedSetError::InvalidRange { .. })
    ));
    assert!(matches!(
        set.for_each_in(0, 7, |_| {}),
        Err(SortedSetError::OutOfBounds { .. })
    ));
}

// =============================================================================
// Persistent updates and set algebra
// =============================================================================

#[rstest]
fn test_insert_leaves_original_untouched() {
    let original = SortedArraySet::from_elements(vec![1, 3]);
    let grown = original.insert(2).insert(4);
    assert_eq!(original.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(grown.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
}

#[rstest]
fn test_remove_leaves_original_untouched() {
    let original = SortedArraySet::from_elements(vec![1, 2, 3]);
    let shrunk = original.remove(&2);
    assert_eq!(original.len(), 3);
    assert_eq!(shrunk.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    assert!(original.remove(&9) == original);
}

#[rstest]
fn test_set_algebra_against_btree_model() {
    let left_elements = vec![1, 4, 6, 9];
    let right_elements = vec![2, 4, 9, 12];

    let left = SortedArraySet::from_elements(left_elements.clone());
    let right = SortedArraySet::from_elements(right_elements.clone());
    let left_model: BTreeSet<i32> = left_elements.into_iter().collect();
    let right_model: BTreeSet<i32> = right_elements.into_iter().collect();

    assert_eq!(
        left.union(&right).iter().copied().collect::<Vec<_>>(),
        left_model.union(&right_model).copied().collect::<Vec<_>>()
    );
    assert_eq!(
        left.intersection(&right).iter().copied().collect::<Vec<_>>(),
        left_model
            .intersection(&right_model)
            .copied()
            .collect::<Vec<_>>()
    );
    assert_eq!(
        left.difference(&right).iter().copied().collect::<Vec<_>>(),
        left_model
            .difference(&right_model)
            .copied()
            .collect::<Vec<_>>()
    );
}

#[rstest]
fn test_union_with_reversed_comparator() {
    let descending = Comparator::<i32>::natural().reversed();
    let left = SortedArraySet::with_comparator(descending.clone(), vec![5, 3, 1]);
    let right = SortedArraySet::with_comparator(descending, vec![4, 3, 2]);
    assert_eq!(
        left.union(&right).iter().copied().collect::<Vec<_>>(),
        vec![5, 4, 3, 2, 1]
    );
}
