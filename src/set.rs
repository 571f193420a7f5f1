//! Immutable, array-backed sorted sets.
//!
//! This module provides [`SortedArraySet`], an ordered set stored as a
//! single sorted, deduplicated buffer behind an [`ArrayView`] window. All
//! operations are immutable: range views, descending views, and persistent
//! updates return new sets, and every windowed variant shares the parent's
//! backing buffer instead of copying it.
//!
//! # Construction paths
//!
//! 1. From raw elements ([`from_elements`](SortedArraySet::from_elements),
//!    [`with_comparator`](SortedArraySet::with_comparator),
//!    `FromIterator`): the input is sorted under the ordering strategy and
//!    adjacent duplicates are dropped, keeping the first of each run.
//! 2. From input already claiming sorted-unique order
//!    ([`from_sorted_vec`](SortedArraySet::from_sorted_vec),
//!    [`from_sorted_vec_with`](SortedArraySet::from_sorted_vec_with)):
//!    sorting is skipped, but strict monotonicity is validated in one pass
//!    and any violation is rejected.
//!
//! # Complexity
//!
//! | Operation                        | Cost        |
//! |----------------------------------|-------------|
//! | `contains`, navigation queries   | O(log n)    |
//! | `first`/`last`/`get`             | O(1)        |
//! | `sub_set`/`head_set`/`tail_set`  | O(log n)    |
//! | `take`/`drop`/`descending_set`   | O(1)        |
//! | `insert`/`remove`                | O(n)        |
//! | `union`/`intersection`/`difference` | O(n + m) |
//! | construction from raw elements   | O(n log n)  |
//!
//! # Examples
//!
//! ```rust
//! use ordset::SortedArraySet;
//!
//! let set = SortedArraySet::from_elements(vec![7, 1, 5, 3, 5]);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5, 7]);
//!
//! assert_eq!(set.floor(&4), Some(&3));
//! assert_eq!(set.ceiling(&4), Some(&5));
//!
//! let tail = set.tail_set(&3, true);
//! assert_eq!(tail.iter().copied().collect::<Vec<_>>(), vec![3, 5, 7]);
//! ```

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::iter::FusedIterator;

use crate::comparator::Comparator;
use crate::error::{SortedSetError, check_range};
use crate::view::{ArrayView, ArrayViewIterator};

/// An immutable ordered set backed by a sorted array window.
///
/// The logical sequence is strictly increasing under the set's
/// [`Comparator`]; there are no duplicates. Once constructed, a set is
/// never mutated: it is safe to share freely, and with the `arc` feature
/// it is safe to share across threads without synchronization.
pub struct SortedArraySet<T> {
    delegate: ArrayView<T>,
    comparator: Comparator<T>,
}

// =============================================================================
// Construction
// =============================================================================

impl<T: Clone + Ord> SortedArraySet<T> {
    /// Creates an empty set with the natural ordering.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::empty_with(Comparator::natural())
    }

    /// Creates an empty set with the given ordering strategy.
    #[inline]
    #[must_use]
    pub fn empty_with(comparator: Comparator<T>) -> Self {
        Self {
            delegate: ArrayView::empty(),
            comparator,
        }
    }

    /// Builds a set from arbitrary elements under the natural ordering.
    ///
    /// The input is sorted and deduplicated; of each run of equal
    /// elements, the first survives.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![3, 1, 2, 1, 3]);
    /// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// ```
    #[must_use]
    pub fn from_elements(elements: Vec<T>) -> Self {
        Self::with_comparator(Comparator::natural(), elements)
    }

    /// Builds a set from arbitrary elements under the given ordering
    /// strategy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::{Comparator, SortedArraySet};
    ///
    /// let descending = SortedArraySet::with_comparator(
    ///     Comparator::<i32>::natural().reversed(),
    ///     vec![1, 3, 2],
    /// );
    /// assert_eq!(descending.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[must_use]
    pub fn with_comparator(comparator: Comparator<T>, mut elements: Vec<T>) -> Self {
        elements.sort_by(|left, right| comparator.compare(left, right));
        elements.dedup_by(|current, previous| {
            comparator.compare(previous, current) == Ordering::Equal
        });
        Self {
            delegate: ArrayView::adapt(elements),
            comparator,
        }
    }

    /// Adopts elements that the caller asserts are already sorted and
    /// unique under the natural ordering.
    ///
    /// Sorting and deduplication are skipped; strict monotonicity is
    /// validated in a single pass instead.
    ///
    /// # Errors
    ///
    /// [`SortedSetError::Unsorted`] naming the first position whose
    /// element is not strictly greater than its predecessor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::{SortedArraySet, SortedSetError};
    ///
    /// let set = SortedArraySet::from_sorted_vec(vec![1, 2, 3]).unwrap();
    /// assert_eq!(set.len(), 3);
    ///
    /// let broken = SortedArraySet::from_sorted_vec(vec![1, 2, 2]);
    /// assert_eq!(broken.unwrap_err(), SortedSetError::Unsorted { position: 2 });
    /// ```
    pub fn from_sorted_vec(elements: Vec<T>) -> Result<Self, SortedSetError> {
        Self::from_sorted_vec_with(Comparator::natural(), elements)
    }

    /// Adopts elements asserted to be sorted and unique under the given
    /// ordering strategy.
    ///
    /// # Errors
    ///
    /// [`SortedSetError::Unsorted`] if the assertion does not hold.
    pub fn from_sorted_vec_with(
        comparator: Comparator<T>,
        elements: Vec<T>,
    ) -> Result<Self, SortedSetError> {
        for position in 1..elements.len() {
            if comparator.compare(&elements[position - 1], &elements[position]) != Ordering::Less {
                return Err(SortedSetError::Unsorted { position });
            }
        }
        Ok(Self {
            delegate: ArrayView::adapt(elements),
            comparator,
        })
    }
}

impl<T: Clone + Ord> Default for SortedArraySet<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Ord> FromIterator<T> for SortedArraySet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iterable: I) -> Self {
        Self::from_elements(iterable.into_iter().collect())
    }
}

impl<T: Clone + Ord> From<BTreeSet<T>> for SortedArraySet<T> {
    /// Adopts a `BTreeSet` snapshot without re-sorting.
    ///
    /// `BTreeSet` iteration order is strictly increasing under `Ord`, so
    /// the sorted-unique invariant holds by construction.
    fn from(set: BTreeSet<T>) -> Self {
        Self {
            delegate: ArrayView::adapt(set.into_iter().collect()),
            comparator: Comparator::natural(),
        }
    }
}

// =============================================================================
// Reads and navigation
// =============================================================================

impl<T: Clone + Ord> SortedArraySet<T> {
    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.delegate.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.delegate.is_empty()
    }

    /// Returns the ordering strategy this set sorts by.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &Comparator<T> {
        &self.comparator
    }

    /// Returns the element at the given logical index, or `None` outside
    /// `[0, len)`.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&T> {
        self.delegate.get(index)
    }

    /// Returns the smallest element under the set's ordering, or `None`
    /// on empty.
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.delegate.first()
    }

    /// Returns the largest element under the set's ordering, or `None`
    /// on empty.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.delegate.last()
    }

    /// Returns `true` if an element equal to `element` under the set's
    /// ordering is present.
    ///
    /// O(log n) binary search.
    #[inline]
    #[must_use]
    pub fn contains(&self, element: &T) -> bool {
        self.search(element).is_ok()
    }

    /// Returns the logical index of `element`, or `None` if absent.
    #[inline]
    #[must_use]
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.search(element).ok()
    }

    /// Returns the index of the first element satisfying the predicate.
    #[must_use]
    pub fn detect_index<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Returns an iterator over the elements in ascending logical order.
    #[inline]
    #[must_use]
    pub fn iter(&self) -> ArrayViewIterator<'_, T> {
        self.delegate.iter()
    }

    /// Returns an iterator over the elements in descending logical order.
    ///
    /// The iterator is lazy; no buffer is materialized.
    #[inline]
    pub fn descending_iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.delegate.iter().rev()
    }

    /// Binary search under the set's comparator.
    fn search(&self, element: &T) -> Result<usize, usize> {
        self.delegate
            .binary_search_by(|probe| self.comparator.compare(probe, element))
    }

    /// Returns the greatest element strictly less than `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    /// assert_eq!(set.lower(&3), Some(&1));
    /// assert_eq!(set.lower(&4), Some(&3));
    /// assert_eq!(set.lower(&1), None);
    /// ```
    #[must_use]
    pub fn lower(&self, element: &T) -> Option<&T> {
        let index = match self.search(element) {
            Ok(index) | Err(index) => index,
        };
        index
            .checked_sub(1)
            .and_then(|previous| self.delegate.get(previous))
    }

    /// Returns the greatest element less than or equal to `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    /// assert_eq!(set.floor(&4), Some(&3));
    /// assert_eq!(set.floor(&5), Some(&5));
    /// assert_eq!(set.floor(&0), None);
    /// ```
    #[must_use]
    pub fn floor(&self, element: &T) -> Option<&T> {
        match self.search(element) {
            Ok(index) => self.delegate.get(index),
            Err(insertion_point) => insertion_point
                .checked_sub(1)
                .and_then(|previous| self.delegate.get(previous)),
        }
    }

    /// Returns the smallest element greater than or equal to `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    /// assert_eq!(set.ceiling(&4), Some(&5));
    /// assert_eq!(set.ceiling(&5), Some(&5));
    /// assert_eq!(set.ceiling(&8), None);
    /// ```
    #[must_use]
    pub fn ceiling(&self, element: &T) -> Option<&T> {
        match self.search(element) {
            Ok(index) => self.delegate.get(index),
            Err(insertion_point) => self.delegate.get(insertion_point),
        }
    }

    /// Returns the smallest element strictly greater than `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    /// assert_eq!(set.higher(&3), Some(&5));
    /// assert_eq!(set.higher(&4), Some(&5));
    /// assert_eq!(set.higher(&7), None);
    /// ```
    #[must_use]
    pub fn higher(&self, element: &T) -> Option<&T> {
        match self.search(element) {
            Ok(index) => self.delegate.get(index + 1),
            Err(insertion_point) => self.delegate.get(insertion_point),
        }
    }

    /// Lexicographically compares this set against another ordered
    /// sequence using this set's comparator.
    ///
    /// Corresponding elements are compared until the first difference;
    /// if one sequence is exhausted first it compares lesser, so a strict
    /// prefix orders before any of its extensions.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 2]);
    /// let longer = SortedArraySet::from_elements(vec![1, 2, 3]);
    /// assert_eq!(set.compare_to(&longer), Ordering::Less);
    /// assert_eq!(longer.compare_to(&set), Ordering::Greater);
    /// assert_eq!(set.compare_to(&set), Ordering::Equal);
    /// ```
    #[must_use]
    pub fn compare_to<'other, I>(&self, other: I) -> Ordering
    where
        T: 'other,
        I: IntoIterator<Item = &'other T>,
    {
        let mut other_iterator = other.into_iter();
        for element in self.iter() {
            let Some(other_element) = other_iterator.next() else {
                return Ordering::Greater;
            };
            let ordering = self.comparator.compare(element, other_element);
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        if other_iterator.next().is_some() {
            Ordering::Less
        } else {
            Ordering::Equal
        }
    }

    /// Checks this set element-wise against another ordered sequence.
    ///
    /// Returns `true` iff both sequences have the same length and the
    /// predicate holds for every corresponding pair.
    pub fn corresponds<'other, S, I, P>(&self, other: I, mut predicate: P) -> bool
    where
        S: 'other,
        I: IntoIterator<Item = &'other S>,
        P: FnMut(&T, &S) -> bool,
    {
        let mut other_iterator = other.into_iter();
        for element in self.iter() {
            let Some(other_element) = other_iterator.next() else {
                return false;
            };
            if !predicate(element, other_element) {
                return false;
            }
        }
        other_iterator.next().is_none()
    }

    /// Applies `procedure` to every element in the logical range
    /// `[from_index, to_index)`.
    ///
    /// # Errors
    ///
    /// [`SortedSetError::InvalidRange`] if `from_index > to_index`,
    /// [`SortedSetError::OutOfBounds`] if `to_index > len`.
    pub fn for_each_in<F>(
        &self,
        from_index: usize,
        to_index: usize,
        procedure: F,
    ) -> Result<(), SortedSetError>
    where
        F: FnMut(&T),
    {
        check_range(from_index, to_index, self.len())?;
        self.delegate
            .iter_between(from_index, to_index)
            .for_each(procedure);
        Ok(())
    }

    /// Applies `procedure` to every element in `[from_index, to_index)`
    /// together with its absolute logical index.
    ///
    /// # Errors
    ///
    /// Same as [`for_each_in`](Self::for_each_in).
    pub fn for_each_with_index_in<F>(
        &self,
        from_index: usize,
        to_index: usize,
        mut procedure: F,
    ) -> Result<(), SortedSetError>
    where
        F: FnMut(usize, &T),
    {
        check_range(from_index, to_index, self.len())?;
        for (offset, element) in self
            .delegate
            .iter_between(from_index, to_index)
            .enumerate()
        {
            procedure(from_index + offset, element);
        }
        Ok(())
    }
}

// =============================================================================
// Range views
// =============================================================================

impl<T: Clone + Ord> SortedArraySet<T> {
    /// Resolves an element bound to the logical index of the first
    /// element belonging to the range starting there.
    fn resolve_from_bound(&self, element: &T, inclusive: bool) -> usize {
        match self.search(element) {
            Ok(index) => {
                if inclusive {
                    index
                } else {
                    index + 1
                }
            }
            Err(insertion_point) => insertion_point,
        }
    }

    /// Resolves an element bound to the logical index one past the last
    /// element belonging to the range ending there.
    fn resolve_to_bound(&self, element: &T, inclusive: bool) -> usize {
        match self.search(element) {
            Ok(index) => {
                if inclusive {
                    index + 1
                } else {
                    index
                }
            }
            Err(insertion_point) => insertion_point,
        }
    }

    /// Shared sub-range constructor: slices the delegate and reuses the
    /// comparator. Callers resolve indices within `[0, len]`.
    fn sub_range(&self, from_index: usize, to_index: usize) -> Self {
        if from_index == 0 && to_index == self.len() {
            return self.clone();
        }
        Self {
            delegate: self.delegate.slice_resolved(from_index, to_index),
            comparator: self.comparator.clone(),
        }
    }

    /// Returns the sub-set between two element bounds, each with its own
    /// inclusivity flag.
    ///
    /// A range spanning the whole set returns a buffer-sharing clone.
    ///
    /// # Errors
    ///
    /// [`SortedSetError::InvalidRange`] if the resolved bounds are
    /// inverted (the `from` bound falls after the `to` bound).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    /// let range = set.sub_set(&1, true, &5, false).unwrap();
    /// assert_eq!(range.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
    /// ```
    pub fn sub_set(
        &self,
        from_element: &T,
        from_inclusive: bool,
        to_element: &T,
        to_inclusive: bool,
    ) -> Result<Self, SortedSetError> {
        if self.is_empty() {
            return Ok(self.clone());
        }
        let from_index = self.resolve_from_bound(from_element, from_inclusive);
        let to_index = self.resolve_to_bound(to_element, to_inclusive);
        if from_index > to_index {
            return Err(SortedSetError::InvalidRange {
                from_index,
                to_index,
            });
        }
        Ok(self.sub_range(from_index, to_index))
    }

    /// Returns the sub-set of elements below `to_element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    /// let head = set.head_set(&5, true);
    /// assert_eq!(head.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
    /// ```
    #[must_use]
    pub fn head_set(&self, to_element: &T, inclusive: bool) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        self.sub_range(0, self.resolve_to_bound(to_element, inclusive))
    }

    /// Returns the sub-set of elements above `from_element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 3, 5, 7]);
    /// let tail = set.tail_set(&5, false);
    /// assert_eq!(tail.iter().copied().collect::<Vec<_>>(), vec![7]);
    /// ```
    #[must_use]
    pub fn tail_set(&self, from_element: &T, inclusive: bool) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        self.sub_range(
            self.resolve_from_bound(from_element, inclusive),
            self.len(),
        )
    }

    /// Returns the view of this set in reverse order: a reversed window
    /// plus a reversed comparator, both O(1).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 2, 3]);
    /// let descending = set.descending_set();
    /// assert_eq!(descending.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// assert_eq!(descending.first(), Some(&3));
    /// assert!(descending.descending_set() == set);
    /// ```
    #[must_use]
    pub fn descending_set(&self) -> Self {
        if self.is_empty() {
            return self.clone();
        }
        Self {
            delegate: self.delegate.reversed(),
            comparator: self.comparator.reversed(),
        }
    }

    /// Returns the first `count` elements as a sub-set.
    ///
    /// `count == 0` yields the canonical empty set with the same
    /// comparator; `count >= len` yields a buffer-sharing clone.
    #[must_use]
    pub fn take(&self, count: usize) -> Self {
        if count >= self.len() {
            return self.clone();
        }
        self.sub_range(0, count)
    }

    /// Returns the set without its first `count` elements.
    ///
    /// `count == 0` yields a buffer-sharing clone; `count >= len` yields
    /// the canonical empty set with the same comparator.
    #[must_use]
    pub fn drop(&self, count: usize) -> Self {
        if count == 0 {
            return self.clone();
        }
        if count >= self.len() {
            return Self::empty_with(self.comparator.clone());
        }
        self.sub_range(count, self.len())
    }
}

// =============================================================================
// Persistent updates and set algebra
// =============================================================================

impl<T: Clone + Ord> SortedArraySet<T> {
    /// Returns a set with `element` added at its insertion point.
    ///
    /// If an equal element is already present the result is a
    /// buffer-sharing clone of this set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 3]);
    /// let grown = set.insert(2);
    /// assert_eq!(grown.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(set.len(), 2);
    /// ```
    #[must_use]
    pub fn insert(&self, element: T) -> Self {
        match self.search(&element) {
            Ok(_) => self.clone(),
            Err(insertion_point) => {
                let mut elements = Vec::with_capacity(self.len() + 1);
                elements.extend(self.iter().take(insertion_point).cloned());
                elements.push(element);
                elements.extend(self.iter().skip(insertion_point).cloned());
                Self {
                    delegate: ArrayView::adapt(elements),
                    comparator: self.comparator.clone(),
                }
            }
        }
    }

    /// Returns a set without the element equal to `element`.
    ///
    /// If no such element is present the result is a buffer-sharing clone
    /// of this set.
    #[must_use]
    pub fn remove(&self, element: &T) -> Self {
        match self.search(element) {
            Err(_) => self.clone(),
            Ok(position) => {
                let mut elements = Vec::with_capacity(self.len() - 1);
                elements.extend(self.iter().take(position).cloned());
                elements.extend(self.iter().skip(position + 1).cloned());
                Self {
                    delegate: ArrayView::adapt(elements),
                    comparator: self.comparator.clone(),
                }
            }
        }
    }

    /// Returns `true` if the two logical sequences do not overlap under
    /// this set's ordering.
    fn is_disjoint_range(&self, other: &Self) -> bool {
        match (self.last(), other.first(), other.last(), self.first()) {
            (Some(self_last), Some(other_first), Some(other_last), Some(self_first)) => {
                self.comparator.compare(self_last, other_first) == Ordering::Less
                    || self.comparator.compare(other_last, self_first) == Ordering::Less
            }
            _ => true,
        }
    }

    /// Returns the union of both sets under this set's ordering.
    ///
    /// Both operands must be ordered compatibly; the other operand's
    /// logical sequence is walked as-is. O(n + m), with a concatenation
    /// fast path when the ranges do not overlap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::SortedArraySet;
    ///
    /// let left = SortedArraySet::from_elements(vec![1, 3, 5]);
    /// let right = SortedArraySet::from_elements(vec![2, 3, 4]);
    /// let union = left.union(&right);
    /// assert_eq!(union.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
    /// ```
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return Self {
                delegate: other.delegate.clone(),
                comparator: self.comparator.clone(),
            };
        }

        let mut elements = Vec::with_capacity(self.len() + other.len());

        // Disjoint fast path: the ranges do not overlap, so the result is
        // one sequence concatenated after the other.
        if let (Some(self_first), Some(self_last), Some(other_first), Some(other_last)) =
            (self.first(), self.last(), other.first(), other.last())
        {
            if self.comparator.compare(self_last, other_first) == Ordering::Less {
                elements.extend(self.iter().cloned());
                elements.extend(other.iter().cloned());
                return Self {
                    delegate: ArrayView::adapt(elements),
                    comparator: self.comparator.clone(),
                };
            }
            if self.comparator.compare(other_last, self_first) == Ordering::Less {
                elements.extend(other.iter().cloned());
                elements.extend(self.iter().cloned());
                return Self {
                    delegate: ArrayView::adapt(elements),
                    comparator: self.comparator.clone(),
                };
            }
        }

        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        while let (Some(&left_element), Some(&right_element)) = (left.peek(), right.peek()) {
            match self.comparator.compare(left_element, right_element) {
                Ordering::Less => {
                    elements.push(left_element.clone());
                    left.next();
                }
                Ordering::Greater => {
                    elements.push(right_element.clone());
                    right.next();
                }
                Ordering::Equal => {
                    elements.push(left_element.clone());
                    left.next();
                    right.next();
                }
            }
        }
        elements.extend(left.cloned());
        elements.extend(right.cloned());

        Self {
            delegate: ArrayView::adapt(elements),
            comparator: self.comparator.clone(),
        }
    }

    /// Returns the intersection of both sets under this set's ordering.
    ///
    /// O(n + m); disjoint ranges short-circuit to the empty set.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() || self.is_disjoint_range(other) {
            return Self::empty_with(self.comparator.clone());
        }

        let mut elements = Vec::with_capacity(self.len().min(other.len()));
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        while let (Some(&left_element), Some(&right_element)) = (left.peek(), right.peek()) {
            match self.comparator.compare(left_element, right_element) {
                Ordering::Less => {
                    left.next();
                }
                Ordering::Greater => {
                    right.next();
                }
                Ordering::Equal => {
                    elements.push(left_element.clone());
                    left.next();
                    right.next();
                }
            }
        }

        Self {
            delegate: ArrayView::adapt(elements),
            comparator: self.comparator.clone(),
        }
    }

    /// Returns the elements of this set absent from `other`, under this
    /// set's ordering.
    ///
    /// O(n + m); disjoint ranges short-circuit to a clone of this set.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() || self.is_disjoint_range(other) {
            return self.clone();
        }

        let mut elements = Vec::with_capacity(self.len());
        let mut left = self.iter().peekable();
        let mut right = other.iter().peekable();
        while let (Some(&left_element), Some(&right_element)) = (left.peek(), right.peek()) {
            match self.comparator.compare(left_element, right_element) {
                Ordering::Less => {
                    elements.push(left_element.clone());
                    left.next();
                }
                Ordering::Greater => {
                    right.next();
                }
                Ordering::Equal => {
                    left.next();
                    right.next();
                }
            }
        }
        elements.extend(left.cloned());

        Self {
            delegate: ArrayView::adapt(elements),
            comparator: self.comparator.clone(),
        }
    }
}

// =============================================================================
// Crate-internal access
// =============================================================================

impl<T> SortedArraySet<T> {
    /// The windowed view this set reads through.
    pub(crate) const fn view(&self) -> &ArrayView<T> {
        &self.delegate
    }

    /// Returns `true` if both sets alias the same backing buffer.
    #[cfg(test)]
    pub(crate) fn shares_buffer_with(&self, other: &Self) -> bool {
        self.delegate.shares_buffer_with(&other.delegate)
    }
}

// =============================================================================
// Trait implementations
// =============================================================================

impl<T> Clone for SortedArraySet<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            delegate: self.delegate.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: Clone + Ord + fmt::Debug> fmt::Debug for SortedArraySet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Clone + Ord> PartialEq for SortedArraySet<T> {
    /// Order-independent membership equality: two sets are equal iff they
    /// have the same size and every element of one is contained in the
    /// other.
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|element| other.contains(element))
    }
}

impl<T: Clone + Ord> Eq for SortedArraySet<T> {}

impl<T: Clone + Ord + Hash> Hash for SortedArraySet<T> {
    /// Order-independent hash: the wrapping sum of the elements' hashes,
    /// consistent with the membership-based equality.
    fn hash<H: Hasher>(&self, state: &mut H) {
        let sum = self.iter().fold(0_u64, |accumulator, element| {
            let mut hasher = DefaultHasher::new();
            element.hash(&mut hasher);
            accumulator.wrapping_add(hasher.finish())
        });
        state.write_u64(sum);
    }
}

impl<'a, T: Clone + Ord> IntoIterator for &'a SortedArraySet<T> {
    type Item = &'a T;
    type IntoIter = ArrayViewIterator<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Clone + Ord> IntoIterator for SortedArraySet<T> {
    type Item = T;
    type IntoIter = SortedArraySetIntoIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        let back = self.len();
        SortedArraySetIntoIterator {
            view: self.delegate,
            front: 0,
            back,
        }
    }
}

/// Owning iterator over a [`SortedArraySet`].
///
/// Elements are cloned out of the shared backing buffer in logical order.
pub struct SortedArraySetIntoIterator<T> {
    view: ArrayView<T>,
    front: usize,
    back: usize,
}

impl<T: Clone> Iterator for SortedArraySetIntoIterator<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let element = self.view.get(self.front).cloned();
        self.front += 1;
        element
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<T: Clone> DoubleEndedIterator for SortedArraySetIntoIterator<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        self.view.get(self.back).cloned()
    }
}

impl<T: Clone> ExactSizeIterator for SortedArraySetIntoIterator<T> {
    #[inline]
    fn len(&self) -> usize {
        self.back - self.front
    }
}

impl<T: Clone> FusedIterator for SortedArraySetIntoIterator<T> {}
