//! Ordering strategies for sorted sets.
//!
//! [`Comparator`] makes the ordering of a set an explicit value carried
//! alongside the data instead of a per-comparison type probe: a set either
//! uses the natural `Ord` order of its elements (checked by the compiler
//! at construction) or a supplied comparison function, and either form can
//! be reversed. Reversing twice restores the original strategy, which is
//! what lets a descending set of a descending set compare equal to the
//! original in both content and order.
//!
//! # Examples
//!
//! ```rust
//! use std::cmp::Ordering;
//! use ordset::Comparator;
//!
//! let natural: Comparator<i32> = Comparator::natural();
//! assert_eq!(natural.compare(&1, &2), Ordering::Less);
//!
//! let by_length: Comparator<String> =
//!     Comparator::by(|left: &String, right: &String| left.len().cmp(&right.len()));
//! let ordering = by_length.compare(&"aa".to_string(), &"b".to_string());
//! assert_eq!(ordering, Ordering::Greater);
//!
//! let descending = natural.reversed();
//! assert_eq!(descending.compare(&1, &2), Ordering::Greater);
//! assert_eq!(descending.reversed().compare(&1, &2), Ordering::Less);
//! ```

use std::cmp::Ordering;
use std::fmt;

use crate::ReferenceCounter;

/// Comparison function stored by [`Comparator::by`].
///
/// With the `arc` feature the function must be `Send + Sync` so that sets
/// holding it can cross threads.
#[cfg(feature = "arc")]
pub(crate) type CompareFn<T> = dyn Fn(&T, &T) -> Ordering + Send + Sync;

#[cfg(not(feature = "arc"))]
pub(crate) type CompareFn<T> = dyn Fn(&T, &T) -> Ordering;

/// The two ways a set can order its elements.
enum Strategy<T> {
    /// Delegate to the `Ord` implementation of the element type.
    Natural,
    /// Apply a shared comparison function.
    By(ReferenceCounter<CompareFn<T>>),
}

impl<T> Clone for Strategy<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Natural => Self::Natural,
            Self::By(compare) => Self::By(compare.clone()),
        }
    }
}

/// An explicit, optionally reversed ordering strategy.
///
/// Cloning is O(1): the supplied comparison function, if any, is shared.
pub struct Comparator<T> {
    strategy: Strategy<T>,
    reversed: bool,
}

impl<T> Comparator<T> {
    /// Creates the natural-order strategy.
    ///
    /// The `T: Ord` bound is the construction-time capability check: a set
    /// without a supplied comparison function can only be built from
    /// elements with a total natural order.
    #[inline]
    #[must_use]
    pub const fn natural() -> Self
    where
        T: Ord,
    {
        Self {
            strategy: Strategy::Natural,
            reversed: false,
        }
    }

    /// Creates a strategy from a comparison function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    /// use ordset::Comparator;
    ///
    /// let reverse_i32 = Comparator::by(|left: &i32, right: &i32| right.cmp(left));
    /// assert_eq!(reverse_i32.compare(&1, &2), Ordering::Greater);
    /// ```
    #[cfg(feature = "arc")]
    #[must_use]
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + Send + Sync + 'static,
    {
        Self {
            strategy: Strategy::By(ReferenceCounter::new(compare)),
            reversed: false,
        }
    }

    /// Creates a strategy from a comparison function.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::cmp::Ordering;
    /// use ordset::Comparator;
    ///
    /// let reverse_i32 = Comparator::by(|left: &i32, right: &i32| right.cmp(left));
    /// assert_eq!(reverse_i32.compare(&1, &2), Ordering::Greater);
    /// ```
    #[cfg(not(feature = "arc"))]
    #[must_use]
    pub fn by<F>(compare: F) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        Self {
            strategy: Strategy::By(ReferenceCounter::new(compare)),
            reversed: false,
        }
    }

    /// Returns the same strategy with its direction flipped.
    ///
    /// Reversing twice yields the original ordering.
    #[inline]
    #[must_use]
    pub fn reversed(&self) -> Self {
        Self {
            strategy: self.strategy.clone(),
            reversed: !self.reversed,
        }
    }

    /// Returns `true` if this strategy delegates to the natural order.
    #[inline]
    #[must_use]
    pub const fn is_natural(&self) -> bool {
        matches!(self.strategy, Strategy::Natural)
    }

    /// Returns `true` if this strategy runs in reverse direction.
    #[inline]
    #[must_use]
    pub const fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Compares two elements under this strategy.
    #[inline]
    #[must_use]
    pub fn compare(&self, left: &T, right: &T) -> Ordering
    where
        T: Ord,
    {
        let ordering = match &self.strategy {
            Strategy::Natural => left.cmp(right),
            Strategy::By(compare) => compare(left, right),
        };
        if self.reversed {
            ordering.reverse()
        } else {
            ordering
        }
    }
}

impl<T> Clone for Comparator<T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            strategy: self.strategy.clone(),
            reversed: self.reversed,
        }
    }
}

impl<T: Ord> Default for Comparator<T> {
    #[inline]
    fn default() -> Self {
        Self::natural()
    }
}

impl<T> fmt::Debug for Comparator<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let strategy = match self.strategy {
            Strategy::Natural => "natural",
            Strategy::By(_) => "by",
        };
        formatter
            .debug_struct("Comparator")
            .field("strategy", &strategy)
            .field("reversed", &self.reversed)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Greater)]
    fn test_natural_compare(#[case] left: i32, #[case] right: i32, #[case] expected: Ordering) {
        let comparator = Comparator::natural();
        assert_eq!(comparator.compare(&left, &right), expected);
    }

    #[rstest]
    fn test_by_compare() {
        let by_length =
            Comparator::by(|left: &&str, right: &&str| left.len().cmp(&right.len()));
        assert_eq!(by_length.compare(&"aa", &"b"), Ordering::Greater);
        assert_eq!(by_length.compare(&"a", &"b"), Ordering::Equal);
    }

    #[rstest]
    fn test_reversed_flips_ordering() {
        let descending: Comparator<i32> = Comparator::natural().reversed();
        assert_eq!(descending.compare(&1, &2), Ordering::Greater);
        assert!(descending.is_reversed());
    }

    #[rstest]
    fn test_double_reversal_restores_ordering() {
        let comparator: Comparator<i32> = Comparator::natural().reversed().reversed();
        assert_eq!(comparator.compare(&1, &2), Ordering::Less);
        assert!(!comparator.is_reversed());
    }

    #[rstest]
    fn test_is_natural() {
        assert!(Comparator::<i32>::natural().is_natural());
        assert!(Comparator::<i32>::natural().reversed().is_natural());
        assert!(!Comparator::by(|left: &i32, right: &i32| left.cmp(right)).is_natural());
    }

    #[rstest]
    fn test_debug_names_strategy() {
        let debug = format!("{:?}", Comparator::<i32>::natural());
        assert!(debug.contains("natural"));
        assert!(debug.contains("reversed: false"));
    }
}
