//! Error types for sorted-set construction and range access.
//!
//! Every failure in this crate is immediate and leaves the operation
//! without effect: constructors reject invalid input before any buffer is
//! published, and range operations validate their bounds before touching
//! the underlying view. Recovery policy is entirely the caller's.

use std::fmt;

/// Errors raised by sorted-set construction and range operations.
///
/// Two of the failure modes of the original design are unrepresentable
/// here and therefore have no variant: elements cannot be null, and
/// natural ordering is a compile-time capability
/// ([`Comparator::natural`](crate::Comparator::natural) requires
/// `T: Ord`).
///
/// # Examples
///
/// ```rust
/// use ordset::{SortedArraySet, SortedSetError};
///
/// let result: Result<SortedArraySet<i32>, _> =
///     SortedArraySet::from_sorted_vec(vec![1, 3, 2]);
/// assert_eq!(result.unwrap_err(), SortedSetError::Unsorted { position: 2 });
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortedSetError {
    /// Input asserted to be pre-sorted and unique broke strict
    /// monotonicity, e.g. because the source was mutated between snapshot
    /// and adoption.
    Unsorted {
        /// Index of the first element that is not strictly greater than
        /// its predecessor.
        position: usize,
    },
    /// A logical index or range end exceeded the collection size.
    OutOfBounds {
        /// The offending logical index.
        index: usize,
        /// The size of the collection at the time of the call.
        size: usize,
    },
    /// A range was given with its start after its end.
    InvalidRange {
        /// Start of the requested range (inclusive).
        from_index: usize,
        /// End of the requested range (exclusive).
        to_index: usize,
    },
    /// Batch splitting was requested with a batch size of zero.
    InvalidBatchSize,
}

impl fmt::Display for SortedSetError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unsorted { position } => write!(
                formatter,
                "input expected to be sorted and unique, but was not at position {position}"
            ),
            Self::OutOfBounds { index, size } => {
                write!(formatter, "index: {index}, size: {size}")
            }
            Self::InvalidRange {
                from_index,
                to_index,
            } => write!(
                formatter,
                "from_index({from_index}) > to_index({to_index})"
            ),
            Self::InvalidBatchSize => {
                write!(formatter, "batch size must be at least 1")
            }
        }
    }
}

impl std::error::Error for SortedSetError {}

/// Validates a half-open logical range `[from_index, to_index)` against a
/// collection of `size` elements.
pub(crate) const fn check_range(
    from_index: usize,
    to_index: usize,
    size: usize,
) -> Result<(), SortedSetError> {
    if from_index > to_index {
        return Err(SortedSetError::InvalidRange {
            from_index,
            to_index,
        });
    }
    if to_index > size {
        return Err(SortedSetError::OutOfBounds {
            index: to_index,
            size,
        });
    }
    Ok(())
}
