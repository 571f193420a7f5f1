//! Batch decomposition for parallel reduction.
//!
//! [`SortedArraySet::batches`] partitions a set into contiguous
//! index-range batches: a lazy, finite, restartable sequence of
//! [`SortedSetBatch`] descriptors covering `[0, len)` exactly, with no
//! gaps and no overlaps, in ascending index order. Each batch reads
//! straight out of the parent set's shared buffer; nothing is copied and
//! nothing is materialized until a reduction runs.
//!
//! Scheduling is deliberately left outside: a batch is a plain value that
//! any executor may process on any thread (with the `arc` feature batches
//! are `Send + Sync` whenever the element type is). The crate only
//! guarantees how the work is split. Under the `rayon` feature,
//! [`SortedArraySet::par_iter`] and [`SortedArraySet::par_batches`] bridge
//! the same decomposition onto rayon's scheduler.
//!
//! The [`Batch`] trait carries the reduction surface shared by every
//! batch kind. Structural operations compose lazily, like `Iterator`
//! adapters: [`select`](Batch::select) narrows a batch by a predicate,
//! [`collect`](Batch::collect) transforms its elements, and
//! [`flat_collect`](Batch::flat_collect) expands each element into a
//! sequence, all without touching the data until a reduction such as
//! [`count`](Batch::count) or [`detect`](Batch::detect) drives them.
//!
//! # Examples
//!
//! ```rust
//! use ordset::prelude::*;
//!
//! let set = SortedArraySet::from_elements(vec![1, 2, 3, 4, 5]);
//!
//! let batches: Vec<_> = set.batches(2).unwrap().collect();
//! assert_eq!(batches.len(), 3);
//! assert_eq!(batches[2].start_index(), 4);
//!
//! // Reductions run directly against the shared buffer.
//! let even_count: usize = batches
//!     .iter()
//!     .map(|batch| batch.count(|element| *element % 2 == 0))
//!     .sum();
//! assert_eq!(even_count, 2);
//! ```

use std::fmt;
use std::iter::FusedIterator;

use crate::error::SortedSetError;
use crate::set::SortedArraySet;

/// The reduction surface shared by every batch kind.
///
/// A batch is a read-only descriptor: a reference into its parent set
/// plus whatever operation parameters were attached along the way. All
/// methods traverse the underlying storage on demand.
pub trait Batch {
    /// The value produced per element when this batch is traversed.
    type Item;

    /// Traverses the batch in logical order.
    fn iter(&self) -> impl Iterator<Item = Self::Item> + '_;

    /// Applies `procedure` to every element of the batch.
    fn for_each<F>(&self, procedure: F)
    where
        F: FnMut(Self::Item),
    {
        self.iter().for_each(procedure);
    }

    /// Counts the elements satisfying the predicate.
    fn count<P>(&self, mut predicate: P) -> usize
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().filter(|item| predicate(item)).count()
    }

    /// Returns `true` if any element satisfies the predicate.
    fn any_satisfy<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().any(|item| predicate(&item))
    }

    /// Returns `true` if every element satisfies the predicate.
    fn all_satisfy<P>(&self, mut predicate: P) -> bool
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().all(|item| predicate(&item))
    }

    /// Returns the first element satisfying the predicate.
    fn detect<P>(&self, mut predicate: P) -> Option<Self::Item>
    where
        P: FnMut(&Self::Item) -> bool,
    {
        self.iter().find(|item| predicate(item))
    }

    /// Narrows this batch to the elements satisfying the predicate.
    ///
    /// Lazy: the predicate is stored, not applied.
    #[must_use]
    fn select<P>(self, predicate: P) -> SelectBatch<Self, P>
    where
        Self: Sized,
        P: Fn(&Self::Item) -> bool,
    {
        SelectBatch {
            batch: self,
            predicate,
        }
    }

    /// Transforms this batch element-wise.
    ///
    /// Lazy: the function is stored, not applied.
    #[must_use]
    fn collect<V, F>(self, function: F) -> CollectBatch<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> V,
    {
        CollectBatch {
            batch: self,
            function,
        }
    }

    /// Expands every element of this batch into a sequence.
    ///
    /// Lazy: the function is stored, not applied.
    #[must_use]
    fn flat_collect<I, F>(self, function: F) -> FlatCollectBatch<Self, F>
    where
        Self: Sized,
        F: Fn(Self::Item) -> I,
        I: IntoIterator,
    {
        FlatCollectBatch {
            batch: self,
            function,
        }
    }
}

// =============================================================================
// Root batches over a sorted set
// =============================================================================

/// A contiguous logical index range `[start_index, end_index)` of a
/// [`SortedArraySet`], processed as one unit of parallel work.
pub struct SortedSetBatch<'a, T> {
    set: &'a SortedArraySet<T>,
    start_index: usize,
    end_index: usize,
}

impl<T: Clone + Ord> SortedSetBatch<'_, T> {
    /// First logical index covered by this batch (inclusive).
    #[inline]
    #[must_use]
    pub const fn start_index(&self) -> usize {
        self.start_index
    }

    /// One past the last logical index covered by this batch.
    #[inline]
    #[must_use]
    pub const fn end_index(&self) -> usize {
        self.end_index
    }

    /// Number of elements covered by this batch.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end_index - self.start_index
    }

    /// Returns `true` if the batch covers no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_index == self.end_index
    }

    /// Deduplication is a no-op: the parent set's invariant already
    /// guarantees uniqueness.
    #[inline]
    #[must_use]
    pub const fn distinct(self) -> Self {
        self
    }
}

impl<'a, T: Clone + Ord> Batch for SortedSetBatch<'a, T> {
    type Item = &'a T;

    fn iter(&self) -> impl Iterator<Item = &'a T> + '_ {
        self.set.view().iter_between(self.start_index, self.end_index)
    }
}

impl<T> Clone for SortedSetBatch<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SortedSetBatch<'_, T> {}

impl<T> fmt::Debug for SortedSetBatch<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SortedSetBatch")
            .field("start_index", &self.start_index)
            .field("end_index", &self.end_index)
            .finish()
    }
}

// =============================================================================
// Structural adapters
// =============================================================================

/// Lazy batch narrowed by a predicate. See [`Batch::select`].
pub struct SelectBatch<B, P> {
    batch: B,
    predicate: P,
}

impl<B, P> Batch for SelectBatch<B, P>
where
    B: Batch,
    P: Fn(&B::Item) -> bool,
{
    type Item = B::Item;

    fn iter(&self) -> impl Iterator<Item = B::Item> + '_ {
        self.batch.iter().filter(|item| (self.predicate)(item))
    }
}

/// Lazy batch transformed element-wise. See [`Batch::collect`].
pub struct CollectBatch<B, F> {
    batch: B,
    function: F,
}

impl<B, V, F> Batch for CollectBatch<B, F>
where
    B: Batch,
    F: Fn(B::Item) -> V,
{
    type Item = V;

    fn iter(&self) -> impl Iterator<Item = V> + '_ {
        self.batch.iter().map(|item| (self.function)(item))
    }
}

/// Lazy batch expanding each element into a sequence. See
/// [`Batch::flat_collect`].
pub struct FlatCollectBatch<B, F> {
    batch: B,
    function: F,
}

impl<B, I, F> Batch for FlatCollectBatch<B, F>
where
    B: Batch,
    F: Fn(B::Item) -> I,
    I: IntoIterator + 'static,
{
    type Item = I::Item;

    fn iter(&self) -> impl Iterator<Item = I::Item> + '_ {
        self.batch.iter().flat_map(|item| (self.function)(item))
    }
}

// =============================================================================
// The splitter
// =============================================================================

/// Lazy, finite, restartable sequence of [`SortedSetBatch`]es.
///
/// Batch `i` covers `[i * batch_size, min((i + 1) * batch_size, len))`;
/// iteration stops once the start index reaches the set length, so the
/// yielded batches partition `[0, len)` exactly. The sequence is
/// restartable: a clone keeps its own position, so cloning before
/// consumption yields the same batches again.
pub struct Batches<'a, T> {
    set: &'a SortedArraySet<T>,
    batch_size: usize,
    chunk_index: usize,
}

impl<'a, T: Clone + Ord> Iterator for Batches<'a, T> {
    type Item = SortedSetBatch<'a, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let start_index = self.chunk_index * self.batch_size;
        if start_index >= self.set.len() {
            return None;
        }
        self.chunk_index += 1;
        Some(SortedSetBatch {
            set: self.set,
            start_index,
            end_index: (start_index + self.batch_size).min(self.set.len()),
        })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self
            .set
            .len()
            .div_ceil(self.batch_size)
            .saturating_sub(self.chunk_index);
        (remaining, Some(remaining))
    }
}

impl<T: Clone + Ord> ExactSizeIterator for Batches<'_, T> {}

impl<T: Clone + Ord> FusedIterator for Batches<'_, T> {}

impl<T> Clone for Batches<'_, T> {
    #[inline]
    fn clone(&self) -> Self {
        Self {
            set: self.set,
            batch_size: self.batch_size,
            chunk_index: self.chunk_index,
        }
    }
}

impl<T> fmt::Debug for Batches<'_, T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Batches")
            .field("batch_size", &self.batch_size)
            .field("chunk_index", &self.chunk_index)
            .finish()
    }
}

impl<T: Clone + Ord> SortedArraySet<T> {
    /// Splits the set into contiguous batches of `batch_size` elements
    /// (the last batch may be shorter) for parallel reduction.
    ///
    /// The returned sequence is lazy and restartable; combining partial
    /// results across batches is the caller's concern.
    ///
    /// # Errors
    ///
    /// [`SortedSetError::InvalidBatchSize`] if `batch_size` is zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ordset::prelude::*;
    ///
    /// let set = SortedArraySet::from_elements(vec![1, 2, 3, 4, 5]);
    /// let bounds: Vec<_> = set
    ///     .batches(2)
    ///     .unwrap()
    ///     .map(|batch| (batch.start_index(), batch.end_index()))
    ///     .collect();
    /// assert_eq!(bounds, vec![(0, 2), (2, 4), (4, 5)]);
    /// ```
    pub fn batches(&self, batch_size: usize) -> Result<Batches<'_, T>, SortedSetError> {
        if batch_size == 0 {
            return Err(SortedSetError::InvalidBatchSize);
        }
        Ok(Batches {
            set: self,
            batch_size,
            chunk_index: 0,
        })
    }
}

// =============================================================================
// Rayon bridges
// =============================================================================

#[cfg(feature = "rayon")]
mod parallel {
    use rayon::iter::Either;
    use rayon::prelude::*;

    use super::{Batches, SortedSetBatch};
    use crate::error::SortedSetError;
    use crate::set::SortedArraySet;

    impl<T> SortedArraySet<T>
    where
        T: Clone + Ord + Sync + Send,
    {
        /// Returns a rayon parallel iterator over the elements in logical
        /// order.
        ///
        /// Backward windows (descending sets) are handled by reversing the
        /// parallel traversal of the physical slice.
        pub fn par_iter(&self) -> impl IndexedParallelIterator<Item = &T> {
            let (physical, backward) = self.view().physical_slice();
            if backward {
                Either::Left(physical.par_iter().rev())
            } else {
                Either::Right(physical.par_iter())
            }
        }

        /// Splits the set into batches and hands them to rayon's
        /// scheduler.
        ///
        /// Equivalent to [`batches`](SortedArraySet::batches), but the
        /// resulting descriptors are produced by a parallel iterator so
        /// reduction can fan out without an intermediate collection.
        ///
        /// # Errors
        ///
        /// [`SortedSetError::InvalidBatchSize`] if `batch_size` is zero.
        pub fn par_batches(
            &self,
            batch_size: usize,
        ) -> Result<impl IndexedParallelIterator<Item = SortedSetBatch<'_, T>>, SortedSetError>
        {
            let sequential: Batches<'_, T> = self.batches(batch_size)?;
            let batch_count = sequential.len();
            Ok((0..batch_count).into_par_iter().map(move |chunk_index| {
                let start_index = chunk_index * batch_size;
                SortedSetBatch {
                    set: self,
                    start_index,
                    end_index: (start_index + batch_size).min(self.len()),
                }
            }))
        }
    }
}
