//! Core traits and types for gallopsort.
//!
//! This module defines:
//! - [`ValueAccessor`]: The trait users implement to sort positions of their own collections.
//! - [`SortOptions`]: Per-call tuning of the run and merge machinery.
//! - Run / RunStack: Internal bookkeeping for pending runs.

use crate::error::SortError;
use cuneiform::cuneiform;
use std::collections::VecDeque;
use std::num::NonZeroUsize;
use std::ops::Index;

/// Arrays shorter than this are sorted as a single run extended by binary insertion sort.
///
/// The computed minimum run length always falls in `MIN_MERGE / 2..=MIN_MERGE`.
pub const MIN_MERGE: usize = 32;

/// Initial galloping threshold of every sort call.
pub const DEFAULT_MIN_GALLOP: usize = 32;

/// Streak length a side must keep winning for the merge to stay in galloping mode.
pub(crate) const MIN_GALLOP: usize = 7;

/// Capacity of the run stack.
///
/// Stack lengths grow at least as fast as the Fibonacci numbers, so even unit-length runs
/// (`min_run == 1`) on a slice of `usize::MAX` elements stay well below this.
pub(crate) const MAX_PENDING_RUNS: usize = 128;

/// A contiguous non-descending region `start..start + len` of the slice being sorted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Run {
    pub start: usize,
    pub len: usize,
}

impl Run {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }
}

/// Fixed-capacity stack of runs that have been found but not yet merged.
///
/// Adjacent entries always describe adjacent slice regions, leftmost at the bottom.
#[cuneiform]
pub(crate) struct RunStack {
    runs: [Run; MAX_PENDING_RUNS],
    len: usize,
}

impl RunStack {
    pub fn new() -> Self {
        RunStack {
            runs: [Run::default(); MAX_PENDING_RUNS],
            len: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Pushes a run that starts where the current top run ends.
    pub fn push(&mut self, run: Run) {
        debug_assert!(run.len > 0);
        debug_assert!(self.is_empty() || self.runs[self.len - 1].end() == run.start);
        assert!(self.len < MAX_PENDING_RUNS, "run stack overflow");
        self.runs[self.len] = run;
        self.len += 1;
    }

    /// Replaces entries `i` and `i + 1` with a single run covering both.
    ///
    /// Returns the two runs as they were before combining. Only the two topmost pairs
    /// (`i == len - 2` or `i == len - 3`) are ever combined.
    pub fn combine(&mut self, i: usize) -> (Run, Run) {
        debug_assert!(self.len >= 2 && (i == self.len - 2 || i == self.len - 3));
        let left = self.runs[i];
        let right = self.runs[i + 1];
        debug_assert_eq!(left.end(), right.start);

        self.runs[i] = Run {
            start: left.start,
            len: left.len + right.len,
        };
        if i + 3 == self.len {
            self.runs[i + 1] = self.runs[i + 2];
        }
        self.len -= 1;

        (left, right)
    }

    /// Removes the last remaining run once everything has been merged.
    pub fn pop(&mut self) -> Option<Run> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.runs[self.len])
    }
}

impl Index<usize> for RunStack {
    type Output = Run;

    #[inline]
    fn index(&self, index: usize) -> &Run {
        &self.runs[..self.len][index]
    }
}

/// Tuning knobs for a single sort call.
///
/// The defaults are what [`sort_by`](crate::algo::sort_by) uses. Overriding `min_run` is
/// mostly useful to drive the run and merge machinery deterministically on small inputs.
///
/// # Examples
///
/// ```
/// use gallopsort::{SortOptions, sort_by_with_options};
///
/// let options = SortOptions::new().with_min_run(3).unwrap();
/// let mut data = vec![5, 4, 3, 2, 1, 10, 9, 8, 7, 6];
/// sort_by_with_options(&mut data, |a, b| a.cmp(b), &options);
///
/// assert_eq!(data, (1..=10).collect::<Vec<_>>());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortOptions {
    min_run: Option<NonZeroUsize>,
    min_gallop: NonZeroUsize,
}

impl SortOptions {
    pub const fn new() -> Self {
        SortOptions {
            min_run: None,
            min_gallop: match NonZeroUsize::new(DEFAULT_MIN_GALLOP) {
                Some(v) => v,
                None => panic!("DEFAULT_MIN_GALLOP must be non-zero"),
            },
        }
    }

    /// Overrides the computed minimum run length.
    ///
    /// Returns [`SortError::InvalidMinRun`] for `0`.
    pub fn with_min_run(mut self, min_run: usize) -> Result<Self, SortError> {
        let min_run = NonZeroUsize::new(min_run).ok_or(SortError::InvalidMinRun(min_run))?;
        self.min_run = Some(min_run);
        Ok(self)
    }

    /// Sets the initial galloping threshold.
    ///
    /// Returns [`SortError::InvalidMinGallop`] for `0`.
    pub fn with_min_gallop(mut self, min_gallop: usize) -> Result<Self, SortError> {
        self.min_gallop =
            NonZeroUsize::new(min_gallop).ok_or(SortError::InvalidMinGallop(min_gallop))?;
        Ok(self)
    }

    /// The caller-supplied minimum run length, if any.
    pub fn min_run(&self) -> Option<usize> {
        self.min_run.map(NonZeroUsize::get)
    }

    pub fn min_gallop(&self) -> usize {
        self.min_gallop.get()
    }
}

impl Default for SortOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// A trait for reading values out of a collection by position.
///
/// This allows [`argsort_by`](crate::algo::argsort_by) to order any random-access store
/// (e.g., `Vec<Row>`, `VecDeque<T>`, or a columnar buffer) by producing a permutation of
/// its positions, without moving or copying the stored values.
///
/// # Examples
///
/// Implementing for a column of strings packed into one buffer:
///
/// ```
/// use gallopsort::core::ValueAccessor;
///
/// struct Column {
///     data: String,
///     offsets: Vec<usize>,
/// }
///
/// impl ValueAccessor for Column {
///     type Value = str;
///
///     fn value(&self, index: usize) -> &str {
///         &self.data[self.offsets[index]..self.offsets[index + 1]]
///     }
///
///     fn len(&self) -> usize {
///         self.offsets.len() - 1
///     }
/// }
/// ```
pub trait ValueAccessor {
    /// The type of value stored at each position.
    type Value: ?Sized;

    /// Returns the value at the given position.
    fn value(&self, index: usize) -> &Self::Value;

    /// Returns the number of positions in the collection.
    fn len(&self) -> usize;

    /// Returns `true` if the collection is empty.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> ValueAccessor for [T] {
    type Value = T;

    fn value(&self, index: usize) -> &T {
        &self[index]
    }

    fn len(&self) -> usize {
        self.len()
    }
}

// Explicit Vec impl so callers can pass `&vec` without `.as_slice()`.
impl<T> ValueAccessor for Vec<T> {
    type Value = T;

    fn value(&self, index: usize) -> &T {
        &self[index]
    }

    fn len(&self) -> usize {
        self.len()
    }
}

impl<T> ValueAccessor for VecDeque<T> {
    type Value = T;

    fn value(&self, index: usize) -> &T {
        &self[index]
    }

    fn len(&self) -> usize {
        self.len()
    }
}
