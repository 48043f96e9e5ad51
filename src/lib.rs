//! # Gallopsort
//!
//! `gallopsort` is an adaptive, stable, comparison-based sort for large in-memory
//! collections, such as the rows of a table being sorted by a column.
//!
//! It belongs to the run-detection / galloping-merge family of algorithms: the input is
//! split into naturally ordered runs, short runs are extended with binary insertion sort,
//! and runs are merged pairwise under a stack discipline that keeps merges balanced.
//!
//! ## Key Features
//!
//! - **Stable**: elements the comparator considers equal keep their input order.
//! - **Adaptive**: sorted and strictly descending input take a single linear pass, and
//!   partially ordered input is merged rather than re-sorted.
//! - **Galloping merges**: when one run keeps winning, whole blocks are located with an
//!   exponential search and moved at once.
//! - **Index sorting**: [`sort_indices`] and [`argsort_by`] order positions of an external
//!   collection without relocating the records themselves.
//! - **Panic safe**: a panicking comparator leaves the slice a permutation of its input.
//!
//! ## Usage
//!
//! ### Sorting a slice
//!
//! ```rust
//! use gallopsort::sort_by;
//!
//! let mut rows = vec![(2, "a"), (1, "b"), (2, "c"), (1, "d")];
//! sort_by(&mut rows, |a, b| a.0.cmp(&b.0));
//!
//! assert_eq!(rows, vec![(1, "b"), (1, "d"), (2, "a"), (2, "c")]);
//! ```
//!
//! ### Sorting positions
//!
//! To order records that are expensive to move, sort their positions instead. Either pass
//! an accessor closure to [`sort_indices`], or implement [`ValueAccessor`] for the
//! collection and call [`argsort_by`].
//!
//! ```rust
//! use gallopsort::{argsort, sort_indices};
//!
//! let names = vec!["Charlie", "Alice", "Bob"];
//!
//! let mut indices = vec![0, 1, 2];
//! sort_indices(&mut indices, |i| names[i], |a, b| a.cmp(b));
//! assert_eq!(indices, vec![1, 2, 0]);
//!
//! assert_eq!(argsort(&names), vec![1, 2, 0]);
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Best Case**: O(N) comparisons for sorted or strictly descending input.
//! - **Worst Case**: O(N log N) comparisons.
//! - **Memory Overhead**: a scratch buffer of at most `N / 2` elements, allocated on the
//!   first merge, plus a fixed-size run stack.

pub mod algo;
pub mod core;
pub mod error;
mod merge;
mod runs;

pub use crate::algo::{
    argsort, argsort_by, is_sorted, is_sorted_by, sort, sort_by, sort_by_key,
    sort_by_with_options, sort_indices, sort_indices_with_options,
};
pub use crate::core::{SortOptions, ValueAccessor};
pub use crate::error::SortError;

pub mod prelude {
    pub use crate::algo::{
        argsort, argsort_by, is_sorted, is_sorted_by, sort, sort_by, sort_by_key,
        sort_by_with_options, sort_indices, sort_indices_with_options,
    };
    pub use crate::core::{SortOptions, ValueAccessor};
    pub use crate::error::SortError;
}
