//! Errors reported while configuring a sort.
//!
//! Sorting itself never fails. Only [`SortOptions`](crate::core::SortOptions) rejects
//! values that would break the run-extension or galloping arithmetic.

use thiserror::Error;

/// An invalid [`SortOptions`](crate::core::SortOptions) value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SortError {
    /// A minimum run length below 1 was requested.
    #[error("min_run must be at least 1, got {0}")]
    InvalidMinRun(usize),

    /// A galloping threshold below 1 was requested.
    #[error("min_gallop must be at least 1, got {0}")]
    InvalidMinGallop(usize),
}
