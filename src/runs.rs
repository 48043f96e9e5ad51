//! Run detection and short-run extension.
//!
//! A run is the longest non-descending (or strictly descending, then reversed) prefix
//! of the remaining input. Runs shorter than the minimum run length are padded with
//! binary insertion sort before they are pushed on the run stack.

use crate::core::MIN_MERGE;
use std::cmp::Ordering;

/// Computes the minimum run length for a slice of `len` elements.
///
/// Shifts `len` right until it drops below [`MIN_MERGE`], OR-ing in every bit shifted
/// out, so that `len / min_run` is a power of two or slightly less than one.
pub(crate) fn min_run_length(mut len: usize) -> usize {
    let mut r = 0;
    while len >= MIN_MERGE {
        r |= len & 1;
        len >>= 1;
    }
    len + r
}

/// Returns the length of the run at the start of `v`, reversing it first if descending.
///
/// Descending runs must be strictly descending and ascending runs may contain equal
/// neighbours, so no pair of equal elements is ever swapped by the reversal.
pub(crate) fn count_run_and_make_ascending<T, F>(v: &mut [T], compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < 2 {
        return len;
    }

    let mut end = 2;
    if compare(&v[1], &v[0]) == Ordering::Less {
        while end < len && compare(&v[end], &v[end - 1]) == Ordering::Less {
            end += 1;
        }
        v[..end].reverse();
    } else {
        while end < len && compare(&v[end], &v[end - 1]) != Ordering::Less {
            end += 1;
        }
    }

    end
}

/// Sorts `v` given that `v[..sorted]` is already sorted.
///
/// Each element is placed after every equal element of the prefix, which keeps the sort
/// stable. Elements are shifted with a rotation only after the comparator is done with them.
pub(crate) fn binary_insertion_sort<T, F>(v: &mut [T], sorted: usize, compare: &mut F)
where
    F: FnMut(&T, &T) -> Ordering,
{
    let start = sorted.max(1);
    for i in start..v.len() {
        let mut left = 0;
        let mut right = i;
        while left < right {
            let mid = left + (right - left) / 2;
            if compare(&v[i], &v[mid]) == Ordering::Less {
                right = mid;
            } else {
                left = mid + 1;
            }
        }

        if left < i {
            v[left..=i].rotate_right(1);
        }
    }
}
