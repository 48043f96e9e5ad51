//! The sort driver and public entry points.
//!
//! The driver walks the slice left to right:
//! - **Run detection**: find the next natural run, reversing it if it is descending.
//! - **Run extension**: pad short runs up to the minimum run length with binary insertion sort.
//! - **Collapsing**: push the run and merge pending runs until the stack invariant holds.
//!
//! Once the input is exhausted all pending runs are merged into one.
//!
//! The main entry points are [`sort_by`], [`sort_indices`] and [`is_sorted_by`].

use crate::core::{Run, RunStack, SortOptions, ValueAccessor};
use crate::merge::{Scratch, merge_runs};
use crate::runs::{binary_insertion_sort, count_run_and_make_ascending, min_run_length};
use log::trace;
use std::cmp::Ordering;

/// Everything one sort call needs, passed explicitly through every run and merge step.
struct SortState<'a, T, F> {
    v: &'a mut [T],
    compare: F,
    scratch: Scratch<T>,
    runs: RunStack,
    min_gallop: usize,
    merges: usize,
}

impl<'a, T, F> SortState<'a, T, F>
where
    F: FnMut(&T, &T) -> Ordering,
{
    fn new(v: &'a mut [T], compare: F, min_gallop: usize) -> Self {
        let half = v.len() / 2;
        SortState {
            v,
            compare,
            scratch: Scratch::new(half),
            runs: RunStack::new(),
            min_gallop,
            merges: 0,
        }
    }

    /// Merges pending runs until, for the topmost lengths `A, B, C` (C on top),
    /// `A > B + C` and `B > C` hold, also checking the entry below `A`.
    fn merge_collapse(&mut self) {
        while self.runs.len() > 1 {
            let mut n = self.runs.len() - 2;
            let runs = &self.runs;
            // A merge below the top three can break the invariant one entry further down,
            // and the fixed stack capacity only holds if it holds over the whole stack.
            if (n > 0 && runs[n - 1].len <= runs[n].len + runs[n + 1].len)
                || (n > 1 && runs[n - 2].len <= runs[n - 1].len + runs[n].len)
            {
                if runs[n - 1].len < runs[n + 1].len {
                    n -= 1;
                }
            } else if runs[n].len > runs[n + 1].len {
                break;
            }
            self.merge_at(n);
        }
    }

    /// Merges all pending runs into one, regardless of the stack invariant.
    fn merge_force_collapse(&mut self) {
        while self.runs.len() > 1 {
            self.merge_at(self.force_collapse_index());
        }
    }

    /// The lower pair when its bottom run is shorter than the top run, else the top pair.
    fn force_collapse_index(&self) -> usize {
        let n = self.runs.len() - 2;
        if n > 0 && self.runs[n - 1].len < self.runs[n + 1].len {
            n - 1
        } else {
            n
        }
    }

    /// Finds the run starting at `lo`, extends it to `min_run` elements (or the rest of the
    /// slice), pushes it and collapses the stack. Returns the length of the pushed run.
    fn push_next_run(&mut self, lo: usize, min_run: usize) -> usize {
        let tail = &mut self.v[lo..];
        let mut run_len = count_run_and_make_ascending(tail, &mut self.compare);
        if run_len < min_run {
            let force = tail.len().min(min_run);
            binary_insertion_sort(&mut tail[..force], run_len, &mut self.compare);
            run_len = force;
        }

        self.runs.push(Run {
            start: lo,
            len: run_len,
        });
        self.merge_collapse();
        run_len
    }

    /// Merges stack entries `i` and `i + 1`.
    fn merge_at(&mut self, i: usize) {
        let (left, right) = self.runs.combine(i);
        trace!(
            "merging runs at {} ({} elements) and {} ({} elements)",
            left.start, left.len, right.start, right.len
        );

        merge_runs(
            &mut self.v[left.start..right.end()],
            left.len,
            &mut self.scratch,
            &mut self.min_gallop,
            &mut self.compare,
        );
        self.merges += 1;
    }
}

/// Sorts a slice of [`Ord`] values. See [`sort_by`].
///
/// # Examples
///
/// ```
/// let mut data = vec![5, 4, 3, 2, 1, 10, 9, 8, 7, 6];
/// gallopsort::sort(&mut data);
///
/// assert_eq!(data, (1..=10).collect::<Vec<_>>());
/// ```
pub fn sort<T: Ord>(v: &mut [T]) -> &mut [T] {
    sort_by(v, T::cmp)
}

/// Sorts a slice with a comparator function, using the default [`SortOptions`].
///
/// The sort is stable: elements the comparator considers equal keep their relative order.
/// It is adaptive: already sorted or strictly descending input takes `len - 1` comparisons,
/// and input made of a few sorted stretches is merged without being re-sorted.
///
/// The comparator must define a total order. If it does not, the resulting order is
/// unspecified, but the slice still holds every original element exactly once. The same
/// holds if the comparator panics: the panic propagates to the caller and no element is
/// lost or duplicated.
///
/// # Arguments
///
/// * `v` - The slice to sort in place.
/// * `compare` - Orders two elements; must be a total order.
///
/// # Returns
///
/// The same slice, now sorted, for chaining.
///
/// # Examples
///
/// ```
/// use gallopsort::sort_by;
///
/// let mut rows = vec![(2, 'a'), (1, 'b'), (2, 'c'), (1, 'd')];
/// sort_by(&mut rows, |a, b| a.0.cmp(&b.0));
///
/// assert_eq!(rows, vec![(1, 'b'), (1, 'd'), (2, 'a'), (2, 'c')]);
/// ```
pub fn sort_by<T, F>(v: &mut [T], compare: F) -> &mut [T]
where
    F: FnMut(&T, &T) -> Ordering,
{
    sort_by_with_options(v, compare, &SortOptions::new())
}

/// Sorts a slice by a key extracted from each element. See [`sort_by`].
///
/// The key function is called twice per comparison.
pub fn sort_by_key<T, K, F>(v: &mut [T], mut key: F) -> &mut [T]
where
    K: Ord,
    F: FnMut(&T) -> K,
{
    sort_by(v, |a, b| key(a).cmp(&key(b)))
}

/// Sorts a slice with a comparator function and explicit [`SortOptions`].
///
/// # Examples
///
/// ```
/// use gallopsort::{SortOptions, sort_by_with_options};
///
/// let options = SortOptions::new().with_min_run(2).unwrap();
/// let mut data = vec![3, 1, 2];
/// sort_by_with_options(&mut data, |a, b| b.cmp(a), &options);
///
/// assert_eq!(data, vec![3, 2, 1]);
/// ```
pub fn sort_by_with_options<'a, T, F>(
    v: &'a mut [T],
    compare: F,
    options: &SortOptions,
) -> &'a mut [T]
where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    if len < 2 {
        return v;
    }

    let min_run = options.min_run().unwrap_or_else(|| min_run_length(len));
    trace!("sorting {} elements with min_run {}", len, min_run);

    let mut state = SortState::new(v, compare, options.min_gallop());
    let mut lo = 0;
    while lo < len {
        lo += state.push_next_run(lo, min_run);
    }

    state.merge_force_collapse();
    debug_assert_eq!(state.runs.pop(), Some(Run { start: 0, len }));
    trace!(
        "sorted {} elements with {} merges, final min_gallop {}",
        len, state.merges, state.min_gallop
    );

    state.v
}

/// Sorts an array of positions by the values they refer to.
///
/// `get_value` maps a position to its value and `compare` orders values. Only `indices` is
/// written; the collection behind `get_value` is never touched, so it does not need to be
/// sortable or even mutable. Positions referring to equal values keep their relative order.
///
/// # Arguments
///
/// * `indices` - Positions into the external collection, reordered in place.
/// * `get_value` - Maps a position to the value it refers to.
/// * `compare` - Orders two values.
///
/// # Returns
///
/// The same `indices` slice, so that `get_value(indices[i])` is never ordered after
/// `get_value(indices[i + 1])`.
///
/// # Examples
///
/// ```
/// use gallopsort::sort_indices;
///
/// let names = ["Charlie", "Alice", "Bob"];
/// let mut indices = vec![0, 1, 2];
/// sort_indices(&mut indices, |i| names[i], |a, b| a.cmp(b));
///
/// assert_eq!(indices, vec![1, 2, 0]);
/// assert_eq!(names, ["Charlie", "Alice", "Bob"]);
/// ```
pub fn sort_indices<V, G, F>(indices: &mut [usize], get_value: G, compare: F) -> &mut [usize]
where
    G: FnMut(usize) -> V,
    F: FnMut(&V, &V) -> Ordering,
{
    sort_indices_with_options(indices, get_value, compare, &SortOptions::new())
}

/// [`sort_indices`] with explicit [`SortOptions`].
pub fn sort_indices_with_options<'a, V, G, F>(
    indices: &'a mut [usize],
    mut get_value: G,
    mut compare: F,
    options: &SortOptions,
) -> &'a mut [usize]
where
    G: FnMut(usize) -> V,
    F: FnMut(&V, &V) -> Ordering,
{
    sort_by_with_options(
        indices,
        |&i, &j| compare(&get_value(i), &get_value(j)),
        options,
    )
}

/// Returns the positions of `accessor` in the order that sorts its values.
///
/// This function does not modify the collection. The result is a permutation of
/// `0..accessor.len()` such that `accessor.value(result[i])` is never ordered after
/// `accessor.value(result[i + 1])`; positions of equal values stay in ascending order.
///
/// # Arguments
///
/// * `accessor` - The collection to be sorted.
/// * `compare` - Orders two values of the collection.
///
/// # Returns
///
/// A vector of positions, one per element of `accessor`, in sorted order.
///
/// # Examples
///
/// ```
/// use gallopsort::argsort_by;
///
/// let data = vec!["banana", "apple", "cherry"];
/// let indices = argsort_by(&data, |a, b| a.cmp(b));
///
/// assert_eq!(indices, vec![1, 0, 2]); // apple, banana, cherry
/// ```
pub fn argsort_by<A, F>(accessor: &A, mut compare: F) -> Vec<usize>
where
    A: ValueAccessor + ?Sized,
    F: FnMut(&A::Value, &A::Value) -> Ordering,
{
    let mut indices: Vec<usize> = (0..accessor.len()).collect();
    sort_by(&mut indices, |&i, &j| {
        compare(accessor.value(i), accessor.value(j))
    });
    indices
}

/// [`argsort_by`] for collections of [`Ord`] values.
pub fn argsort<A>(accessor: &A) -> Vec<usize>
where
    A: ValueAccessor + ?Sized,
    A::Value: Ord,
{
    argsort_by(accessor, |a, b| a.cmp(b))
}

/// Checks in a single pass whether `v` is sorted according to `compare`.
///
/// Returns `false` at the first adjacent pair where the left element is ordered after the
/// right one. Empty and single-element slices are sorted.
///
/// # Examples
///
/// ```
/// use gallopsort::is_sorted_by;
///
/// assert!(is_sorted_by(&[1, 2, 2, 3], |a, b| a.cmp(b)));
/// assert!(!is_sorted_by(&[1, 3, 2], |a, b| a.cmp(b)));
/// ```
pub fn is_sorted_by<T, F>(v: &[T], mut compare: F) -> bool
where
    F: FnMut(&T, &T) -> Ordering,
{
    v.windows(2)
        .all(|pair| compare(&pair[0], &pair[1]) != Ordering::Greater)
}

/// [`is_sorted_by`] for slices of [`Ord`] values.
pub fn is_sorted<T: Ord>(v: &[T]) -> bool {
    is_sorted_by(v, T::cmp)
}
