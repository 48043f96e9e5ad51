//! Stable in-place merging of two adjacent sorted runs.
//!
//! The merge trims both runs with a gallop search, copies the shorter remainder into the
//! scratch buffer and merges back into the slice, front to back when the left run is the
//! shorter one and back to front otherwise. While merging it switches into galloping mode
//! once one side keeps winning, bulk-copying whole blocks found by exponential search.
//!
//! Every physical move goes through a [`MergeHole`], which knows where the buffered
//! elements belong. If the comparator panics, dropping the hole writes them back, so the
//! slice always ends up holding each original element exactly once.

use crate::core::MIN_GALLOP;
use std::cmp::Ordering;
use std::ptr;
use std::slice;

/// Reusable merge buffer. Only its spare capacity is ever written.
pub(crate) struct Scratch<T> {
    buf: Vec<T>,
    capacity: usize,
}

impl<T> Scratch<T> {
    /// A buffer that will hold up to `capacity` elements once first used.
    pub fn new(capacity: usize) -> Self {
        Scratch {
            buf: Vec::new(),
            capacity,
        }
    }

    /// Returns a pointer to at least `needed` uninitialised slots.
    fn reserve(&mut self, needed: usize) -> *mut T {
        debug_assert!(self.buf.is_empty());
        if self.buf.capacity() < needed {
            self.buf.reserve_exact(self.capacity.max(needed));
        }
        self.buf.as_mut_ptr()
    }
}

/// Finds the position at which `key` would be inserted into the sorted `run`, before any
/// elements equal to it.
///
/// The search starts at `hint` and probes offsets 1, 3, 7, 15, ... away from it until the
/// key is bracketed, then finishes with a binary search inside that bracket.
pub(crate) fn gallop_left<T, F>(key: &T, run: &[T], hint: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    gallop(run, hint, |x| compare(key, x) == Ordering::Greater)
}

/// Like [`gallop_left`], but the position is after any elements equal to `key`.
pub(crate) fn gallop_right<T, F>(key: &T, run: &[T], hint: usize, compare: &mut F) -> usize
where
    F: FnMut(&T, &T) -> Ordering,
{
    gallop(run, hint, |x| compare(key, x) != Ordering::Less)
}

/// Returns the number of leading elements of `run` for which `goes_after` holds.
///
/// `goes_after` must be true for a prefix of `run` and false for the rest.
fn gallop<T>(run: &[T], hint: usize, mut goes_after: impl FnMut(&T) -> bool) -> usize {
    let len = run.len();
    debug_assert!(hint < len);

    let mut last_ofs = 0;
    let mut ofs = 1;
    let (mut lo, mut hi);

    if goes_after(&run[hint]) {
        // Gallop right until run[hint + last_ofs] goes before and run[hint + ofs] does not.
        let max_ofs = len - hint;
        while ofs < max_ofs && goes_after(&run[hint + ofs]) {
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        lo = hint + last_ofs + 1;
        hi = hint + ofs;
    } else {
        // Gallop left until run[hint - ofs] goes before and run[hint - last_ofs] does not.
        let max_ofs = hint + 1;
        while ofs < max_ofs && !goes_after(&run[hint - ofs]) {
            last_ofs = ofs;
            ofs = (ofs << 1) + 1;
        }
        ofs = ofs.min(max_ofs);
        lo = hint + 1 - ofs;
        hi = hint - last_ofs;
    }

    // The answer lies in lo..=hi.
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if goes_after(&run[mid]) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    hi
}

/// Merges the sorted runs `v[..mid]` and `v[mid..]` in place.
///
/// Equal elements of the left run end up before those of the right run. `min_gallop` is
/// the adaptive galloping threshold carried from merge to merge within one sort.
pub(crate) fn merge_runs<T, F>(
    v: &mut [T],
    mid: usize,
    scratch: &mut Scratch<T>,
    min_gallop: &mut usize,
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    let len = v.len();
    debug_assert!(mid > 0 && mid < len);

    // Elements of the left run not greater than the right run's head are already in place.
    let skip = gallop_right(&v[mid], &v[..mid], 0, compare);
    let v = &mut v[skip..];
    let mid = mid - skip;
    if mid == 0 {
        return;
    }

    // Same for elements of the right run not less than the left run's tail.
    let end = mid + gallop_left(&v[mid - 1], &v[mid..], len - skip - mid - 1, compare);
    let v = &mut v[..end];
    if end == mid {
        return;
    }

    let right_len = end - mid;
    if mid <= right_len {
        let buf = scratch.reserve(mid);
        // SAFETY: both runs are non-empty, `buf` has room for the left run, the right
        // run's head sorts before the left run's head and the left run's tail after the
        // right run's tail, which is what `merge_lo` relies on.
        unsafe { merge_lo(v, mid, buf, min_gallop, compare) }
    } else {
        let buf = scratch.reserve(right_len);
        // SAFETY: as above, with room for the right run as `merge_hi` requires.
        unsafe { merge_hi(v, mid, buf, min_gallop, compare) }
    }
}

/// Buffered elements waiting to be moved back into the slice.
///
/// When dropped, copies `src..src + len` to `dst..dst + len`. The merge routines keep
/// `dst..dst + len` equal to the gap left in the slice at every point where the
/// comparator may be called.
struct MergeHole<T> {
    src: *mut T,
    len: usize,
    dst: *mut T,
}

impl<T> Drop for MergeHole<T> {
    fn drop(&mut self) {
        // SAFETY: `src..src + len` is initialised scratch memory and `dst..dst + len` is the
        // gap it was taken from, disjoint from the scratch buffer.
        unsafe { ptr::copy_nonoverlapping(self.src, self.dst, self.len) }
    }
}

/// Merges front to back with the left run buffered.
///
/// # Safety
///
/// `0 < len1 < v.len()`, `buf` must be valid for `len1` writes and disjoint from `v`,
/// `v[len1]` must sort strictly before `v[0]` and `v[len1 - 1]` strictly after `v[v.len() - 1]`.
unsafe fn merge_lo<T, F>(
    v: &mut [T],
    len1: usize,
    buf: *mut T,
    min_gallop: &mut usize,
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    let base = v.as_mut_ptr();
    let mut len2 = v.len() - len1;

    // SAFETY: the gap `hole.dst..hole.dst + hole.len` is always immediately followed by the
    // `len2` unmerged elements of the right run, and everything before it is merged output.
    unsafe {
        ptr::copy_nonoverlapping(base, buf, len1);
        let mut hole = MergeHole {
            src: buf,
            len: len1,
            dst: base,
        };

        // The right run's head goes first.
        ptr::copy_nonoverlapping(hole.dst.add(hole.len), hole.dst, 1);
        hole.dst = hole.dst.add(1);
        len2 -= 1;
        if len2 == 0 {
            return;
        }
        if hole.len == 1 {
            ptr::copy(hole.dst.add(1), hole.dst, len2);
            hole.dst = hole.dst.add(len2);
            return;
        }

        let mut threshold = *min_gallop;
        'outer: loop {
            let mut count1 = 0;
            let mut count2 = 0;

            // One pair at a time until a side wins `threshold` times in a row.
            loop {
                let right = hole.dst.add(hole.len);
                if compare(&*right, &*hole.src) == Ordering::Less {
                    ptr::copy_nonoverlapping(right, hole.dst, 1);
                    hole.dst = hole.dst.add(1);
                    len2 -= 1;
                    count2 += 1;
                    count1 = 0;
                    if len2 == 0 {
                        break 'outer;
                    }
                } else {
                    ptr::copy_nonoverlapping(hole.src, hole.dst, 1);
                    hole.src = hole.src.add(1);
                    hole.dst = hole.dst.add(1);
                    hole.len -= 1;
                    count1 += 1;
                    count2 = 0;
                    if hole.len == 1 {
                        break 'outer;
                    }
                }
                if (count1 | count2) >= threshold {
                    break;
                }
            }

            // Galloping: move whole blocks while either side keeps long streaks.
            loop {
                let right = hole.dst.add(hole.len);
                let buffered = slice::from_raw_parts(hole.src, hole.len);
                count1 = gallop_right(&*right, buffered, 0, compare);
                if count1 != 0 {
                    ptr::copy_nonoverlapping(hole.src, hole.dst, count1);
                    hole.src = hole.src.add(count1);
                    hole.dst = hole.dst.add(count1);
                    hole.len -= count1;
                    if hole.len <= 1 {
                        break 'outer;
                    }
                }

                let right = hole.dst.add(hole.len);
                ptr::copy_nonoverlapping(right, hole.dst, 1);
                hole.dst = hole.dst.add(1);
                len2 -= 1;
                if len2 == 0 {
                    break 'outer;
                }

                let right = hole.dst.add(hole.len);
                count2 = gallop_left(&*hole.src, slice::from_raw_parts(right, len2), 0, compare);
                if count2 != 0 {
                    ptr::copy(right, hole.dst, count2);
                    hole.dst = hole.dst.add(count2);
                    len2 -= count2;
                    if len2 == 0 {
                        break 'outer;
                    }
                }

                ptr::copy_nonoverlapping(hole.src, hole.dst, 1);
                hole.src = hole.src.add(1);
                hole.dst = hole.dst.add(1);
                hole.len -= 1;
                if hole.len == 1 {
                    break 'outer;
                }

                threshold = threshold.saturating_sub(1);
                if count1 < MIN_GALLOP && count2 < MIN_GALLOP {
                    break;
                }
            }
            threshold += 2;
        }
        *min_gallop = threshold.max(1);

        // A single buffered element left sorts after the rest of the right run.
        if hole.len == 1 {
            ptr::copy(hole.dst.add(1), hole.dst, len2);
            hole.dst = hole.dst.add(len2);
        }
        // Dropping `hole` moves the remaining buffered elements into the gap.
    }
}

/// Merges back to front with the right run buffered.
///
/// # Safety
///
/// `0 < len1 < v.len()`, `buf` must be valid for `v.len() - len1` writes and disjoint from
/// `v`, `v[len1]` must sort strictly before `v[0]` and `v[len1 - 1]` strictly after
/// `v[v.len() - 1]`.
unsafe fn merge_hi<T, F>(
    v: &mut [T],
    len1: usize,
    buf: *mut T,
    min_gallop: &mut usize,
    compare: &mut F,
) where
    F: FnMut(&T, &T) -> Ordering,
{
    let base = v.as_mut_ptr();
    let mut len1 = len1;
    let len2 = v.len() - len1;

    // SAFETY: the gap `base + len1..base + len1 + hole.len` always sits between the `len1`
    // unmerged elements of the left run and the merged output, and `hole.dst` is kept at
    // `base + len1`.
    unsafe {
        ptr::copy_nonoverlapping(base.add(len1), buf, len2);
        let mut hole = MergeHole {
            src: buf,
            len: len2,
            dst: base.add(len1),
        };

        // The left run's tail goes last.
        len1 -= 1;
        ptr::copy_nonoverlapping(base.add(len1), base.add(len1 + hole.len), 1);
        hole.dst = base.add(len1);
        if len1 == 0 {
            return;
        }
        if hole.len == 1 {
            ptr::copy(base, base.add(1), len1);
            hole.dst = base;
            return;
        }

        let mut threshold = *min_gallop;
        'outer: loop {
            let mut count1 = 0;
            let mut count2 = 0;

            loop {
                let left = base.add(len1 - 1);
                let right = hole.src.add(hole.len - 1);
                let out = base.add(len1 + hole.len - 1);
                if compare(&*right, &*left) == Ordering::Less {
                    ptr::copy_nonoverlapping(left, out, 1);
                    len1 -= 1;
                    hole.dst = base.add(len1);
                    count1 += 1;
                    count2 = 0;
                    if len1 == 0 {
                        break 'outer;
                    }
                } else {
                    ptr::copy_nonoverlapping(right, out, 1);
                    hole.len -= 1;
                    count2 += 1;
                    count1 = 0;
                    if hole.len == 1 {
                        break 'outer;
                    }
                }
                if (count1 | count2) >= threshold {
                    break;
                }
            }

            loop {
                let key = hole.src.add(hole.len - 1);
                count1 = len1
                    - gallop_right(&*key, slice::from_raw_parts(base, len1), len1 - 1, compare);
                if count1 != 0 {
                    len1 -= count1;
                    ptr::copy(base.add(len1), base.add(len1 + hole.len), count1);
                    hole.dst = base.add(len1);
                    if len1 == 0 {
                        break 'outer;
                    }
                }

                hole.len -= 1;
                ptr::copy_nonoverlapping(hole.src.add(hole.len), base.add(len1 + hole.len), 1);
                if hole.len == 1 {
                    break 'outer;
                }

                let key = base.add(len1 - 1);
                count2 = hole.len
                    - gallop_left(
                        &*key,
                        slice::from_raw_parts(hole.src, hole.len),
                        hole.len - 1,
                        compare,
                    );
                if count2 != 0 {
                    hole.len -= count2;
                    ptr::copy_nonoverlapping(
                        hole.src.add(hole.len),
                        base.add(len1 + hole.len),
                        count2,
                    );
                    if hole.len <= 1 {
                        break 'outer;
                    }
                }

                len1 -= 1;
                ptr::copy_nonoverlapping(base.add(len1), base.add(len1 + hole.len), 1);
                hole.dst = base.add(len1);
                if len1 == 0 {
                    break 'outer;
                }

                threshold = threshold.saturating_sub(1);
                if count1 < MIN_GALLOP && count2 < MIN_GALLOP {
                    break;
                }
            }
            threshold += 2;
        }
        *min_gallop = threshold.max(1);

        // A single buffered element left sorts before the rest of the left run.
        if hole.len == 1 {
            ptr::copy(base, base.add(1), len1);
            hole.dst = base;
        }
    }
}
