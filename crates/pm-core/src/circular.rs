//! Index arithmetic over circular sequences (Z/nZ).
//!
//! Contours are closed loops, so every index operation wraps. Functions here
//! never produce negative indices; callers work with `usize` positions in
//! `[0, len)` only.

/// Position `steps` away from `i`, walking forward (`steps > 0`) or backward.
///
/// `i` must be in `[0, len)` and `len > 0`.
#[inline]
pub fn offset(i: usize, steps: isize, len: usize) -> usize {
    debug_assert!(len > 0 && i < len);
    let s = steps.rem_euclid(len as isize) as usize;
    (i + s) % len
}

/// Number of forward steps from `from` to `to`, in `[0, len)`.
#[inline]
pub fn forward_gap(from: usize, to: usize, len: usize) -> usize {
    debug_assert!(len > 0 && from < len && to < len);
    (to + len - from) % len
}

/// `true` when `b` immediately follows `a` on the loop.
#[inline]
pub fn is_successor(a: usize, b: usize, len: usize) -> bool {
    forward_gap(a, b, len) == 1
}
