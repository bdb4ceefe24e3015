//! Cycle length calculation
//!
//! The animation repeats exactly once every group has rotated back to its
//! starting alignment, i.e. after the LCM of all group lengths.

use crate::group::ColorGroup;

/// Greatest common divisor using the Euclidean algorithm.
pub fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Least common multiple of two numbers.
///
/// Returns 0 if either operand is 0. Saturates at `usize::MAX` on overflow;
/// use [`checked_lcm`] when overflow must be detected.
pub fn lcm(a: usize, b: usize) -> usize {
    checked_lcm(a, b).unwrap_or(usize::MAX)
}

/// Least common multiple, or `None` if the result does not fit in `usize`.
pub fn checked_lcm(a: usize, b: usize) -> Option<usize> {
    if a == 0 || b == 0 {
        return Some(0);
    }
    (a / gcd(a, b)).checked_mul(b)
}

/// Total number of frames needed for every group to return to its start.
///
/// Returns 1 when there are no groups (a single unchanged frame).
pub fn cycle_length(groups: &[ColorGroup]) -> usize {
    checked_cycle_length(groups).unwrap_or(usize::MAX)
}

/// Like [`cycle_length`], but `None` if the LCM overflows `usize`.
pub fn checked_cycle_length(groups: &[ColorGroup]) -> Option<usize> {
    let mut lengths = groups.iter().map(ColorGroup::len);
    let Some(first) = lengths.next() else {
        return Some(1);
    };
    lengths.try_fold(first, checked_lcm)
}
