//! Degree type and bounds for Fibonacci heap trees.
//!
//! # Why u8?
//!
//! The degree of a node in a Fibonacci heap is the number of its children.
//! Cascading cuts guarantee that a node of degree `d` roots a subtree of at
//! least `F(d + 2) ≥ φ^d` nodes, so the degree never exceeds `log_φ(n)`.
//! For `n = 2⁶⁴` that is about 92, well inside `u8`.
//!
//! # Runtime Checks
//!
//! [`checked_increment`] panics if the theoretical limit is exceeded, which
//! would indicate a structural bug rather than a legitimate state.

/// Type alias for node degree (number of children).
pub type Degree = u8;

/// Maximum representable degree.
pub const MAX_DEGREE: Degree = u8::MAX;

/// The golden ratio, the base of the degree bound.
const PHI: f64 = 1.618_033_988_749_895;

/// Safely increment a degree value, panicking on overflow.
///
/// # Panics
///
/// Panics if `degree == MAX_DEGREE`.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::degree::{checked_increment, Degree};
///
/// let degree: Degree = 5;
/// assert_eq!(checked_increment(degree), 6);
/// ```
#[inline]
pub fn checked_increment(degree: Degree) -> Degree {
    degree.checked_add(1).expect(
        "degree overflow: this should be impossible since max degree is log_φ(n) \
         and u8::MAX (255) covers far more entries than fit in memory",
    )
}

/// Decrement a degree value, saturating at 0.
#[inline]
pub fn saturating_decrement(degree: Degree) -> Degree {
    degree.saturating_sub(1)
}

/// Number of slots the consolidation table needs for a heap of `len` entries.
///
/// This is `⌊log_φ(len)⌋ + 2`, one more than the largest degree a root can
/// reach after linking.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::degree::table_size;
///
/// assert_eq!(table_size(0), 2);
/// assert_eq!(table_size(1), 2);
/// assert!(table_size(1_000_000) <= 32);
/// ```
#[inline]
pub fn table_size(len: usize) -> usize {
    if len <= 1 {
        return 2;
    }
    ((len as f64).ln() / PHI.ln()).floor() as usize + 2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_increment() {
        assert_eq!(checked_increment(0), 1);
        assert_eq!(checked_increment(127), 128);
        assert_eq!(checked_increment(254), 255);
    }

    #[test]
    #[should_panic(expected = "degree overflow")]
    fn test_checked_increment_overflow() {
        checked_increment(MAX_DEGREE);
    }

    #[test]
    fn test_saturating_decrement() {
        assert_eq!(saturating_decrement(5), 4);
        assert_eq!(saturating_decrement(0), 0);
    }

    #[test]
    fn test_table_size_grows_logarithmically() {
        assert_eq!(table_size(2), 3);
        assert_eq!(table_size(3), 4);
        // φ^4 ≈ 6.85
        assert_eq!(table_size(7), 6);
        assert!(table_size(usize::MAX) < MAX_DEGREE as usize);
    }
}
