//! Key domain for the heap.
//!
//! Keys are `f64` values ordered by `<`. Every finite value and `+∞` may be
//! stored; `+∞` acts as a "lowest priority" key. `-∞` is reserved as the
//! witness returned by queries that find nothing ([`ABSENT_KEY`]), and `NaN`
//! is rejected because it has no place in a total order.

use crate::traits::HeapError;

/// Numeric priority of an entry. Smaller keys are popped first.
pub type Key = f64;

/// Key returned alongside a `None` payload when a query finds no entry.
///
/// Never a valid stored key.
pub const ABSENT_KEY: Key = f64::NEG_INFINITY;

/// Returns true if `key` may be stored in a heap.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::key::{is_storable, ABSENT_KEY};
///
/// assert!(is_storable(0.0));
/// assert!(is_storable(f64::INFINITY));
/// assert!(!is_storable(ABSENT_KEY));
/// assert!(!is_storable(f64::NAN));
/// ```
#[inline]
pub fn is_storable(key: Key) -> bool {
    !key.is_nan() && key != ABSENT_KEY
}

/// Checks that `key` is storable, returning it unchanged.
#[inline]
pub(crate) fn check_key(key: Key) -> Result<Key, HeapError> {
    if is_storable(key) {
        Ok(key)
    } else {
        Err(HeapError::InvalidKey)
    }
}
