//! Common traits for priority queues with addressable entries
//!
//! [`PriorityQueue`] is the capability set every queue in this crate offers:
//! push, peek, pop, membership and lookup by handle, decrease-key, delete,
//! length and clear. Algorithms such as Dijkstra's shortest path can be
//! written against it without naming a concrete heap.
//!
//! Queries (`peek`, `pop`, `get`) never fail. When nothing is found they
//! return `(None, ABSENT_KEY)`, where [`ABSENT_KEY`](crate::key::ABSENT_KEY)
//! is negative infinity. Mutations that receive a caller error (bad key,
//! increasing "decrease", stale handle) return a [`HeapError`] and leave the
//! queue untouched.

use crate::key::Key;
use std::fmt;

/// Error type for heap operations
///
/// Every variant is a caller contract violation. None of them is transient,
/// so retrying the same call will fail the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HeapError {
    /// The key is negative infinity (reserved for "absent") or NaN
    InvalidKey,
    /// `decrease_key` was given a key greater than the current one
    NotADecrease,
    /// The handle does not reference a live entry of this heap
    StaleHandle,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::InvalidKey => {
                write!(f, "key must be finite or +inf (-inf and NaN are not storable)")
            }
            HeapError::NotADecrease => {
                write!(f, "new key is greater than the current key")
            }
            HeapError::StaleHandle => {
                write!(f, "handle does not reference a live entry of this heap")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an entry in a heap
///
/// This is an opaque, cheaply copyable token identifying one entry. Handles
/// outlive the entries they name; a heap must recognise and reject handles
/// whose entry has been popped, deleted or cleared, and handles issued by a
/// different heap.
pub trait Handle: Copy + Eq + fmt::Debug {}

/// Priority queue with addressable entries and `decrease_key`
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{FibonacciHeap, PriorityQueue, ABSENT_KEY};
///
/// fn drain_all<Q: PriorityQueue<&'static str>>(queue: &mut Q) -> Vec<&'static str> {
///     let mut out = Vec::new();
///     while let (Some(item), _) = queue.pop() {
///         out.push(item);
///     }
///     out
/// }
///
/// let mut heap = FibonacciHeap::new();
/// heap.push("late", 9.0).unwrap();
/// let early = heap.push("early", 10.0).unwrap();
/// heap.decrease_key(&early, 1.0).unwrap();
///
/// assert_eq!(drain_all(&mut heap), vec!["early", "late"]);
/// assert_eq!(heap.peek(), (None, ABSENT_KEY));
/// ```
pub trait PriorityQueue<T> {
    /// The handle type returned by `push`
    type Handle: Handle;

    /// Inserts `item` with priority `key` and returns a handle to it
    ///
    /// # Errors
    /// Returns `HeapError::InvalidKey` if `key` is negative infinity or NaN.
    fn push(&mut self, item: T, key: Key) -> Result<Self::Handle, HeapError>;

    /// Returns the entry with the smallest key without removing it,
    /// or `(None, ABSENT_KEY)` if the queue is empty
    fn peek(&self) -> (Option<&T>, Key);

    /// Removes and returns the entry with the smallest key,
    /// or `(None, ABSENT_KEY)` if the queue is empty
    fn pop(&mut self) -> (Option<T>, Key);

    /// Returns true if `handle` references a live entry of this queue
    fn has(&self, handle: &Self::Handle) -> bool;

    /// Returns the entry referenced by `handle`,
    /// or `(None, ABSENT_KEY)` if it is not live
    fn get(&self, handle: &Self::Handle) -> (Option<&T>, Key);

    /// Lowers the key of the entry referenced by `handle`
    ///
    /// A key equal to the current one is accepted and changes nothing.
    ///
    /// # Errors
    /// - `HeapError::StaleHandle` if the handle is not live
    /// - `HeapError::InvalidKey` if `key` is negative infinity or NaN
    /// - `HeapError::NotADecrease` if `key` is greater than the current key
    fn decrease_key(&mut self, handle: &Self::Handle, key: Key) -> Result<(), HeapError>;

    /// Removes the entry referenced by `handle` and returns it
    ///
    /// # Errors
    /// Returns `HeapError::StaleHandle` if the handle is not live.
    fn delete(&mut self, handle: &Self::Handle) -> Result<(T, Key), HeapError>;

    /// Returns the number of live entries
    fn len(&self) -> usize;

    /// Returns true if the queue holds no entries
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every entry, invalidating all outstanding handles
    fn clear(&mut self);
}
