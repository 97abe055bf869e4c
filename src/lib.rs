//! Fibonacci Heap priority queue for Rust
//!
//! This crate provides an addressable min-priority queue implemented as a
//! Fibonacci heap, with efficient `decrease_key` support for algorithms such
//! as Dijkstra's shortest path and Prim's minimum spanning tree.
//!
//! # Features
//!
//! - **O(1) amortized** push and decrease_key
//! - **O(log n) amortized** pop and delete
//! - **Checked handles**: handles are generation-checked arena keys tagged with
//!   the issuing heap, so stale or foreign handles are rejected in O(1)
//! - **Float keys**: priorities are `f64`; `+∞` is a valid "lowest priority"
//!   key and `-∞` is reserved as the "nothing found" witness
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::{FibonacciHeap, HeapError, ABSENT_KEY};
//!
//! let mut heap = FibonacciHeap::new();
//! heap.push("O", 5.0).unwrap();
//! let f = heap.push("F", -2.0).unwrap();
//! heap.delete(&f).unwrap();
//!
//! assert_eq!(heap.pop(), (Some("O"), 5.0));
//! assert_eq!(heap.pop(), (None, ABSENT_KEY));
//! assert_eq!(heap.push("X", f64::NEG_INFINITY), Err(HeapError::InvalidKey));
//! assert_eq!(heap.len(), 0);
//! ```
//!
//! # Cargo features
//!
//! - `verify-invariants`: validate the whole structure after every mutating
//!   operation and panic on the first violation. Slow; meant for fuzzing.
//!
//! # Thread safety
//!
//! Heaps are single-threaded. They are `Send` when their items are, but have no
//! internal locking; wrap a heap in a `Mutex` to share it.

pub mod degree;
pub mod fibonacci;
pub mod invariants;
pub mod key;
pub mod pathfinding;
mod storage;
pub mod traits;

// Re-export the main types for convenience
pub use fibonacci::{FibonacciHandle, FibonacciHeap};
pub use invariants::InvariantViolation;
pub use key::{Key, ABSENT_KEY};
pub use traits::{Handle, HeapError, PriorityQueue};
