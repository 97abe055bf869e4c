//! Shared helpers for integration tests

use rust_fibonacci_heap::{FibonacciHeap, Key};

/// Installs `env_logger` once so `RUST_LOG=trace` shows heap internals.
#[allow(dead_code)]
pub fn init_test() {
    drop(env_logger::builder().is_test(true).try_init());
}

/// Pops every entry, returning them in pop order.
#[allow(dead_code)]
pub fn drain<T>(heap: &mut FibonacciHeap<T>) -> Vec<(T, Key)> {
    let mut out = Vec::with_capacity(heap.len());
    while let (Some(item), key) = heap.pop() {
        out.push((item, key));
    }
    out
}
