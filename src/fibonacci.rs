//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized push and decrease_key
//! - O(log n) amortized pop and delete
//!
//! The structure consists of a collection of heap-ordered trees. Roots are
//! linked in a circular doubly linked list and the heap caches the minimum
//! root. Work is deferred: push only adds a root, and pop pays for it by
//! consolidating roots of equal degree. decrease_key cuts a violating node to
//! the root list, and cascading cuts keep trees bushy enough that a node of
//! degree `d` always has at least `F(d + 2)` descendants.
//!
//! Nodes live in a slot map arena (see [`storage`](crate::storage)), and
//! handles are (heap id, generational key) pairs, so stale and foreign handles
//! are detected in O(1) instead of being undefined behaviour.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! heap.push("B", 0.0).unwrap();
//! let a = heap.push("A", 3.0).unwrap();
//! heap.decrease_key(&a, 1.0).unwrap();
//! heap.push("R", 2.0).unwrap();
//!
//! assert_eq!(heap.pop(), (Some("B"), 0.0));
//! assert_eq!(heap.pop(), (Some("A"), 1.0));
//! assert_eq!(heap.pop(), (Some("R"), 2.0));
//! assert!(!heap.has(&a));
//! ```

use crate::degree::{checked_increment, saturating_decrement, table_size};
use crate::key::{check_key, Key, ABSENT_KEY};
use crate::storage::{Node, NodeKey, NodePool};
use crate::traits::{Handle, HeapError, PriorityQueue};
use log::{debug, trace};
use slotmap::SecondaryMap;
use smallvec::{smallvec, SmallVec};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_HEAP_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one heap instance, embedded in every handle it issues
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
struct HeapId(u64);

impl HeapId {
    fn fresh() -> Self {
        HeapId(NEXT_HEAP_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// Handle to an entry in a Fibonacci heap
///
/// Handles are tied to the heap that issued them. Using one with another heap,
/// or after its entry was popped, deleted or cleared, is detected: `has` and
/// `get` report a miss and `decrease_key` / `delete` return
/// [`HeapError::StaleHandle`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct FibonacciHandle {
    heap: HeapId,
    node: NodeKey,
}

impl Handle for FibonacciHandle {}

/// Fibonacci Heap keyed by `f64` priorities
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::{FibonacciHeap, HeapError};
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.push("item", 5.0).unwrap();
/// heap.decrease_key(&handle, 1.0).unwrap();
/// assert_eq!(heap.peek(), (Some(&"item"), 1.0));
/// assert_eq!(heap.decrease_key(&handle, 2.0), Err(HeapError::NotADecrease));
/// ```
pub struct FibonacciHeap<T> {
    pub(crate) nodes: NodePool<T>,
    pub(crate) min: Option<NodeKey>,
    pub(crate) len: usize,
    id: HeapId,
}

impl<T> FibonacciHeap<T> {
    /// Creates a new empty heap
    pub fn new() -> Self {
        Self {
            nodes: NodePool::new(),
            min: None,
            len: 0,
            id: HeapId::fresh(),
        }
    }

    /// Creates an empty heap with room for `capacity` entries before the
    /// arena reallocates
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: NodePool::with_capacity(capacity),
            min: None,
            len: 0,
            id: HeapId::fresh(),
        }
    }

    /// Builds a heap from `(item, key)` pairs
    ///
    /// # Errors
    /// Returns `HeapError::InvalidKey` at the first unstorable key; the
    /// partially built heap is dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rust_fibonacci_heap::{FibonacciHeap, HeapError};
    ///
    /// let heap = FibonacciHeap::try_from_entries(vec![("a", 2.0), ("b", 1.0)]).unwrap();
    /// assert_eq!(heap.peek(), (Some(&"b"), 1.0));
    ///
    /// let bad = FibonacciHeap::try_from_entries(vec![("a", f64::NEG_INFINITY)]);
    /// assert_eq!(bad.err(), Some(HeapError::InvalidKey));
    /// ```
    pub fn try_from_entries<I>(entries: I) -> Result<Self, HeapError>
    where
        I: IntoIterator<Item = (T, Key)>,
    {
        let entries = entries.into_iter();
        let mut heap = Self::with_capacity(entries.size_hint().0);
        for (item, key) in entries {
            heap.push(item, key)?;
        }
        Ok(heap)
    }

    /// Returns the number of entries in the heap
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the heap is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.is_none()
    }

    /// Inserts `item` with priority `key`
    ///
    /// The new entry becomes the minimum only if its key is strictly smaller
    /// than the current minimum, so among equal keys the earlier push wins.
    ///
    /// # Errors
    /// Returns `HeapError::InvalidKey` for negative infinity or NaN; the heap is
    /// left unchanged.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn push(&mut self, item: T, key: Key) -> Result<FibonacciHandle, HeapError> {
        let key = check_key(key)?;
        let node = self.nodes.insert(item, key);

        match self.min {
            Some(min) => {
                self.nodes.insert_before(min, node);
                if key < self.nodes[min].key {
                    self.min = Some(node);
                }
            }
            None => self.min = Some(node),
        }

        self.len += 1;
        self.check_invariants();
        Ok(FibonacciHandle {
            heap: self.id,
            node,
        })
    }

    /// Returns the minimum entry, or `(None, ABSENT_KEY)` if the heap is empty
    ///
    /// # Time Complexity
    /// O(1)
    pub fn peek(&self) -> (Option<&T>, Key) {
        match self.min {
            Some(min) => {
                let node = &self.nodes[min];
                (Some(&node.item), node.key)
            }
            None => (None, ABSENT_KEY),
        }
    }

    /// Removes and returns the minimum entry, or `(None, ABSENT_KEY)` if the
    /// heap is empty
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn pop(&mut self) -> (Option<T>, Key) {
        match self.min {
            Some(min) => {
                let (item, key) = self.remove_root(min);
                (Some(item), key)
            }
            None => (None, ABSENT_KEY),
        }
    }

    /// Returns true if `handle` references a live entry of this heap
    ///
    /// # Time Complexity
    /// O(1)
    #[inline]
    pub fn has(&self, handle: &FibonacciHandle) -> bool {
        self.resolve(handle).is_some()
    }

    /// Returns the entry behind `handle`, or `(None, ABSENT_KEY)` if the handle
    /// is stale or belongs to another heap
    pub fn get(&self, handle: &FibonacciHandle) -> (Option<&T>, Key) {
        match self.resolve(handle) {
            Some(node) => {
                let node = &self.nodes[node];
                (Some(&node.item), node.key)
            }
            None => (None, ABSENT_KEY),
        }
    }

    /// Lowers the key of the entry behind `handle` to `new_key`
    ///
    /// # Errors
    /// Checked in this order, before anything is modified:
    /// - `HeapError::StaleHandle` if the handle is not live
    /// - `HeapError::InvalidKey` if `new_key` is negative infinity or NaN
    /// - `HeapError::NotADecrease` if `new_key` is greater than the current key
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: &FibonacciHandle, new_key: Key) -> Result<(), HeapError> {
        let node = self.resolve(handle).ok_or(HeapError::StaleHandle)?;
        let new_key = check_key(new_key)?;
        if new_key > self.nodes[node].key {
            return Err(HeapError::NotADecrease);
        }

        self.nodes[node].key = new_key;
        if let Some(parent) = self.nodes[node].parent {
            if new_key < self.nodes[parent].key {
                self.cut(node, parent);
                self.cascading_cut(parent);
            }
        }

        if let Some(min) = self.min {
            if new_key < self.nodes[min].key {
                self.min = Some(node);
            }
        }

        self.check_invariants();
        Ok(())
    }

    /// Removes the entry behind `handle` and returns its item and key
    ///
    /// The entry is cut to the root list exactly as if its key had dropped to
    /// negative infinity, then removed the way `pop` removes the minimum.
    ///
    /// # Errors
    /// Returns `HeapError::StaleHandle` if the handle is not live.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn delete(&mut self, handle: &FibonacciHandle) -> Result<(T, Key), HeapError> {
        let node = self.resolve(handle).ok_or(HeapError::StaleHandle)?;
        if let Some(parent) = self.nodes[node].parent {
            self.cut(node, parent);
            self.cascading_cut(parent);
        }
        debug!("delete: removing entry with key {}", self.nodes[node].key);
        Ok(self.remove_root(node))
    }

    /// Removes every entry
    ///
    /// All outstanding handles become stale.
    pub fn clear(&mut self) {
        debug!("clear: dropping {} entries", self.len);
        self.nodes.clear();
        self.min = None;
        self.len = 0;
        // Keys freed by the arena are already stale; a new id also keeps a
        // handle from ever matching a slot the arena hands out again.
        self.id = HeapId::fresh();
    }

    /// Moves every entry of `other` into this heap
    ///
    /// Tree shapes and marks are preserved and the two root lists are spliced
    /// together. Handles issued by `other` do not carry over: they become
    /// stale for both heaps.
    ///
    /// # Time Complexity
    /// O(m) where m is `other.len()`, since entries move between arenas
    ///
    /// # Example
    ///
    /// ```rust
    /// use rust_fibonacci_heap::FibonacciHeap;
    ///
    /// let mut heap1 = FibonacciHeap::new();
    /// heap1.push("a", 5.0).unwrap();
    ///
    /// let mut heap2 = FibonacciHeap::new();
    /// heap2.push("b", 3.0).unwrap();
    ///
    /// heap1.merge(heap2);
    /// assert_eq!(heap1.len(), 2);
    /// assert_eq!(heap1.peek(), (Some(&"b"), 3.0));
    /// ```
    pub fn merge(&mut self, mut other: Self) {
        let Some(other_min) = other.min else {
            return;
        };

        let mut remap: SecondaryMap<NodeKey, NodeKey> = SecondaryMap::with_capacity(other.len);
        let mut moved = Vec::with_capacity(other.len);
        for (old, node) in other.nodes.drain() {
            let new = self.nodes.adopt(node);
            remap.insert(old, new);
            moved.push(new);
        }
        for &new in &moved {
            let node = &mut self.nodes[new];
            node.left = remap[node.left];
            node.right = remap[node.right];
            node.parent = node.parent.map(|p| remap[p]);
            node.child = node.child.map(|c| remap[c]);
        }

        let other_min = remap[other_min];
        match self.min {
            Some(min) => {
                self.nodes.splice(min, other_min);
                if self.nodes[other_min].key < self.nodes[min].key {
                    self.min = Some(other_min);
                }
            }
            None => self.min = Some(other_min),
        }
        self.len += other.len;
        debug!("merge: absorbed {} entries, len now {}", other.len, self.len);

        other.min = None;
        other.len = 0;
        self.check_invariants();
    }

    /// Iterates over all entries in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = (&T, Key)> {
        self.nodes.iter().map(|(_, node)| (&node.item, node.key))
    }

    /// Resolves a handle to a live node of this heap
    #[inline]
    fn resolve(&self, handle: &FibonacciHandle) -> Option<NodeKey> {
        (handle.heap == self.id && self.nodes.contains(handle.node)).then_some(handle.node)
    }

    /// Unlinks the root `root`, promotes its children and consolidates
    fn remove_root(&mut self, root: NodeKey) -> (T, Key) {
        debug_assert!(self.nodes[root].parent.is_none());

        if let Some(child) = self.nodes[root].child.take() {
            for c in self.nodes.ring(child) {
                let node = &mut self.nodes[c];
                node.parent = None;
                node.marked = false;
            }
            self.nodes.splice(root, child);
            self.nodes[root].degree = 0;
        }

        let next = self.nodes.unlink(root);
        let removed: Node<T> = match self.nodes.remove(root) {
            Some(node) => node,
            None => unreachable!("root list references a freed node"),
        };
        self.len -= 1;

        match next {
            Some(start) => self.consolidate(start),
            None => self.min = None,
        }

        self.check_invariants();
        (removed.item, removed.key)
    }

    /// Links roots of equal degree until all root degrees are distinct, then
    /// recomputes the minimum
    fn consolidate(&mut self, start: NodeKey) {
        let roots = self.nodes.ring(start);
        trace!("consolidate: {} roots, len {}", roots.len(), self.len);

        let mut table: SmallVec<[Option<NodeKey>; 32]> = smallvec![None; table_size(self.len)];

        for root in roots {
            let mut x = root;
            let mut d = self.nodes[x].degree as usize;

            loop {
                if d >= table.len() {
                    table.resize(d + 1, None);
                }
                let Some(mut y) = table[d].take() else {
                    break;
                };

                // Keep x as the smaller key
                if self.nodes[y].key < self.nodes[x].key {
                    std::mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                d += 1;
            }

            table[d] = Some(x);
        }

        self.min = None;
        for root in table.into_iter().flatten() {
            match self.min {
                Some(min) if self.nodes[min].key <= self.nodes[root].key => {}
                _ => self.min = Some(root),
            }
        }
    }

    /// Makes root `child` a child of root `parent`
    fn link(&mut self, child: NodeKey, parent: NodeKey) {
        trace!(
            "link: key {} under key {}",
            self.nodes[child].key,
            self.nodes[parent].key
        );
        self.nodes.unlink(child);
        {
            let node = &mut self.nodes[child];
            node.parent = Some(parent);
            node.marked = false;
        }

        match self.nodes[parent].child {
            Some(first) => self.nodes.insert_before(first, child),
            None => self.nodes[parent].child = Some(child),
        }
        let degree = self.nodes[parent].degree;
        self.nodes[parent].degree = checked_increment(degree);
    }

    /// Cuts `node` from `parent` and adds it to the root list
    fn cut(&mut self, node: NodeKey, parent: NodeKey) {
        trace!("cut: key {} from parent key {}", self.nodes[node].key, self.nodes[parent].key);
        let neighbour = self.nodes.unlink(node);
        if self.nodes[parent].child == Some(node) {
            self.nodes[parent].child = neighbour;
        }
        let degree = self.nodes[parent].degree;
        self.nodes[parent].degree = saturating_decrement(degree);

        {
            let n = &mut self.nodes[node];
            n.parent = None;
            n.marked = false;
        }
        match self.min {
            Some(min) => self.nodes.insert_before(min, node),
            None => self.min = Some(node),
        }
    }

    /// Walks up from `node`: marks the first unmarked non-root ancestor and
    /// cuts every marked one on the way
    fn cascading_cut(&mut self, mut node: NodeKey) {
        while let Some(parent) = self.nodes[node].parent {
            if !self.nodes[node].marked {
                self.nodes[node].marked = true;
                return;
            }
            self.cut(node, parent);
            node = parent;
        }
    }

    #[cfg(feature = "verify-invariants")]
    fn check_invariants(&self) {
        if let Err(violation) = self.validate() {
            panic!("heap invariant violated: {}", violation);
        }
    }

    #[cfg(not(feature = "verify-invariants"))]
    #[inline(always)]
    fn check_invariants(&self) {}
}

impl<T> Default for FibonacciHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for FibonacciHeap<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("min_key", &self.peek().1)
            .finish()
    }
}

impl<T> PriorityQueue<T> for FibonacciHeap<T> {
    type Handle = FibonacciHandle;

    fn push(&mut self, item: T, key: Key) -> Result<FibonacciHandle, HeapError> {
        FibonacciHeap::push(self, item, key)
    }

    fn peek(&self) -> (Option<&T>, Key) {
        FibonacciHeap::peek(self)
    }

    fn pop(&mut self) -> (Option<T>, Key) {
        FibonacciHeap::pop(self)
    }

    fn has(&self, handle: &FibonacciHandle) -> bool {
        FibonacciHeap::has(self, handle)
    }

    fn get(&self, handle: &FibonacciHandle) -> (Option<&T>, Key) {
        FibonacciHeap::get(self, handle)
    }

    fn decrease_key(&mut self, handle: &FibonacciHandle, key: Key) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, handle, key)
    }

    fn delete(&mut self, handle: &FibonacciHandle) -> Result<(T, Key), HeapError> {
        FibonacciHeap::delete(self, handle)
    }

    fn len(&self) -> usize {
        FibonacciHeap::len(self)
    }

    fn is_empty(&self) -> bool {
        FibonacciHeap::is_empty(self)
    }

    fn clear(&mut self) {
        FibonacciHeap::clear(self)
    }
}
