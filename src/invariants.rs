//! Structural validation for [`FibonacciHeap`]
//!
//! [`FibonacciHeap::validate`] walks the whole forest and reports the first
//! broken invariant. It is O(n) and meant for tests, fuzzing and the
//! `verify-invariants` feature, not for production paths.

use crate::fibonacci::FibonacciHeap;
use crate::key::Key;
use crate::storage::NodeKey;
use std::fmt;

/// A broken structural invariant found by [`FibonacciHeap::validate`]
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// The cached minimum is missing for a non-empty heap, or present for an
    /// empty one
    MinPresence { len: usize },
    /// A link points at a node that is no longer in the arena
    DanglingLink,
    /// `left` and `right` links of a ring are not mutual inverses
    BrokenRing { key: Key },
    /// A node's parent link does not match the node whose child ring holds it
    ParentMismatch { key: Key },
    /// A node's stored degree differs from the size of its child ring
    DegreeMismatch { key: Key, degree: usize, children: usize },
    /// A child's key is smaller than its parent's
    HeapOrder { parent: Key, child: Key },
    /// A root carries the mark bit
    MarkedRoot { key: Key },
    /// A root has a smaller key than the cached minimum
    MinNotMinimal { min: Key, root: Key },
    /// A key is negative infinity or NaN
    UnstorableKey,
    /// Reachable nodes, `len` and arena size disagree
    CountMismatch { reachable: usize, len: usize, arena: usize },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::MinPresence { len } => {
                write!(f, "minimum root presence does not match len {}", len)
            }
            InvariantViolation::DanglingLink => write!(f, "link to a freed node"),
            InvariantViolation::BrokenRing { key } => {
                write!(f, "sibling ring broken at key {}", key)
            }
            InvariantViolation::ParentMismatch { key } => {
                write!(f, "parent link of key {} is wrong", key)
            }
            InvariantViolation::DegreeMismatch {
                key,
                degree,
                children,
            } => write!(
                f,
                "key {} has degree {} but {} children",
                key, degree, children
            ),
            InvariantViolation::HeapOrder { parent, child } => {
                write!(f, "child key {} is below parent key {}", child, parent)
            }
            InvariantViolation::MarkedRoot { key } => write!(f, "root {} is marked", key),
            InvariantViolation::MinNotMinimal { min, root } => {
                write!(f, "root key {} is below cached minimum {}", root, min)
            }
            InvariantViolation::UnstorableKey => write!(f, "stored key is -inf or NaN"),
            InvariantViolation::CountMismatch {
                reachable,
                len,
                arena,
            } => write!(
                f,
                "{} reachable nodes, len {}, arena holds {}",
                reachable, len, arena
            ),
        }
    }
}

impl std::error::Error for InvariantViolation {}

impl<T> FibonacciHeap<T> {
    /// Checks every structural invariant of the heap
    ///
    /// # Errors
    /// Returns the first [`InvariantViolation`] found.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rust_fibonacci_heap::FibonacciHeap;
    ///
    /// let mut heap = FibonacciHeap::new();
    /// for i in 0..10 {
    ///     heap.push(i, i as f64).unwrap();
    /// }
    /// heap.pop();
    /// assert!(heap.validate().is_ok());
    /// ```
    pub fn validate(&self) -> Result<(), InvariantViolation> {
        let arena = self.nodes.len();
        let Some(min) = self.min else {
            return if self.len == 0 && arena == 0 {
                Ok(())
            } else {
                Err(InvariantViolation::MinPresence { len: self.len })
            };
        };
        if self.len == 0 {
            return Err(InvariantViolation::MinPresence { len: 0 });
        }

        let min_node = self.nodes.get(min).ok_or(InvariantViolation::DanglingLink)?;
        let min_key = min_node.key;

        // (first member of a ring, owner of the ring)
        let mut pending: Vec<(NodeKey, Option<NodeKey>)> = vec![(min, None)];
        let mut reachable = 0usize;

        while let Some((start, owner)) = pending.pop() {
            let mut current = start;
            loop {
                let node = self.nodes.get(current).ok_or(InvariantViolation::DanglingLink)?;
                let key = node.key;
                reachable += 1;
                if reachable > arena {
                    return Err(InvariantViolation::CountMismatch {
                        reachable,
                        len: self.len,
                        arena,
                    });
                }

                if key.is_nan() || key == f64::NEG_INFINITY {
                    return Err(InvariantViolation::UnstorableKey);
                }
                let right = self
                    .nodes
                    .get(node.right)
                    .ok_or(InvariantViolation::DanglingLink)?;
                if right.left != current {
                    return Err(InvariantViolation::BrokenRing { key });
                }
                if node.parent != owner {
                    return Err(InvariantViolation::ParentMismatch { key });
                }

                match owner {
                    None => {
                        if node.marked {
                            return Err(InvariantViolation::MarkedRoot { key });
                        }
                        if key < min_key {
                            return Err(InvariantViolation::MinNotMinimal { min: min_key, root: key });
                        }
                    }
                    Some(parent) => {
                        let parent_key = self.nodes[parent].key;
                        if key < parent_key {
                            return Err(InvariantViolation::HeapOrder {
                                parent: parent_key,
                                child: key,
                            });
                        }
                    }
                }

                let children = match node.child {
                    Some(child) => {
                        pending.push((child, Some(current)));
                        self.ring_len(child)?
                    }
                    None => 0,
                };
                if children != node.degree as usize {
                    return Err(InvariantViolation::DegreeMismatch {
                        key,
                        degree: node.degree as usize,
                        children,
                    });
                }

                current = node.right;
                if current == start {
                    break;
                }
            }
        }

        if reachable != self.len || reachable != arena {
            return Err(InvariantViolation::CountMismatch {
                reachable,
                len: self.len,
                arena,
            });
        }
        Ok(())
    }

    /// Counts a ring without trusting it to be closed
    fn ring_len(&self, start: NodeKey) -> Result<usize, InvariantViolation> {
        let limit = self.nodes.len();
        let mut count = 1;
        let mut current = self.nodes.get(start).ok_or(InvariantViolation::DanglingLink)?.right;
        while current != start {
            count += 1;
            if count > limit {
                return Err(InvariantViolation::CountMismatch {
                    reachable: count,
                    len: self.len,
                    arena: limit,
                });
            }
            current = self.nodes.get(current).ok_or(InvariantViolation::DanglingLink)?.right;
        }
        Ok(count)
    }
}
