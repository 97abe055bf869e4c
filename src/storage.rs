//! Arena storage for heap nodes
//!
//! Every node lives in a [`NodePool`], a thin layer over a `slotmap::SlotMap`.
//! Structural links (parent, child, left/right siblings) are [`NodeKey`]s into
//! the same pool, so the parent/child/sibling cycles of a Fibonacci heap never
//! become ownership cycles: the pool alone owns the nodes.
//!
//! # Generational keys
//!
//! Slot map keys carry a version that is bumped whenever a slot is freed.
//! A key that outlived its node therefore never resolves to whatever node
//! reuses the slot, which is what makes O(1) handle liveness checks possible.
//!
//! # Circular lists
//!
//! Siblings form circular doubly-linked rings through `left` / `right`. A lone
//! node points to itself in both directions. The ring operations here mirror
//! the usual intrusive circular list primitives (`make_circular`,
//! `insert_before`, `unlink`, `splice`) but work on keys instead of pointers.

use crate::degree::Degree;
use crate::key::Key;
use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Key of a node inside a [`NodePool`]
    pub struct NodeKey;
}

/// A heap entry together with its structural links
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) item: T,
    pub(crate) key: Key,
    /// Non-owning back link; `None` for roots
    pub(crate) parent: Option<NodeKey>,
    /// Any one member of the child ring
    pub(crate) child: Option<NodeKey>,
    pub(crate) left: NodeKey,
    pub(crate) right: NodeKey,
    pub(crate) degree: Degree,
    pub(crate) marked: bool,
}

/// Arena owning every node of one heap
#[derive(Debug)]
pub(crate) struct NodePool<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
}

impl<T> NodePool<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
        }
    }

    /// Allocates a detached node that forms a ring of one
    pub(crate) fn insert(&mut self, item: T, key: Key) -> NodeKey {
        self.nodes.insert_with_key(|this| Node {
            item,
            key,
            parent: None,
            child: None,
            left: this,
            right: this,
            degree: 0,
            marked: false,
        })
    }

    /// Moves an already-built node into the pool, links untouched
    pub(crate) fn adopt(&mut self, node: Node<T>) -> NodeKey {
        self.nodes.insert(node)
    }

    /// Frees a node. The caller must have unlinked it first.
    pub(crate) fn remove(&mut self, key: NodeKey) -> Option<Node<T>> {
        self.nodes.remove(key)
    }

    #[inline]
    pub(crate) fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(key)
    }

    #[inline]
    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<T>> {
        self.nodes.get(key)
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (NodeKey, &Node<T>)> {
        self.nodes.iter()
    }

    pub(crate) fn drain(&mut self) -> impl Iterator<Item = (NodeKey, Node<T>)> + '_ {
        self.nodes.drain()
    }

    /// Inserts the lone node `node` into the ring containing `anchor`,
    /// immediately to the left of `anchor`.
    pub(crate) fn insert_before(&mut self, anchor: NodeKey, node: NodeKey) {
        let anchor_left = self[anchor].left;
        self[node].right = anchor;
        self[node].left = anchor_left;
        self[anchor_left].right = node;
        self[anchor].left = node;
    }

    /// Removes `node` from its ring and turns it into a ring of one.
    ///
    /// Returns a former neighbour, or `None` if `node` was alone.
    pub(crate) fn unlink(&mut self, node: NodeKey) -> Option<NodeKey> {
        let left = self[node].left;
        let right = self[node].right;
        self[node].left = node;
        self[node].right = node;
        if right == node {
            return None;
        }
        self[left].right = right;
        self[right].left = left;
        Some(right)
    }

    /// Joins the ring containing `a` with the ring containing `b` in O(1).
    ///
    /// The two rings must be distinct.
    pub(crate) fn splice(&mut self, a: NodeKey, b: NodeKey) {
        let a_left = self[a].left;
        let b_left = self[b].left;
        self[a_left].right = b;
        self[b].left = a_left;
        self[b_left].right = a;
        self[a].left = b_left;
    }

    /// Collects the members of the ring containing `start`, beginning with it.
    pub(crate) fn ring(&self, start: NodeKey) -> Vec<NodeKey> {
        let mut members = vec![start];
        let mut current = self[start].right;
        while current != start {
            members.push(current);
            current = self[current].right;
        }
        members
    }
}

impl<T> std::ops::Index<NodeKey> for NodePool<T> {
    type Output = Node<T>;

    #[inline]
    fn index(&self, key: NodeKey) -> &Node<T> {
        &self.nodes[key]
    }
}

impl<T> std::ops::IndexMut<NodeKey> for NodePool<T> {
    #[inline]
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<T> {
        &mut self.nodes[key]
    }
}
