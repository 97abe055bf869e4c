//! Dijkstra's and A* shortest path search on top of a [`PriorityQueue`]
//!
//! The searches push lightweight indices into the queue and keep per-node
//! bookkeeping (best known cost, queue handle, predecessor) in an `FxHashMap`.
//! When a cheaper route to a queued node is found, its entry is lowered with
//! `decrease_key` instead of being pushed a second time.
//!
//! Costs are `f64` and must be non-negative and finite.
//!
//! # Example
//!
//! ```rust
//! use rust_fibonacci_heap::pathfinding::{dijkstra, SearchNode};
//! use rust_fibonacci_heap::FibonacciHeap;
//!
//! #[derive(Clone, PartialEq, Eq, Hash, Debug)]
//! struct Step { at: u32, goal: u32 }
//!
//! impl SearchNode for Step {
//!     fn successors(&self) -> Vec<(Self, f64)> {
//!         vec![
//!             (Step { at: self.at + 1, goal: self.goal }, 1.0),
//!             (Step { at: self.at + 2, goal: self.goal }, 2.5),
//!         ]
//!     }
//!
//!     fn is_goal(&self) -> bool {
//!         self.at == self.goal
//!     }
//! }
//!
//! let (path, cost) = dijkstra::<_, FibonacciHeap<_>>(&Step { at: 0, goal: 4 }).unwrap();
//! assert_eq!(cost, 4.0);
//! assert_eq!(path.len(), 5);
//! ```

use crate::key::{is_storable, Key};
use crate::traits::PriorityQueue;
use log::trace;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Trait for nodes in a search graph.
///
/// The node carries all context needed to generate its successors and to
/// decide whether it is a goal.
pub trait SearchNode: Clone + Eq + Hash {
    /// Returns every neighbour together with the cost of the edge to it.
    fn successors(&self) -> Vec<(Self, f64)>;

    /// Returns true if this node is a goal state.
    fn is_goal(&self) -> bool;
}

/// Trait for nodes that can estimate their remaining distance for A*.
///
/// The heuristic must never overestimate the true cost, or A* may return a
/// suboptimal path.
pub trait AStarNode: SearchNode {
    /// Lower bound on the cost from this node to the nearest goal.
    fn heuristic(&self) -> f64;
}

/// Index of a discovered node; this is what the queue stores.
type NodeIndex = usize;

/// Bookkeeping for one discovered node.
struct NodeEntry<N, H> {
    node: N,
    /// Best known cost from the start
    g_score: f64,
    /// Queue handle while the node is open
    handle: Option<H>,
    came_from: Option<NodeIndex>,
    closed: bool,
}

/// Open and closed sets of a running search.
struct PathFinder<N, H> {
    nodes: Vec<NodeEntry<N, H>>,
    index_of: FxHashMap<N, NodeIndex>,
}

impl<N: SearchNode, H> PathFinder<N, H> {
    fn new() -> Self {
        PathFinder {
            nodes: Vec::new(),
            index_of: FxHashMap::default(),
        }
    }

    /// Returns the index of `node`, creating an entry if it is new.
    fn index_for(&mut self, node: N, g_score: f64) -> (NodeIndex, bool) {
        if let Some(&index) = self.index_of.get(&node) {
            return (index, false);
        }
        let index = self.nodes.len();
        self.index_of.insert(node.clone(), index);
        self.nodes.push(NodeEntry {
            node,
            g_score,
            handle: None,
            came_from: None,
            closed: false,
        });
        (index, true)
    }

    fn reconstruct_path(&self, mut current: NodeIndex) -> Vec<N> {
        let mut path = vec![self.nodes[current].node.clone()];
        while let Some(prev) = self.nodes[current].came_from {
            path.push(self.nodes[prev].node.clone());
            current = prev;
        }
        path.reverse();
        path
    }
}

/// Runs Dijkstra's algorithm from `start` until `is_goal()` returns true.
///
/// Returns the path (start and goal inclusive) and its cost, or `None` if no
/// goal is reachable.
pub fn dijkstra<N, Q>(start: &N) -> Option<(Vec<N>, f64)>
where
    N: SearchNode,
    Q: PriorityQueue<NodeIndex> + Default,
{
    PathFinderBuilder::new(start.clone()).dijkstra::<Q>()
}

/// Runs A* search from `start`, guided by the node's `heuristic()`.
pub fn astar<N, Q>(start: &N) -> Option<(Vec<N>, f64)>
where
    N: AStarNode,
    Q: PriorityQueue<NodeIndex> + Default,
{
    PathFinderBuilder::new(start.clone()).astar::<Q>()
}

/// Builder for searches with limits.
///
/// # Example
///
/// ```rust
/// use rust_fibonacci_heap::pathfinding::{PathFinderBuilder, SearchNode};
/// use rust_fibonacci_heap::FibonacciHeap;
///
/// #[derive(Clone, PartialEq, Eq, Hash)]
/// struct Line(u32);
///
/// impl SearchNode for Line {
///     fn successors(&self) -> Vec<(Self, f64)> {
///         vec![(Line(self.0 + 1), 1.0)]
///     }
///     fn is_goal(&self) -> bool {
///         self.0 == 100
///     }
/// }
///
/// let result = PathFinderBuilder::new(Line(0))
///     .max_cost(10.0)
///     .dijkstra::<FibonacciHeap<_>>();
/// assert!(result.is_none());
/// ```
pub struct PathFinderBuilder<N: SearchNode> {
    start: N,
    max_cost: Option<f64>,
    max_nodes: Option<usize>,
}

impl<N: SearchNode> PathFinderBuilder<N> {
    /// Creates a new builder starting from the given node.
    pub fn new(start: N) -> Self {
        PathFinderBuilder {
            start,
            max_cost: None,
            max_nodes: None,
        }
    }

    /// Stops expanding nodes whose cost from the start exceeds `cost`.
    pub fn max_cost(mut self, cost: f64) -> Self {
        self.max_cost = Some(cost);
        self
    }

    /// Gives up after expanding `count` nodes.
    pub fn max_nodes(mut self, count: usize) -> Self {
        self.max_nodes = Some(count);
        self
    }

    /// Runs Dijkstra's algorithm with the configured limits.
    pub fn dijkstra<Q>(self) -> Option<(Vec<N>, f64)>
    where
        Q: PriorityQueue<NodeIndex> + Default,
    {
        self.search::<Q>(|_| 0.0)
    }

    /// Runs A* search with the configured limits.
    pub fn astar<Q>(self) -> Option<(Vec<N>, f64)>
    where
        N: AStarNode,
        Q: PriorityQueue<NodeIndex> + Default,
    {
        self.search::<Q>(|n| n.heuristic())
    }

    fn search<Q>(self, heuristic: impl Fn(&N) -> f64) -> Option<(Vec<N>, f64)>
    where
        Q: PriorityQueue<NodeIndex> + Default,
    {
        let mut queue = Q::default();
        let mut finder: PathFinder<N, Q::Handle> = PathFinder::new();
        let mut expanded = 0usize;

        let f_start: Key = heuristic(&self.start);
        debug_assert!(is_storable(f_start), "unusable start priority {}", f_start);
        let (start_index, _) = finder.index_for(self.start, 0.0);
        let handle = queue.push(start_index, f_start).ok()?;
        finder.nodes[start_index].handle = Some(handle);

        while let (Some(current), _) = queue.pop() {
            let entry = &mut finder.nodes[current];
            entry.closed = true;
            entry.handle = None;
            let current_g = entry.g_score;

            if self.max_cost.is_some_and(|max| current_g > max) {
                continue;
            }
            if entry.node.is_goal() {
                trace!("search: goal reached after {} expansions", expanded);
                return Some((finder.reconstruct_path(current), current_g));
            }
            if self.max_nodes.is_some_and(|max| expanded >= max) {
                return None;
            }
            expanded += 1;

            let current_node = entry.node.clone();
            for (neighbor, edge_cost) in current_node.successors() {
                debug_assert!(edge_cost >= 0.0, "negative edge cost {}", edge_cost);
                let tentative_g = current_g + edge_cost;
                let (index, is_new) = finder.index_for(neighbor, tentative_g);
                let entry = &mut finder.nodes[index];
                if entry.closed || (!is_new && tentative_g >= entry.g_score) {
                    continue;
                }

                entry.g_score = tentative_g;
                entry.came_from = Some(current);
                let f = tentative_g + heuristic(&entry.node);
                debug_assert!(is_storable(f), "unusable priority {}", f);
                match entry.handle {
                    Some(handle) => {
                        // f only shrinks here since h is fixed per node
                        queue.decrease_key(&handle, f).ok()?;
                    }
                    None => entry.handle = Some(queue.push(index, f).ok()?),
                }
            }
        }

        None
    }
}
