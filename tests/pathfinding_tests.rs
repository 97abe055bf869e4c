//! Shortest path searches driven by the Fibonacci heap
//!
//! Results are checked against a Bellman-Ford relaxation over the same
//! randomly weighted grid.

mod common;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_fibonacci_heap::pathfinding::{astar, dijkstra, AStarNode, PathFinderBuilder, SearchNode};
use rust_fibonacci_heap::FibonacciHeap;
use std::rc::Rc;

const SIZE: usize = 12;

/// Weighted grid; entering cell (x, y) costs `weights[y][x]`.
struct Grid {
    weights: Vec<Vec<f64>>,
}

impl Grid {
    fn random(seed: u64) -> Rc<Grid> {
        let mut rng = StdRng::seed_from_u64(seed);
        let weights = (0..SIZE)
            .map(|_| (0..SIZE).map(|_| rng.gen_range(1.0..10.0)).collect())
            .collect();
        Rc::new(Grid { weights })
    }

    fn neighbours(&self, x: usize, y: usize) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(4);
        if x > 0 {
            out.push((x - 1, y));
        }
        if y > 0 {
            out.push((x, y - 1));
        }
        if x + 1 < SIZE {
            out.push((x + 1, y));
        }
        if y + 1 < SIZE {
            out.push((x, y + 1));
        }
        out
    }

    /// Bellman-Ford distances from (0, 0)
    fn reference_distances(&self) -> Vec<Vec<f64>> {
        let mut dist = vec![vec![f64::INFINITY; SIZE]; SIZE];
        dist[0][0] = 0.0;
        let mut changed = true;
        while changed {
            changed = false;
            for y in 0..SIZE {
                for x in 0..SIZE {
                    if dist[y][x].is_infinite() {
                        continue;
                    }
                    for (nx, ny) in self.neighbours(x, y) {
                        let candidate = dist[y][x] + self.weights[ny][nx];
                        if candidate < dist[ny][nx] {
                            dist[ny][nx] = candidate;
                            changed = true;
                        }
                    }
                }
            }
        }
        dist
    }
}

#[derive(Clone)]
struct Cell {
    x: usize,
    y: usize,
    goal: (usize, usize),
    grid: Rc<Grid>,
}

impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        (self.x, self.y) == (other.x, other.y)
    }
}

impl Eq for Cell {}

impl std::hash::Hash for Cell {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        (self.x, self.y).hash(state);
    }
}

impl SearchNode for Cell {
    fn successors(&self) -> Vec<(Self, f64)> {
        self.grid
            .neighbours(self.x, self.y)
            .into_iter()
            .map(|(x, y)| {
                let cost = self.grid.weights[y][x];
                (
                    Cell {
                        x,
                        y,
                        goal: self.goal,
                        grid: Rc::clone(&self.grid),
                    },
                    cost,
                )
            })
            .collect()
    }

    fn is_goal(&self) -> bool {
        (self.x, self.y) == self.goal
    }
}

impl AStarNode for Cell {
    fn heuristic(&self) -> f64 {
        // Every step costs at least 1
        (self.x.abs_diff(self.goal.0) + self.y.abs_diff(self.goal.1)) as f64
    }
}

fn start(grid: &Rc<Grid>, goal: (usize, usize)) -> Cell {
    Cell {
        x: 0,
        y: 0,
        goal,
        grid: Rc::clone(grid),
    }
}

fn path_cost(grid: &Grid, path: &[Cell]) -> f64 {
    path.iter().skip(1).map(|c| grid.weights[c.y][c.x]).sum()
}

#[test]
fn test_dijkstra_matches_bellman_ford() {
    common::init_test();
    for seed in 0..5 {
        let grid = Grid::random(seed);
        let reference = grid.reference_distances();
        for goal in [(SIZE - 1, SIZE - 1), (SIZE / 2, 3), (0, SIZE - 1)] {
            let (path, cost) = dijkstra::<_, FibonacciHeap<_>>(&start(&grid, goal)).unwrap();
            assert!((cost - reference[goal.1][goal.0]).abs() < 1e-9);
            assert!((path_cost(&grid, &path) - cost).abs() < 1e-9);
            assert_eq!((path[0].x, path[0].y), (0, 0));
            let last = path.last().unwrap();
            assert_eq!((last.x, last.y), goal);
        }
    }
}

#[test]
fn test_astar_matches_dijkstra() {
    let grid = Grid::random(42);
    let goal = (SIZE - 1, SIZE - 2);
    let (_, dijkstra_cost) = dijkstra::<_, FibonacciHeap<_>>(&start(&grid, goal)).unwrap();
    let (path, astar_cost) = astar::<_, FibonacciHeap<_>>(&start(&grid, goal)).unwrap();
    assert!((dijkstra_cost - astar_cost).abs() < 1e-9);
    assert!((path_cost(&grid, &path) - astar_cost).abs() < 1e-9);
}

#[test]
fn test_max_cost_cuts_off_search() {
    let grid = Grid::random(3);
    let goal = (SIZE - 1, SIZE - 1);
    let reference = grid.reference_distances()[goal.1][goal.0];

    let below = PathFinderBuilder::new(start(&grid, goal))
        .max_cost(reference / 2.0)
        .dijkstra::<FibonacciHeap<_>>();
    assert!(below.is_none());

    let above = PathFinderBuilder::new(start(&grid, goal))
        .max_cost(reference + 1.0)
        .dijkstra::<FibonacciHeap<_>>();
    assert!(above.is_some());
}
