//! Route finding over a grid's open passages.
//!
//! [`find_path`] is A* with a Manhattan heuristic and uniform passage cost,
//! backed by a binary-heap open set that also answers position membership
//! in O(1). [`Distances`] is a plain breadth-first flood fill from one
//! cell; the solvers do not need it but it gives exact shortest distances,
//! which makes it the independent oracle for A* optimality and the way the
//! driver binary picks far-away goals.

use crate::cells::{CoordinateSmallVec, GridCoordinate};
use crate::errors::{ErrorKind, Result};
use crate::grid::Grid;
use crate::utils::{fnv_hashmap, fnv_hashset, FnvHashMap, FnvHashSet};

use bit_set::BitSet;

/// Never overestimates the true remaining cost on a grid with unit-cost
/// orthogonal moves, which is what makes the early exit of A* safe.
fn manhattan(a: GridCoordinate, b: GridCoordinate) -> u32 {
    let dx = if a.x > b.x { a.x - b.x } else { b.x - a.x };
    let dy = if a.y > b.y { a.y - b.y } else { b.y - a.y };
    dx + dy
}

#[derive(Copy, Clone, Debug)]
struct SearchNode {
    position: GridCoordinate,
    /// `g + heuristic`; lives only for the duration of one search.
    priority: u32,
}

/// Min-first binary heap of search nodes with a position membership index.
///
/// Insert and extract are O(log n); `contains` is O(1) and is what keeps
/// duplicate open-set entries for one position out of the heap. Ties on
/// priority pop in an unspecified order.
struct OpenSet {
    elements: Vec<SearchNode>,
    positions: FnvHashSet<GridCoordinate>,
}

impl OpenSet {
    fn with_capacity(capacity: usize) -> OpenSet {
        OpenSet {
            elements: Vec::with_capacity(capacity),
            positions: fnv_hashset(capacity),
        }
    }

    fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn contains(&self, position: GridCoordinate) -> bool {
        self.positions.contains(&position)
    }

    fn push(&mut self, node: SearchNode) {
        self.positions.insert(node.position);
        self.elements.push(node);

        let mut child = self.elements.len() - 1;
        while child > 0 {
            let parent = (child - 1) / 2;
            if self.elements[child].priority >= self.elements[parent].priority {
                break;
            }
            self.elements.swap(child, parent);
            child = parent;
        }
    }

    fn pop(&mut self) -> Option<SearchNode> {
        if self.elements.is_empty() {
            return None;
        }
        let front = self.elements.swap_remove(0);
        self.positions.remove(&front.position);

        let len = self.elements.len();
        let mut parent = 0;
        loop {
            let mut smallest = parent * 2 + 1;
            if smallest >= len {
                break;
            }
            let right = smallest + 1;
            if right < len && self.elements[right].priority < self.elements[smallest].priority {
                smallest = right;
            }
            if self.elements[parent].priority <= self.elements[smallest].priority {
                break;
            }
            self.elements.swap(parent, smallest);
            parent = smallest;
        }
        Some(front)
    }
}

/// A* shortest path from `start` to `goal`, start..goal inclusive.
///
/// Passages cost 1 each, so the first time the goal is popped from the
/// open set the reconstructed path is optimal. Fails with `OutOfBounds`
/// for an invalid endpoint and `NotFound` when the open set empties first
/// - impossible on a well formed perfect maze, but a disconnected or
/// malformed grid must be survived, not looped on.
pub fn find_path(grid: &Grid, start: GridCoordinate, goal: GridCoordinate) -> Result<Vec<GridCoordinate>> {
    for endpoint in [start, goal].iter() {
        if !grid.is_valid_coordinate(*endpoint) {
            return Err(ErrorKind::OutOfBounds(endpoint.x, endpoint.y).into());
        }
    }

    let cells_count = grid.size();
    let mut open_set = OpenSet::with_capacity(cells_count / 2);
    let mut closed = BitSet::with_capacity(cells_count);
    let mut g_score: FnvHashMap<GridCoordinate, u32> = fnv_hashmap(cells_count / 2);
    let mut came_from: FnvHashMap<GridCoordinate, GridCoordinate> = fnv_hashmap(cells_count / 2);

    g_score.insert(start, 0);
    open_set.push(SearchNode {
        position: start,
        priority: manhattan(start, goal),
    });

    while let Some(node) = open_set.pop() {
        let current = node.position;
        if current == goal {
            return Ok(reconstruct_path(&came_from, current));
        }

        let current_index = grid
            .coordinate_to_index(current)
            .expect("open set holds valid coordinates only");
        closed.insert(current_index);

        let current_g = g_score[&current];
        let neighbours: CoordinateSmallVec = grid.neighbours(current)?;
        for &neighbour in &*neighbours {
            let neighbour_index = grid
                .coordinate_to_index(neighbour)
                .expect("neighbours are valid coordinates");
            if closed.contains(neighbour_index) {
                continue;
            }

            let tentative_g = current_g + 1;
            let improved = g_score
                .get(&neighbour)
                .map_or(true, |&best| tentative_g < best);
            if improved {
                came_from.insert(neighbour, current);
                g_score.insert(neighbour, tentative_g);
                if !open_set.contains(neighbour) {
                    open_set.push(SearchNode {
                        position: neighbour,
                        priority: tentative_g + manhattan(neighbour, goal),
                    });
                }
            }
        }
    }

    Err(ErrorKind::NotFound.into())
}

fn reconstruct_path(
    came_from: &FnvHashMap<GridCoordinate, GridCoordinate>,
    goal: GridCoordinate,
) -> Vec<GridCoordinate> {
    let mut path = vec![goal];
    let mut current = goal;
    while let Some(&previous) = came_from.get(&current) {
        current = previous;
        path.push(current);
    }
    path.reverse();
    path
}

/// Breadth-first distances from one start cell to everything reachable.
#[derive(Debug, Clone)]
pub struct Distances {
    start: GridCoordinate,
    distances: FnvHashMap<GridCoordinate, u32>,
    max_distance: u32,
}

impl Distances {
    /// Flood fill the grid from `start`. Fails with `OutOfBounds` for an
    /// invalid start; unreachable cells simply have no recorded distance.
    pub fn new(grid: &Grid, start: GridCoordinate) -> Result<Distances> {
        if !grid.is_valid_coordinate(start) {
            return Err(ErrorKind::OutOfBounds(start.x, start.y).into());
        }

        let mut distances = fnv_hashmap(grid.size());
        distances.insert(start, 0);
        let mut max_distance = 0;

        // Uniform passage cost, so the first time a cell is reached its
        // distance is final - the map doubles as the visited set.
        let mut frontier = vec![start];
        let mut depth = 0u32;
        while !frontier.is_empty() {
            depth += 1;
            let mut next_frontier = vec![];
            for &cell_coord in &frontier {
                let neighbours = grid
                    .neighbours(cell_coord)
                    .expect("frontier holds valid coordinates only");
                for &link_coord in &*neighbours {
                    if !distances.contains_key(&link_coord) {
                        distances.insert(link_coord, depth);
                        max_distance = depth;
                        next_frontier.push(link_coord);
                    }
                }
            }
            frontier = next_frontier;
        }

        Ok(Distances {
            start,
            distances,
            max_distance,
        })
    }

    #[inline]
    pub fn start(&self) -> GridCoordinate {
        self.start
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max_distance
    }

    /// Shortest-path distance from the start, or None if unreachable.
    #[inline]
    pub fn distance_to(&self, coord: GridCoordinate) -> Option<u32> {
        self.distances.get(&coord).cloned()
    }

    /// One of the cells at the maximum distance from the start.
    pub fn furthest_point(&self) -> GridCoordinate {
        self.distances
            .iter()
            .find(|&(_, &distance)| distance == self.max_distance)
            .map(|(&coord, _)| coord)
            .unwrap_or(self.start)
    }
}
