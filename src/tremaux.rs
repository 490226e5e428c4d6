//! Trémaux's maze exploration.
//!
//! A memory-less walker in the sense that it keeps no map and no path
//! stack - only a table of per-edge visit marks. Each step looks at the
//! open neighbours of the current cell, prefers edges never walked, falls
//! back to edges walked once, and takes a twice-walked edge only when
//! nothing better exists. Marks are undirected: crossing an edge in either
//! direction bumps the same counter. On a tree maze every edge is crossed
//! at most twice, which bounds a full run by `2 * (cells - 1)` steps.

use crate::cells::{CoordinateSmallVec, GridCoordinate};
use crate::errors::{ErrorKind, Result};
use crate::grid::Grid;
use crate::utils::{fnv_hashmap, FnvHashMap};

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Key for the undirected edge mark table: the pair ordered so that the
/// lexicographically smaller coordinate comes first.
fn edge_key(a: GridCoordinate, b: GridCoordinate) -> (GridCoordinate, GridCoordinate) {
    if a.x < b.x || (a.x == b.x && a.y < b.y) {
        (a, b)
    } else {
        (b, a)
    }
}

/// The hard upper bound on steps for a full Trémaux run over a perfect
/// maze: twice the edge count of its spanning tree.
pub fn tremaux_step_limit(grid: &Grid) -> usize {
    2 * (grid.size() - 1)
}

/// Stepwise Trémaux walker over one grid.
///
/// Call [`start`](TremauxSolver::start) to (re)begin a run, then
/// [`next_step`](TremauxSolver::next_step) once per external tick until
/// [`current`](TremauxSolver::current) reaches the caller's goal. The
/// solver owns its edge mark table and random source; a fresh `start`
/// fully resets the marks so no state leaks between runs.
pub struct TremauxSolver {
    rng: XorShiftRng,
    edge_marks: FnvHashMap<(GridCoordinate, GridCoordinate), u8>,
    current: GridCoordinate,
}

impl TremauxSolver {
    pub fn new(seed: u64) -> TremauxSolver {
        TremauxSolver {
            rng: XorShiftRng::seed_from_u64(seed),
            edge_marks: fnv_hashmap(0),
            current: GridCoordinate::new(0, 0),
        }
    }

    /// Reset all edge marks and place the walker on `origin`.
    pub fn start(&mut self, grid: &Grid, origin: GridCoordinate) -> Result<()> {
        if !grid.is_valid_coordinate(origin) {
            return Err(ErrorKind::OutOfBounds(origin.x, origin.y).into());
        }
        self.edge_marks = fnv_hashmap(grid.size());
        self.current = origin;
        Ok(())
    }

    #[inline]
    pub fn current(&self) -> GridCoordinate {
        self.current
    }

    /// Number of marks on the undirected edge between two cells.
    pub fn edge_mark(&self, a: GridCoordinate, b: GridCoordinate) -> u8 {
        self.edge_marks.get(&edge_key(a, b)).cloned().unwrap_or(0)
    }

    fn increment_edge_mark(&mut self, a: GridCoordinate, b: GridCoordinate) {
        let mark = self.edge_marks.entry(edge_key(a, b)).or_insert(0);
        *mark = mark.saturating_add(1);
    }

    /// Perform exactly one state transition: choose an open neighbour,
    /// mark the edge walked and move onto the neighbour, returning it.
    ///
    /// Fails with `Stuck` when the current cell has zero open neighbours,
    /// which cannot happen on a connected maze but must not loop forever
    /// on a malformed grid.
    pub fn next_step(&mut self, grid: &Grid) -> Result<GridCoordinate> {
        let neighbours: CoordinateSmallVec = grid.neighbours(self.current)?;
        if neighbours.is_empty() {
            return Err(ErrorKind::Stuck(self.current.x, self.current.y).into());
        }

        let mut fresh = CoordinateSmallVec::new();
        let mut once_marked = CoordinateSmallVec::new();
        for &neighbour in &*neighbours {
            match self.edge_mark(self.current, neighbour) {
                0 => fresh.push(neighbour),
                1 => once_marked.push(neighbour),
                _ => {}
            }
        }

        // Tier order: fresh edges, then return edges, then - only when
        // everything is dead - any neighbour at all (true dead ends).
        let tier: &[GridCoordinate] = if !fresh.is_empty() {
            &fresh
        } else if !once_marked.is_empty() {
            &once_marked
        } else {
            &neighbours
        };
        let chosen = tier[self.rng.gen_range(0..tier.len())];

        self.increment_edge_mark(self.current, chosen);
        self.current = chosen;
        Ok(chosen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use crate::generators::ellers;
    use crate::units::{Height, Width};

    use quickcheck::{quickcheck, TestResult};

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    fn run_to_goal(
        grid: &Grid,
        solver: &mut TremauxSolver,
        origin: GridCoordinate,
        goal: GridCoordinate,
    ) -> Option<usize> {
        solver.start(grid, origin).unwrap();
        let limit = tremaux_step_limit(grid);
        let mut steps = 0;
        while solver.current() != goal {
            if steps >= limit {
                return None;
            }
            solver.next_step(grid).unwrap();
            steps += 1;
        }
        Some(steps)
    }

    #[test]
    fn stuck_on_a_sealed_cell() {
        let grid = Grid::new(Width(3), Height(3)).unwrap();
        let mut solver = TremauxSolver::new(7);
        solver.start(&grid, gc(1, 1)).unwrap();
        assert!(matches!(
            solver.next_step(&grid),
            Err(Error(ErrorKind::Stuck(1, 1), _))
        ));
        // A failed step must not have moved the walker.
        assert_eq!(solver.current(), gc(1, 1));
    }

    #[test]
    fn invalid_origin_rejected() {
        let grid = Grid::new(Width(2), Height(2)).unwrap();
        let mut solver = TremauxSolver::new(7);
        assert!(matches!(
            solver.start(&grid, gc(8, 8)),
            Err(Error(ErrorKind::OutOfBounds(8, 8), _))
        ));
    }

    #[test]
    fn marks_are_undirected() {
        let mut grid = Grid::new(Width(2), Height(1)).unwrap();
        grid.link(gc(0, 0), gc(0, 1)).unwrap();

        let mut solver = TremauxSolver::new(7);
        solver.start(&grid, gc(0, 0)).unwrap();
        assert_eq!(solver.next_step(&grid).unwrap(), gc(0, 1));
        assert_eq!(solver.edge_mark(gc(0, 0), gc(0, 1)), 1);
        assert_eq!(solver.edge_mark(gc(0, 1), gc(0, 0)), 1);

        // Walking back bumps the same counter.
        assert_eq!(solver.next_step(&grid).unwrap(), gc(0, 0));
        assert_eq!(solver.edge_mark(gc(0, 0), gc(0, 1)), 2);
    }

    #[test]
    fn start_resets_prior_marks() {
        let mut grid = Grid::new(Width(2), Height(1)).unwrap();
        grid.link(gc(0, 0), gc(0, 1)).unwrap();

        let mut solver = TremauxSolver::new(7);
        solver.start(&grid, gc(0, 0)).unwrap();
        solver.next_step(&grid).unwrap();
        assert_eq!(solver.edge_mark(gc(0, 0), gc(0, 1)), 1);

        solver.start(&grid, gc(0, 0)).unwrap();
        assert_eq!(solver.edge_mark(gc(0, 0), gc(0, 1)), 0);
        assert_eq!(solver.current(), gc(0, 0));
    }

    #[test]
    fn dead_end_corridor_walks_out_again() {
        // 1x3 corridor: the walker must reach the far end and be able to
        // return over once-marked edges.
        let mut grid = Grid::new(Width(3), Height(1)).unwrap();
        grid.link(gc(0, 0), gc(0, 1)).unwrap();
        grid.link(gc(0, 1), gc(0, 2)).unwrap();

        let mut solver = TremauxSolver::new(11);
        let steps = run_to_goal(&grid, &mut solver, gc(0, 0), gc(0, 2)).unwrap();
        assert_eq!(steps, 2);

        // And back: from the dead end every edge is marked once.
        let steps_back = run_to_goal(&grid, &mut solver, gc(0, 2), gc(0, 0)).unwrap();
        assert_eq!(steps_back, 2);
    }

    #[test]
    fn two_by_two_maze_within_six_steps() {
        let grid = ellers(Width(2), Height(2), 42).unwrap();
        let mut solver = TremauxSolver::new(42);
        let steps = run_to_goal(&grid, &mut solver, gc(0, 0), gc(1, 1))
            .expect("must reach the goal within the step bound");
        assert!(steps <= 6, "took {} steps", steps);
    }

    #[test]
    fn quickcheck_terminates_within_the_edge_bound() {
        fn prop(width: u8, height: u8, seed: u64) -> TestResult {
            let (w, h) = (usize::from(width % 10) + 1, usize::from(height % 10) + 1);
            let grid = ellers(Width(w), Height(h), seed).unwrap();

            let mut solver = TremauxSolver::new(seed ^ 0x5eed);
            let origin = gc(0, 0);
            let goal = gc(h as u32 - 1, w as u32 - 1);
            match run_to_goal(&grid, &mut solver, origin, goal) {
                Some(_) => TestResult::passed(),
                None => TestResult::error("exceeded 2*(cells-1) steps"),
            }
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
