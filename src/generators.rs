//! Maze generation.
//!
//! Eller's algorithm builds a perfect maze one row at a time, tracking
//! connectivity with disjoint-set labels stored in each cell and merged by
//! flat relabelling of the current row. Rows here run along the `y` axis
//! (`row` in `0..width`), cells within a row along the `x` axis - the
//! crate's inverted axis convention.

use crate::errors::Result;
use crate::grid::Grid;
use crate::units::{Height, Width};

use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;

/// Generate a perfect maze with Eller's algorithm.
///
/// The grid is built fresh on every call; the generator owns a seeded
/// `XorShiftRng` so the same `(width, height, seed)` always produces a
/// bit-identical wall layout. Fails with `InvalidDimensions` for zero
/// extents.
///
/// Per row, in this fixed random draw order:
/// 1. set assignment (no randomness): inherit the label of the cell above
///    when its bottom wall is open, else take a fresh label;
/// 2. horizontal merges: one fair coin per left-to-right adjacent pair
///    whose labels differ; on success relabel the row and open the shared
///    right wall;
/// 3. vertical connections: per label group (first-encountered order), one
///    uniform pick for the mandatory bottom opening that keeps the set
///    alive in the next row, then one coin per remaining member for an
///    optional extra opening. An extra opening always reaches a cell with
///    no other connection to the tree, so it never closes a cycle.
/// The last row skips steps 2 and 3 and instead merges every adjacent
/// pair with differing labels unconditionally, which makes the whole grid
/// one set.
pub fn ellers(width: Width, height: Height, seed: u64) -> Result<Grid> {
    let mut grid = Grid::new(width, height)?;
    let mut rng = XorShiftRng::seed_from_u64(seed);

    let rows = width.0;
    let row_cells = height.0;
    let mut next_set_id = 0usize;
    let mut fresh_set_id = || {
        let id = next_set_id;
        next_set_id += 1;
        id
    };

    for row in 0..rows {
        // Step 1: labels for this row.
        for x in 0..row_cells {
            let inherited = if row > 0 && !grid.at(x, row - 1).bottom_wall {
                Some(grid.at(x, row - 1).set_id)
            } else {
                None
            };
            grid.at_mut(x, row).set_id = match inherited {
                Some(set_id) => set_id,
                None => fresh_set_id(),
            };
        }

        let last_row = row + 1 == rows;

        if !last_row {
            // Step 2: random horizontal merges.
            for x in 0..row_cells.saturating_sub(1) {
                let differ = grid.at(x, row).set_id != grid.at(x + 1, row).set_id;
                if differ && rng.gen::<bool>() {
                    merge_row_sets(&mut grid, row, x, x + 1);
                    grid.at_mut(x, row).right_wall = false;
                }
            }

            // Step 3: vertical connections, one mandatory per set.
            for (_, members) in row_sets(&grid, row) {
                let mandatory = rng.gen_range(0..members.len());
                grid.at_mut(members[mandatory], row).bottom_wall = false;

                for (i, &x) in members.iter().enumerate() {
                    if i != mandatory && rng.gen::<bool>() {
                        grid.at_mut(x, row).bottom_wall = false;
                    }
                }
            }
        } else {
            // Step 4: the final row joins whatever sets remain.
            for x in 0..row_cells.saturating_sub(1) {
                if grid.at(x, row).set_id != grid.at(x + 1, row).set_id {
                    merge_row_sets(&mut grid, row, x, x + 1);
                    grid.at_mut(x, row).right_wall = false;
                }
            }
        }
    }

    Ok(grid)
}

/// Relabel every cell of `row` carrying `b`'s set label to `a`'s label.
fn merge_row_sets(grid: &mut Grid, row: usize, a: usize, b: usize) {
    let target_set = grid.at(a, row).set_id;
    let old_set = grid.at(b, row).set_id;

    for x in 0..grid.height().0 {
        if grid.at(x, row).set_id == old_set {
            grid.at_mut(x, row).set_id = target_set;
        }
    }
}

/// The row's cells grouped by set label, groups in the order their label
/// is first encountered scanning left to right.
fn row_sets(grid: &Grid, row: usize) -> Vec<(usize, Vec<usize>)> {
    let mut sets: Vec<(usize, Vec<usize>)> = Vec::new();
    for x in 0..grid.height().0 {
        let set_id = grid.at(x, row).set_id;
        match sets.iter_mut().find(|(id, _)| *id == set_id) {
            Some((_, members)) => members.push(x),
            None => sets.push((set_id, vec![x])),
        }
    }
    sets
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::GridCoordinate;
    use crate::errors::{Error, ErrorKind};

    use petgraph::algo::connected_components;
    use petgraph::graph::UnGraph;
    use quickcheck::{quickcheck, TestResult};

    /// Independent connectivity check over the open passage list.
    fn component_count(grid: &Grid) -> usize {
        let mut graph = UnGraph::<(), ()>::new_undirected();
        let nodes: Vec<_> = (0..grid.size()).map(|_| graph.add_node(())).collect();
        for (a, b) in grid.iter_passages() {
            let ia = grid.coordinate_to_index(a).unwrap();
            let ib = grid.coordinate_to_index(b).unwrap();
            graph.add_edge(nodes[ia], nodes[ib], ());
        }
        connected_components(&graph)
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            ellers(Width(0), Height(4), 1),
            Err(Error(ErrorKind::InvalidDimensions(0, 4), _))
        ));
        assert!(matches!(
            ellers(Width(4), Height(0), 1),
            Err(Error(ErrorKind::InvalidDimensions(4, 0), _))
        ));
    }

    #[test]
    fn single_cell_grid() {
        let grid = ellers(Width(1), Height(1), 99).unwrap();
        assert_eq!(grid.passages_count(), 0);
        assert!(grid
            .neighbours(GridCoordinate::new(0, 0))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn single_row_and_single_column_become_corridors() {
        // width=1: one generation row, so only the final-row merge runs.
        let row = ellers(Width(1), Height(6), 3).unwrap();
        assert_eq!(row.passages_count(), 5);
        assert_eq!(component_count(&row), 1);

        // height=1: every row holds one cell, all connected vertically.
        let column = ellers(Width(6), Height(1), 3).unwrap();
        assert_eq!(column.passages_count(), 5);
        assert_eq!(component_count(&column), 1);
    }

    #[test]
    fn spanning_tree_invariant() {
        // Connected + exactly n-1 passages => acyclic spanning tree. The
        // optional extra bottom openings must not break this.
        for seed in 0..20 {
            let grid = ellers(Width(9), Height(7), seed).unwrap();
            assert_eq!(grid.passages_count(), grid.size() - 1, "seed {}", seed);
            assert_eq!(component_count(&grid), 1, "seed {}", seed);
        }
    }

    #[test]
    fn deterministic_for_a_fixed_seed() {
        let a = ellers(Width(12), Height(8), 42).unwrap();
        let b = ellers(Width(12), Height(8), 42).unwrap();
        assert_eq!(a, b);

        let c = ellers(Width(12), Height(8), 43).unwrap();
        // Differing seeds should virtually always give a different layout
        // at this size; a collision here means the seed is being ignored.
        assert_ne!(a, c);
    }

    #[test]
    fn quickcheck_perfect_maze_properties() {
        fn prop(width: u8, height: u8, seed: u64) -> TestResult {
            let (w, h) = (usize::from(width % 16) + 1, usize::from(height % 16) + 1);
            let grid = ellers(Width(w), Height(h), seed).unwrap();

            let repeat = ellers(Width(w), Height(h), seed).unwrap();
            if grid != repeat {
                return TestResult::error("generation is not deterministic");
            }
            if grid.passages_count() != w * h - 1 {
                return TestResult::error("passage count is not size-1");
            }
            if component_count(&grid) != 1 {
                return TestResult::error("grid is not connected");
            }
            TestResult::passed()
        }
        quickcheck(prop as fn(u8, u8, u64) -> TestResult);
    }
}
