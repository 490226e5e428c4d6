//! Plain-text rendering of a grid's wall bits.
//!
//! The textual counterpart of the external scene visualizer: one glyph
//! column per cell, walls drawn from the same right/bottom booleans that
//! are the grid's sole visual contract. Rows are printed in increasing
//! `y`, cells within a row in increasing `x`.

use crate::cells::GridCoordinate;
use crate::grid::Grid;
use crate::utils::{fnv_hashset, FnvHashSet};

use itertools::Itertools;
use std::fmt;

/// Render the grid with empty cell bodies.
pub fn render_plain(grid: &Grid) -> String {
    render(grid, &fnv_hashset(0))
}

/// Render the grid with a ` . ` body in every cell on `path`.
pub fn render_with_path(grid: &Grid, path: &[GridCoordinate]) -> String {
    render(grid, &path.iter().cloned().collect())
}

fn render(grid: &Grid, marked: &FnvHashSet<GridCoordinate>) -> String {
    let cells_across = grid.height().0; // x axis runs across the page
    let rows = grid.width().0;

    let mut output = String::new();

    // Northern boundary.
    output.push('+');
    output.push_str(&(0..cells_across).map(|_| "---+").join(""));
    output.push('\n');

    for y in 0..rows {
        let mut body_line = String::from("|");
        let mut wall_line = String::from("+");

        for x in 0..cells_across {
            let coord = GridCoordinate::new(x as u32, y as u32);
            let cell = grid.cell(coord).expect("render coordinate in bounds");

            body_line.push_str(if marked.contains(&coord) { " . " } else { "   " });
            // The grid edge is always drawn closed; interior walls come
            // straight from the cell's wall bits.
            let east_blocked = cell.right_wall || x + 1 == cells_across;
            body_line.push(if east_blocked { '|' } else { ' ' });

            let south_blocked = cell.bottom_wall || y + 1 == rows;
            wall_line.push_str(if south_blocked { "---" } else { "   " });
            wall_line.push('+');
        }

        output.push_str(&body_line);
        output.push('\n');
        output.push_str(&wall_line);
        output.push('\n');
    }

    output
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", render_plain(self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{Height, Width};

    fn gc(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate::new(x, y)
    }

    #[test]
    fn fully_walled_render() {
        let grid = Grid::new(Width(2), Height(2)).unwrap();
        let expected = "\
+---+---+
|   |   |
+---+---+
|   |   |
+---+---+
";
        assert_eq!(render_plain(&grid), expected);
    }

    #[test]
    fn passages_and_path_render() {
        let mut grid = Grid::new(Width(2), Height(2)).unwrap();
        grid.link(gc(0, 0), gc(1, 0)).unwrap();
        grid.link(gc(0, 0), gc(0, 1)).unwrap();
        grid.link(gc(1, 0), gc(1, 1)).unwrap();

        let expected = "\
+---+---+
|       |
+   +   +
|   |   |
+---+---+
";
        assert_eq!(render_plain(&grid), expected);
        assert_eq!(format!("{}", grid), expected);

        let path = [gc(0, 0), gc(1, 0), gc(1, 1)];
        let expected_path = "\
+---+---+
| .   . |
+   +   +
|   | . |
+---+---+
";
        assert_eq!(render_with_path(&grid, &path), expected_path);
    }
}
