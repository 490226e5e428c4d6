//! The maze's cell storage and open-passage adjacency rules.
//!
//! A grid is `width × height` cells held row major and addressed by a
//! [`GridCoordinate`] `(x, y)` where `0 ≤ x < height` and `0 ≤ y < width`.
//! Walls are the ground truth: a passage exists between two adjacent cells
//! exactly when the wall bit between them is down. After generation the
//! grid is immutable in practice - every query here is side effect free.

use crate::cells::{Cell, CoordinateSmallVec, Direction, GridCoordinate, ALL_DIRECTIONS};
use crate::errors::{ErrorKind, Result};
use crate::units::{Height, Width};

use smallvec::SmallVec;

pub struct Grid {
    width: Width,
    height: Height,
    cells: Vec<Cell>,
}

impl Grid {
    /// A fully walled grid - no passages anywhere.
    ///
    /// Fails with `InvalidDimensions` when either extent is zero rather
    /// than producing a degenerate grid.
    pub fn new(width: Width, height: Height) -> Result<Grid> {
        if width.0 == 0 || height.0 == 0 {
            return Err(ErrorKind::InvalidDimensions(width.0, height.0).into());
        }
        Ok(Grid {
            width,
            height,
            cells: vec![Cell::default(); width.0 * height.0],
        })
    }

    #[inline]
    pub fn width(&self) -> Width {
        self.width
    }

    #[inline]
    pub fn height(&self) -> Height {
        self.height
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.width.0 * self.height.0
    }

    /// Is the coordinate within `[0,height) × [0,width)`?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.x as usize) < self.height.0 && (coord.y as usize) < self.width.0
    }

    /// Row-major index of a coordinate, or None when out of bounds.
    #[inline]
    pub fn coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.x as usize * self.width.0 + coord.y as usize)
        } else {
            None
        }
    }

    pub fn cell(&self, coord: GridCoordinate) -> Result<&Cell> {
        self.coordinate_to_index(coord)
            .map(|index| &self.cells[index])
            .ok_or_else(|| ErrorKind::OutOfBounds(coord.x, coord.y).into())
    }

    #[inline]
    pub(crate) fn at(&self, x: usize, y: usize) -> &Cell {
        debug_assert!(x < self.height.0 && y < self.width.0);
        &self.cells[x * self.width.0 + y]
    }

    #[inline]
    pub(crate) fn at_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        debug_assert!(x < self.height.0 && y < self.width.0);
        &mut self.cells[x * self.width.0 + y]
    }

    /// The neighbour one step away in `direction`, if a passage is open to
    /// it. None for closed walls, grid edges and invalid coordinates.
    pub fn neighbour_at_direction(
        &self,
        coord: GridCoordinate,
        direction: Direction,
    ) -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let (x, y) = (coord.x as usize, coord.y as usize);
        match direction {
            Direction::North => {
                if y + 1 < self.width.0 && !self.at(x, y).bottom_wall {
                    Some(GridCoordinate::new(coord.x, coord.y + 1))
                } else {
                    None
                }
            }
            Direction::East => {
                if x + 1 < self.height.0 && !self.at(x, y).right_wall {
                    Some(GridCoordinate::new(coord.x + 1, coord.y))
                } else {
                    None
                }
            }
            Direction::South => {
                if y > 0 && !self.at(x, y - 1).bottom_wall {
                    Some(GridCoordinate::new(coord.x, coord.y - 1))
                } else {
                    None
                }
            }
            Direction::West => {
                if x > 0 && !self.at(x - 1, y).right_wall {
                    Some(GridCoordinate::new(coord.x - 1, coord.y))
                } else {
                    None
                }
            }
        }
    }

    /// Orthogonal neighbours reachable through an open passage, in
    /// North, East, South, West order. Pure query.
    pub fn neighbours(&self, coord: GridCoordinate) -> Result<CoordinateSmallVec> {
        if !self.is_valid_coordinate(coord) {
            return Err(ErrorKind::OutOfBounds(coord.x, coord.y).into());
        }
        Ok(ALL_DIRECTIONS
            .iter()
            .filter_map(|&direction| self.neighbour_at_direction(coord, direction))
            .collect())
    }

    /// Knock down the wall between two adjacent cells.
    pub fn link(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        if a == b {
            return Err(ErrorKind::SelfLink.into());
        }
        if !self.is_valid_coordinate(a) {
            return Err(ErrorKind::OutOfBounds(a.x, a.y).into());
        }
        if !self.is_valid_coordinate(b) {
            return Err(ErrorKind::OutOfBounds(b.x, b.y).into());
        }

        if a.x == b.x && (a.y + 1 == b.y || b.y + 1 == a.y) {
            // The cell on the low y side owns the shared bottom wall.
            let low = if a.y < b.y { a } else { b };
            self.at_mut(low.x as usize, low.y as usize).bottom_wall = false;
            Ok(())
        } else if a.y == b.y && (a.x + 1 == b.x || b.x + 1 == a.x) {
            let low = if a.x < b.x { a } else { b };
            self.at_mut(low.x as usize, low.y as usize).right_wall = false;
            Ok(())
        } else {
            Err(ErrorKind::NotNeighbours.into())
        }
    }

    /// Are two cells joined by an open passage?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.neighbours(a)
            .map(|ns| ns.iter().any(|&coord| coord == b))
            .unwrap_or(false)
    }

    /// All cell coordinates in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = GridCoordinate> {
        let width = self.width.0;
        (0..self.size())
            .map(move |index| GridCoordinate::new((index / width) as u32, (index % width) as u32))
    }

    /// Every open passage exactly once, as an (cell, +x/+y neighbour) pair.
    pub fn iter_passages(&self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + '_ {
        self.iter().flat_map(move |coord| {
            let mut passages = SmallVec::<[(GridCoordinate, GridCoordinate); 2]>::new();
            let cell = self.at(coord.x as usize, coord.y as usize);
            if !cell.right_wall && (coord.x as usize) + 1 < self.height.0 {
                passages.push((coord, GridCoordinate::new(coord.x + 1, coord.y)));
            }
            if !cell.bottom_wall && (coord.y as usize) + 1 < self.width.0 {
                passages.push((coord, GridCoordinate::new(coord.x, coord.y + 1)));
            }
            passages
        })
    }

    /// Number of open passages. A perfect maze has exactly `size() - 1`.
    pub fn passages_count(&self) -> usize {
        self.iter_passages().count()
    }
}

/// Wall layout equality. Set ids are generation scratch and ignored.
impl PartialEq for Grid {
    fn eq(&self, other: &Grid) -> bool {
        self.width == other.width
            && self.height == other.height
            && self
                .cells
                .iter()
                .zip(other.cells.iter())
                .all(|(a, b)| a.right_wall == b.right_wall && a.bottom_wall == b.bottom_wall)
    }
}
impl Eq for Grid {}

impl std::fmt::Debug for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Grid :: {} x {}, {} open passages",
            self.width.0,
            self.height.0,
            self.passages_count()
        )
    }
}
