use smallvec::SmallVec;
use std::convert::From;
use std::fmt;

/// A cell address on the grid.
///
/// `x` runs along the height extent (`0 ≤ x < height`) and `y` along the
/// width extent (`0 ≤ y < width`). The inversion is intentional and the
/// generator/solvers are mutually consistent under it - do not "fix" it.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub x: u32,
    pub y: u32,
}

impl GridCoordinate {
    pub fn new(x: u32, y: u32) -> GridCoordinate {
        GridCoordinate { x, y }
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(x_y_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// The four passage directions and their wall mapping:
/// North is `y+1` (through this cell's bottom wall), East is `x+1`
/// (through this cell's right wall), South is `y-1` (through the lower
/// neighbour's bottom wall), West is `x-1` (through the left neighbour's
/// right wall).
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

pub const ALL_DIRECTIONS: [Direction; 4] = [
    Direction::North,
    Direction::East,
    Direction::South,
    Direction::West,
];

/// One grid cell. Both walls start closed; the generator knocks them down.
#[derive(Copy, Clone, Debug)]
pub struct Cell {
    /// Wall on the `+x` side of the cell.
    pub right_wall: bool,
    /// Wall on the `+y` side of the cell.
    pub bottom_wall: bool,
    /// Disjoint-set label used by Eller's algorithm while a grid is being
    /// generated. Meaningless afterwards - not part of the grid contract.
    pub set_id: usize,
}

impl Default for Cell {
    fn default() -> Cell {
        Cell {
            right_wall: true,
            bottom_wall: true,
            set_id: 0,
        }
    }
}
