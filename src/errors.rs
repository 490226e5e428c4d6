//! Crate wide error types.
//!
//! Everything here is a local, recoverable condition reported to the
//! caller as a distinct outcome. None of them poison a grid or a solver:
//! each `start`/`find_path` call fully resets its own state.

use error_chain::error_chain;

error_chain! {
    errors {
        /// Generation or grid construction was asked for a degenerate grid.
        InvalidDimensions(width: usize, height: usize) {
            description("grid dimensions must both be at least 1")
            display("invalid grid dimensions: {} x {}", width, height)
        }
        /// A grid query lay outside `[0,height) x [0,width)`.
        OutOfBounds(x: u32, y: u32) {
            description("coordinate is outside the grid")
            display("coordinate ({}, {}) is outside the grid", x, y)
        }
        /// A* exhausted its open set without popping the goal.
        NotFound {
            description("no path exists between start and goal")
        }
        /// Trémaux found a cell with zero open neighbours.
        Stuck(x: u32, y: u32) {
            description("no open passage leaves the current cell")
            display("stuck at ({}, {}): no open passage leaves the cell", x, y)
        }
        /// A cell cannot be linked to itself.
        SelfLink {
            description("cannot link a cell to itself")
        }
        /// Only orthogonally adjacent cells can share a wall.
        NotNeighbours {
            description("cells are not orthogonal neighbours")
        }
    }
}
