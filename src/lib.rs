//! **mazery** generates perfect mazes with Eller's algorithm and solves
//! them with A* search or Trémaux's mark-based exploration.

pub mod agents;
pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod pathing;
pub mod render;
pub mod tremaux;
pub mod units;
mod utils;
