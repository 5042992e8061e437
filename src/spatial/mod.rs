//! Spatial data structures for boards and tiles
//!
//! This module contains spatial-related functionality including:
//! - Cell, direction and tile vocabulary
//! - Occupancy grid state
//! - Layouts binding tiles to a board

/// Grid occupancy state and cell probing
pub mod grid;
/// Tile collections bound to a board size
pub mod layout;
/// Cells, directions, orientations and tiles
pub mod tiles;

pub use grid::{CellState, OccupancyGrid};
pub use layout::Layout;
pub use tiles::{Cell, Direction, Orientation, Tile, TileId};
