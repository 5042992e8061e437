//! Procedural level generation and solvability verification for sliding-tile puzzles
//!
//! Two-cell tiles are packed onto a board from the center outward, each given a
//! slide direction, and screened for deadlocks as they are accepted. A finished
//! layout is only returned once a removal search has found an order in
//! which every tile can slide off the board.

#![forbid(unsafe_code)]

/// Packing, direction assignment, deadlock detection, verification and orchestration
pub mod algorithm;
/// Difficulty presets and layout statistics
pub mod analysis;
/// Input/output operations, configuration and error handling
pub mod io;
/// Seeded randomness
pub mod math;
/// Cells, tiles, layouts and the occupancy grid
pub mod spatial;

pub use algorithm::executor::{
    GeneratedLevel, GeneratorConfig, LevelGenerator, generate, generate_seeded, validate_layout,
};
pub use algorithm::verifier::{movable_tiles, verify};
pub use io::error::{PuzzleError, Result};
pub use spatial::{Cell, Direction, Layout, Orientation, Tile, TileId};
