//! Generation constants and runtime configuration defaults

// Board limits
/// Maximum allowed board dimension
pub const MAX_GRID_DIMENSION: usize = 256;

/// Number of cells covered by one tile
pub const CELLS_PER_TILE: usize = 2;

// Orchestrator budget
/// Whole-layout attempts before generation is reported exhausted
pub const DEFAULT_MAX_ATTEMPTS: usize = 50;

/// Top-up packing passes per attempt after direction rejections
pub const DEFAULT_SUPPLEMENTAL_PASSES: usize = 3;

// Direction assignment policy
/// Same-direction tiles on a row or column before that direction is disfavored
pub const DEFAULT_IMBALANCE_THRESHOLD: usize = 3;

// Difficulty presets
/// Fraction of board cells used as the base tile count
pub const BASE_TILE_DENSITY: f64 = 0.15;

/// Fewest tiles any preset produces
pub const MIN_TILE_COUNT: usize = 2;

// Level packs
/// Whole-level retries before a pack entry is skipped
pub const PACK_LEVEL_RETRIES: usize = 3;

/// Version string written into level packs
pub const PACK_VERSION: &str = "1.0.0";

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default board rows for single-level generation
pub const DEFAULT_ROWS: usize = 10;

/// Default board columns for single-level generation
pub const DEFAULT_COLS: usize = 10;

/// Default tile count for single-level generation
pub const DEFAULT_TILE_COUNT: usize = 8;
