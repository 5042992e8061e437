/// Fixed-capacity tile sets over layout positions
pub mod bitset;
/// Adjacent, long-distance and cyclic deadlock detection
pub mod deadlock;
/// Slide direction assignment with local deadlock checks
pub mod direction;
/// Generation orchestrator with retries and top-up passes
pub mod executor;
/// Batch generation of level packs
pub mod pack;
/// Center-out spiral packing of tile footprints
pub mod placement;
/// Greedy proof of solvability
pub mod verifier;
