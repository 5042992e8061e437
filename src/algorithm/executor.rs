use log::{debug, info, warn};

use crate::algorithm::deadlock::first_deadlock;
use crate::algorithm::direction::{Assignment, DirectionAssigner, DirectionPolicy};
use crate::algorithm::placement::SpiralPacker;
use crate::algorithm::verifier;
use crate::io::configuration::{
    CELLS_PER_TILE, DEFAULT_MAX_ATTEMPTS, DEFAULT_SUPPLEMENTAL_PASSES, MAX_GRID_DIMENSION,
};
use crate::io::error::{AttemptFailure, PuzzleError, Result, invalid_parameter};
use crate::math::random::RandomSelector;
use crate::spatial::grid::OccupancyGrid;
use crate::spatial::layout::Layout;
use crate::spatial::tiles::TileId;

/// Parameters for one generator instance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Board rows
    pub rows: usize,
    /// Board columns
    pub cols: usize,
    /// Exact number of tiles a successful layout contains
    pub tile_count: usize,
    /// Whole-layout attempts before giving up
    pub max_attempts: usize,
    /// Top-up packing passes per attempt after rejections
    pub supplemental_passes: usize,
    /// Master seed; `None` draws one from the operating system
    pub seed: Option<u64>,
    /// Direction selection rules
    pub policy: DirectionPolicy,
}

impl GeneratorConfig {
    /// Configuration with default budget and policy
    pub fn new(rows: usize, cols: usize, tile_count: usize) -> Self {
        Self {
            rows,
            cols,
            tile_count,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            supplemental_passes: DEFAULT_SUPPLEMENTAL_PASSES,
            seed: None,
            policy: DirectionPolicy::default(),
        }
    }

    /// Fix the master seed
    #[must_use]
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Override the attempt budget
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Override the direction policy
    #[must_use]
    pub const fn with_policy(mut self, policy: DirectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Most tiles a board of this size can hold
    pub const fn capacity(&self) -> usize {
        self.rows * self.cols / CELLS_PER_TILE
    }

    /// Check dimensions, tile count and budget
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first offending field
    pub fn validate(&self) -> Result<()> {
        for (parameter, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 {
                return Err(invalid_parameter(parameter, &value, &"must be at least 1"));
            }
            if value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must not exceed {MAX_GRID_DIMENSION}"),
                ));
            }
        }

        if self.tile_count == 0 {
            return Err(invalid_parameter(
                "tile_count",
                &self.tile_count,
                &"must be at least 1",
            ));
        }
        if self.tile_count > self.capacity() {
            return Err(invalid_parameter(
                "tile_count",
                &self.tile_count,
                &format!(
                    "a {}x{} board holds at most {} tiles",
                    self.rows,
                    self.cols,
                    self.capacity()
                ),
            ));
        }

        if self.max_attempts == 0 {
            return Err(invalid_parameter(
                "max_attempts",
                &self.max_attempts,
                &"must be at least 1",
            ));
        }

        Ok(())
    }
}

/// Where the generator currently is in its attempt loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationPhase {
    /// Not started
    Idle,
    /// Spiral packing footprints
    Packing,
    /// Choosing directions for a packing pass
    Assigning,
    /// Running local deadlock checks on one footprint
    LocalChecking,
    /// Last footprint was accepted
    Accepted,
    /// Last footprint was rejected and freed
    Rejected,
    /// Proving the finished layout solvable
    Verifying,
    /// Attempt discarded, starting over
    Retry,
    /// A solvable layout was produced
    Success,
    /// Attempt budget consumed
    Exhausted,
}

/// A verified layout and how it was obtained
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GeneratedLevel {
    /// The accepted layout
    pub layout: Layout,
    /// Attempts used, including the successful one
    pub attempts: usize,
    /// Seed of the successful attempt
    pub seed: u64,
}

/// Retry-driven level generator
///
/// Owns its master random source; every attempt draws a fresh seed from it, so
/// a seeded generator reproduces the same sequence of attempts.
#[derive(Clone, Debug)]
pub struct LevelGenerator {
    config: GeneratorConfig,
    random: RandomSelector,
    phase: GenerationPhase,
    rejections: usize,
}

impl LevelGenerator {
    /// Create a generator after validating `config`
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when the configuration is unusable
    pub fn new(config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let random = config
            .seed
            .map_or_else(RandomSelector::from_entropy, RandomSelector::new);

        Ok(Self {
            config,
            random,
            phase: GenerationPhase::Idle,
            rejections: 0,
        })
    }

    /// Active configuration
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Current phase
    pub const fn phase(&self) -> GenerationPhase {
        self.phase
    }

    /// Footprints rejected by direction assignment across all attempts
    pub const fn rejections(&self) -> usize {
        self.rejections
    }

    /// Run attempts until one yields a solvable layout
    ///
    /// # Errors
    ///
    /// Returns `GenerationExhausted` carrying the last attempt failure when the
    /// budget runs out
    pub fn generate(&mut self) -> Result<GeneratedLevel> {
        let mut last_failure = None;

        for attempt in 1..=self.config.max_attempts {
            let seed = self.random.next_seed();
            match self.attempt(seed) {
                Ok(layout) => {
                    self.enter(GenerationPhase::Success);
                    info!(
                        "Generated {} tiles on {}x{} in {attempt} attempt(s)",
                        layout.len(),
                        self.config.rows,
                        self.config.cols
                    );
                    return Ok(GeneratedLevel {
                        layout,
                        attempts: attempt,
                        seed,
                    });
                }
                Err(failure) => {
                    debug!("Attempt {attempt} discarded: {failure}");
                    self.enter(GenerationPhase::Retry);
                    last_failure = Some(failure);
                }
            }
        }

        self.enter(GenerationPhase::Exhausted);
        warn!(
            "Gave up on {} tiles on {}x{} after {} attempts",
            self.config.tile_count, self.config.rows, self.config.cols, self.config.max_attempts
        );
        Err(PuzzleError::GenerationExhausted {
            attempts: self.config.max_attempts,
            dimensions: (self.config.rows, self.config.cols),
            requested: self.config.tile_count,
            last_failure,
        })
    }

    /// Build one candidate layout from `seed`
    ///
    /// # Errors
    ///
    /// Returns the reason the attempt must be discarded
    pub fn attempt(&mut self, seed: u64) -> std::result::Result<Layout, AttemptFailure> {
        let GeneratorConfig {
            rows,
            cols,
            tile_count,
            supplemental_passes,
            policy,
            ..
        } = self.config;

        let mut random = RandomSelector::new(seed);
        let mut grid = OccupancyGrid::new(rows, cols);
        let mut layout = Layout::new(rows, cols);
        let mut packer = SpiralPacker::new(rows, cols);
        let assigner = DirectionAssigner::new(rows, cols, policy);
        let mut next_id = TileId(1);

        for pass in 0..=supplemental_passes {
            let missing = tile_count.saturating_sub(layout.len());
            if missing == 0 {
                break;
            }
            if pass > 0 {
                debug!("Top-up pass {pass}: {missing} tile(s) short");
            }

            self.enter(GenerationPhase::Packing);
            let outcome = packer.pack(&mut grid, missing, next_id, &mut random);
            next_id = TileId(next_id.0 + outcome.footprints.len() as u32);
            if outcome.footprints.is_empty() {
                break;
            }

            self.enter(GenerationPhase::Assigning);
            for footprint in &outcome.footprints {
                self.enter(GenerationPhase::LocalChecking);
                match assigner.assign(footprint, layout.tiles(), &grid, &mut random) {
                    Assignment::Accepted(tile) => {
                        grid.clear(&footprint.cells());
                        grid.occupy(&tile.cells(), tile.id);
                        layout.push(tile);
                        self.enter(GenerationPhase::Accepted);
                    }
                    Assignment::Rejected { conflicts } => {
                        grid.clear(&footprint.cells());
                        self.rejections += 1;
                        debug!(
                            "Rejected {} at {}: conflicts with {conflicts:?}",
                            footprint.id, footprint.anchor
                        );
                        self.enter(GenerationPhase::Rejected);
                    }
                }
            }
        }

        if layout.len() < tile_count {
            return Err(AttemptFailure::PlacementExhausted {
                placed: layout.len(),
                requested: tile_count,
            });
        }

        self.enter(GenerationPhase::Verifying);
        if !verifier::verify(&layout) {
            return Err(AttemptFailure::VerificationFailed {
                tiles: layout.len(),
            });
        }

        Ok(layout)
    }

    const fn enter(&mut self, phase: GenerationPhase) {
        self.phase = phase;
    }
}

/// Generate a solvable layout with an entropy seed
///
/// # Errors
///
/// Returns `InvalidParameter` for unusable arguments and
/// `GenerationExhausted` when every attempt fails
pub fn generate(
    rows: usize,
    cols: usize,
    tile_count: usize,
    max_attempts: usize,
) -> Result<GeneratedLevel> {
    let config = GeneratorConfig::new(rows, cols, tile_count).with_max_attempts(max_attempts);
    LevelGenerator::new(config)?.generate()
}

/// Generate a solvable layout reproducibly from `seed`
///
/// # Errors
///
/// Returns `InvalidParameter` for unusable arguments and
/// `GenerationExhausted` when every attempt fails
pub fn generate_seeded(
    rows: usize,
    cols: usize,
    tile_count: usize,
    max_attempts: usize,
    seed: u64,
) -> Result<GeneratedLevel> {
    let config = GeneratorConfig::new(rows, cols, tile_count)
        .with_max_attempts(max_attempts)
        .with_seed(seed);
    LevelGenerator::new(config)?.generate()
}

/// Full acceptance check for an externally supplied layout
///
/// Dimensions must match, the structure must be sound, no deadlock detector
/// may fire and the verifier must find a clearing order.
pub fn validate_layout(layout: &Layout, rows: usize, cols: usize) -> bool {
    if layout.rows() != rows || layout.cols() != cols {
        return false;
    }
    if layout.check_structure().is_err() {
        return false;
    }
    if let Some(deadlock) = first_deadlock(layout) {
        debug!("Layout rejected: {} among {:?}", deadlock.kind, deadlock.tiles);
        return false;
    }
    verifier::verify(layout)
}
