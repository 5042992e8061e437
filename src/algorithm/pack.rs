//! Batch generation of level packs across difficulty tiers

use log::{info, warn};

use crate::algorithm::executor::LevelGenerator;
use crate::analysis::difficulty::Difficulty;
use crate::io::configuration::PACK_LEVEL_RETRIES;
use crate::io::error::Result;
use crate::io::record::{LevelPack, LevelRecord, PackedLevel};
use crate::math::random::RandomSelector;

/// Generates a pack level by level, tier by tier
///
/// Each level slot gets up to `retries` fresh generator runs. A slot that
/// still fails is logged and left out of the pack.
#[derive(Clone, Debug)]
pub struct PackBuilder {
    plan: Vec<(Difficulty, usize)>,
    retries: usize,
    random: RandomSelector,
}

impl PackBuilder {
    /// Builder with a reproducible master seed
    pub fn new(seed: u64) -> Self {
        Self {
            plan: Vec::new(),
            retries: PACK_LEVEL_RETRIES,
            random: RandomSelector::new(seed),
        }
    }

    /// Request `count` levels of `difficulty`
    #[must_use]
    pub fn with_levels(mut self, difficulty: Difficulty, count: usize) -> Self {
        self.plan.push((difficulty, count));
        self
    }

    /// Override the per-level retry budget; zero behaves like one
    #[must_use]
    pub const fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    /// Requested tiers and counts, in generation order
    pub fn plan(&self) -> &[(Difficulty, usize)] {
        &self.plan
    }

    /// Generate one level of `difficulty` at position `index` (1-based)
    ///
    /// # Errors
    ///
    /// Returns the last generation error once every retry has failed
    pub fn generate_level(&mut self, difficulty: Difficulty, index: usize) -> Result<PackedLevel> {
        let id = format!("{difficulty}_{index:03}");
        let retries = self.retries.max(1);
        let mut retry = 1;

        loop {
            let config = difficulty.config().with_seed(self.random.next_seed());
            match LevelGenerator::new(config).and_then(|mut generator| generator.generate()) {
                Ok(generated) => {
                    return Ok(PackedLevel {
                        name: format!("{} {index}", difficulty.title()),
                        id,
                        difficulty,
                        level: LevelRecord::from_layout(&generated.layout),
                        generation_attempts: generated.attempts,
                    });
                }
                Err(error) if retry < retries => {
                    warn!("Level {id} failed ({retry}/{retries}): {error}");
                    retry += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }

    /// Generate every requested level and assemble the pack
    ///
    /// `on_level` is called once per level slot with the tier and the level,
    /// or `None` when the slot was skipped.
    pub fn build(
        &mut self,
        id: &str,
        name: &str,
        description: &str,
        mut on_level: impl FnMut(Difficulty, Option<&PackedLevel>),
    ) -> LevelPack {
        let mut levels = Vec::new();

        for (difficulty, count) in self.plan.clone() {
            if count > 0 {
                info!("Generating {count} {difficulty} level(s)");
            }
            for index in 1..=count {
                match self.generate_level(difficulty, index) {
                    Ok(level) => {
                        on_level(difficulty, Some(&level));
                        levels.push(level);
                    }
                    Err(error) => {
                        warn!("Skipping {difficulty}_{index:03}: {error}");
                        on_level(difficulty, None);
                    }
                }
            }
        }

        LevelPack::new(id, name, description, levels)
    }
}
