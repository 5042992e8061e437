//! Difficulty presets mapping a named tier to board size and tile count

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::algorithm::executor::GeneratorConfig;
use crate::io::configuration::{BASE_TILE_DENSITY, MIN_TILE_COUNT};

/// Named difficulty tier
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 4×4 board, sparse
    Easy,
    /// 6×6 board
    Medium,
    /// 8×8 board
    Hard,
    /// 10×10 board, dense
    Expert,
}

impl Difficulty {
    /// Every tier, easiest first
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Expert];

    /// Board size as (rows, cols)
    pub const fn dimensions(self) -> (usize, usize) {
        match self {
            Self::Easy => (4, 4),
            Self::Medium => (6, 6),
            Self::Hard => (8, 8),
            Self::Expert => (10, 10),
        }
    }

    /// Scale applied to the base tile density
    pub const fn density_multiplier(self) -> f64 {
        match self {
            Self::Easy => 0.5,
            Self::Medium => 0.75,
            Self::Hard => 1.0,
            Self::Expert => 1.25,
        }
    }

    /// Tiles requested for this tier
    ///
    /// `max(MIN_TILE_COUNT, floor(floor(cells × density) × multiplier))`
    pub fn tile_count(self) -> usize {
        let (rows, cols) = self.dimensions();
        let base = ((rows * cols) as f64 * BASE_TILE_DENSITY).floor();
        let scaled = (base * self.density_multiplier()).floor() as usize;
        scaled.max(MIN_TILE_COUNT)
    }

    /// Generator configuration for this tier
    pub fn config(self) -> GeneratorConfig {
        let (rows, cols) = self.dimensions();
        GeneratorConfig::new(rows, cols, self.tile_count())
    }

    /// Lowercase identifier used in level ids and files
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Expert => "expert",
        }
    }

    /// Capitalized name used as a level name prefix
    pub const fn title(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
            Self::Expert => "Expert",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
