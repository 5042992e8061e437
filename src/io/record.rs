//! Plain level records and level packs with JSON persistence
//!
//! Records are the interchange shape between the engine and the outside world.
//! Converting a record into a [`Layout`] checks containment, packing and id
//! uniqueness, so malformed files never reach the analyzer or verifier.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;

use crate::analysis::difficulty::Difficulty;
use crate::io::configuration::PACK_VERSION;
use crate::io::error::{Result, WithPath};
use crate::spatial::layout::Layout;
use crate::spatial::tiles::{Cell, Direction, Tile, TileId};

/// One tile as stored on disk
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TileRecord {
    /// Tile id
    pub id: u32,
    /// Slide direction
    pub direction: Direction,
    /// Anchor row
    pub anchor_row: usize,
    /// Anchor column
    pub anchor_col: usize,
}

impl From<&Tile> for TileRecord {
    fn from(tile: &Tile) -> Self {
        Self {
            id: tile.id.0,
            direction: tile.direction,
            anchor_row: tile.anchor.row,
            anchor_col: tile.anchor.col,
        }
    }
}

impl From<TileRecord> for Tile {
    fn from(record: TileRecord) -> Self {
        Self::new(
            TileId(record.id),
            Cell::new(record.anchor_row, record.anchor_col),
            record.direction,
        )
    }
}

/// A level as stored on disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelRecord {
    /// Board rows
    pub rows: usize,
    /// Board columns
    pub cols: usize,
    /// Tiles in layout order
    pub tiles: Vec<TileRecord>,
}

impl LevelRecord {
    /// Snapshot a layout
    pub fn from_layout(layout: &Layout) -> Self {
        Self {
            rows: layout.rows(),
            cols: layout.cols(),
            tiles: layout.tiles().iter().map(TileRecord::from).collect(),
        }
    }

    /// Build the layout this record describes
    ///
    /// # Errors
    ///
    /// Returns `InvalidLayout` if tiles overlap, leave the board or share an id
    pub fn into_layout(self) -> Result<Layout> {
        let tiles = self.tiles.into_iter().map(Tile::from).collect();
        let layout = Layout::from_tiles(self.rows, self.cols, tiles);
        layout.check_structure()?;
        Ok(layout)
    }
}

/// Level counts per difficulty tier
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDistribution {
    /// Easy levels
    pub easy: usize,
    /// Medium levels
    pub medium: usize,
    /// Hard levels
    pub hard: usize,
    /// Expert levels
    pub expert: usize,
}

impl DifficultyDistribution {
    /// Count levels per tier
    pub fn tally(levels: &[PackedLevel]) -> Self {
        let mut distribution = Self::default();
        for level in levels {
            *distribution.slot(level.difficulty) += 1;
        }
        distribution
    }

    /// Levels of one tier
    pub const fn count(&self, difficulty: Difficulty) -> usize {
        match difficulty {
            Difficulty::Easy => self.easy,
            Difficulty::Medium => self.medium,
            Difficulty::Hard => self.hard,
            Difficulty::Expert => self.expert,
        }
    }

    const fn slot(&mut self, difficulty: Difficulty) -> &mut usize {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
            Difficulty::Expert => &mut self.expert,
        }
    }
}

/// A generated level inside a pack
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackedLevel {
    /// Identifier such as `medium_003`
    pub id: String,
    /// Display name
    pub name: String,
    /// Tier the level was generated for
    pub difficulty: Difficulty,
    /// Board and tiles
    pub level: LevelRecord,
    /// Attempts the generator needed
    pub generation_attempts: usize,
}

/// Summary block of a pack
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackMetadata {
    /// Levels in the pack
    pub total_levels: usize,
    /// Levels per tier
    pub difficulty_distribution: DifficultyDistribution,
}

/// A named collection of levels
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelPack {
    /// Pack identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Free-form description
    pub description: String,
    /// Format version
    pub version: String,
    /// Levels, grouped by tier in generation order
    pub levels: Vec<PackedLevel>,
    /// Counts derived from `levels`
    pub metadata: PackMetadata,
}

impl LevelPack {
    /// Assemble a pack and derive its metadata
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        levels: Vec<PackedLevel>,
    ) -> Self {
        let metadata = PackMetadata {
            total_levels: levels.len(),
            difficulty_distribution: DifficultyDistribution::tally(&levels),
        };
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            version: PACK_VERSION.to_string(),
            levels,
            metadata,
        }
    }
}

/// Read a level record from a JSON file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read or `Serialization` if it is
/// not a level record
pub fn read_level(path: &Path) -> Result<LevelRecord> {
    read_json(path)
}

/// Write a level record as pretty-printed JSON
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn write_level(path: &Path, level: &LevelRecord) -> Result<()> {
    write_json(path, level)
}

/// Read a level pack from a JSON file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read or `Serialization` if it is
/// not a level pack
pub fn read_pack(path: &Path) -> Result<LevelPack> {
    read_json(path)
}

/// Write a level pack as pretty-printed JSON
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be written
pub fn write_pack(path: &Path, pack: &LevelPack) -> Result<()> {
    write_json(path, pack)
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let text = fs::read_to_string(path).with_path(path, "read")?;
    serde_json::from_str(&text).with_path(path, "parse")
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).with_path(path, "encode")?;
    fs::write(path, text).with_path(path, "write")
}
