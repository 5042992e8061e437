//! Descriptive statistics for a layout

use serde::{Deserialize, Serialize};

use crate::algorithm::verifier::is_movable;
use crate::io::configuration::CELLS_PER_TILE;
use crate::spatial::layout::Layout;
use crate::spatial::tiles::{Direction, Tile};

/// Tile counts per slide direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionCounts {
    /// Tiles sliding up
    pub up: usize,
    /// Tiles sliding down
    pub down: usize,
    /// Tiles sliding left
    pub left: usize,
    /// Tiles sliding right
    pub right: usize,
}

impl DirectionCounts {
    /// Tally the directions of `tiles`
    pub fn tally(tiles: &[Tile]) -> Self {
        let mut counts = Self::default();
        for tile in tiles {
            match tile.direction {
                Direction::Up => counts.up += 1,
                Direction::Down => counts.down += 1,
                Direction::Left => counts.left += 1,
                Direction::Right => counts.right += 1,
            }
        }
        counts
    }

    /// Tiles on a horizontal footprint
    pub const fn horizontal(&self) -> usize {
        self.left + self.right
    }

    /// Tiles on a vertical footprint
    pub const fn vertical(&self) -> usize {
        self.up + self.down
    }
}

/// Summary of a layout's shape and how hard it is to clear
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutStatistics {
    /// Board rows
    pub rows: usize,
    /// Board columns
    pub cols: usize,
    /// Tiles on the board
    pub tile_count: usize,
    /// Fraction of cells covered
    pub density: f64,
    /// Tiles per direction
    pub directions: DirectionCounts,
    /// Tiles that can leave before anything else moves
    pub initially_movable: usize,
    /// Rounds needed when every movable tile leaves each round, `None` if the board jams
    pub clearing_waves: Option<usize>,
}

impl LayoutStatistics {
    /// Measure a layout
    pub fn from_layout(layout: &Layout) -> Self {
        let cells = layout.rows() * layout.cols();
        let density = if cells == 0 {
            0.0
        } else {
            (layout.len() * CELLS_PER_TILE) as f64 / cells as f64
        };
        let grid = layout.occupancy();
        let initially_movable = layout
            .tiles()
            .iter()
            .filter(|tile| is_movable(tile, &grid))
            .count();

        Self {
            rows: layout.rows(),
            cols: layout.cols(),
            tile_count: layout.len(),
            density,
            directions: DirectionCounts::tally(layout.tiles()),
            initially_movable,
            clearing_waves: clearing_waves(layout),
        }
    }
}

/// Rounds of simultaneous removal needed to empty the board
///
/// Each round removes every tile that is movable at the start of the round.
/// Returns `None` when a round finds nothing movable while tiles remain.
pub fn clearing_waves(layout: &Layout) -> Option<usize> {
    let mut grid = layout.occupancy();
    let mut remaining: Vec<Tile> = layout.tiles().to_vec();
    let mut waves = 0;

    while !remaining.is_empty() {
        let (leaving, staying): (Vec<Tile>, Vec<Tile>) = remaining
            .iter()
            .copied()
            .partition(|tile| is_movable(tile, &grid));
        if leaving.is_empty() {
            return None;
        }
        for tile in &leaving {
            grid.clear(&tile.cells());
        }
        remaining = staying;
        waves += 1;
    }

    Some(waves)
}
