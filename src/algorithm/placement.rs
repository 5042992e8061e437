//! Spiral packing of two-cell footprints from the board center outward
//!
//! Candidates are visited on square rings of growing Chebyshev radius around
//! the center. Consecutive tiles alternate orientation, which keeps runs of
//! parallel tiles short and packs the board densely.

use crate::math::random::RandomSelector;
use crate::spatial::grid::OccupancyGrid;
use crate::spatial::tiles::{Cell, Orientation, TileId};

/// A placed tile that has not been given a direction yet
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Footprint {
    /// Identifier the tile keeps once accepted
    pub id: TileId,
    /// Top-left cell
    pub anchor: Cell,
    /// Footprint shape
    pub orientation: Orientation,
}

impl Footprint {
    /// Both covered cells
    pub const fn cells(&self) -> [Cell; 2] {
        self.orientation.footprint(self.anchor)
    }
}

/// Result of one packing sweep
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackingOutcome {
    /// Footprints placed, in placement order
    pub footprints: Vec<Footprint>,
    /// Whether the sweep ran out of candidates before reaching the request
    pub exhausted: bool,
}

/// Center-out packer remembering the last orientation it placed
#[derive(Clone, Debug)]
pub struct SpiralPacker {
    rows: usize,
    cols: usize,
    last_orientation: Option<Orientation>,
}

impl SpiralPacker {
    /// Create a packer for a `rows` × `cols` board
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            last_orientation: None,
        }
    }

    /// Board center, rounding down on even dimensions
    pub const fn center(&self) -> Cell {
        Cell::new(self.rows / 2, self.cols / 2)
    }

    /// Orientation of the most recently placed footprint
    pub const fn last_orientation(&self) -> Option<Orientation> {
        self.last_orientation
    }

    /// In-bounds cells at Chebyshev distance exactly `radius` from the center
    ///
    /// Order: top edge left to right, right edge downward, bottom edge right
    /// to left, left edge upward. Radius 0 is the center alone.
    pub fn ring(&self, radius: usize) -> Vec<Cell> {
        let center = self.center();
        if radius == 0 {
            return vec![center];
        }

        let r = radius as isize;
        let (cr, cc) = (center.row as isize, center.col as isize);
        let mut ring: Vec<(isize, isize)> = Vec::with_capacity(8 * radius);

        ring.extend((cc - r..=cc + r).map(|col| (cr - r, col)));
        ring.extend((cr - r + 1..=cr + r).map(|row| (row, cc + r)));
        ring.extend((cc - r..cc + r).rev().map(|col| (cr + r, col)));
        ring.extend((cr - r + 1..cr + r).rev().map(|row| (row, cc - r)));

        ring.into_iter()
            .filter(|&(row, col)| {
                row >= 0 && col >= 0 && (row as usize) < self.rows && (col as usize) < self.cols
            })
            .map(|(row, col)| Cell::new(row as usize, col as usize))
            .collect()
    }

    /// Every candidate anchor in sweep order: the center, then each ring
    pub fn sweep(&self) -> impl Iterator<Item = Cell> + '_ {
        let max_radius = self.rows.max(self.cols);
        (0..=max_radius).flat_map(move |radius| self.ring(radius))
    }

    /// Place up to `requested` footprints on the free cells of `grid`
    ///
    /// Ids are assigned sequentially from `first_id`. Placed cells are marked
    /// in the grid immediately.
    pub fn pack(
        &mut self,
        grid: &mut OccupancyGrid,
        requested: usize,
        first_id: TileId,
        random: &mut RandomSelector,
    ) -> PackingOutcome {
        let mut outcome = PackingOutcome::default();
        if requested == 0 {
            return outcome;
        }

        let mut next_id = first_id.0;
        let cells: Vec<Cell> = self.sweep().collect();
        for cell in cells {
            if let Some(footprint) = self.try_place(grid, cell, TileId(next_id), random) {
                outcome.footprints.push(footprint);
                next_id += 1;
                if outcome.footprints.len() == requested {
                    return outcome;
                }
            }
        }

        outcome.exhausted = true;
        outcome
    }

    /// Place one footprint anchored at `anchor`, preferred orientation first
    fn try_place(
        &mut self,
        grid: &mut OccupancyGrid,
        anchor: Cell,
        id: TileId,
        random: &mut RandomSelector,
    ) -> Option<Footprint> {
        let preferred = match self.last_orientation {
            Some(previous) => previous.flipped(),
            None => random.orientation(),
        };

        for orientation in [preferred, preferred.flipped()] {
            let cells = orientation.footprint(anchor);
            if grid.can_place(&cells) {
                grid.occupy(&cells, id);
                self.last_orientation = Some(orientation);
                return Some(Footprint {
                    id,
                    anchor,
                    orientation,
                });
            }
        }

        None
    }
}
