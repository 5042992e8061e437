//! Occupancy state shared by placement, direction assignment and verification
//!
//! A single `rows` × `cols` arena records which tile owns each cell. Every
//! phase of generation mutates the same grid in sequence, so the grid and the
//! accepted tile list never drift apart.

use ndarray::Array2;

use crate::spatial::tiles::{Cell, TileId};

/// Result of probing a single cell
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellState {
    /// In bounds and free
    Empty,
    /// In bounds and owned by a tile
    Occupied(TileId),
    /// Outside the board
    Blocked,
}

impl CellState {
    /// Owning tile, if any
    pub const fn tile(self) -> Option<TileId> {
        match self {
            Self::Occupied(id) => Some(id),
            Self::Empty | Self::Blocked => None,
        }
    }
}

/// Mutable map from cell to owning tile
///
/// Probing outside the board never panics: out-of-bounds cells report
/// [`CellState::Blocked`]. The grid does not refuse overlapping writes;
/// placement is responsible for checking [`OccupancyGrid::can_place`] first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    owners: Array2<Option<TileId>>,
}

impl OccupancyGrid {
    /// Create an empty grid
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            owners: Array2::from_elem((rows, cols), None),
        }
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.owners.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.owners.ncols()
    }

    /// State of a cell
    pub fn owner(&self, cell: Cell) -> CellState {
        match self.owners.get([cell.row, cell.col]) {
            Some(Some(id)) => CellState::Occupied(*id),
            Some(None) => CellState::Empty,
            None => CellState::Blocked,
        }
    }

    /// Whether a cell is in bounds and free
    pub fn is_empty(&self, cell: Cell) -> bool {
        self.owner(cell) == CellState::Empty
    }

    /// Whether every cell is in bounds and free
    pub fn can_place(&self, cells: &[Cell]) -> bool {
        cells.iter().all(|&cell| self.is_empty(cell))
    }

    /// Mark cells as owned by `id`; out-of-bounds cells are ignored
    pub fn occupy(&mut self, cells: &[Cell], id: TileId) {
        for cell in cells {
            if let Some(slot) = self.owners.get_mut([cell.row, cell.col]) {
                *slot = Some(id);
            }
        }
    }

    /// Free cells; out-of-bounds cells are ignored
    pub fn clear(&mut self, cells: &[Cell]) {
        for cell in cells {
            if let Some(slot) = self.owners.get_mut([cell.row, cell.col]) {
                *slot = None;
            }
        }
    }

    /// Free every cell
    pub fn reset(&mut self) {
        self.owners.fill(None);
    }

    /// Number of owned cells
    pub fn occupied_count(&self) -> usize {
        self.owners.iter().filter(|slot| slot.is_some()).count()
    }
}
