//! Ordered tile collections bound to a board size

use std::collections::HashSet;

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{Result, invalid_layout};
use crate::spatial::grid::OccupancyGrid;
use crate::spatial::tiles::{Cell, Tile, TileId};

/// An arrangement of tiles on a `rows` × `cols` board
///
/// Tile order is insertion order; generators append tiles as they are
/// accepted. Structural invariants (board size, containment, no overlap, unique ids) are
/// checked by [`Layout::check_structure`] rather than on every push, so the
/// editor and import paths can build a layout first and validate after.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    rows: usize,
    cols: usize,
    tiles: Vec<Tile>,
}

impl Layout {
    /// Create an empty layout
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            tiles: Vec::new(),
        }
    }

    /// Create a layout from existing tiles
    pub const fn from_tiles(rows: usize, cols: usize, tiles: Vec<Tile>) -> Self {
        Self { rows, cols, tiles }
    }

    /// Number of board rows
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of board columns
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Tiles in insertion order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the layout holds no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Append a tile
    pub fn push(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Remove a tile by id, returning it if present
    pub fn remove(&mut self, id: TileId) -> Option<Tile> {
        let index = self.tiles.iter().position(|tile| tile.id == id)?;
        Some(self.tiles.remove(index))
    }

    /// Look up a tile by id
    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.iter().find(|tile| tile.id == id)
    }

    /// Smallest id not used by any tile
    pub fn next_id(&self) -> TileId {
        self.tiles
            .iter()
            .map(|tile| tile.id.0)
            .max()
            .map_or(TileId(1), |max| TileId(max + 1))
    }

    /// Build the occupancy grid for this layout
    ///
    /// Overlapping tiles are written in order, the later owner winning; call
    /// [`Layout::check_structure`] first when the input is untrusted.
    pub fn occupancy(&self) -> OccupancyGrid {
        let mut grid = OccupancyGrid::new(self.rows, self.cols);
        for tile in &self.tiles {
            grid.occupy(&tile.cells(), tile.id);
        }
        grid
    }

    /// Verify board size, unique ids, containment and the no-overlap packing invariant
    ///
    /// # Errors
    ///
    /// Returns `InvalidLayout` naming the offending dimension or the first
    /// offending tile
    pub fn check_structure(&self) -> Result<()> {
        for (axis, value) in [("rows", self.rows), ("cols", self.cols)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_layout(format!(
                    "board {axis} {value} outside 1..={MAX_GRID_DIMENSION}"
                )));
            }
        }

        let mut ids = HashSet::with_capacity(self.tiles.len());
        let mut covered: HashSet<Cell> = HashSet::with_capacity(self.tiles.len() * 2);

        for tile in &self.tiles {
            if !ids.insert(tile.id) {
                return Err(invalid_layout(format!("duplicate tile id {}", tile.id)));
            }
            if !tile.fits(self.rows, self.cols) {
                return Err(invalid_layout(format!(
                    "tile {} at {} extends beyond the {}x{} board",
                    tile.id, tile.anchor, self.rows, self.cols
                )));
            }
            for cell in tile.cells() {
                if !covered.insert(cell) {
                    return Err(invalid_layout(format!(
                        "tile {} overlaps another tile at {cell}",
                        tile.id
                    )));
                }
            }
        }

        Ok(())
    }

    /// Text rendering with one glyph per cell, `.` for empty cells
    pub fn render(&self) -> String {
        let grid = self.occupancy();
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                let glyph = grid
                    .owner(Cell::new(row, col))
                    .tile()
                    .and_then(|id| self.get(id))
                    .map_or('.', |tile| tile.direction.symbol());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
