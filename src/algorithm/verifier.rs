//! Proof that a layout can be cleared
//!
//! The search repeatedly removes a tile whose exit path is clear. Removing a
//! tile only frees cells, so a tile that can move keeps that ability for the
//! rest of the run and every removal order reaches the same final state. One
//! greedy pass therefore decides solvability without backtracking. It runs on a
//! private occupancy grid built from the layout, so the caller's layout is never
//! touched.

use std::collections::BTreeSet;

use crate::algorithm::bitset::TileBitset;
use crate::spatial::grid::{CellState, OccupancyGrid};
use crate::spatial::layout::Layout;
use crate::spatial::tiles::{Tile, TileId};

/// Outcome of a full verification run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Verification {
    /// A removal order that empties the board, if one exists
    pub clearing_order: Option<Vec<TileId>>,
    /// Search states expanded, at most one per tile plus the final state
    pub states_explored: usize,
}

impl Verification {
    /// Whether the layout can be cleared
    pub const fn is_solvable(&self) -> bool {
        self.clearing_order.is_some()
    }
}

/// Whether `tile` can slide off the board given the current occupancy
pub fn is_movable(tile: &Tile, grid: &OccupancyGrid) -> bool {
    tile.exit_path(grid.rows(), grid.cols())
        .all(|cell| match grid.owner(cell) {
            CellState::Occupied(owner) => owner == tile.id,
            CellState::Empty | CellState::Blocked => true,
        })
}

/// Ids of tiles that can slide off right now
pub fn movable_tiles(layout: &Layout) -> BTreeSet<TileId> {
    let grid = layout.occupancy();
    layout
        .tiles()
        .iter()
        .filter(|tile| is_movable(tile, &grid))
        .map(|tile| tile.id)
        .collect()
}

/// Whether some removal order clears the layout
///
/// Structurally invalid layouts (overlap, out of bounds, duplicate ids) are
/// never solvable.
pub fn verify(layout: &Layout) -> bool {
    run(layout).is_solvable()
}

/// A removal order that clears the layout, if one exists
pub fn clearing_order(layout: &Layout) -> Option<Vec<TileId>> {
    run(layout).clearing_order
}

/// Full verification with search statistics
pub fn run(layout: &Layout) -> Verification {
    if layout.check_structure().is_err() {
        return Verification {
            clearing_order: None,
            states_explored: 0,
        };
    }

    let mut search = ClearingSearch::new(layout);
    let clearing_order = search.solve();

    Verification {
        clearing_order,
        states_explored: search.states_explored,
    }
}

/// Greedy removal over a private copy of the occupancy
struct ClearingSearch<'a> {
    tiles: &'a [Tile],
    grid: OccupancyGrid,
    remaining: TileBitset,
    order: Vec<TileId>,
    states_explored: usize,
}

impl<'a> ClearingSearch<'a> {
    fn new(layout: &'a Layout) -> Self {
        let tiles = layout.tiles();
        Self {
            tiles,
            grid: layout.occupancy(),
            remaining: TileBitset::all(tiles.len()),
            order: Vec::with_capacity(tiles.len()),
            states_explored: 0,
        }
    }

    fn first_movable(&self) -> Option<usize> {
        self.remaining.iter().find(|&index| {
            self.tiles
                .get(index)
                .is_some_and(|tile| is_movable(tile, &self.grid))
        })
    }

    fn remove(&mut self, index: usize) {
        if let Some(tile) = self.tiles.get(index) {
            self.grid.clear(&tile.cells());
            self.remaining.remove(index);
            self.order.push(tile.id);
        }
    }

    fn solve(&mut self) -> Option<Vec<TileId>> {
        while !self.remaining.is_empty() {
            self.states_explored += 1;
            // No tile can move, so no later removal will free a cell
            let index = self.first_movable()?;
            self.remove(index);
        }
        self.states_explored += 1;
        Some(std::mem::take(&mut self.order))
    }
}
