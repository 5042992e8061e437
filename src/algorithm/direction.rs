//! Slide direction assignment for freshly placed footprints
//!
//! Each footprint has two legal directions. Candidates are shuffled, lines
//! already crowded with one direction push that direction to the back, and the
//! first candidate that passes the local deadlock checks wins. When both fail
//! the footprint may be turned on its anchor and tried again.

use crate::algorithm::deadlock::local_conflicts;
use crate::algorithm::placement::Footprint;
use crate::io::configuration::DEFAULT_IMBALANCE_THRESHOLD;
use crate::math::random::RandomSelector;
use crate::spatial::grid::{CellState, OccupancyGrid};
use crate::spatial::tiles::{Cell, Direction, Orientation, Tile, TileId};

/// Tunable rules for direction selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DirectionPolicy {
    /// Accepted tiles sharing a line and direction before that direction is tried last
    pub imbalance_threshold: usize,
    /// Retry with the other orientation on the same anchor when both directions conflict
    pub relax_orientation: bool,
    /// Also reject candidates that would close a blocking cycle
    pub cycle_guard: bool,
}

impl Default for DirectionPolicy {
    fn default() -> Self {
        Self {
            imbalance_threshold: DEFAULT_IMBALANCE_THRESHOLD,
            relax_orientation: true,
            cycle_guard: true,
        }
    }
}

/// Outcome of assigning a direction to one footprint
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Assignment {
    /// The tile passed every local check
    ///
    /// Its orientation can differ from the footprint's when relaxation turned it.
    Accepted(Tile),
    /// Every candidate conflicted; the footprint must be freed
    Rejected {
        /// Accepted tiles implicated in the conflicts, ascending
        conflicts: Vec<TileId>,
    },
}

/// Chooses slide directions against the tiles accepted so far
#[derive(Clone, Debug)]
pub struct DirectionAssigner {
    rows: usize,
    cols: usize,
    policy: DirectionPolicy,
}

impl DirectionAssigner {
    /// Create an assigner for a `rows` × `cols` board
    pub const fn new(rows: usize, cols: usize, policy: DirectionPolicy) -> Self {
        Self { rows, cols, policy }
    }

    /// Active policy
    pub const fn policy(&self) -> &DirectionPolicy {
        &self.policy
    }

    /// Whether `candidate`'s row or column already carries too many tiles
    /// sliding its way
    ///
    /// The anchor row and the anchor column are counted separately; reaching
    /// the threshold on either one disfavors the direction.
    pub fn is_disfavored(&self, candidate: &Tile, accepted: &[Tile]) -> bool {
        let same_direction = || {
            accepted
                .iter()
                .filter(|tile| tile.direction == candidate.direction)
        };
        let on_row = same_direction()
            .filter(|tile| tile.touches_row(candidate.anchor.row))
            .count();
        let on_col = same_direction()
            .filter(|tile| tile.touches_col(candidate.anchor.col))
            .count();
        on_row.max(on_col) >= self.policy.imbalance_threshold
    }

    /// Both directed tiles for a footprint, in the order they should be tried
    pub fn ordered_candidates(
        &self,
        id: TileId,
        anchor: Cell,
        orientation: Orientation,
        accepted: &[Tile],
        random: &mut RandomSelector,
    ) -> Vec<Tile> {
        let mut directions: [Direction; 2] = orientation.directions();
        random.shuffle(&mut directions);

        let mut candidates: Vec<Tile> = directions
            .into_iter()
            .map(|direction| Tile::new(id, anchor, direction))
            .collect();
        // Stable sort keeps the shuffled order among equally crowded candidates
        candidates.sort_by_key(|candidate| self.is_disfavored(candidate, accepted));
        candidates
    }

    /// Pick a direction for `footprint`, or reject it
    ///
    /// `grid` must already hold the footprint's cells. The assigner only reads
    /// it; the caller applies the outcome.
    pub fn assign(
        &self,
        footprint: &Footprint,
        accepted: &[Tile],
        grid: &OccupancyGrid,
        random: &mut RandomSelector,
    ) -> Assignment {
        let mut conflicts: Vec<TileId> = Vec::new();

        let mut orientations = vec![footprint.orientation];
        if self.policy.relax_orientation {
            let turned = footprint.orientation.flipped();
            if can_turn(footprint, turned, grid) {
                orientations.push(turned);
            }
        }

        for orientation in orientations {
            let candidates =
                self.ordered_candidates(footprint.id, footprint.anchor, orientation, accepted, random);
            for candidate in candidates {
                let found = local_conflicts(
                    &candidate,
                    accepted,
                    self.rows,
                    self.cols,
                    self.policy.cycle_guard,
                );
                if found.is_empty() {
                    return Assignment::Accepted(candidate);
                }
                conflicts.extend(found);
            }
        }

        conflicts.sort_unstable();
        conflicts.dedup();
        Assignment::Rejected { conflicts }
    }
}

/// Whether the footprint can be rotated to `orientation` without leaving the
/// board or covering another tile
fn can_turn(footprint: &Footprint, orientation: Orientation, grid: &OccupancyGrid) -> bool {
    orientation
        .footprint(footprint.anchor)
        .iter()
        .all(|&cell| match grid.owner(cell) {
            CellState::Empty => true,
            CellState::Occupied(owner) => owner == footprint.id,
            CellState::Blocked => false,
        })
}
