//! Deadlock detection for tile layouts
//!
//! Three detectors run in order of increasing cost:
//! - adjacent face-off: two opposite tiles touching head to head
//! - long-distance block: two opposite tiles whose exit paths meet in the gap between them
//! - cyclic block: a ring of tiles each sitting on the next one's exit path
//!
//! The pairwise detectors are cheap special cases of the cyclic one and are
//! used during incremental construction. Every finding names the tiles
//! involved so callers can drop the newest offender instead of the layout.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::fmt;

use crate::spatial::grid::{CellState, OccupancyGrid};
use crate::spatial::layout::Layout;
use crate::spatial::tiles::{Cell, Direction, Orientation, Tile, TileId};

/// Category of a detected deadlock
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DeadlockKind {
    /// Left/right pair touching head to head on one row
    HorizontalAdjacent,
    /// Up/down pair touching head to head on one column
    VerticalAdjacent,
    /// Left/right pair facing across empty cells on one row
    HorizontalLongDistance,
    /// Up/down pair facing across empty cells on one column
    VerticalLongDistance,
    /// Ring of tiles each waiting on the next
    Cyclic,
}

impl DeadlockKind {
    /// Short human-readable description
    pub const fn description(self) -> &'static str {
        match self {
            Self::HorizontalAdjacent => "horizontal adjacent face-off",
            Self::VerticalAdjacent => "vertical adjacent face-off",
            Self::HorizontalLongDistance => "horizontal long-distance block",
            Self::VerticalLongDistance => "vertical long-distance block",
            Self::Cyclic => "cyclic mutual block",
        }
    }

    const fn adjacent(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::HorizontalAdjacent,
            Orientation::Vertical => Self::VerticalAdjacent,
        }
    }

    const fn long_distance(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => Self::HorizontalLongDistance,
            Orientation::Vertical => Self::VerticalLongDistance,
        }
    }
}

impl fmt::Display for DeadlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One detected deadlock and the tiles that can never move because of it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Deadlock {
    /// Detector that fired
    pub kind: DeadlockKind,
    /// Tiles involved, ascending by id
    pub tiles: Vec<TileId>,
}

impl Deadlock {
    fn new(kind: DeadlockKind, mut tiles: Vec<TileId>) -> Self {
        tiles.sort_unstable();
        Self { kind, tiles }
    }
}

/// Every deadlock found in a layout, in detector order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeadlockReport {
    /// Findings from all detectors
    pub findings: Vec<Deadlock>,
}

impl DeadlockReport {
    /// Whether any detector fired
    pub fn has_deadlock(&self) -> bool {
        !self.findings.is_empty()
    }

    /// The first finding in escalation order
    pub fn primary(&self) -> Option<&Deadlock> {
        self.findings.first()
    }

    /// Findings of one kind
    pub fn of_kind(&self, kind: DeadlockKind) -> impl Iterator<Item = &Deadlock> {
        self.findings.iter().filter(move |finding| finding.kind == kind)
    }

    /// Union of all implicated tiles
    pub fn involved_tiles(&self) -> BTreeSet<TileId> {
        self.findings
            .iter()
            .flat_map(|finding| finding.tiles.iter().copied())
            .collect()
    }
}

/// Whether two tiles point at each other along a shared row or column
///
/// Requires opposite directions, the same axis line, and each tile lying in
/// front of the other. Says nothing about what sits between them.
pub fn are_facing(a: &Tile, b: &Tile) -> bool {
    if a.direction.opposite() != b.direction {
        return false;
    }

    match a.direction {
        Direction::Right => a.anchor.row == b.anchor.row && a.anchor.col < b.anchor.col,
        Direction::Left => a.anchor.row == b.anchor.row && a.anchor.col > b.anchor.col,
        Direction::Down => a.anchor.col == b.anchor.col && a.anchor.row < b.anchor.row,
        Direction::Up => a.anchor.col == b.anchor.col && a.anchor.row > b.anchor.row,
    }
}

/// Facing tiles with anchors exactly one tile length apart
pub fn is_adjacent_face_off(a: &Tile, b: &Tile) -> bool {
    if !are_facing(a, b) {
        return false;
    }

    let gap = match a.orientation() {
        Orientation::Horizontal => a.anchor.col.abs_diff(b.anchor.col),
        Orientation::Vertical => a.anchor.row.abs_diff(b.anchor.row),
    };
    gap == 2
}

/// Exit path of `tile`, cut short at the first cell owned by another tile
pub fn blocked_exit_path(tile: &Tile, grid: &OccupancyGrid) -> Vec<Cell> {
    tile.exit_path(grid.rows(), grid.cols())
        .take_while(|&cell| match grid.owner(cell) {
            CellState::Occupied(owner) => owner == tile.id,
            CellState::Empty => true,
            CellState::Blocked => false,
        })
        .collect()
}

/// Facing, non-adjacent tiles whose obstructed exit paths intersect
///
/// When both paths reach the same cell nothing stands between the pair, so
/// each will always run into the other.
pub fn is_long_distance_block(a: &Tile, b: &Tile, grid: &OccupancyGrid) -> bool {
    if !are_facing(a, b) || is_adjacent_face_off(a, b) {
        return false;
    }

    let path_a: HashSet<Cell> = blocked_exit_path(a, grid).into_iter().collect();
    blocked_exit_path(b, grid)
        .iter()
        .any(|cell| path_a.contains(cell))
}

/// Build the blocking graph over `tiles`
///
/// Edge `i → j` means tile `j` covers a cell on tile `i`'s exit path, so `i`
/// cannot leave the board while `j` remains. Indices are positions in `tiles`.
pub fn blocking_graph(tiles: &[Tile], grid: &OccupancyGrid) -> Vec<Vec<usize>> {
    let positions: HashMap<TileId, usize> = tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| (tile.id, index))
        .collect();

    tiles
        .iter()
        .map(|tile| {
            let mut blockers: Vec<usize> = Vec::new();
            for cell in tile.exit_path(grid.rows(), grid.cols()) {
                let Some(owner) = grid.owner(cell).tile() else {
                    continue;
                };
                let Some(&index) = positions.get(&owner) else {
                    continue;
                };
                if !blockers.contains(&index) {
                    blockers.push(index);
                }
            }
            blockers
        })
        .collect()
}

/// Strongly connected components with more than one member
///
/// Iterative Tarjan: the DFS call stack and the component stack are explicit
/// vectors. A single tile can never block itself, so every returned component
/// is a set of tiles lying on a cycle.
pub fn cyclic_components(graph: &[Vec<usize>]) -> Vec<Vec<usize>> {
    let node_count = graph.len();
    let mut order: Vec<Option<usize>> = vec![None; node_count];
    let mut lowlink: Vec<usize> = vec![0; node_count];
    let mut on_stack: Vec<bool> = vec![false; node_count];
    let mut stack: Vec<usize> = Vec::new();
    let mut next_order = 0;
    let mut components = Vec::new();

    for root in 0..node_count {
        if order.get(root).copied().flatten().is_some() {
            continue;
        }

        let mut calls: Vec<(usize, usize)> = vec![(root, 0)];
        visit(
            root,
            &mut next_order,
            &mut order,
            &mut lowlink,
            &mut on_stack,
            &mut stack,
        );

        while let Some(&(node, edge)) = calls.last() {
            let next = graph.get(node).and_then(|edges| edges.get(edge)).copied();

            if let Some(next) = next {
                if let Some(call) = calls.last_mut() {
                    call.1 += 1;
                }
                match order.get(next).copied().flatten() {
                    None => {
                        visit(
                            next,
                            &mut next_order,
                            &mut order,
                            &mut lowlink,
                            &mut on_stack,
                            &mut stack,
                        );
                        calls.push((next, 0));
                    }
                    Some(next_index) if on_stack.get(next).copied().unwrap_or(false) => {
                        if let Some(low) = lowlink.get_mut(node) {
                            *low = (*low).min(next_index);
                        }
                    }
                    Some(_) => {}
                }
                continue;
            }

            calls.pop();
            let node_low = lowlink.get(node).copied().unwrap_or(0);
            if let Some(&(parent, _)) = calls.last() {
                if let Some(low) = lowlink.get_mut(parent) {
                    *low = (*low).min(node_low);
                }
            }

            if order.get(node).copied().flatten() == Some(node_low) {
                let mut component = Vec::new();
                while let Some(member) = stack.pop() {
                    if let Some(flag) = on_stack.get_mut(member) {
                        *flag = false;
                    }
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                if component.len() > 1 {
                    components.push(component);
                }
            }
        }
    }

    components
}

fn visit(
    node: usize,
    next_order: &mut usize,
    order: &mut [Option<usize>],
    lowlink: &mut [usize],
    on_stack: &mut [bool],
    stack: &mut Vec<usize>,
) {
    if let Some(slot) = order.get_mut(node) {
        *slot = Some(*next_order);
    }
    if let Some(low) = lowlink.get_mut(node) {
        *low = *next_order;
    }
    if let Some(flag) = on_stack.get_mut(node) {
        *flag = true;
    }
    stack.push(node);
    *next_order += 1;
}

/// Pairwise face-off scan over tiles of one orientation
fn detect_adjacent(tiles: &[Tile], orientation: Orientation) -> Vec<Deadlock> {
    let aligned: Vec<&Tile> = tiles
        .iter()
        .filter(|tile| tile.orientation() == orientation)
        .collect();

    let mut findings = Vec::new();
    for (i, a) in aligned.iter().enumerate() {
        for b in aligned.iter().skip(i + 1) {
            if is_adjacent_face_off(a, b) {
                findings.push(Deadlock::new(
                    DeadlockKind::adjacent(orientation),
                    vec![a.id, b.id],
                ));
            }
        }
    }
    findings
}

/// Pairwise long-distance scan over tiles of one orientation
fn detect_long_distance(
    tiles: &[Tile],
    grid: &OccupancyGrid,
    orientation: Orientation,
) -> Vec<Deadlock> {
    let aligned: Vec<&Tile> = tiles
        .iter()
        .filter(|tile| tile.orientation() == orientation)
        .collect();

    let mut findings = Vec::new();
    for (i, a) in aligned.iter().enumerate() {
        for b in aligned.iter().skip(i + 1) {
            if is_long_distance_block(a, b, grid) {
                findings.push(Deadlock::new(
                    DeadlockKind::long_distance(orientation),
                    vec![a.id, b.id],
                ));
            }
        }
    }
    findings
}

/// Every cycle in the blocking graph, one finding per component
fn detect_cycles(tiles: &[Tile], grid: &OccupancyGrid) -> Vec<Deadlock> {
    let graph = blocking_graph(tiles, grid);
    cyclic_components(&graph)
        .into_iter()
        .map(|component| {
            let ids = component
                .into_iter()
                .filter_map(|index| tiles.get(index).map(|tile| tile.id))
                .collect();
            Deadlock::new(DeadlockKind::Cyclic, ids)
        })
        .collect()
}

/// Ids of tiles on any blocking cycle
pub fn find_cyclic_tiles(layout: &Layout) -> BTreeSet<TileId> {
    detect_cycles(layout.tiles(), &layout.occupancy())
        .into_iter()
        .flat_map(|finding| finding.tiles)
        .collect()
}

/// Run every detector and collect all findings
pub fn analyze(layout: &Layout) -> DeadlockReport {
    let tiles = layout.tiles();
    let grid = layout.occupancy();

    let mut findings = Vec::new();
    findings.extend(detect_adjacent(tiles, Orientation::Horizontal));
    findings.extend(detect_adjacent(tiles, Orientation::Vertical));
    findings.extend(detect_long_distance(tiles, &grid, Orientation::Horizontal));
    findings.extend(detect_long_distance(tiles, &grid, Orientation::Vertical));
    findings.extend(detect_cycles(tiles, &grid));

    DeadlockReport { findings }
}

/// First finding in escalation order, skipping costlier detectors once one fires
pub fn first_deadlock(layout: &Layout) -> Option<Deadlock> {
    let tiles = layout.tiles();

    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        if let Some(found) = detect_adjacent(tiles, orientation).into_iter().next() {
            return Some(found);
        }
    }

    let grid = layout.occupancy();
    for orientation in [Orientation::Horizontal, Orientation::Vertical] {
        if let Some(found) = detect_long_distance(tiles, &grid, orientation)
            .into_iter()
            .next()
        {
            return Some(found);
        }
    }

    detect_cycles(tiles, &grid).into_iter().next()
}

/// Accepted tiles that would deadlock with `candidate`
///
/// Runs the pairwise detectors between the candidate and each accepted tile.
/// With `include_cycles`, also reports the other members of any blocking
/// cycle the candidate would close. Accepted tiles are assumed deadlock-free
/// among themselves.
pub fn local_conflicts(
    candidate: &Tile,
    accepted: &[Tile],
    rows: usize,
    cols: usize,
    include_cycles: bool,
) -> Vec<TileId> {
    let mut tiles = Vec::with_capacity(accepted.len() + 1);
    tiles.extend_from_slice(accepted);
    tiles.push(*candidate);

    let mut grid = OccupancyGrid::new(rows, cols);
    for tile in &tiles {
        grid.occupy(&tile.cells(), tile.id);
    }

    let mut conflicts: Vec<TileId> = accepted
        .iter()
        .filter(|other| {
            is_adjacent_face_off(candidate, other)
                || is_long_distance_block(candidate, other, &grid)
        })
        .map(|other| other.id)
        .collect();

    if include_cycles && conflicts.is_empty() {
        for finding in detect_cycles(&tiles, &grid) {
            if finding.tiles.contains(&candidate.id) {
                conflicts.extend(finding.tiles.into_iter().filter(|&id| id != candidate.id));
            }
        }
    }

    conflicts
}
