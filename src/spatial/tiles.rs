//! Tile vocabulary shared by every phase of generation and verification
//!
//! A tile covers two adjacent cells. Its footprint is derived from the anchor
//! (top-left cell) and the orientation implied by its slide direction, so the
//! same formula is used by placement, deadlock analysis and the verifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Grid coordinate (`row`, `col`), zero-based from the top-left corner
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    /// Row index
    pub row: usize,
    /// Column index
    pub col: usize,
}

impl Cell {
    /// Create a cell from row and column indices
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// The neighbouring cell one step in `direction`
    ///
    /// Returns `None` when the step would leave the range of `usize`; board
    /// bounds are the grid's concern.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (row, col) = match direction {
            Direction::Up => (self.row.checked_sub(1), Some(self.col)),
            Direction::Down => (self.row.checked_add(1), Some(self.col)),
            Direction::Left => (Some(self.row), self.col.checked_sub(1)),
            Direction::Right => (Some(self.row), self.col.checked_add(1)),
        };
        match (row, col) {
            (Some(row), Some(col)) => Some(Self::new(row, col)),
            _ => None,
        }
    }

    /// Whether the cell lies inside a `rows` × `cols` board
    pub const fn in_bounds(self, rows: usize, cols: usize) -> bool {
        self.row < rows && self.col < cols
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Slide direction of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards row 0
    Up,
    /// Towards the last row
    Down,
    /// Towards column 0
    Left,
    /// Towards the last column
    Right,
}

impl Direction {
    /// Every direction, in a fixed order
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Footprint orientation implied by this direction
    pub const fn orientation(self) -> Orientation {
        match self {
            Self::Left | Self::Right => Orientation::Horizontal,
            Self::Up | Self::Down => Orientation::Vertical,
        }
    }

    /// The direction facing the other way along the same axis
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Arrow glyph used in text renderings of a board
    pub const fn symbol(self) -> char {
        match self {
            Self::Up => '↑',
            Self::Down => '↓',
            Self::Left => '←',
            Self::Right => '→',
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        };
        f.write_str(name)
    }
}

/// Footprint shape of a tile
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Spans `col` and `col + 1` on one row
    Horizontal,
    /// Spans `row` and `row + 1` on one column
    Vertical,
}

impl Orientation {
    /// The two slide directions legal for this footprint
    pub const fn directions(self) -> [Direction; 2] {
        match self {
            Self::Horizontal => [Direction::Left, Direction::Right],
            Self::Vertical => [Direction::Up, Direction::Down],
        }
    }

    /// The other orientation
    pub const fn flipped(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Both cells covered by a footprint anchored at `anchor`
    ///
    /// The second cell saturates at `usize::MAX`, which no board contains, so
    /// an anchor on the last index never fits.
    pub const fn footprint(self, anchor: Cell) -> [Cell; 2] {
        let second = match self {
            Self::Horizontal => Cell::new(anchor.row, anchor.col.saturating_add(1)),
            Self::Vertical => Cell::new(anchor.row.saturating_add(1), anchor.col),
        };
        [anchor, second]
    }
}

/// Unique tile identifier within a layout
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct TileId(pub u32);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A two-cell piece with a fixed slide direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    /// Identifier, unique within its layout
    pub id: TileId,
    /// Top-left cell of the footprint
    pub anchor: Cell,
    /// Direction the tile slides in
    pub direction: Direction,
}

impl Tile {
    /// Create a tile
    pub const fn new(id: TileId, anchor: Cell, direction: Direction) -> Self {
        Self {
            id,
            anchor,
            direction,
        }
    }

    /// Orientation derived from the slide direction
    pub const fn orientation(&self) -> Orientation {
        self.direction.orientation()
    }

    /// Both cells covered by the tile
    pub const fn cells(&self) -> [Cell; 2] {
        self.orientation().footprint(self.anchor)
    }

    /// Whether the tile covers `cell`
    pub fn covers(&self, cell: Cell) -> bool {
        self.cells().contains(&cell)
    }

    /// The footprint cell at the front of the slide
    pub const fn leading_cell(&self) -> Cell {
        let [first, second] = self.cells();
        match self.direction {
            Direction::Up | Direction::Left => first,
            Direction::Down | Direction::Right => second,
        }
    }

    /// Cells swept while sliding off a `rows` × `cols` board, nearest first
    ///
    /// Starts one step beyond the leading cell and ends at the boundary. Ignores
    /// occupancy; callers decide what counts as an obstruction.
    pub fn exit_path(&self, rows: usize, cols: usize) -> ExitPath {
        ExitPath {
            next: self.leading_cell().step(self.direction),
            direction: self.direction,
            rows,
            cols,
        }
    }

    /// Whether both footprint cells lie inside a `rows` × `cols` board
    pub const fn fits(&self, rows: usize, cols: usize) -> bool {
        match self.orientation() {
            Orientation::Horizontal => {
                self.anchor.row < rows && self.anchor.col < cols.saturating_sub(1)
            }
            Orientation::Vertical => {
                self.anchor.row < rows.saturating_sub(1) && self.anchor.col < cols
            }
        }
    }

    /// Whether the tile shares a row with `row` anywhere in its footprint
    pub fn touches_row(&self, row: usize) -> bool {
        self.cells().iter().any(|cell| cell.row == row)
    }

    /// Whether the tile shares a column with `col` anywhere in its footprint
    pub fn touches_col(&self, col: usize) -> bool {
        self.cells().iter().any(|cell| cell.col == col)
    }
}

/// Iterator over the cells in front of a tile up to the board edge
#[derive(Clone, Debug)]
pub struct ExitPath {
    next: Option<Cell>,
    direction: Direction,
    rows: usize,
    cols: usize,
}

impl Iterator for ExitPath {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        let current = self.next.filter(|cell| cell.in_bounds(self.rows, self.cols))?;
        self.next = current.step(self.direction);
        Some(current)
    }
}
