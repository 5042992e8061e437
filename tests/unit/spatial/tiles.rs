//! Tests for cell stepping, tile footprints and exit paths

#[cfg(test)]
mod tests {
    use slidelock::spatial::tiles::{Cell, Direction, Orientation, Tile, TileId};

    fn tile(id: u32, row: usize, col: usize, direction: Direction) -> Tile {
        Tile::new(TileId(id), Cell::new(row, col), direction)
    }

    // Tests stepping off the top and left edges yields no cell
    // Verified by replacing checked_sub with wrapping_sub
    #[test]
    fn test_step_stops_at_origin() {
        let origin = Cell::new(0, 0);
        assert_eq!(origin.step(Direction::Up), None);
        assert_eq!(origin.step(Direction::Left), None);
        assert_eq!(origin.step(Direction::Right), Some(Cell::new(0, 1)));
        assert_eq!(origin.step(Direction::Down), Some(Cell::new(1, 0)));
    }

    // Tests orientation and opposite pairs for every direction
    // Verified by mapping Up to Horizontal
    #[test]
    fn test_direction_axes() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_eq!(direction.opposite().orientation(), direction.orientation());
            assert!(direction.orientation().directions().contains(&direction));
        }
        assert_eq!(Direction::Left.orientation(), Orientation::Horizontal);
        assert_eq!(Direction::Down.orientation(), Orientation::Vertical);
    }

    // Tests footprints extend right for horizontal and down for vertical tiles
    // Verified by swapping the footprint offsets
    #[test]
    fn test_footprint_cells() {
        assert_eq!(
            tile(1, 2, 3, Direction::Left).cells(),
            [Cell::new(2, 3), Cell::new(2, 4)]
        );
        assert_eq!(
            tile(1, 2, 3, Direction::Up).cells(),
            [Cell::new(2, 3), Cell::new(3, 3)]
        );
        assert!(tile(1, 2, 3, Direction::Up).covers(Cell::new(3, 3)));
        assert!(!tile(1, 2, 3, Direction::Up).covers(Cell::new(2, 4)));
    }

    // Tests the leading cell is the footprint end facing the slide
    // Verified by always returning the anchor
    #[test]
    fn test_leading_cell() {
        assert_eq!(tile(1, 2, 3, Direction::Left).leading_cell(), Cell::new(2, 3));
        assert_eq!(tile(1, 2, 3, Direction::Right).leading_cell(), Cell::new(2, 4));
        assert_eq!(tile(1, 2, 3, Direction::Up).leading_cell(), Cell::new(2, 3));
        assert_eq!(tile(1, 2, 3, Direction::Down).leading_cell(), Cell::new(3, 3));
    }

    // Tests exit paths start beyond the leading cell and end at the boundary
    // Verified by starting the path at the leading cell
    #[test]
    fn test_exit_path_runs_to_edge() {
        let right: Vec<Cell> = tile(1, 0, 0, Direction::Right).exit_path(1, 5).collect();
        assert_eq!(right, vec![Cell::new(0, 2), Cell::new(0, 3), Cell::new(0, 4)]);

        let down: Vec<Cell> = tile(1, 1, 2, Direction::Down).exit_path(4, 4).collect();
        assert_eq!(down, vec![Cell::new(3, 2)]);
    }

    // Tests tiles already touching their edge have an empty exit path
    // Verified by yielding out-of-bounds cells
    #[test]
    fn test_exit_path_empty_at_edge() {
        assert_eq!(tile(1, 0, 3, Direction::Up).exit_path(6, 6).count(), 0);
        assert_eq!(tile(1, 2, 0, Direction::Left).exit_path(6, 6).count(), 0);
        assert_eq!(tile(1, 2, 4, Direction::Right).exit_path(6, 6).count(), 0);
        assert_eq!(tile(1, 4, 2, Direction::Down).exit_path(6, 6).count(), 0);
    }

    // Tests containment of both footprint cells
    // Verified by checking only the anchor
    #[test]
    fn test_fits() {
        assert!(tile(1, 0, 2, Direction::Right).fits(1, 4));
        assert!(!tile(1, 0, 3, Direction::Right).fits(1, 4));
        assert!(!tile(1, 3, 0, Direction::Down).fits(4, 4));
    }

    // Tests anchors on the last usize index neither wrap nor fit
    // Verified by adding one to the anchor without saturating
    #[test]
    fn test_far_anchor_does_not_overflow() {
        let right = tile(1, 0, usize::MAX, Direction::Right);
        assert_eq!(right.cells()[1], Cell::new(0, usize::MAX));
        assert!(!right.fits(4, 4));
        assert!(!tile(2, usize::MAX, 0, Direction::Down).fits(4, 4));
        assert_eq!(Cell::new(0, usize::MAX).step(Direction::Right), None);
        assert_eq!(Cell::new(usize::MAX, 0).step(Direction::Down), None);
        assert_eq!(right.exit_path(4, 4).count(), 0);
    }

    // Tests row and column membership over the whole footprint
    // Verified by comparing against the anchor only
    #[test]
    fn test_touches_lines() {
        let vertical = tile(1, 2, 1, Direction::Down);
        assert!(vertical.touches_row(2));
        assert!(vertical.touches_row(3));
        assert!(!vertical.touches_row(4));
        assert!(vertical.touches_col(1));
        assert!(!vertical.touches_col(2));
    }

    // Tests display forms used in logs and reports
    // Verified by deriving Display from Debug
    #[test]
    fn test_display() {
        assert_eq!(TileId(7).to_string(), "#7");
        assert_eq!(Direction::Right.to_string(), "right");
        assert_eq!(Cell::new(1, 2).to_string(), "(1, 2)");
        assert_eq!(Direction::Up.symbol(), '↑');
    }

    // Tests lowercase direction names in serialized form
    // Verified by removing the serde rename attribute
    #[test]
    fn test_direction_serde_names() {
        assert_eq!(serde_json::to_string(&Direction::Left).unwrap(), "\"left\"");
        let parsed: Direction = serde_json::from_str("\"down\"").unwrap();
        assert_eq!(parsed, Direction::Down);
        assert_eq!(serde_json::to_string(&TileId(4)).unwrap(), "4");
    }
}
