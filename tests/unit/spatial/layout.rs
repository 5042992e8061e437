//! Tests for layout bookkeeping and structural validation

#[cfg(test)]
mod tests {
    use slidelock::io::configuration::MAX_GRID_DIMENSION;
    use slidelock::io::error::PuzzleError;
    use slidelock::spatial::grid::CellState;
    use slidelock::spatial::layout::Layout;
    use slidelock::spatial::tiles::{Cell, Direction, Tile, TileId};

    fn tile(id: u32, row: usize, col: usize, direction: Direction) -> Tile {
        Tile::new(TileId(id), Cell::new(row, col), direction)
    }

    // Tests a well-formed layout passes the structure check
    // Verified by rejecting every layout with more than one tile
    #[test]
    fn test_valid_structure() {
        let layout = Layout::from_tiles(
            4,
            4,
            vec![tile(1, 0, 0, Direction::Right), tile(2, 1, 0, Direction::Down)],
        );
        assert!(layout.check_structure().is_ok());
    }

    // Tests overlapping tiles are rejected
    // Verified by skipping the covered-cell set
    #[test]
    fn test_overlap_rejected() {
        let layout = Layout::from_tiles(
            4,
            4,
            vec![tile(1, 0, 0, Direction::Right), tile(2, 0, 1, Direction::Down)],
        );
        let error = layout.check_structure().unwrap_err();
        assert!(matches!(error, PuzzleError::InvalidLayout { .. }));
        assert!(error.to_string().contains("overlaps"));
    }

    // Tests tiles hanging off the board are rejected
    // Verified by removing the containment check
    #[test]
    fn test_containment_rejected() {
        let layout = Layout::from_tiles(4, 4, vec![tile(1, 3, 3, Direction::Down)]);
        let error = layout.check_structure().unwrap_err();
        assert!(error.to_string().contains("beyond"));
    }

    // Tests empty and oversized boards are rejected before any grid is built
    // Verified by removing the dimension check
    #[test]
    fn test_board_size_rejected() {
        for (rows, cols) in [(0, 4), (4, 0), (MAX_GRID_DIMENSION + 1, 4), (1 << 40, 1 << 40)] {
            let error = Layout::new(rows, cols).check_structure().unwrap_err();
            assert!(matches!(error, PuzzleError::InvalidLayout { .. }));
            assert!(error.to_string().contains("outside"));
        }
        assert!(Layout::new(MAX_GRID_DIMENSION, 1).check_structure().is_ok());
    }

    // Tests duplicate ids are rejected
    // Verified by removing the id set
    #[test]
    fn test_duplicate_id_rejected() {
        let layout = Layout::from_tiles(
            4,
            4,
            vec![tile(1, 0, 0, Direction::Right), tile(1, 2, 0, Direction::Right)],
        );
        assert!(layout.check_structure().unwrap_err().to_string().contains("duplicate"));
    }

    // Tests id allocation continues past the largest id
    // Verified by returning the tile count instead
    #[test]
    fn test_next_id() {
        let mut layout = Layout::new(6, 6);
        assert_eq!(layout.next_id(), TileId(1));
        layout.push(tile(3, 0, 0, Direction::Up));
        layout.push(tile(7, 0, 2, Direction::Up));
        assert_eq!(layout.next_id(), TileId(8));
    }

    // Tests lookup and removal by id
    // Verified by removing by position instead of id
    #[test]
    fn test_get_and_remove() {
        let mut layout = Layout::new(6, 6);
        layout.push(tile(4, 0, 0, Direction::Up));
        layout.push(tile(9, 0, 2, Direction::Up));

        assert_eq!(layout.get(TileId(9)).map(|t| t.anchor), Some(Cell::new(0, 2)));
        assert_eq!(layout.remove(TileId(4)).map(|t| t.id), Some(TileId(4)));
        assert_eq!(layout.len(), 1);
        assert!(layout.remove(TileId(4)).is_none());
    }

    // Tests the occupancy grid mirrors every footprint
    // Verified by occupying only anchors
    #[test]
    fn test_occupancy_matches_tiles() {
        let layout = Layout::from_tiles(3, 3, vec![tile(2, 0, 1, Direction::Down)]);
        let grid = layout.occupancy();
        assert_eq!(grid.owner(Cell::new(0, 1)), CellState::Occupied(TileId(2)));
        assert_eq!(grid.owner(Cell::new(1, 1)), CellState::Occupied(TileId(2)));
        assert_eq!(grid.occupied_count(), 2);
    }

    // Tests the text rendering uses arrow glyphs and dots
    // Verified by rendering columns before rows
    #[test]
    fn test_render() {
        let layout = Layout::from_tiles(
            2,
            3,
            vec![tile(1, 0, 0, Direction::Right), tile(2, 0, 2, Direction::Up)],
        );
        assert_eq!(layout.render(), "→→↑\n..↑\n");
    }
}
