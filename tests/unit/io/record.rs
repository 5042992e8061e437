//! Tests for level records, packs and JSON persistence

#[cfg(test)]
mod tests {
    use slidelock::PuzzleError;
    use slidelock::analysis::difficulty::Difficulty;
    use slidelock::io::configuration::MAX_GRID_DIMENSION;
    use slidelock::io::record::{
        DifficultyDistribution, LevelPack, LevelRecord, PackedLevel, TileRecord, read_level,
        read_pack, write_level, write_pack,
    };
    use slidelock::spatial::layout::Layout;
    use slidelock::spatial::tiles::{Cell, Direction, Tile, TileId};
    use std::fs;
    use tempfile::TempDir;

    fn sample_layout() -> Layout {
        Layout::from_tiles(
            4,
            4,
            vec![
                Tile::new(TileId(1), Cell::new(0, 0), Direction::Right),
                Tile::new(TileId(2), Cell::new(0, 2), Direction::Down),
            ],
        )
    }

    fn packed(id: &str, difficulty: Difficulty) -> PackedLevel {
        PackedLevel {
            id: id.to_string(),
            name: id.to_string(),
            difficulty,
            level: LevelRecord::from_layout(&sample_layout()),
            generation_attempts: 1,
        }
    }

    // Tests tiles serialize with camelCase anchor fields and lowercase directions
    // Verified by dropping the serde rename
    #[test]
    fn test_tile_json_shape() {
        let record = TileRecord::from(&Tile::new(TileId(7), Cell::new(2, 3), Direction::Up));
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"id":7,"direction":"up","anchorRow":2,"anchorCol":3}"#
        );
    }

    // Tests a record converts back into the layout it came from
    // Verified by swapping row and column on conversion
    #[test]
    fn test_record_into_layout() {
        let layout = sample_layout();
        let record = LevelRecord::from_layout(&layout);
        assert_eq!(record.tiles[1].anchor_col, 2);
        assert_eq!(record.into_layout().unwrap(), layout);
    }

    // Tests overlapping records are refused on conversion
    // Verified by skipping the structure check
    #[test]
    fn test_record_rejects_overlap() {
        let mut record = LevelRecord::from_layout(&sample_layout());
        record.tiles.push(TileRecord {
            id: 3,
            direction: Direction::Left,
            anchor_row: 0,
            anchor_col: 1,
        });
        assert!(matches!(
            record.into_layout(),
            Err(PuzzleError::InvalidLayout { .. })
        ));
    }

    // Tests an anchor at the top of the index range is refused, not wrapped
    // Verified by computing the second cell with plain addition
    #[test]
    fn test_record_rejects_far_anchor() {
        for (direction, anchor_row, anchor_col) in [
            (Direction::Right, 0, usize::MAX),
            (Direction::Down, usize::MAX, 0),
        ] {
            let record = LevelRecord {
                rows: 6,
                cols: 6,
                tiles: vec![TileRecord {
                    id: 1,
                    direction,
                    anchor_row,
                    anchor_col,
                }],
            };
            assert!(matches!(
                record.into_layout(),
                Err(PuzzleError::InvalidLayout { .. })
            ));
        }
    }

    // Tests boards outside the supported dimensions are refused on conversion
    // Verified by checking only tile placement
    #[test]
    fn test_record_rejects_board_size() {
        for (rows, cols) in [(0, 6), (6, 0), (MAX_GRID_DIMENSION + 1, 6), (1 << 40, 1 << 40)] {
            let record = LevelRecord {
                rows,
                cols,
                tiles: Vec::new(),
            };
            assert!(matches!(
                record.into_layout(),
                Err(PuzzleError::InvalidLayout { .. })
            ));
        }
    }

    // Tests a level survives a trip through the file system
    // Verified by writing compact JSON without a trailing structure
    #[test]
    fn test_level_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("level.json");
        let record = LevelRecord::from_layout(&sample_layout());

        write_level(&path, &record).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains('\n'));
        assert_eq!(read_level(&path).unwrap(), record);
    }

    // Tests a missing file reports FileSystem
    // Verified by mapping read errors to Serialization
    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let result = read_level(&dir.path().join("nope.json"));
        assert!(matches!(result, Err(PuzzleError::FileSystem { .. })));
    }

    // Tests malformed content reports Serialization
    // Verified by mapping parse errors to FileSystem
    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"rows\": 4}").unwrap();
        assert!(matches!(
            read_level(&path),
            Err(PuzzleError::Serialization { .. })
        ));
    }

    // Tests pack metadata is derived from the levels
    // Verified by counting every level as easy
    #[test]
    fn test_pack_metadata() {
        let levels = vec![
            packed("easy_001", Difficulty::Easy),
            packed("easy_002", Difficulty::Easy),
            packed("expert_001", Difficulty::Expert),
        ];
        let pack = LevelPack::new("p", "Pack", "", levels.clone());

        assert_eq!(pack.version, "1.0.0");
        assert_eq!(pack.metadata.total_levels, 3);
        assert_eq!(
            pack.metadata.difficulty_distribution,
            DifficultyDistribution {
                easy: 2,
                medium: 0,
                hard: 0,
                expert: 1
            }
        );
        assert_eq!(DifficultyDistribution::tally(&levels).count(Difficulty::Expert), 1);
    }

    // Tests a pack survives a trip through the file system with camelCase keys
    // Verified by renaming the metadata fields
    #[test]
    fn test_pack_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("pack.json");
        let pack = LevelPack::new("p", "Pack", "desc", vec![packed("hard_001", Difficulty::Hard)]);

        write_pack(&path, &pack).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("\"totalLevels\": 1"));
        assert!(text.contains("\"generationAttempts\": 1"));
        assert!(text.contains("\"difficulty\": \"hard\""));
        assert_eq!(read_pack(&path).unwrap(), pack);
    }
}
