//! Tests for rotation expansion, per-base deduplication and adjacency analysis

#[cfg(test)]
mod tests {
    use edgetile::CollapseError;
    use edgetile::spatial::tiles::{Color, Direction, PixelBuffer, Tile};
    use edgetile::spatial::tileset::TileSet;

    const K: Color = [0, 0, 0, 255];
    const W: Color = [255, 255, 255, 255];
    const R: Color = [255, 0, 0, 255];
    const G: Color = [0, 255, 0, 255];
    const B: Color = [0, 0, 255, 255];

    fn from_rows(rows: [[Color; 3]; 3]) -> PixelBuffer {
        PixelBuffer::from_fn(3, |(row, col)| rows[row][col]).unwrap()
    }

    // Black tile with a red pixel in the top-left corner: no rotational symmetry
    fn corner_tile() -> PixelBuffer {
        from_rows([[R, K, K], [K, K, K], [K, K, K]])
    }

    // Black tile with a white horizontal bar: symmetric under a half turn
    fn bar_tile() -> PixelBuffer {
        from_rows([[K, K, K], [W, W, W], [K, K, K]])
    }

    // Tests a uniform tile collapses to a single rotation
    // Verified by disabling the seen-key check
    #[test]
    fn test_symmetric_tile_dedup() {
        let base = Tile::new(PixelBuffer::solid(3, W).unwrap());
        assert_eq!(TileSet::distinct_rotations(&base).len(), 1);
    }

    // Tests a fully asymmetric tile keeps all four rotations
    // Verified by deduplicating on the top edge only
    #[test]
    fn test_asymmetric_tile_keeps_four() {
        let base = Tile::new(corner_tile());
        let rotations = TileSet::distinct_rotations(&base);

        assert_eq!(rotations.len(), 4);
        let turns: Vec<u8> = rotations.iter().map(Tile::rotation).collect();
        assert_eq!(turns, vec![0, 1, 2, 3]);
    }

    // Tests a half-turn symmetric tile keeps two rotations
    // Verified by comparing images instead of edge keys
    #[test]
    fn test_half_turn_symmetric_keeps_two() {
        let base = Tile::new(bar_tile());
        let rotations = TileSet::distinct_rotations(&base);

        assert_eq!(rotations.len(), 2);
        assert_eq!(rotations.first().map(Tile::rotation), Some(0));
    }

    // Tests identical base tiles are not merged with each other
    // Verified by sharing the seen set across base tiles
    #[test]
    fn test_dedup_is_per_base_tile() {
        let white = PixelBuffer::solid(3, W).unwrap();
        let set = TileSet::from_images(vec![white.clone(), white]).unwrap();

        assert_eq!(set.len(), 2);
    }

    // Tests the final list concatenates each base tile's rotations in order
    // Verified by appending rotations before base tiles
    #[test]
    fn test_tile_indices_follow_base_order() {
        let set = TileSet::from_images(vec![
            PixelBuffer::solid(3, W).unwrap(),
            corner_tile(),
            bar_tile(),
        ])
        .unwrap();

        assert_eq!(set.len(), 1 + 4 + 2);
        let turns: Vec<u8> = set.tiles().iter().map(Tile::rotation).collect();
        assert_eq!(turns, vec![0, 0, 1, 2, 3, 0, 1]);
        assert_eq!(set.tile_size(), 3);
    }

    // Tests unequal tile sizes are a configuration error
    // Verified by skipping the size comparison
    #[test]
    fn test_size_mismatch_rejected() {
        let result = TileSet::from_images(vec![
            PixelBuffer::solid(3, W).unwrap(),
            PixelBuffer::solid(4, W).unwrap(),
        ]);

        assert!(matches!(
            result,
            Err(CollapseError::TileSizeMismatch {
                index: 1,
                expected: 3,
                found: 4
            })
        ));
    }

    // Tests an empty input produces an empty tile set
    // Verified by returning an error for empty input
    #[test]
    fn test_empty_input_yields_empty_set() {
        let set = TileSet::from_images(Vec::new()).unwrap();
        assert!(set.is_empty());
        assert_eq!(set.tile_size(), 0);
    }

    // Tests matching is pixel-exact across the shared border
    // Verified by comparing stored edges without reversal
    #[test]
    fn test_adjacency_matches_physical_border() {
        // Right column reads R, G, B from top to bottom
        let left = from_rows([[K, K, R], [K, K, G], [K, K, B]]);
        // Left column reads R, G, B from top to bottom: fits
        let fitting = from_rows([[R, W, W], [G, W, W], [B, W, W]]);
        // Left column upside down: does not fit
        let flipped = from_rows([[B, W, W], [G, W, W], [R, W, W]]);

        let set = TileSet::from_images(vec![left, fitting, flipped]).unwrap();
        // Four rotations each: 0..4 left, 4..8 fitting, 8..12 flipped
        assert_eq!(set.len(), 12);

        assert_eq!(set.neighbors(0, Direction::Right).unwrap().to_vec(), vec![4]);
        assert!(set.neighbors(4, Direction::Left).unwrap().contains(0));
        assert!(!set.neighbors(0, Direction::Right).unwrap().contains(8));
    }

    // Tests adjacency sets are symmetric across every shared edge
    // Verified by filling neighbor sets from the same side on both tiles
    #[test]
    fn test_adjacency_symmetry() {
        let set = TileSet::from_images(vec![
            corner_tile(),
            bar_tile(),
            PixelBuffer::solid(3, K).unwrap(),
            from_rows([[K, R, K], [R, G, R], [K, R, K]]),
        ])
        .unwrap();

        for a in 0..set.len() {
            for b in 0..set.len() {
                for d in Direction::ALL {
                    let forward = set.neighbors(a, d).unwrap().contains(b);
                    let backward = set.neighbors(b, d.opposite()).unwrap().contains(a);
                    assert_eq!(forward, backward, "tiles {a}, {b} towards {d:?}");
                }
            }
        }
    }

    // Tests a uniform tile is its own neighbor on every side
    // Verified by skipping the self comparison in analysis
    #[test]
    fn test_uniform_tile_neighbors_itself() {
        let set = TileSet::from_images(vec![PixelBuffer::solid(2, G).unwrap()]).unwrap();

        for d in Direction::ALL {
            assert_eq!(set.neighbors(0, d).unwrap().to_vec(), vec![0]);
        }
        assert!(set.neighbors(1, Direction::Up).is_none());
    }

    // Tests two solid colors only ever neighbor themselves
    // Verified by inserting every candidate into the neighbor sets
    #[test]
    fn test_solid_colors_do_not_mix() {
        let set = TileSet::from_images(vec![
            PixelBuffer::solid(3, K).unwrap(),
            PixelBuffer::solid(3, W).unwrap(),
        ])
        .unwrap();

        assert_eq!(set.len(), 2);
        for d in Direction::ALL {
            assert_eq!(set.neighbors(0, d).unwrap().to_vec(), vec![0]);
            assert_eq!(set.neighbors(1, d).unwrap().to_vec(), vec![1]);
        }
    }
}
