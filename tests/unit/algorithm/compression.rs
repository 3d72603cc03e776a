//! Tests for shrinking-boundary compression

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use tiletwist::algorithm::compression::{
        CompressionPolicy, EDGE_BOTTOM, EDGE_TOP, advance, advance_by, crush_zone_contains,
        goal_crushed, max_offset,
    };
    use tiletwist::spatial::{Connections, Grid, Position, Tile, TileKind};

    fn filled(cols: usize, rows: usize) -> Grid {
        let mut grid = Grid::new(cols, rows);
        for position in grid.positions().collect::<Vec<_>>() {
            grid = grid
                .with_tile(position, Tile::path(Connections::straight()))
                .unwrap();
        }
        grid
    }

    // Policies cover every edge subset exactly once
    #[test]
    fn test_policy_masks_are_a_bijection() {
        let masks: HashSet<u8> = CompressionPolicy::ALL_POLICIES
            .iter()
            .map(|policy| policy.mask())
            .collect();
        assert_eq!(masks.len(), 16);

        for (mask, policy) in CompressionPolicy::ALL_POLICIES.iter().enumerate() {
            assert_eq!(usize::from(policy.mask()), mask);
            assert_eq!(CompressionPolicy::from_mask(policy.mask()), *policy);
        }
        assert_eq!(CompressionPolicy::All.edge_count(), 4);
        assert!(CompressionPolicy::TopBottom.has_edge(EDGE_TOP));
        assert!(CompressionPolicy::TopBottom.has_edge(EDGE_BOTTOM));
        assert_eq!(CompressionPolicy::default(), CompressionPolicy::None);
    }

    #[test]
    fn test_policy_names_in_level_files() {
        assert_eq!(
            serde_json::to_string(&CompressionPolicy::TopBottom).unwrap(),
            "\"top-bottom\""
        );
        assert_eq!(
            serde_json::from_str::<CompressionPolicy>("\"bottom-left-right\"").unwrap(),
            CompressionPolicy::BottomLeftRight
        );
    }

    #[test]
    fn test_max_offset_uses_shorter_side() {
        assert_eq!(max_offset(6, 6), 3);
        assert_eq!(max_offset(5, 8), 2);
        assert_eq!(max_offset(9, 3), 1);
    }

    // Tiles at distance < offset from an active edge are in the zone
    #[test]
    fn test_crush_zone_boundaries() {
        let policy = CompressionPolicy::TopBottom;
        assert!(!crush_zone_contains(6, 6, Position::new(0, 0), 0, policy));
        assert!(crush_zone_contains(6, 6, Position::new(3, 0), 1, policy));
        assert!(crush_zone_contains(6, 6, Position::new(3, 5), 1, policy));
        assert!(!crush_zone_contains(6, 6, Position::new(3, 1), 1, policy));

        // Column does not matter when only top and bottom move
        for x in 0..6 {
            for offset in 1..=2 {
                assert!(!crush_zone_contains(6, 6, Position::new(x, 3), offset, policy));
            }
        }
        assert!(!crush_zone_contains(6, 6, Position::new(-1, 0), 1, policy));
    }

    #[test]
    fn test_middle_row_survives_top_bottom_compression() {
        let grid = filled(6, 6);
        let step = advance_by(&grid, 0, 2, CompressionPolicy::TopBottom);

        assert_eq!(step.offset, 2);
        for x in [0, 5] {
            assert_eq!(
                step.grid.get(Position::new(x, 3)).unwrap().kind,
                TileKind::Path
            );
        }
        assert_eq!(step.grid.count_kind(TileKind::Crushed), 4 * 6);
    }

    // Offset climbs by one per step and stops at the maximum
    #[test]
    fn test_offset_is_monotonic_and_capped() {
        let grid = filled(5, 5);
        let first = advance(&grid, 0, CompressionPolicy::All);
        assert_eq!(first.offset, 1);
        assert_eq!(first.newly_crushed.len(), 16);

        let second = advance(&first.grid, first.offset, CompressionPolicy::All);
        assert_eq!(second.offset, 2);
        assert_eq!(second.newly_crushed.len(), 8);
        let survivors: Vec<Position> = second
            .grid
            .iter()
            .filter(|(_, tile)| tile.kind != TileKind::Crushed)
            .map(|(position, _)| position)
            .collect();
        assert_eq!(survivors, vec![Position::new(2, 2)]);

        let stuck = advance(&second.grid, second.offset, CompressionPolicy::All);
        assert!(stuck.is_noop(second.offset));
        assert_eq!(stuck.grid, second.grid);
        assert!(stuck.newly_crushed.is_empty());
    }

    // Any offset at or past the cap is a no-op, including the largest one
    // Verified by incrementing the offset without saturation
    #[test]
    fn test_advance_from_huge_offset_is_a_noop() {
        let grid = filled(4, 4);
        for offset in [max_offset(4, 4), 1_000, u32::MAX] {
            let step = advance(&grid, offset, CompressionPolicy::All);
            assert!(step.is_noop(offset));
            assert_eq!(step.grid, grid);
            assert!(step.newly_crushed.is_empty());
            assert!(!step.crushed_goal);
        }
        assert_eq!(
            advance_by(&grid, u32::MAX, 3, CompressionPolicy::All).offset,
            u32::MAX
        );
    }

    #[test]
    fn test_no_policy_crushes_nothing() {
        let grid = filled(4, 4);
        let step = advance(&grid, 0, CompressionPolicy::None);
        assert!(step.newly_crushed.is_empty());
        assert_eq!(step.grid, grid);
    }

    // Walls stay walls and crushed tiles are never restored
    #[test]
    fn test_walls_and_crushed_tiles_untouched() {
        let grid = filled(4, 4)
            .with_tile(Position::new(0, 0), Tile::wall())
            .unwrap();
        let step = advance(&grid, 0, CompressionPolicy::Top);

        assert_eq!(step.grid.get(Position::new(0, 0)), Some(&Tile::wall()));
        assert_eq!(step.newly_crushed.len(), 3);

        let again = advance(&step.grid, 0, CompressionPolicy::Top);
        assert!(again.newly_crushed.is_empty());
        assert_eq!(
            again.grid.get(Position::new(1, 0)).unwrap().kind,
            TileKind::Crushed
        );
    }

    #[test]
    fn test_goal_crush_is_reported() {
        let goal = Position::new(2, 0);
        let grid = filled(4, 4)
            .with_tile(goal, Tile::node(Connections::end()).goal())
            .unwrap();

        let spared = advance(&grid, 0, CompressionPolicy::Bottom);
        assert!(!spared.crushed_goal);
        assert!(!goal_crushed(&spared.grid, &[goal]));

        let hit = advance(&grid, 0, CompressionPolicy::Top);
        assert!(hit.crushed_goal);
        assert!(goal_crushed(&hit.grid, &[goal]));
        assert!(hit.grid.get(goal).unwrap().is_goal);
    }

    #[test]
    fn test_advance_by_accumulates_steps() {
        let goal = Position::new(1, 1);
        let grid = filled(6, 4)
            .with_tile(goal, Tile::node(Connections::end()).goal())
            .unwrap();

        let step = advance_by(&grid, 0, 10, CompressionPolicy::Left);
        assert_eq!(step.offset, 2);
        assert_eq!(step.newly_crushed.len(), 8);
        assert!(step.crushed_goal);
    }
}
