//! Tests for seeded level generation

#[cfg(test)]
mod tests {
    use tiletwist::PuzzleError;
    use tiletwist::algorithm::compression::CompressionPolicy;
    use tiletwist::algorithm::connectivity::is_connected;
    use tiletwist::algorithm::generator::{
        Difficulty, GeneratorConfig, LevelGenerator, generate, goal_separation,
    };
    use tiletwist::algorithm::solver::{SolverConfig, apply_moves, solve};

    // Generated levels start apart, certify, and carry a working solution
    #[test]
    fn test_generated_levels_are_certified() {
        for seed in 1..=3 {
            let level = generate(5, 5, 2, Difficulty::Easy, 1, seed).unwrap();
            let grid = level.validate().unwrap();

            assert!(!is_connected(&grid, &level.goals));
            let stored = level.solution.clone().unwrap();
            let replayed = apply_moves(&grid, &stored).unwrap();
            assert!(is_connected(&replayed, &level.goals));

            let minimal = solve(&grid, &level.goals, &SolverConfig::default())
                .into_result()
                .unwrap();
            let stored_turns: u32 = stored.iter().map(|m| u32::from(m.turns)).sum();
            assert_eq!(stored_turns, minimal.total_turns);
            assert_eq!(level.max_moves, minimal.total_turns + 2);
            assert!(minimal.total_turns <= Difficulty::Easy.max_minimal_moves());
        }
    }

    // Every difficulty certifies on every board size from 4x4 to 10x10, starts
    // apart, and is solvable within its own budget
    #[test]
    fn test_generation_across_difficulties_and_sizes() {
        for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
            for size in 4..=10 {
                for seed in 1..=2 {
                    let level = generate(size, size, 2, difficulty, 1, seed)
                        .unwrap_or_else(|e| panic!("{difficulty} {size}x{size} seed {seed}: {e}"));
                    let grid = level.validate().unwrap();
                    assert!(!is_connected(&grid, &level.goals));

                    let solution = solve(
                        &grid,
                        &level.goals,
                        &SolverConfig::default().with_budget(level.max_moves),
                    )
                    .into_result()
                    .unwrap();
                    assert!(solution.total_turns <= level.max_moves);
                    assert!(solution.total_turns >= difficulty.min_minimal_moves());
                    assert!(solution.total_turns <= difficulty.max_minimal_moves());
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let first = generate(6, 6, 2, Difficulty::Easy, 2, 99).unwrap();
        let second = generate(6, 6, 2, Difficulty::Easy, 2, 99).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.id, "generated-99-1");
    }

    #[test]
    fn test_generator_numbers_its_levels() {
        let config = GeneratorConfig::new(5, 5, 2, Difficulty::Easy);
        let mut generator = LevelGenerator::new(config, 7).unwrap();
        let first = generator.generate().unwrap();
        let second = generator.generate().unwrap();
        assert_eq!(first.id, "generated-7-1");
        assert_eq!(second.id, "generated-7-2");
        assert_eq!(generator.config().cols, 5);
    }

    // Goals are flagged, spread apart and the grid honours the pipe invariant
    #[test]
    fn test_three_goal_layout() {
        let level = generate(7, 7, 3, Difficulty::Easy, 2, 5).unwrap();
        let grid = level.validate().unwrap();

        assert_eq!(level.goals.len(), 3);
        assert_eq!(grid.goal_positions().len(), 3);
        let separation = goal_separation(7, 7);
        for (i, a) in level.goals.iter().enumerate() {
            for b in level.goals.iter().skip(i + 1) {
                assert!(a.manhattan(*b) >= separation);
            }
        }
        assert!(level.certify(&SolverConfig::default()).is_ok());
    }

    #[test]
    fn test_compression_settings_are_copied() {
        let config = GeneratorConfig::new(5, 5, 2, Difficulty::Easy)
            .with_compression(CompressionPolicy::LeftRight);
        let level = LevelGenerator::new(config, 3).unwrap().generate().unwrap();
        assert_eq!(level.compression_direction, CompressionPolicy::LeftRight);
        assert_eq!(level.compression_delay, config.compression_delay);
        assert_eq!(level.compression_interval, config.compression_interval);
    }

    #[test]
    fn test_goal_separation_scales_with_board() {
        assert_eq!(goal_separation(3, 3), 2);
        assert_eq!(goal_separation(5, 5), 2);
        assert_eq!(goal_separation(12, 12), 6);
    }

    #[test]
    fn test_invalid_parameters() {
        let cases = [
            GeneratorConfig::new(2, 5, 2, Difficulty::Easy),
            GeneratorConfig::new(5, 65, 2, Difficulty::Easy),
            GeneratorConfig::new(5, 5, 1, Difficulty::Easy),
            GeneratorConfig::new(4, 4, 5, Difficulty::Easy),
            GeneratorConfig::new(4, 4, 2, Difficulty::Easy).with_decoys(15),
            GeneratorConfig {
                attempts: 0,
                ..GeneratorConfig::new(5, 5, 2, Difficulty::Easy)
            },
        ];
        for config in cases {
            assert!(matches!(
                config.validate(),
                Err(PuzzleError::InvalidParameter { .. })
            ));
            assert!(LevelGenerator::new(config, 1).is_err());
        }
    }

    // Every cell but the goals wanted as decoys leaves no room for a route
    #[test]
    fn test_generation_failure_reports_reason() {
        let config = GeneratorConfig {
            attempts: 2,
            ..GeneratorConfig::new(5, 5, 2, Difficulty::Easy).with_decoys(23)
        };
        let result = LevelGenerator::new(config, 11).unwrap().generate();
        match result {
            Err(PuzzleError::GenerationFailed { attempts, reason }) => {
                assert_eq!(attempts, 2);
                assert!(reason.contains("decoys"));
            }
            other => panic!("expected generation failure, got {other:?}"),
        }
    }
}
