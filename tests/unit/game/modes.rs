//! Tests for game-mode hooks and the built-in loss rules

#[cfg(test)]
mod tests {
    use tiletwist::game::level::Level;
    use tiletwist::game::modes::{
        GameMode, LossContext, LossReason, LossVerdict, Mode, ModeStats, default_loss,
    };
    use tiletwist::spatial::{Connections, Grid, Position, Tile};

    struct Plain;

    impl GameMode for Plain {}

    fn board(goal_crushed: bool) -> (Grid, Vec<Position>) {
        let goal = Position::new(0, 0);
        let tile = Tile::node(Connections::end().rotated(1)).goal();
        let tile = if goal_crushed { tile.crushed() } else { tile };
        (Grid::new(3, 3).with_tile(goal, tile).unwrap(), vec![goal])
    }

    fn context<'a>(
        grid: &'a Grid,
        goals: &'a [Position],
        moves_used: u32,
        stats: &'a ModeStats,
    ) -> LossContext<'a> {
        LossContext {
            grid,
            goals,
            wall_offset: 0,
            moves_used,
            move_budget: 4,
            stats,
        }
    }

    #[test]
    fn test_default_loss_rules() {
        let stats = ModeStats::new();
        let (grid, goals) = board(false);
        assert_eq!(default_loss(&context(&grid, &goals, 3, &stats)), LossVerdict::Continue);
        assert_eq!(
            default_loss(&context(&grid, &goals, 4, &stats)),
            LossVerdict::Lost(LossReason::OutOfMoves)
        );

        // A crushed goal outranks the spent budget
        let (crushed, goals) = board(true);
        assert_eq!(
            default_loss(&context(&crushed, &goals, 9, &stats)),
            LossVerdict::Lost(LossReason::GoalCrushed)
        );
    }

    #[test]
    fn test_classic_and_zen_rules() {
        let stats = ModeStats::new();
        let (grid, goals) = board(false);
        let spent = context(&grid, &goals, 10, &stats);
        assert_eq!(
            Mode::Classic.check_loss(&spent),
            LossVerdict::Lost(LossReason::OutOfMoves)
        );
        assert_eq!(Mode::Zen.check_loss(&spent), LossVerdict::Continue);

        let (crushed, goals) = board(true);
        assert_eq!(
            Mode::Zen.check_loss(&context(&crushed, &goals, 0, &stats)),
            LossVerdict::Lost(LossReason::GoalCrushed)
        );
    }

    // Hooks left alone play by the level's own rules
    #[test]
    fn test_default_hooks() {
        let (grid, goals) = board(false);
        let level = Level::from_grid("plain", &grid, goals.clone(), 4);
        let mut mode = Plain;

        assert_eq!(mode.win_tiles(&level), goals);
        assert_eq!(mode.initial_grid(&level, grid.clone()), grid);
        let mut stats = mode.initial_stats(&level);
        assert!(stats.is_empty());
        mode.on_tick(1, &mut stats);
        assert!(stats.is_empty());

        let spent = context(&grid, &goals, 4, &stats);
        assert_eq!(mode.check_loss(&spent), default_loss(&spent));
    }

    #[test]
    fn test_mode_names() {
        assert_eq!(Mode::default(), Mode::Classic);
        assert_eq!(Mode::Zen.to_string(), "zen");
        assert_eq!(serde_json::to_string(&Mode::Classic).unwrap(), "\"classic\"");
        assert_eq!(serde_json::from_str::<Mode>("\"zen\"").unwrap(), Mode::Zen);

        assert_eq!(LossReason::OutOfMoves.to_string(), "out of moves");
        assert_eq!(LossReason::Custom("time up".into()).to_string(), "time up");
    }
}
