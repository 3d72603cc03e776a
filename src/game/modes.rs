//! Game-mode hooks
//!
//! Modes customize win and loss rules without the puzzle core depending on
//! them. Every hook has a default, so a mode that overrides nothing plays by
//! the connectivity-only rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::algorithm::compression::goal_crushed;
use crate::game::level::Level;
use crate::spatial::{Grid, Position};

/// Named counters a mode keeps alongside the puzzle
pub type ModeStats = BTreeMap<String, i64>;

/// Everything a loss rule may look at
#[derive(Clone, Copy, Debug)]
pub struct LossContext<'a> {
    /// Current board
    pub grid: &'a Grid,
    /// Tiles that must be connected to win
    pub goals: &'a [Position],
    /// Current wall offset
    pub wall_offset: u32,
    /// Quarter-turns spent so far
    pub moves_used: u32,
    /// Quarter-turn budget of the level
    pub move_budget: u32,
    /// Mode counters
    pub stats: &'a ModeStats,
}

/// Why a game ended in a loss
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LossReason {
    /// Compression destroyed a goal tile
    GoalCrushed,
    /// The move budget ran out before the goals connected
    OutOfMoves,
    /// A mode-specific rule fired
    Custom(String),
}

impl fmt::Display for LossReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalCrushed => f.write_str("a goal was crushed"),
            Self::OutOfMoves => f.write_str("out of moves"),
            Self::Custom(reason) => f.write_str(reason),
        }
    }
}

/// Verdict of a loss check
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LossVerdict {
    /// The game goes on
    Continue,
    /// The game is lost
    Lost(LossReason),
}

/// The connectivity-only loss rule
///
/// A crushed goal loses even when other goals survive; a spent move budget
/// loses when the goals are still apart.
pub fn default_loss(context: &LossContext<'_>) -> LossVerdict {
    if goal_crushed(context.grid, context.goals) {
        LossVerdict::Lost(LossReason::GoalCrushed)
    } else if context.moves_used >= context.move_budget {
        LossVerdict::Lost(LossReason::OutOfMoves)
    } else {
        LossVerdict::Continue
    }
}

/// Customization points for game modes
pub trait GameMode {
    /// Board the session starts from
    fn initial_grid(&self, _level: &Level, grid: Grid) -> Grid {
        grid
    }

    /// Counters the session starts with
    fn initial_stats(&self, _level: &Level) -> ModeStats {
        ModeStats::new()
    }

    /// Called once per session tick, before compression
    fn on_tick(&mut self, _tick: u64, _stats: &mut ModeStats) {}

    /// Tiles that must be connected to win
    fn win_tiles(&self, level: &Level) -> Vec<Position> {
        level.goals.clone()
    }

    /// Decide whether the game is lost, after moves and compression steps
    fn check_loss(&self, context: &LossContext<'_>) -> LossVerdict {
        default_loss(context)
    }
}

/// Built-in modes
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Connect the goals within the move budget before the walls close
    #[default]
    Classic,
    /// Unlimited moves; only compression can end the game
    Zen,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Classic => f.write_str("classic"),
            Self::Zen => f.write_str("zen"),
        }
    }
}

impl GameMode for Mode {
    fn check_loss(&self, context: &LossContext<'_>) -> LossVerdict {
        match self {
            Self::Classic => default_loss(context),
            Self::Zen if goal_crushed(context.grid, context.goals) => {
                LossVerdict::Lost(LossReason::GoalCrushed)
            }
            Self::Zen => LossVerdict::Continue,
        }
    }
}
