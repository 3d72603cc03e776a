//! Play sessions
//!
//! A session is an explicitly constructed, caller-owned game instance. It owns
//! the runtime copy of the level's grid, counts moves and ticks, drives the
//! compression walls and applies the mode's win and loss rules.

use crate::algorithm::compression::advance;
use crate::algorithm::connectivity::is_connected;
use crate::algorithm::solver::{Move, SolverConfig, hint};
use crate::game::level::Level;
use crate::game::modes::{GameMode, LossContext, LossReason, LossVerdict, Mode, ModeStats};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::{Grid, Position};

/// State of a session
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Status {
    /// Moves are still accepted
    Playing,
    /// Every goal is connected
    Won,
    /// The mode's loss rule fired
    Lost(LossReason),
}

/// One play-through of a level
pub struct Session<M: GameMode = Mode> {
    level: Level,
    grid: Grid,
    goals: Vec<Position>,
    mode: M,
    stats: ModeStats,
    moves_used: u32,
    wall_offset: u32,
    ticks: u64,
    status: Status,
    solver: SolverConfig,
}

impl Session<Mode> {
    /// Start a session with the level's own mode
    ///
    /// # Errors
    ///
    /// See [`Session::new`].
    pub fn for_level(level: Level) -> Result<Self> {
        let mode = level.mode;
        Self::new(level, mode)
    }
}

impl<M: GameMode> Session<M> {
    /// Start a session
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` if the level is malformed and `AlreadySolved`
    /// if its goals are connected before any move.
    pub fn new(level: Level, mode: M) -> Result<Self> {
        let grid = mode.initial_grid(&level, level.validate()?);
        let goals = mode.win_tiles(&level);
        if is_connected(&grid, &goals) {
            return Err(PuzzleError::AlreadySolved);
        }
        let stats = mode.initial_stats(&level);

        Ok(Self {
            level,
            grid,
            goals,
            mode,
            stats,
            moves_used: 0,
            wall_offset: 0,
            ticks: 0,
            status: Status::Playing,
            solver: SolverConfig::default(),
        })
    }

    /// Replace the search limits used for hints
    #[must_use]
    pub const fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Rotate a tile one quarter-turn clockwise
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the game is over or the tile cannot be
    /// rotated.
    pub fn rotate(&mut self, position: Position) -> Result<&Status> {
        self.ensure_playing()?;
        self.grid = self.grid.rotated(position, 1)?;
        self.moves_used += 1;

        if is_connected(&self.grid, &self.goals) {
            self.status = Status::Won;
        } else {
            self.check_loss();
        }
        Ok(&self.status)
    }

    /// Advance the session clock by one tick
    ///
    /// Compression fires once the level's delay has passed and then every
    /// interval ticks. Ticks after the game is over change nothing.
    pub fn tick(&mut self) -> &Status {
        if self.status != Status::Playing {
            return &self.status;
        }
        self.ticks += 1;
        self.mode.on_tick(self.ticks, &mut self.stats);

        if self.compression_due() {
            let step = advance(
                &self.grid,
                self.wall_offset,
                self.level.compression_direction,
            );
            self.grid = step.grid;
            self.wall_offset = step.offset;
        }

        self.check_loss();
        &self.status
    }

    /// First move of a cheapest solution from the current board
    ///
    /// Prefers the level's stored solution while the board is untouched by
    /// both the player and the walls.
    pub fn hint(&self) -> Option<Move> {
        if self.status != Status::Playing {
            return None;
        }
        if self.moves_used == 0 && self.wall_offset == 0 {
            let stored = self.level.solution.as_ref().and_then(|moves| moves.first());
            if let Some(&first) = stored {
                return Some(first);
            }
        }
        let remaining = self.level.max_moves.saturating_sub(self.moves_used);
        hint(&self.grid, &self.goals, &self.solver.with_budget(remaining))
    }

    /// Current status
    pub const fn status(&self) -> &Status {
        &self.status
    }

    /// Current board
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The level being played
    pub const fn level(&self) -> &Level {
        &self.level
    }

    /// Tiles that must be connected to win
    pub fn goals(&self) -> &[Position] {
        &self.goals
    }

    /// Current wall offset
    pub const fn wall_offset(&self) -> u32 {
        self.wall_offset
    }

    /// Quarter-turns spent so far
    pub const fn moves_used(&self) -> u32 {
        self.moves_used
    }

    /// Ticks elapsed so far
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Mode counters
    pub const fn stats(&self) -> &ModeStats {
        &self.stats
    }

    fn compression_due(&self) -> bool {
        let delay = u64::from(self.level.compression_delay);
        let interval = u64::from(self.level.compression_interval.max(1));
        self.level.compression_direction.edge_count() > 0
            && self.ticks >= delay
            && (self.ticks - delay) % interval == 0
    }

    fn check_loss(&mut self) {
        let context = LossContext {
            grid: &self.grid,
            goals: &self.goals,
            wall_offset: self.wall_offset,
            moves_used: self.moves_used,
            move_budget: self.level.max_moves,
            stats: &self.stats,
        };
        if let LossVerdict::Lost(reason) = self.mode.check_loss(&context) {
            self.status = Status::Lost(reason);
        }
    }

    fn ensure_playing(&self) -> Result<()> {
        match &self.status {
            Status::Playing => Ok(()),
            Status::Won => Err(invalid_parameter("session", &"won", &"the game is over")),
            Status::Lost(reason) => Err(invalid_parameter(
                "session",
                &"lost",
                &format!("the game is over: {reason}"),
            )),
        }
    }
}
