//! Level definitions in the authored/persisted format
//!
//! A level is immutable once built; play sessions work on their own copy of
//! its grid.

use serde::{Deserialize, Serialize};

use crate::algorithm::compression::CompressionPolicy;
use crate::algorithm::connectivity::{connected_component, is_connected};
use crate::algorithm::solver::{Move, Solution, SolverConfig, certify, solve};
use crate::game::modes::Mode;
use crate::io::configuration::{DEFAULT_COMPRESSION_INTERVAL, MAX_GRID_DIMENSION, MOVE_SLACK};
use crate::io::error::{PuzzleError, Result, invalid_level};
use crate::spatial::{Grid, Position, Tile};

/// A tile together with its position, as stored in level files
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    /// Where the tile sits
    #[serde(flatten)]
    pub position: Position,
    /// The tile itself
    #[serde(flatten)]
    pub tile: Tile,
}

const fn default_compression_interval() -> u32 {
    DEFAULT_COMPRESSION_INTERVAL
}

/// A complete puzzle definition
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Level {
    /// Stable identifier used in reports
    pub id: String,
    /// Game mode the level is meant for
    #[serde(default)]
    pub mode: Mode,
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
    /// Exactly one tile per position
    pub tiles: Vec<PlacedTile>,
    /// Tiles that must end up in one pipe network
    pub goals: Vec<Position>,
    /// Quarter-turn budget
    pub max_moves: u32,
    /// Ticks before the first compression step
    #[serde(default)]
    pub compression_delay: u32,
    /// Ticks between compression steps
    #[serde(default = "default_compression_interval")]
    pub compression_interval: u32,
    /// Edges that close in during play
    #[serde(default)]
    pub compression_direction: CompressionPolicy,
    /// Precomputed cheapest solution, used for hints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<Vec<Move>>,
}

impl Level {
    /// Build a level from a grid snapshot with default compression settings
    pub fn from_grid(id: impl Into<String>, grid: &Grid, goals: Vec<Position>, max_moves: u32) -> Self {
        Self {
            id: id.into(),
            mode: Mode::default(),
            cols: grid.cols(),
            rows: grid.rows(),
            tiles: placed_tiles(grid),
            goals,
            max_moves,
            compression_delay: 0,
            compression_interval: DEFAULT_COMPRESSION_INTERVAL,
            compression_direction: CompressionPolicy::None,
            solution: None,
        }
    }

    /// Copy of the level with its tiles replaced by a grid snapshot
    ///
    /// The stored solution is dropped since it no longer applies.
    #[must_use]
    pub fn with_grid(&self, grid: &Grid) -> Self {
        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            tiles: placed_tiles(grid),
            solution: None,
            ..self.clone()
        }
    }

    /// Build the level's grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` if the dimensions are out of range or the tile
    /// list does not cover every position exactly once.
    pub fn grid(&self) -> Result<Grid> {
        if self.cols == 0 || self.rows == 0 {
            return Err(invalid_level(format!(
                "level '{}' has an empty {}x{} grid",
                self.id, self.cols, self.rows
            )));
        }
        if self.cols > MAX_GRID_DIMENSION || self.rows > MAX_GRID_DIMENSION {
            return Err(invalid_level(format!(
                "level '{}' is {}x{}, larger than {MAX_GRID_DIMENSION}",
                self.id, self.cols, self.rows
            )));
        }
        Grid::from_tiles(
            self.cols,
            self.rows,
            self.tiles.iter().map(|placed| (placed.position, placed.tile)),
        )
    }

    /// Check the level's structural invariants and build its grid
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` if the grid is malformed, a path or node tile
    /// has no stubs, there are no goals, or a goal is out of bounds or not
    /// flagged as a goal tile.
    pub fn validate(&self) -> Result<Grid> {
        let grid = self.grid()?;
        grid.validate_pipes()?;

        if self.goals.is_empty() {
            return Err(invalid_level(format!("level '{}' has no goals", self.id)));
        }
        for &goal in &self.goals {
            let tile = grid.get(goal).ok_or_else(|| {
                invalid_level(format!("goal {goal} of level '{}' is out of bounds", self.id))
            })?;
            if !tile.is_goal {
                return Err(invalid_level(format!(
                    "goal {goal} of level '{}' is not flagged as a goal node",
                    self.id
                )));
            }
        }

        Ok(grid)
    }

    /// Certify the level under its mode
    ///
    /// Classic levels must be winnable within `max_moves`; Zen levels only
    /// need some solution within the config's budget.
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` for malformed levels and the certification
    /// outcome errors (`AlreadySolved`, `NoSolution`, `TimedOut`,
    /// `Impossible`) otherwise.
    pub fn certify(&self, config: &SolverConfig) -> Result<Solution> {
        let grid = self.validate()?;
        match self.mode {
            Mode::Classic => certify(&grid, &self.goals, self.max_moves, config),
            Mode::Zen => solve(&grid, &self.goals, config).into_result(),
        }
    }

    /// Repair the defects certification can report
    ///
    /// An already connected grid is disconnected by turning one rotatable tile
    /// of the goal network. The budget is raised to the minimal solution plus
    /// `MOVE_SLACK` when it falls short, and the solution is stored.
    ///
    /// # Errors
    ///
    /// Returns `AlreadySolved` if no single tile turn disconnects the goals,
    /// and `NoSolution` or `TimedOut` if the repaired grid cannot be solved
    /// within the config's limits.
    pub fn repair(&self, config: &SolverConfig) -> Result<(Self, Solution)> {
        let mut grid = self.validate()?;
        let mut level = self.clone();

        if is_connected(&grid, &self.goals) {
            grid = disconnect(&grid, &self.goals).ok_or(PuzzleError::AlreadySolved)?;
            level = level.with_grid(&grid);
        }

        let solution = solve(&grid, &self.goals, config).into_result()?;
        if solution.total_turns > level.max_moves {
            level.max_moves = solution.total_turns + MOVE_SLACK;
        }
        level.solution = Some(solution.moves.clone());
        Ok((level, solution))
    }
}

/// Turn one rotatable tile on the goal network until the goals come apart
///
/// Tiles are tried in row-major order, each with one to three quarter-turns.
pub fn disconnect(grid: &Grid, goals: &[Position]) -> Option<Grid> {
    let network = connected_component(grid, *goals.first()?);

    grid.rotatable_positions()
        .into_iter()
        .filter(|&position| {
            grid.index_of(position)
                .and_then(|index| network.get(index).as_deref().copied())
                .unwrap_or(false)
        })
        .find_map(|position| {
            (1..=3).find_map(|turns| {
                grid.rotated(position, turns)
                    .ok()
                    .filter(|candidate| !is_connected(candidate, goals))
            })
        })
}

fn placed_tiles(grid: &Grid) -> Vec<PlacedTile> {
    grid.iter()
        .map(|(position, &tile)| PlacedTile { position, tile })
        .collect()
}
