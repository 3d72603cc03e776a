//! Breadth-first rotation solver
//!
//! Searches orientations of the rotatable tiles for one that connects every
//! goal. Each expansion turns a single tile by one clockwise quarter-turn, so
//! the BFS layer of a state equals its total quarter-turn cost and the first
//! connected state found is quarter-turn minimal.
//!
//! The search never touches the caller's grid: it owns one scratch copy that
//! it rewrites for every goal test.

use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::time::{Duration, Instant};

use crate::algorithm::connectivity::is_connected;
use crate::algorithm::state::{RotationState, SearchSpace};
use crate::io::configuration::{
    CERTIFICATION_BUDGET_FACTOR, DEFAULT_MAX_STATES, DEFAULT_MOVE_BUDGET, DEFAULT_TIME_LIMIT_MS,
    TIME_CHECK_INTERVAL,
};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::{Grid, Position};

/// Search limits for a single solve
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SolverConfig {
    /// Largest total quarter-turn cost a solution may have
    pub move_budget: u32,
    /// Wall-clock budget, checked every `TIME_CHECK_INTERVAL` expansions
    pub time_limit: Duration,
    /// Largest number of distinct states the search may visit
    pub max_states: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            move_budget: DEFAULT_MOVE_BUDGET,
            time_limit: Duration::from_millis(DEFAULT_TIME_LIMIT_MS),
            max_states: DEFAULT_MAX_STATES,
        }
    }
}

impl SolverConfig {
    /// Copy of the config with a different move budget
    #[must_use]
    pub const fn with_budget(self, move_budget: u32) -> Self {
        Self {
            move_budget,
            ..self
        }
    }
}

/// One hint step: rotate the tile at `position` by `turns` clockwise quarter-turns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Tile to rotate
    #[serde(flatten)]
    pub position: Position,
    /// Clockwise quarter-turns, 1 to 3
    pub turns: u8,
}

/// A certified rotation sequence
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution {
    /// Moves in row-major tile order; rotations commute, so any order works
    pub moves: Vec<Move>,
    /// Sum of quarter-turns over all moves
    pub total_turns: u32,
    /// Number of distinct states the search visited
    pub explored: usize,
}

/// Result of a search
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SolveOutcome {
    /// A cheapest connecting rotation sequence
    Solved(Solution),
    /// The goals were connected before any move
    AlreadySolved,
    /// Every state within the move budget was examined without success
    NoSolution {
        /// Number of distinct states the search visited
        explored: usize,
    },
    /// The time or state limit stopped the search early
    TimedOut {
        /// Number of distinct states the search visited
        explored: usize,
        /// Wall-clock time spent
        elapsed: Duration,
    },
}

impl SolveOutcome {
    /// The solution, if one was found
    pub const fn solution(&self) -> Option<&Solution> {
        match self {
            Self::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    /// Convert to a result using the crate error taxonomy
    ///
    /// # Errors
    ///
    /// Returns `AlreadySolved`, `NoSolution` or `TimedOut` for the matching
    /// outcomes.
    pub fn into_result(self) -> Result<Solution> {
        match self {
            Self::Solved(solution) => Ok(solution),
            Self::AlreadySolved => Err(PuzzleError::AlreadySolved),
            Self::NoSolution { explored } => Err(PuzzleError::NoSolution { explored }),
            Self::TimedOut { explored, elapsed } => {
                Err(PuzzleError::TimedOut { explored, elapsed })
            }
        }
    }
}

/// Find the cheapest rotation sequence that connects every goal
///
/// The caller's grid is left untouched.
pub fn solve(grid: &Grid, goals: &[Position], config: &SolverConfig) -> SolveOutcome {
    if is_connected(grid, goals) {
        return SolveOutcome::AlreadySolved;
    }

    let space = SearchSpace::from_grid(grid);
    if space.is_empty() {
        return SolveOutcome::NoSolution { explored: 1 };
    }

    let started = Instant::now();
    let mut scratch = grid.clone();
    let initial = space.initial_state();

    let mut visited: HashSet<RotationState> = HashSet::new();
    visited.insert(initial.clone());
    let mut frontier: VecDeque<(RotationState, u32)> = VecDeque::from([(initial, 0)]);
    let mut expansions = 0usize;

    while let Some((state, cost)) = frontier.pop_front() {
        expansions += 1;
        if expansions % TIME_CHECK_INTERVAL == 0 && started.elapsed() > config.time_limit {
            return SolveOutcome::TimedOut {
                explored: visited.len(),
                elapsed: started.elapsed(),
            };
        }

        let child_cost = cost + 1;
        if child_cost > config.move_budget {
            // BFS order: every remaining state is at least this expensive
            break;
        }

        for slot in 0..space.len() {
            // turning back to the start orientation leads to a cheaper, visited state
            if space.wraps(&state, slot) {
                continue;
            }
            let child = state.turned(slot);
            if visited.contains(&child) {
                continue;
            }

            space.write_into(&child, &mut scratch);
            if is_connected(&scratch, goals) {
                return SolveOutcome::Solved(build_solution(&space, &child, visited.len() + 1));
            }

            if visited.len() >= config.max_states {
                return SolveOutcome::TimedOut {
                    explored: visited.len(),
                    elapsed: started.elapsed(),
                };
            }
            visited.insert(child.clone());
            frontier.push_back((child, child_cost));
        }
    }

    SolveOutcome::NoSolution {
        explored: visited.len(),
    }
}

fn build_solution(space: &SearchSpace, state: &RotationState, explored: usize) -> Solution {
    let moves: Vec<Move> = (0..space.len())
        .filter_map(|slot| {
            let turns = space.turns(state, slot);
            let position = space.position(slot)?;
            (turns > 0).then_some(Move { position, turns })
        })
        .collect();

    Solution {
        total_turns: space.cost(state),
        moves,
        explored,
    }
}

/// Replay moves on a copy of the grid
///
/// # Errors
///
/// Returns `InvalidParameter` if a move targets a position outside the grid
/// or a tile that cannot rotate.
pub fn apply_moves(grid: &Grid, moves: &[Move]) -> Result<Grid> {
    let mut next = grid.clone();
    for step in moves {
        let rotatable = next
            .get(step.position)
            .is_some_and(|tile| tile.can_rotate && tile.conducts());
        if !rotatable {
            return Err(invalid_parameter(
                "move",
                &step.position,
                &"tile cannot be rotated",
            ));
        }
        next.rotate_in_place(step.position, step.turns);
    }
    Ok(next)
}

/// Certify that a level can be won within its move budget
///
/// Searches up to `CERTIFICATION_BUDGET_FACTOR` times the budget so an
/// over-budget level is reported with its true minimal cost.
///
/// # Errors
///
/// Returns `AlreadySolved`, `NoSolution` or `TimedOut` when the search does
/// not produce a solution, and `Impossible` when the cheapest solution needs
/// more than `max_moves` quarter-turns.
pub fn certify(
    grid: &Grid,
    goals: &[Position],
    max_moves: u32,
    config: &SolverConfig,
) -> Result<Solution> {
    let search_budget = max_moves.saturating_mul(CERTIFICATION_BUDGET_FACTOR);
    let solution = solve(grid, goals, &config.with_budget(search_budget)).into_result()?;

    if solution.total_turns > max_moves {
        return Err(PuzzleError::Impossible {
            minimal_moves: solution.total_turns,
            max_moves,
        });
    }
    Ok(solution)
}

/// First move of a cheapest solution from the current grid
///
/// Returns `None` when the grid is already connected or no solution is found.
pub fn hint(grid: &Grid, goals: &[Position], config: &SolverConfig) -> Option<Move> {
    solve(grid, goals, config)
        .solution()
        .and_then(|solution| solution.moves.first().copied())
}
