//! Puzzle core for a pipe-rotation tile game
//!
//! Players rotate pipe tiles on a grid until every goal node joins one pipe
//! network, while walls close in from the board edges. The crate provides the
//! connectivity analysis, a quarter-turn-minimal solver, a certifying level
//! generator and the compression rules, plus a game layer and level tooling.

#![forbid(unsafe_code)]

/// Connectivity analysis, solving, generation and compression
pub mod algorithm;
/// Levels, game modes and play sessions
pub mod game;
/// Input/output operations and error handling
pub mod io;
/// Grid, tile and direction types
pub mod spatial;

pub use io::error::{PuzzleError, Result};
