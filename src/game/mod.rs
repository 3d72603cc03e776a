//! Game layer built on the puzzle core
//!
//! Levels are the persisted puzzle definitions, modes hook custom win and
//! loss rules in, and sessions own the state of one play-through.

/// Level definitions and validation
pub mod level;
/// Game-mode hooks and the built-in modes
pub mod modes;
/// Caller-owned play sessions
pub mod session;
