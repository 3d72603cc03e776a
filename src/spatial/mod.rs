//! Spatial data structures
//!
//! This module contains the board model:
//! - Directions and grid positions
//! - Tiles and their pipe stubs
//! - The rectangular grid that owns them

/// Cardinal directions and grid positions
pub mod direction;
/// Rectangular tile storage and non-mutating transformations
pub mod grid;
/// Tile kinds, pipe stubs and rotation
pub mod tiles;

pub use direction::{Direction, Position};
pub use grid::Grid;
pub use tiles::{Connections, Tile, TileKind};
