//! Rectangular tile grid
//!
//! The grid exclusively owns one tile per in-bounds position. Transformations
//! never mutate in place: `rotated` and `with_tile` return a new grid, leaving
//! the caller's snapshot untouched.

use ndarray::Array2;

use crate::io::error::{PuzzleError, Result, invalid_level, invalid_parameter};
use crate::spatial::direction::Position;
use crate::spatial::tiles::{Tile, TileKind};

/// A board of tiles stored row-major (indexed `[y, x]`)
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    tiles: Array2<Tile>,
}

impl Grid {
    /// Create a grid of empty tiles
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            tiles: Array2::from_elem((rows, cols), Tile::empty()),
        }
    }

    /// Build a grid from positioned tiles
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` if a position is out of bounds, if two tiles
    /// share a position, or if any position is left without a tile.
    pub fn from_tiles<I>(cols: usize, rows: usize, tiles: I) -> Result<Self>
    where
        I: IntoIterator<Item = (Position, Tile)>,
    {
        let mut grid = Self::new(cols, rows);
        let mut seen = vec![false; cols * rows];

        for (position, tile) in tiles {
            let index = grid
                .index_of(position)
                .ok_or_else(|| invalid_level(format!("tile at {position} is out of bounds")))?;
            match seen.get_mut(index) {
                Some(flag) if !*flag => *flag = true,
                _ => {
                    return Err(invalid_level(format!(
                        "more than one tile at {position}"
                    )));
                }
            }
            if let Some(slot) = grid.get_mut(position) {
                *slot = tile;
            }
        }

        if let Some(missing) = seen.iter().position(|&flag| !flag) {
            let position = grid.position_of(missing);
            return Err(invalid_level(format!("no tile at {position}")));
        }

        Ok(grid)
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no cells
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Whether a position lies inside the grid
    pub fn contains(&self, position: Position) -> bool {
        self.index_of(position).is_some()
    }

    /// Flat index `y * cols + x` of an in-bounds position
    pub fn index_of(&self, position: Position) -> Option<usize> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        (x < self.cols() && y < self.rows()).then(|| y * self.cols() + x)
    }

    /// Position of a flat index produced by `index_of`
    pub fn position_of(&self, index: usize) -> Position {
        let cols = self.cols().max(1);
        Position::new((index % cols) as i32, (index / cols) as i32)
    }

    /// Tile at a position, `None` when out of bounds
    pub fn get(&self, position: Position) -> Option<&Tile> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        self.tiles.get([y, x])
    }

    /// Mutable tile at a position, for owners building a grid
    pub fn get_mut(&mut self, position: Position) -> Option<&mut Tile> {
        let x = usize::try_from(position.x).ok()?;
        let y = usize::try_from(position.y).ok()?;
        self.tiles.get_mut([y, x])
    }

    /// All positions in row-major order
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.len()).map(|index| self.position_of(index))
    }

    /// All tiles with their positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        self.tiles
            .indexed_iter()
            .map(|((y, x), tile)| (Position::new(x as i32, y as i32), tile))
    }

    /// Positions of tiles that may be rotated, in row-major order
    pub fn rotatable_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, tile)| tile.can_rotate && tile.conducts())
            .map(|(position, _)| position)
            .collect()
    }

    /// Positions of tiles flagged as goals, in row-major order
    pub fn goal_positions(&self) -> Vec<Position> {
        self.iter()
            .filter(|(_, tile)| tile.is_goal)
            .map(|(position, _)| position)
            .collect()
    }

    /// Copy of the grid with one tile replaced
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the position is out of bounds.
    pub fn with_tile(&self, position: Position, tile: Tile) -> Result<Self> {
        let mut next = self.clone();
        let slot = next
            .get_mut(position)
            .ok_or_else(|| invalid_parameter("position", &position, &"outside the grid"))?;
        *slot = tile;
        Ok(next)
    }

    /// Copy of the grid with one tile rotated by `turns` clockwise quarter-turns
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the position is out of bounds or the
    /// tile there is fixed, walled or crushed.
    pub fn rotated(&self, position: Position, turns: u8) -> Result<Self> {
        let tile = *self
            .get(position)
            .ok_or_else(|| invalid_parameter("position", &position, &"outside the grid"))?;
        if !tile.can_rotate || !tile.conducts() {
            return Err(invalid_parameter(
                "position",
                &position,
                &"tile cannot be rotated",
            ));
        }
        self.with_tile(position, tile.rotated(turns))
    }

    /// Rotate a tile in place; only for grids the caller exclusively owns
    pub(crate) fn rotate_in_place(&mut self, position: Position, turns: u8) {
        if let Some(tile) = self.get_mut(position) {
            *tile = tile.rotated(turns);
        }
    }

    /// Check the pipe invariant: path and node tiles carry at least one stub
    ///
    /// # Errors
    ///
    /// Returns `InvalidLevel` naming the first offending position.
    pub fn validate_pipes(&self) -> Result<()> {
        for (position, tile) in self.iter() {
            let needs_stub = matches!(tile.kind, TileKind::Path | TileKind::Node);
            if needs_stub && tile.connections.is_empty() {
                return Err(invalid_level(format!(
                    "{:?} tile at {position} has no connections",
                    tile.kind
                )));
            }
        }
        Ok(())
    }

    /// Number of tiles of a given kind
    pub fn count_kind(&self, kind: TileKind) -> usize {
        self.tiles.iter().filter(|tile| tile.kind == kind).count()
    }
}

impl From<Grid> for Array2<Tile> {
    fn from(grid: Grid) -> Self {
        grid.tiles
    }
}

impl TryFrom<Array2<Tile>> for Grid {
    type Error = PuzzleError;

    fn try_from(tiles: Array2<Tile>) -> Result<Self> {
        if tiles.is_empty() {
            return Err(invalid_level("grid has no cells"));
        }
        Ok(Self { tiles })
    }
}
