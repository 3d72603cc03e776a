//! Pipe tiles and their connection sets
//!
//! A tile carries up to four pipe stubs, one per edge. Rotation permutes the
//! stubs clockwise; four quarter-turns always restore the original set.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::spatial::direction::Direction;

/// Set of edges carrying a pipe stub, stored as a 4-bit mask
///
/// Bit `i` corresponds to `Direction::ALL[i]`, so a clockwise quarter-turn is
/// a 4-bit left rotation of the mask.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Vec<Direction>", into = "Vec<Direction>")]
pub struct Connections(u8);

impl Connections {
    /// No stubs at all
    pub const NONE: Self = Self(0);
    /// Stubs on all four edges
    pub const CROSS: Self = Self(0b1111);

    /// Build a set from a list of directions (duplicates collapse)
    pub fn from_directions(directions: &[Direction]) -> Self {
        directions
            .iter()
            .fold(Self::NONE, |set, &direction| set.with(direction))
    }

    /// Build a set from its raw mask, ignoring bits above the low four
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b1111)
    }

    /// Raw 4-bit mask
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// A straight pipe running vertically
    pub const fn straight() -> Self {
        Self(0b0101)
    }

    /// A 90° elbow joining the top and right edges
    pub const fn elbow() -> Self {
        Self(0b0011)
    }

    /// A three-way junction open on top, right and bottom
    pub const fn tee() -> Self {
        Self(0b0111)
    }

    /// A dead-end stub pointing up
    pub const fn end() -> Self {
        Self(0b0001)
    }

    /// Whether the set carries a stub toward `direction`
    pub const fn contains(self, direction: Direction) -> bool {
        self.0 & (1 << direction.index()) != 0
    }

    /// Copy of the set with a stub added toward `direction`
    #[must_use]
    pub const fn with(self, direction: Direction) -> Self {
        Self(self.0 | (1 << direction.index()))
    }

    /// Number of stubs (0 to 4)
    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether there are no stubs
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// The set after `turns` clockwise quarter-turns
    #[must_use]
    pub const fn rotated(self, turns: u8) -> Self {
        let turns = turns % 4;
        if turns == 0 {
            return self;
        }
        Self(((self.0 << turns) | (self.0 >> (4 - turns))) & 0b1111)
    }

    /// Smallest positive number of quarter-turns mapping the set onto itself
    ///
    /// Empty and four-way sets return 1, straights return 2, every other
    /// shape returns 4.
    pub const fn period(self) -> u8 {
        if self.rotated(1).0 == self.0 {
            1
        } else if self.rotated(2).0 == self.0 {
            2
        } else {
            4
        }
    }

    /// Iterate over the directions in the set, clockwise from `Up`
    pub fn directions(self) -> impl Iterator<Item = Direction> {
        Direction::ALL
            .into_iter()
            .filter(move |&direction| self.contains(direction))
    }
}

impl From<Vec<Direction>> for Connections {
    fn from(directions: Vec<Direction>) -> Self {
        Self::from_directions(&directions)
    }
}

impl From<Connections> for Vec<Direction> {
    fn from(connections: Connections) -> Self {
        connections.directions().collect()
    }
}

impl fmt::Display for Connections {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self.directions().map(|d| d.to_string()).collect();
        write!(f, "[{}]", names.join(","))
    }
}

/// What occupies a cell
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TileKind {
    /// Nothing; never carries stubs
    #[default]
    Empty,
    /// A pipe segment
    Path,
    /// A pipe endpoint, usually a goal
    Node,
    /// Solid wall, never conducts
    Wall,
    /// Destroyed by compression, never conducts
    Crushed,
}

/// One cell of the board
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tile {
    /// Cell content
    #[serde(rename = "type")]
    pub kind: TileKind,
    /// Pipe stubs on this tile's edges
    #[serde(default)]
    pub connections: Connections,
    /// Whether rotations may be applied to this tile
    #[serde(default)]
    pub can_rotate: bool,
    /// Whether this tile must join the goal network for a win
    #[serde(default, rename = "isGoalNode")]
    pub is_goal: bool,
}

impl Tile {
    /// An empty cell
    pub const fn empty() -> Self {
        Self {
            kind: TileKind::Empty,
            connections: Connections::NONE,
            can_rotate: false,
            is_goal: false,
        }
    }

    /// A wall cell
    pub const fn wall() -> Self {
        Self {
            kind: TileKind::Wall,
            ..Self::empty()
        }
    }

    /// A rotatable pipe segment
    pub const fn path(connections: Connections) -> Self {
        Self {
            kind: TileKind::Path,
            connections,
            can_rotate: true,
            is_goal: false,
        }
    }

    /// A fixed endpoint node
    pub const fn node(connections: Connections) -> Self {
        Self {
            kind: TileKind::Node,
            connections,
            can_rotate: false,
            is_goal: false,
        }
    }

    /// Copy of the tile that cannot be rotated
    #[must_use]
    pub const fn fixed(self) -> Self {
        Self {
            can_rotate: false,
            ..self
        }
    }

    /// Copy of the tile that can be rotated
    #[must_use]
    pub const fn rotatable(self) -> Self {
        Self {
            can_rotate: true,
            ..self
        }
    }

    /// Copy of the tile flagged as a goal
    #[must_use]
    pub const fn goal(self) -> Self {
        Self {
            is_goal: true,
            ..self
        }
    }

    /// Whether pipe flow may pass through this tile
    pub const fn conducts(&self) -> bool {
        !matches!(self.kind, TileKind::Wall | TileKind::Crushed)
    }

    /// Copy of the tile rotated by `turns` clockwise quarter-turns
    #[must_use]
    pub const fn rotated(self, turns: u8) -> Self {
        Self {
            connections: self.connections.rotated(turns),
            ..self
        }
    }

    /// Copy of the tile destroyed by compression
    ///
    /// The goal flag survives so a crushed goal stays identifiable.
    #[must_use]
    pub const fn crushed(self) -> Self {
        Self {
            kind: TileKind::Crushed,
            connections: Connections::NONE,
            can_rotate: false,
            is_goal: self.is_goal,
        }
    }
}
