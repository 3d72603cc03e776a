//! Rotation states used as solver search keys
//!
//! Only rotatable tiles whose shape changes under rotation take part in the
//! search. Fixed tiles never change during a search, and empty or four-way
//! tiles look identical in every orientation, so both are left out of the key.

use crate::spatial::{Connections, Grid, Position};

/// Connection sets of the searchable tiles, in row-major position order
///
/// Two grids with equal keys differ only in tiles the search never touches,
/// so they are the same state.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RotationState(Box<[u8]>);

impl RotationState {
    /// Connection set of the `slot`-th searchable tile
    pub fn connections(&self, slot: usize) -> Option<Connections> {
        self.0.get(slot).map(|&bits| Connections::from_bits(bits))
    }

    /// Copy of the state with one tile turned a quarter clockwise
    #[must_use]
    pub fn turned(&self, slot: usize) -> Self {
        let mut next = self.0.clone();
        if let Some(bits) = next.get_mut(slot) {
            *bits = Connections::from_bits(*bits).rotated(1).bits();
        }
        Self(next)
    }

    /// Number of searchable tiles in the state
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the state has no searchable tiles
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The searchable tiles of a grid and their starting orientations
#[derive(Clone, Debug)]
pub struct SearchSpace {
    positions: Vec<Position>,
    initial: Vec<Connections>,
}

impl SearchSpace {
    /// Collect the searchable tiles of a grid
    pub fn from_grid(grid: &Grid) -> Self {
        let (positions, initial) = grid
            .rotatable_positions()
            .into_iter()
            .filter_map(|position| {
                let connections = grid.get(position)?.connections;
                (connections.period() > 1).then_some((position, connections))
            })
            .unzip();

        Self { positions, initial }
    }

    /// Number of searchable tiles
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no tile can change the grid
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Position of the `slot`-th searchable tile
    pub fn position(&self, slot: usize) -> Option<Position> {
        self.positions.get(slot).copied()
    }

    /// The state matching the grid the space was built from
    pub fn initial_state(&self) -> RotationState {
        RotationState(self.initial.iter().map(|c| c.bits()).collect())
    }

    /// Clockwise quarter-turns taking the `slot`-th tile from its start to `state`
    ///
    /// Always below the tile's period, so this is the cheapest way there.
    pub fn turns(&self, state: &RotationState, slot: usize) -> u8 {
        let (Some(start), Some(current)) = (self.initial.get(slot), state.connections(slot)) else {
            return 0;
        };
        (0..start.period())
            .find(|&turns| start.rotated(turns) == current)
            .unwrap_or(0)
    }

    /// Whether turning the `slot`-th tile once more brings it back to its start
    pub fn wraps(&self, state: &RotationState, slot: usize) -> bool {
        match (self.initial.get(slot), state.connections(slot)) {
            (Some(&start), Some(current)) => current.rotated(1) == start,
            _ => true,
        }
    }

    /// Total quarter-turns separating `state` from the initial state
    pub fn cost(&self, state: &RotationState) -> u32 {
        (0..self.len())
            .map(|slot| u32::from(self.turns(state, slot)))
            .sum()
    }

    /// Write a state's orientations into a grid built from the same layout
    pub fn write_into(&self, state: &RotationState, grid: &mut Grid) {
        for (slot, &position) in self.positions.iter().enumerate() {
            if let (Some(tile), Some(connections)) = (grid.get_mut(position), state.connections(slot))
            {
                tile.connections = connections;
            }
        }
    }
}
