//! Goal connectivity through mutual pipe links
//!
//! Two adjacent tiles are linked only when each carries a stub toward the
//! other and neither is a wall or crushed. A one-sided stub is a dead end.

use bitvec::prelude::*;
use std::collections::VecDeque;

use crate::spatial::{Direction, Grid, Position};

/// Whether the stub of the tile at `position` toward `direction` is a live link
pub fn live_link(grid: &Grid, position: Position, direction: Direction) -> bool {
    let Some(tile) = grid.get(position) else {
        return false;
    };
    if !tile.conducts() || !tile.connections.contains(direction) {
        return false;
    }

    grid.get(position.step(direction)).is_some_and(|neighbor| {
        neighbor.conducts() && neighbor.connections.contains(direction.opposite())
    })
}

/// Set of tiles reachable from `start` through live links
///
/// Bits are indexed `y * cols + x`. The set is empty when `start` is out of
/// bounds or does not conduct.
pub fn connected_component(grid: &Grid, start: Position) -> BitVec {
    traverse(grid, start, |_| false)
}

/// Whether every goal lies in one connected pipe network
///
/// Fewer than two goals are trivially connected. The traversal starts at the
/// first goal, so a crushed or walled first goal disconnects the set.
pub fn is_connected(grid: &Grid, goals: &[Position]) -> bool {
    let Some((&first, rest)) = goals.split_first() else {
        return true;
    };
    if rest.is_empty() {
        return true;
    }

    let mut goal_mask = bitvec![0; grid.len()];
    for &goal in goals {
        match grid.index_of(goal) {
            Some(index) => goal_mask.set(index, true),
            None => return false,
        }
    }
    let goal_count = goal_mask.count_ones();

    let mut reached_goals = 0;
    let _ = traverse(grid, first, |index| {
        if goal_mask.get(index).as_deref() == Some(&true) {
            reached_goals += 1;
        }
        reached_goals == goal_count
    });

    reached_goals == goal_count
}

// Breadth-first walk over live links; `visit` sees each newly reached index
// and may stop the walk early by returning true
fn traverse<F>(grid: &Grid, start: Position, mut visit: F) -> BitVec
where
    F: FnMut(usize) -> bool,
{
    let mut visited = bitvec![0; grid.len()];

    let Some(start_index) = grid.index_of(start) else {
        return visited;
    };
    if !grid.get(start).is_some_and(|tile| tile.conducts()) {
        return visited;
    }

    visited.set(start_index, true);
    if visit(start_index) {
        return visited;
    }
    let mut queue = VecDeque::from([start]);

    while let Some(position) = queue.pop_front() {
        for direction in Direction::ALL {
            if !live_link(grid, position, direction) {
                continue;
            }
            let neighbor = position.step(direction);
            let Some(index) = grid.index_of(neighbor) else {
                continue;
            };
            if visited.get(index).as_deref() == Some(&false) {
                visited.set(index, true);
                if visit(index) {
                    return visited;
                }
                queue.push_back(neighbor);
            }
        }
    }

    visited
}
