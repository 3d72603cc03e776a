//! Shrinking-boundary compression
//!
//! Walls close in from the policy's active edges one ring per step. A tile is
//! crushed once its distance from any active edge drops below the wall
//! offset. The offset never decreases and never passes `min(cols, rows) / 2`,
//! and crushed tiles are never restored.

use serde::{Deserialize, Serialize};

use crate::spatial::{Grid, Position, TileKind};

/// Bit for the top edge in `CompressionPolicy::mask`
pub const EDGE_TOP: u8 = 0b0001;
/// Bit for the bottom edge in `CompressionPolicy::mask`
pub const EDGE_BOTTOM: u8 = 0b0010;
/// Bit for the left edge in `CompressionPolicy::mask`
pub const EDGE_LEFT: u8 = 0b0100;
/// Bit for the right edge in `CompressionPolicy::mask`
pub const EDGE_RIGHT: u8 = 0b1000;

/// Which board edges push inward
///
/// Covers every subset of the four edges; names match the level-file format.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum CompressionPolicy {
    /// No compression
    #[default]
    None,
    /// Top edge only
    Top,
    /// Bottom edge only
    Bottom,
    /// Left edge only
    Left,
    /// Right edge only
    Right,
    /// Top and bottom edges
    TopBottom,
    /// Left and right edges
    LeftRight,
    /// Top and left edges
    TopLeft,
    /// Top and right edges
    TopRight,
    /// Bottom and left edges
    BottomLeft,
    /// Bottom and right edges
    BottomRight,
    /// Every edge but the right
    TopBottomLeft,
    /// Every edge but the left
    TopBottomRight,
    /// Every edge but the bottom
    TopLeftRight,
    /// Every edge but the top
    BottomLeftRight,
    /// All four edges
    All,
}

impl CompressionPolicy {
    /// Every policy, ordered by mask value
    pub const ALL_POLICIES: [Self; 16] = [
        Self::None,
        Self::Top,
        Self::Bottom,
        Self::TopBottom,
        Self::Left,
        Self::TopLeft,
        Self::BottomLeft,
        Self::TopBottomLeft,
        Self::Right,
        Self::TopRight,
        Self::BottomRight,
        Self::TopBottomRight,
        Self::LeftRight,
        Self::TopLeftRight,
        Self::BottomLeftRight,
        Self::All,
    ];

    /// Active edges as `EDGE_*` bits
    pub const fn mask(self) -> u8 {
        match self {
            Self::None => 0,
            Self::Top => EDGE_TOP,
            Self::Bottom => EDGE_BOTTOM,
            Self::Left => EDGE_LEFT,
            Self::Right => EDGE_RIGHT,
            Self::TopBottom => EDGE_TOP | EDGE_BOTTOM,
            Self::LeftRight => EDGE_LEFT | EDGE_RIGHT,
            Self::TopLeft => EDGE_TOP | EDGE_LEFT,
            Self::TopRight => EDGE_TOP | EDGE_RIGHT,
            Self::BottomLeft => EDGE_BOTTOM | EDGE_LEFT,
            Self::BottomRight => EDGE_BOTTOM | EDGE_RIGHT,
            Self::TopBottomLeft => EDGE_TOP | EDGE_BOTTOM | EDGE_LEFT,
            Self::TopBottomRight => EDGE_TOP | EDGE_BOTTOM | EDGE_RIGHT,
            Self::TopLeftRight => EDGE_TOP | EDGE_LEFT | EDGE_RIGHT,
            Self::BottomLeftRight => EDGE_BOTTOM | EDGE_LEFT | EDGE_RIGHT,
            Self::All => EDGE_TOP | EDGE_BOTTOM | EDGE_LEFT | EDGE_RIGHT,
        }
    }

    /// The policy with exactly the given `EDGE_*` bits active
    pub fn from_mask(mask: u8) -> Self {
        Self::ALL_POLICIES
            .get(usize::from(mask & 0b1111))
            .copied()
            .unwrap_or_default()
    }

    /// Whether an edge bit is active
    pub const fn has_edge(self, edge: u8) -> bool {
        self.mask() & edge != 0
    }

    /// Number of active edges
    pub const fn edge_count(self) -> u32 {
        self.mask().count_ones()
    }
}

/// Largest wall offset a `cols` x `rows` board can reach
pub const fn max_offset(cols: usize, rows: usize) -> u32 {
    let side = if cols < rows { cols } else { rows };
    (side / 2) as u32
}

/// Whether `position` lies in the crush zone for a given offset
pub fn crush_zone_contains(
    cols: usize,
    rows: usize,
    position: Position,
    offset: u32,
    policy: CompressionPolicy,
) -> bool {
    let (Ok(x), Ok(y)) = (u32::try_from(position.x), u32::try_from(position.y)) else {
        return false;
    };
    let (cols, rows) = (cols as u32, rows as u32);
    if x >= cols || y >= rows {
        return false;
    }

    let edge_distances = [
        (EDGE_TOP, y),
        (EDGE_BOTTOM, rows - 1 - y),
        (EDGE_LEFT, x),
        (EDGE_RIGHT, cols - 1 - x),
    ];
    edge_distances
        .iter()
        .any(|&(edge, distance)| policy.has_edge(edge) && distance < offset)
}

/// Result of one compression step
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompressionStep {
    /// The grid after the step
    pub grid: Grid,
    /// The wall offset after the step
    pub offset: u32,
    /// Whether a goal tile was crushed by this step
    pub crushed_goal: bool,
    /// Tiles crushed by this step, row-major
    pub newly_crushed: Vec<Position>,
}

impl CompressionStep {
    /// Whether the step changed nothing because the walls were fully closed
    pub fn is_noop(&self, previous_offset: u32) -> bool {
        self.offset == previous_offset
    }
}

/// Advance the walls by one ring
///
/// At the maximum offset the step is a no-op returning the grid unchanged.
/// Walls and already crushed tiles are left alone.
pub fn advance(grid: &Grid, offset: u32, policy: CompressionPolicy) -> CompressionStep {
    let next_offset = offset.saturating_add(1);
    if next_offset > max_offset(grid.cols(), grid.rows()) {
        return CompressionStep {
            grid: grid.clone(),
            offset,
            crushed_goal: false,
            newly_crushed: Vec::new(),
        };
    }

    let mut next = grid.clone();
    let mut newly_crushed = Vec::new();
    let mut crushed_goal = false;

    for (position, tile) in grid.iter() {
        if matches!(tile.kind, TileKind::Wall | TileKind::Crushed) {
            continue;
        }
        if !crush_zone_contains(grid.cols(), grid.rows(), position, next_offset, policy) {
            continue;
        }
        if let Some(slot) = next.get_mut(position) {
            *slot = tile.crushed();
        }
        crushed_goal |= tile.is_goal;
        newly_crushed.push(position);
    }

    CompressionStep {
        grid: next,
        offset: next_offset,
        crushed_goal,
        newly_crushed,
    }
}

/// Advance the walls by up to `steps` rings
///
/// The returned step reports every tile crushed along the way and whether any
/// of them was a goal.
pub fn advance_by(grid: &Grid, offset: u32, steps: u32, policy: CompressionPolicy) -> CompressionStep {
    let mut total = CompressionStep {
        grid: grid.clone(),
        offset,
        crushed_goal: false,
        newly_crushed: Vec::new(),
    };
    for _ in 0..steps {
        let step = advance(&total.grid, total.offset, policy);
        if step.is_noop(total.offset) {
            break;
        }
        total.grid = step.grid;
        total.offset = step.offset;
        total.crushed_goal |= step.crushed_goal;
        total.newly_crushed.extend(step.newly_crushed);
    }
    total
}

/// Whether a goal position holds a crushed tile
pub fn goal_crushed(grid: &Grid, goals: &[Position]) -> bool {
    goals.iter().any(|&goal| {
        grid.get(goal)
            .is_some_and(|tile| tile.kind == TileKind::Crushed)
    })
}
