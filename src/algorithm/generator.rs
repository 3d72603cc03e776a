//! Random level generation
//!
//! A layout is grown as a tree: the first goal seeds it and every other goal
//! is joined by a randomized shortest route to the nearest tree cell. Route
//! cells become path tiles whose stubs face their neighbours along the route,
//! so the untouched layout is connected by construction. A difficulty-sized
//! subset of path tiles is made rotatable, decoys are sprinkled on empty
//! cells, and every rotatable tile is scrambled. The solver then certifies
//! the result and its minimal cost becomes the move budget.

use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;

use crate::algorithm::compression::CompressionPolicy;
use crate::algorithm::connectivity::is_connected;
use crate::algorithm::solver::{SolverConfig, certify};
use crate::game::level::Level;
use crate::io::configuration::{
    DEFAULT_COMPRESSION_DELAY, DEFAULT_COMPRESSION_INTERVAL, GENERATION_ATTEMPTS,
    GOAL_PLACEMENT_ATTEMPTS, MAX_GRID_DIMENSION, MIN_GOAL_SEPARATION, MIN_GRID_DIMENSION,
    MOVE_SLACK, SCRAMBLE_ATTEMPTS,
};
use crate::io::error::{PuzzleError, Result, invalid_parameter};
use crate::spatial::{Connections, Direction, Grid, Position, Tile, TileKind};

/// Shapes decoy tiles are drawn from
const DECOY_SHAPES: [Connections; 3] = [
    Connections::straight(),
    Connections::elbow(),
    Connections::tee(),
];

/// Difficulty presets
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Few rotatable route tiles, short solutions
    Easy,
    /// Moderate rotatable route tiles
    #[default]
    Medium,
    /// Many rotatable route tiles, long solutions
    Hard,
}

impl Difficulty {
    /// Route tiles left rotatable; the rest of the route is fixed
    pub const fn rotatable_route_tiles(self) -> usize {
        match self {
            Self::Easy => 3,
            Self::Medium => 5,
            Self::Hard => 7,
        }
    }

    /// Most quarter-turns a certified solution may need
    pub const fn max_minimal_moves(self) -> u32 {
        match self {
            Self::Easy => 6,
            Self::Medium => 12,
            Self::Hard => 20,
        }
    }

    /// Fewest quarter-turns a certified solution must need
    pub const fn min_minimal_moves(self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 3,
            Self::Hard => 5,
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Easy => f.write_str("easy"),
            Self::Medium => f.write_str("medium"),
            Self::Hard => f.write_str("hard"),
        }
    }
}

/// Parameters for a generator run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Number of columns
    pub cols: usize,
    /// Number of rows
    pub rows: usize,
    /// Number of goal nodes
    pub node_count: usize,
    /// Difficulty preset
    pub difficulty: Difficulty,
    /// Rotatable tiles placed off the route
    pub decoy_count: usize,
    /// Layouts tried before giving up
    pub attempts: usize,
    /// Limits for the certifying search
    pub solver: SolverConfig,
    /// Compression policy written into generated levels
    pub compression: CompressionPolicy,
    /// Compression delay written into generated levels
    pub compression_delay: u32,
    /// Compression interval written into generated levels
    pub compression_interval: u32,
}

impl GeneratorConfig {
    /// Config with default attempts, search limits and no compression
    pub fn new(cols: usize, rows: usize, node_count: usize, difficulty: Difficulty) -> Self {
        Self {
            cols,
            rows,
            node_count,
            difficulty,
            decoy_count: 0,
            attempts: GENERATION_ATTEMPTS,
            solver: SolverConfig::default(),
            compression: CompressionPolicy::None,
            compression_delay: DEFAULT_COMPRESSION_DELAY,
            compression_interval: DEFAULT_COMPRESSION_INTERVAL,
        }
    }

    /// Copy of the config with a number of decoys
    #[must_use]
    pub const fn with_decoys(self, decoy_count: usize) -> Self {
        Self {
            decoy_count,
            ..self
        }
    }

    /// Copy of the config with a compression policy
    #[must_use]
    pub const fn with_compression(self, compression: CompressionPolicy) -> Self {
        Self {
            compression,
            ..self
        }
    }

    /// Check the parameters before any layout is attempted
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a side outside the supported range,
    /// fewer than two goals, more goals than the board can separate, more
    /// decoys than free cells, or zero attempts.
    pub fn validate(&self) -> Result<()> {
        for (parameter, side) in [("cols", self.cols), ("rows", self.rows)] {
            if !(MIN_GRID_DIMENSION..=MAX_GRID_DIMENSION).contains(&side) {
                return Err(invalid_parameter(
                    parameter,
                    &side,
                    &format!("must be between {MIN_GRID_DIMENSION} and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if self.node_count < 2 {
            return Err(invalid_parameter(
                "node_count",
                &self.node_count,
                &"at least two goals are needed",
            ));
        }
        let capacity = self.cols * self.rows / 4;
        if self.node_count > capacity {
            return Err(invalid_parameter(
                "node_count",
                &self.node_count,
                &format!(
                    "a {}x{} grid holds at most {capacity} goals",
                    self.cols, self.rows
                ),
            ));
        }
        let free_cells = self.cols * self.rows - self.node_count;
        if self.decoy_count > free_cells {
            return Err(invalid_parameter(
                "decoy_count",
                &self.decoy_count,
                &format!("only {free_cells} cells are left after placing goals"),
            ));
        }
        if self.attempts == 0 {
            return Err(invalid_parameter(
                "attempts",
                &self.attempts,
                &"must be positive",
            ));
        }
        Ok(())
    }
}

/// Smallest Manhattan distance between two goals on a `cols` x `rows` board
pub fn goal_separation(cols: usize, rows: usize) -> u32 {
    let scaled = u32::try_from((cols + rows) / 4).unwrap_or(u32::MAX);
    scaled.max(MIN_GOAL_SEPARATION)
}

/// Why a single layout was thrown away
#[derive(Debug)]
enum Rejection {
    GoalPlacement,
    Routing,
    NoRoomForDecoys { wanted: usize, free: usize },
    StaysConnected,
    Certification(PuzzleError),
    TooEasy { minimal_moves: u32, floor: u32 },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::GoalPlacement => f.write_str("goals could not be spread far enough apart"),
            Self::Routing => f.write_str("a goal could not be routed to the network"),
            Self::NoRoomForDecoys { wanted, free } => {
                write!(f, "{wanted} decoys wanted but only {free} free cells")
            }
            Self::StaysConnected => f.write_str("every scramble left the goals connected"),
            Self::Certification(error) => write!(f, "certification failed: {error}"),
            Self::TooEasy {
                minimal_moves,
                floor,
            } => write!(
                f,
                "solvable in {minimal_moves} quarter-turns, below the floor of {floor}"
            ),
        }
    }
}

/// Seeded level generator
///
/// The same seed and config always produce the same sequence of levels.
pub struct LevelGenerator {
    config: GeneratorConfig,
    rng: StdRng,
    seed: u64,
    generated: usize,
}

impl LevelGenerator {
    /// Create a generator
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the config fails validation.
    pub fn new(config: GeneratorConfig, seed: u64) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            seed,
            generated: 0,
        })
    }

    /// The config this generator was built with
    pub const fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Produce the next certified level
    ///
    /// # Errors
    ///
    /// Returns `GenerationFailed` with the last rejection reason when no
    /// layout passes certification within the configured attempts.
    pub fn generate(&mut self) -> Result<Level> {
        let mut last_rejection = None;
        for _ in 0..self.config.attempts {
            match self.attempt() {
                Ok(level) => return Ok(level),
                Err(rejection) => last_rejection = Some(rejection),
            }
        }

        Err(PuzzleError::GenerationFailed {
            attempts: self.config.attempts,
            reason: last_rejection
                .map_or_else(|| "no layout attempted".to_string(), |r| r.to_string()),
        })
    }

    fn attempt(&mut self) -> std::result::Result<Level, Rejection> {
        let goals = self.place_goals().ok_or(Rejection::GoalPlacement)?;
        let links = self.route(&goals).ok_or(Rejection::Routing)?;
        let mut grid = self.lay_tiles(&goals, &links);
        self.place_decoys(&mut grid)?;
        self.scramble(&mut grid, &goals)?;

        let difficulty = self.config.difficulty;
        let solution = certify(
            &grid,
            &goals,
            difficulty.max_minimal_moves(),
            &self.config.solver,
        )
        .map_err(Rejection::Certification)?;
        if solution.total_turns < difficulty.min_minimal_moves() {
            return Err(Rejection::TooEasy {
                minimal_moves: solution.total_turns,
                floor: difficulty.min_minimal_moves(),
            });
        }

        self.generated += 1;
        let id = format!("generated-{}-{}", self.seed, self.generated);
        let mut level = Level::from_grid(id, &grid, goals, solution.total_turns + MOVE_SLACK);
        level.compression_direction = self.config.compression;
        level.compression_delay = self.config.compression_delay;
        level.compression_interval = self.config.compression_interval;
        level.solution = Some(solution.moves);
        Ok(level)
    }

    fn all_positions(&self) -> Vec<Position> {
        Grid::new(self.config.cols, self.config.rows)
            .positions()
            .collect()
    }

    fn place_goals(&mut self) -> Option<Vec<Position>> {
        let separation = goal_separation(self.config.cols, self.config.rows);
        let mut cells = self.all_positions();

        for _ in 0..GOAL_PLACEMENT_ATTEMPTS {
            cells.shuffle(&mut self.rng);
            let mut goals: Vec<Position> = Vec::with_capacity(self.config.node_count);
            for &cell in &cells {
                if goals.iter().all(|goal| goal.manhattan(cell) >= separation) {
                    goals.push(cell);
                    if goals.len() == self.config.node_count {
                        return Some(goals);
                    }
                }
            }
        }
        None
    }

    /// Stub sets per cell, row-major, forming a tree that spans every goal
    fn route(&mut self, goals: &[Position]) -> Option<Vec<Connections>> {
        let scratch = Grid::new(self.config.cols, self.config.rows);
        let mut links = vec![Connections::NONE; scratch.len()];
        let mut in_tree = vec![false; scratch.len()];

        let (first, rest) = goals.split_first()?;
        *in_tree.get_mut(scratch.index_of(*first)?)? = true;

        for &goal in rest {
            let route = self.shortest_route(&scratch, goal, &in_tree, goals)?;
            for pair in route.windows(2) {
                let &[from, to] = pair else { continue };
                let direction = from.direction_to(to)?;
                let from_links = links.get_mut(scratch.index_of(from)?)?;
                *from_links = from_links.with(direction);
                let to_links = links.get_mut(scratch.index_of(to)?)?;
                *to_links = to_links.with(direction.opposite());
            }
            for cell in route {
                *in_tree.get_mut(scratch.index_of(cell)?)? = true;
            }
        }
        Some(links)
    }

    /// Randomized BFS from `start` to the nearest tree cell
    ///
    /// Goals not yet joined to the tree are never crossed.
    fn shortest_route(
        &mut self,
        scratch: &Grid,
        start: Position,
        in_tree: &[bool],
        goals: &[Position],
    ) -> Option<Vec<Position>> {
        let mut parent: Vec<Option<usize>> = vec![None; scratch.len()];
        let mut seen = vec![false; scratch.len()];
        let start_index = scratch.index_of(start)?;
        *seen.get_mut(start_index)? = true;

        let mut frontier = VecDeque::from([start]);
        let mut directions = Direction::ALL;

        while let Some(current) = frontier.pop_front() {
            let current_index = scratch.index_of(current)?;
            directions.shuffle(&mut self.rng);

            for &direction in &directions {
                let next = current.step(direction);
                let Some(next_index) = scratch.index_of(next) else {
                    continue;
                };
                if seen.get(next_index).copied().unwrap_or(true) {
                    continue;
                }
                *seen.get_mut(next_index)? = true;
                *parent.get_mut(next_index)? = Some(current_index);

                if in_tree.get(next_index).copied().unwrap_or(false) {
                    let mut route = vec![next];
                    let mut cursor = Some(current_index);
                    while let Some(index) = cursor {
                        route.push(scratch.position_of(index));
                        cursor = parent.get(index).copied().flatten();
                    }
                    route.reverse();
                    return Some(route);
                }
                if goals.contains(&next) {
                    continue;
                }
                frontier.push_back(next);
            }
        }
        None
    }

    fn lay_tiles(&mut self, goals: &[Position], links: &[Connections]) -> Grid {
        let mut grid = Grid::new(self.config.cols, self.config.rows);
        let mut route_cells = Vec::new();

        for (index, &connections) in links.iter().enumerate() {
            if connections.is_empty() {
                continue;
            }
            let position = grid.position_of(index);
            let tile = if goals.contains(&position) {
                Tile::node(connections).goal()
            } else {
                if connections.period() > 1 {
                    route_cells.push(position);
                }
                Tile::path(connections).fixed()
            };
            if let Some(slot) = grid.get_mut(position) {
                *slot = tile;
            }
        }

        route_cells.shuffle(&mut self.rng);
        route_cells.truncate(self.config.difficulty.rotatable_route_tiles());
        for position in route_cells {
            if let Some(tile) = grid.get_mut(position) {
                tile.can_rotate = true;
            }
        }
        grid
    }

    fn place_decoys(&mut self, grid: &mut Grid) -> std::result::Result<(), Rejection> {
        let mut free: Vec<Position> = grid
            .iter()
            .filter(|(_, tile)| tile.kind == TileKind::Empty)
            .map(|(position, _)| position)
            .collect();
        if free.len() < self.config.decoy_count {
            return Err(Rejection::NoRoomForDecoys {
                wanted: self.config.decoy_count,
                free: free.len(),
            });
        }

        free.shuffle(&mut self.rng);
        for &position in free.iter().take(self.config.decoy_count) {
            let shape = DECOY_SHAPES
                .get(self.rng.random_range(0..DECOY_SHAPES.len()))
                .copied()
                .unwrap_or_else(Connections::straight);
            let turns = self.rng.random_range(0..4u8);
            if let Some(slot) = grid.get_mut(position) {
                *slot = Tile::path(shape.rotated(turns));
            }
        }
        Ok(())
    }

    /// Turn every rotatable tile at least once, retrying while still connected
    fn scramble(&mut self, grid: &mut Grid, goals: &[Position]) -> std::result::Result<(), Rejection> {
        let rotatable = grid.rotatable_positions();
        let solved = grid.clone();

        for _ in 0..SCRAMBLE_ATTEMPTS {
            *grid = solved.clone();
            for &position in &rotatable {
                let turns = self.rng.random_range(1..=3u8);
                grid.rotate_in_place(position, turns);
            }
            if !is_connected(grid, goals) {
                return Ok(());
            }
        }
        Err(Rejection::StaysConnected)
    }
}

/// Generate one certified level
///
/// # Errors
///
/// Returns `InvalidParameter` for unusable parameters and `GenerationFailed`
/// when no layout is certified within the default attempts.
pub fn generate(
    cols: usize,
    rows: usize,
    node_count: usize,
    difficulty: Difficulty,
    decoy_count: usize,
    seed: u64,
) -> Result<Level> {
    let config = GeneratorConfig::new(cols, rows, node_count, difficulty).with_decoys(decoy_count);
    LevelGenerator::new(config, seed)?.generate()
}
