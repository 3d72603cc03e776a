//! Algorithm constants and runtime configuration defaults

// Solver budgets
/// Wall-clock budget for a single search, in milliseconds
pub const DEFAULT_TIME_LIMIT_MS: u64 = 5_000;

/// Number of state expansions between wall-clock checks
pub const TIME_CHECK_INTERVAL: usize = 1_000;

/// Maximum number of distinct rotation states a search may visit
pub const DEFAULT_MAX_STATES: usize = 2_000_000;

/// Move budget used when a caller gives none
pub const DEFAULT_MOVE_BUDGET: u32 = 64;

// Certification searches past the nominal budget so over-budget levels are
// reported with their true minimal cost
/// Multiplier applied to a level's move budget during certification
pub const CERTIFICATION_BUDGET_FACTOR: u32 = 2;

// Generator settings
/// Fresh layouts tried before generation gives up
pub const GENERATION_ATTEMPTS: usize = 40;

/// Re-scrambles tried when a scramble lands on a connected state
pub const SCRAMBLE_ATTEMPTS: usize = 16;

/// Goal placements tried per layout before the layout is abandoned
pub const GOAL_PLACEMENT_ATTEMPTS: usize = 200;

/// Extra moves granted on top of the certified minimal solution
pub const MOVE_SLACK: u32 = 2;

/// Smallest Manhattan distance allowed between two goals
pub const MIN_GOAL_SEPARATION: u32 = 2;

/// Smallest supported grid side
pub const MIN_GRID_DIMENSION: usize = 3;

// Prevents level files from requesting absurd allocations
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 64;

// Compression defaults for generated levels
/// Ticks before the first compression step
pub const DEFAULT_COMPRESSION_DELAY: u32 = 30;

/// Ticks between compression steps
pub const DEFAULT_COMPRESSION_INTERVAL: u32 = 10;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Default values for CLI parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of goals in generated levels
pub const DEFAULT_NODE_COUNT: usize = 2;

/// Default number of decoy tiles in generated levels
pub const DEFAULT_DECOY_COUNT: usize = 2;

/// Default side length of generated levels
pub const DEFAULT_GRID_SIZE: usize = 5;

// Output settings
/// Extension of level files
pub const LEVEL_EXTENSION: &str = "json";
/// Pixel size of one tile in exported images
pub const TILE_PIXELS: u32 = 24;
/// Delay between GIF animation frames, in milliseconds
pub const GIF_FRAME_DELAY_MS: u32 = 400;
