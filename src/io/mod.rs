//! Input/output operations, configuration and error handling

/// Command-line interface and batch processors
pub mod cli;
/// Algorithm constants and runtime defaults
pub mod configuration;
/// Error types and result alias
pub mod error;
/// PNG and GIF export of grids
pub mod image;
/// Level files on disk
pub mod levels;
/// Progress bars for batch runs
pub mod progress;
/// Text rendering of grids and solutions
pub mod visualization;
