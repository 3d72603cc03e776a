//! Error types for puzzle analysis, level tooling and file operations

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Main error type for all puzzle operations
///
/// The first five variants are the expected outcomes of certifying a level;
/// tooling matches on them to decide how a level can be repaired.
#[derive(Debug)]
pub enum PuzzleError {
    /// Goals are already connected before any move
    AlreadySolved,

    /// The search space was exhausted without connecting the goals
    NoSolution {
        /// Number of distinct rotation states examined
        explored: usize,
    },

    /// The search was cut off before it could finish
    ///
    /// Unsolvability is not proven in this case.
    TimedOut {
        /// Number of distinct rotation states examined
        explored: usize,
        /// Wall-clock time spent before giving up
        elapsed: Duration,
    },

    /// A solution exists but needs more quarter-turns than the level allows
    Impossible {
        /// Quarter-turns needed by the cheapest solution
        minimal_moves: u32,
        /// The level's declared move budget
        max_moves: u32,
    },

    /// The generator ran out of attempts without a certified level
    GenerationFailed {
        /// Number of layouts tried
        attempts: usize,
        /// Why the last attempt was rejected
        reason: String,
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Level data is structurally malformed
    InvalidLevel {
        /// Description of what is wrong with the level
        reason: String,
    },

    /// A level file could not be parsed or serialized
    LevelFormat {
        /// File involved in the operation
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Failed to save a rendered grid to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for PuzzleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadySolved => {
                write!(f, "Level is already solved before any move")
            }
            Self::NoSolution { explored } => {
                write!(f, "No solution exists ({explored} states explored)")
            }
            Self::TimedOut { explored, elapsed } => {
                write!(
                    f,
                    "Search cut off after {} ms ({explored} states explored)",
                    elapsed.as_millis()
                )
            }
            Self::Impossible {
                minimal_moves,
                max_moves,
            } => {
                write!(
                    f,
                    "Cheapest solution needs {minimal_moves} moves but the level allows {max_moves}"
                )
            }
            Self::GenerationFailed { attempts, reason } => {
                write!(
                    f,
                    "Level generation failed after {attempts} attempts: {reason}"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidLevel { reason } => {
                write!(f, "Invalid level: {reason}")
            }
            Self::LevelFormat { path, source } => {
                write!(f, "Malformed level file '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::LevelFormat { source, .. } => Some(source),
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl PuzzleError {
    /// Whether this error describes a level defect that `--fix` can repair
    pub const fn is_fixable(&self) -> bool {
        matches!(self, Self::AlreadySolved | Self::Impossible { .. })
    }
}

/// Convenience type alias for puzzle results
pub type Result<T> = std::result::Result<T, PuzzleError>;

impl From<std::io::Error> for PuzzleError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> PuzzleError {
    PuzzleError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid level error
pub fn invalid_level(reason: impl ToString) -> PuzzleError {
    PuzzleError::InvalidLevel {
        reason: reason.to_string(),
    }
}
