//! Level files on disk
//!
//! Levels are stored as pretty-printed JSON, one level per file.

use std::fs;
use std::path::{Path, PathBuf};

use crate::game::level::Level;
use crate::io::configuration::LEVEL_EXTENSION;
use crate::io::error::{PuzzleError, Result, invalid_parameter};

/// Parse a level from JSON text
///
/// # Errors
///
/// Returns `LevelFormat` if the text is not a valid level document.
pub fn parse_level(json: &str, path: &Path) -> Result<Level> {
    serde_json::from_str(json).map_err(|e| PuzzleError::LevelFormat {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read a level file
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `LevelFormat` if it
/// does not hold a valid level document.
pub fn load_level(path: &Path) -> Result<Level> {
    let json = fs::read_to_string(path).map_err(|e| PuzzleError::FileSystem {
        path: path.to_path_buf(),
        operation: "read level",
        source: e,
    })?;
    parse_level(&json, path)
}

/// Write a level file, creating parent directories as needed
///
/// # Errors
///
/// Returns `LevelFormat` if serialization fails and `FileSystem` if the
/// directory or file cannot be written.
pub fn save_level(level: &Level, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(level).map_err(|e| PuzzleError::LevelFormat {
        path: path.to_path_buf(),
        source: e,
    })?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| PuzzleError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    fs::write(path, json + "\n").map_err(|e| PuzzleError::FileSystem {
        path: path.to_path_buf(),
        operation: "write level",
        source: e,
    })
}

/// File name a level is saved under
pub fn level_file_name(level: &Level) -> String {
    format!("{}.{LEVEL_EXTENSION}", level.id)
}

fn is_level_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(LEVEL_EXTENSION)
}

/// Level files named by a CLI target, sorted by path
///
/// A file target must carry the level extension; a directory target yields
/// its level files, without descending into subdirectories.
///
/// # Errors
///
/// Returns `InvalidParameter` if the target is neither a level file nor a
/// directory, and `FileSystem` if the directory cannot be listed.
pub fn collect_level_files(target: &Path) -> Result<Vec<PathBuf>> {
    if target.is_file() {
        if is_level_file(target) {
            Ok(vec![target.to_path_buf()])
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &format!("level files must end in .{LEVEL_EXTENSION}"),
            ))
        }
    } else if target.is_dir() {
        let listing_error = |e| PuzzleError::FileSystem {
            path: target.to_path_buf(),
            operation: "list directory",
            source: e,
        };
        let mut files = Vec::new();
        for entry in fs::read_dir(target).map_err(listing_error)? {
            let path = entry.map_err(listing_error)?.path();
            if path.is_file() && is_level_file(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    } else {
        Err(invalid_parameter(
            "target",
            &target.display(),
            &"must be a level file or a directory",
        ))
    }
}
