//! Configuration management.
//!
//! Resolves where the roster's JSON data file lives.

use crate::error::{Error, Result};

use std::path::{Path, PathBuf};

/// Environment variable naming the data file.
pub const DATA_ENV: &str = "ROSTER_DATA";

/// File name of the data file inside the global directory.
pub const DATA_FILE_NAME: &str = "data.json";

/// Get the global Roster directory location (`~/.roster/`).
#[must_use]
pub fn global_roster_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".roster"))
}

/// Resolve the data file path.
///
/// Priority:
/// 1. If `explicit_path` is provided, use it directly (the `--data` flag,
///    which clap also fills from `ROSTER_DATA`)
/// 2. `ROSTER_DATA` environment variable
/// 3. Global location: `~/.roster/data.json`
///
/// # Errors
///
/// Returns [`Error::Config`] if no home directory can be determined and no
/// path was given.
pub fn resolve_data_path(explicit_path: Option<&Path>) -> Result<PathBuf> {
    // Priority 1: Explicit path from CLI flag
    if let Some(path) = explicit_path {
        return Ok(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATA_ENV) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path));
        }
    }

    // Priority 3: Global location
    global_roster_dir()
        .map(|dir| dir.join(DATA_FILE_NAME))
        .ok_or_else(|| Error::Config("could not determine home directory".to_string()))
}
