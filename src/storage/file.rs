//! Atomic file operations.
//!
//! Both the JSON data file and CSV exports are written through
//! [`atomic_write`]: write to a sibling temp file, fsync, then rename.

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Write content to a file atomically.
///
/// This function:
/// 1. Writes content to a temporary file next to the target (`<name>.tmp`)
/// 2. Calls `fsync` to ensure data is on disk
/// 3. Renames the temp file over the target path
///
/// If any step fails, the original file (if any) remains untouched.
///
/// # Errors
///
/// Returns an error if any file operation fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp_path = temp_path_for(path);

    {
        let file = File::create(&temp_path)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
    }

    fs::rename(&temp_path, path)
}

/// Sibling temp path: `students.csv` -> `students.csv.tmp`.
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map_or_else(|| OsString::from("roster"), OsString::from);
    name.push(".tmp");
    path.with_file_name(name)
}

/// Absolute form of `path` without requiring it to exist.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read.
pub fn absolute_path(path: &Path) -> std::io::Result<PathBuf> {
    std::path::absolute(path)
}
