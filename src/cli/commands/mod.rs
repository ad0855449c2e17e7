//! Command implementations.

pub mod meta;
pub mod shell;
pub mod student;
pub mod sync;

use crate::config::resolve_data_path;
use crate::error::Result;
use crate::storage;
use crate::store::Store;
use std::path::PathBuf;

/// Resolve the data file and load the roster from it.
///
/// A missing data file is created empty. A corrupt one is an error: commands
/// refuse to run rather than overwrite it.
pub(crate) fn open_store(data_path: Option<&PathBuf>) -> Result<(PathBuf, Store)> {
    let data_path = resolve_data_path(data_path.map(PathBuf::as_path))?;
    let store = storage::load(&data_path)?;
    Ok((data_path, store))
}
