//! JSON persistence for the record store.
//!
//! The data file is the source of truth:
//!
//! ```json
//! {
//!   "students": [
//!     { "id": 1, "name": "Ada", "age": 20, "full-time": true }
//!   ]
//! }
//! ```
//!
//! A missing file is created empty on load. A file that fails to decode is
//! reported as [`Error::CorruptData`] and never replaced by an empty store.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::storage::file::atomic_write;
use crate::store::Store;

/// Load a store from `path`.
///
/// If the file does not exist an empty store is returned and the empty
/// document is written to disk immediately.
///
/// # Errors
///
/// Returns [`Error::CorruptData`] if the file is not a valid roster
/// document, or an I/O error if it cannot be read or created.
pub fn load(path: &Path) -> Result<Store> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "Data file missing, creating empty roster");
            let store = Store::new();
            save(&store, path)?;
            return Ok(store);
        }
        Err(e) => return Err(e.into()),
    };

    let store: Store = serde_json::from_slice(&bytes).map_err(|source| Error::CorruptData {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), students = store.len(), "Loaded roster");
    Ok(store)
}

/// Replace `store` with the contents of `path`.
///
/// On any error, including [`Error::CorruptData`], `store` is left exactly
/// as it was.
///
/// # Errors
///
/// Same as [`load`].
pub fn reload(store: &mut Store, path: &Path) -> Result<()> {
    *store = load(path)?;
    Ok(())
}

/// Re-read `path` into `store`, tolerating a corrupt data file.
///
/// A corrupt file is logged as a warning and the in-memory store is kept;
/// returns `false` in that case. A missing file is created empty.
///
/// # Errors
///
/// Returns I/O errors from reading or creating the data file.
pub fn refresh(store: &mut Store, path: &Path) -> Result<bool> {
    match reload(store, path) {
        Ok(()) => Ok(true),
        Err(Error::CorruptData { path, source }) => {
            warn!(path = %path.display(), error = %source, "Data file is corrupt, keeping in-memory roster");
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// Write `store` to `path` as pretty-printed JSON, replacing the file.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn save(store: &Store, path: &Path) -> Result<()> {
    let mut content = serde_json::to_string_pretty(store)?;
    content.push('\n');
    atomic_write(path, content.as_bytes())?;
    debug!(path = %path.display(), students = store.len(), "Saved roster");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Student;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_creates_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");

        let store = load(&path).unwrap();

        assert!(store.is_empty());
        assert!(path.exists());
        let on_disk: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, serde_json::json!({ "students": [] }));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");

        let mut store = Store::new();
        store.create("Ada", 20, true);
        store.create("Grace", 31, false);
        store.create("Linus", 19, true);
        store.delete(2);

        save(&store, &path).unwrap();
        let loaded = load(&path).unwrap();

        assert_eq!(loaded, store);
    }

    #[test]
    fn test_save_uses_stable_key_order() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");

        let store = Store::from_students(vec![Student::new(1, "Ada", 20, true)]);
        save(&store, &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let id = content.find("\"id\"").unwrap();
        let name = content.find("\"name\"").unwrap();
        let age = content.find("\"age\"").unwrap();
        let full_time = content.find("\"full-time\"").unwrap();
        assert!(id < name && name < age && age < full_time);
        assert!(content.contains("\n  \"students\": ["));
    }

    #[test]
    fn test_load_corrupt_reports_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{ not json").unwrap();

        let result = load(&path);
        assert!(matches!(result, Err(Error::CorruptData { .. })));
        // The corrupt file is not overwritten
        assert_eq!(fs::read_to_string(&path).unwrap(), "{ not json");
    }

    #[test]
    fn test_reload_corrupt_keeps_memory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let mut store = Store::new();
        store.create("Unsaved", 30, false);
        let before = store.clone();

        assert!(reload(&mut store, &path).is_err());
        assert_eq!(store, before);
    }

    #[test]
    fn test_refresh_corrupt_keeps_memory_and_reports() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, "{\"students\": [{\"id\": \"one\"}]}").unwrap();

        let mut store = Store::new();
        store.create("Kept", 30, false);
        let before = store.clone();

        assert!(!refresh(&mut store, &path).unwrap());
        assert_eq!(store, before);
    }

    #[test]
    fn test_refresh_non_utf8_keeps_memory() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(&path, [0xff, 0xfe, b'{']).unwrap();

        let mut store = Store::new();
        store.create("Kept", 30, false);
        let before = store.clone();

        assert!(matches!(load(&path), Err(Error::CorruptData { .. })));
        assert!(!refresh(&mut store, &path).unwrap());
        assert_eq!(store, before);
        assert_eq!(fs::read(&path).unwrap(), [0xff, 0xfe, b'{']);
    }

    #[test]
    fn test_refresh_missing_creates_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");

        let mut store = Store::new();
        store.create("Unsaved", 30, false);

        assert!(refresh(&mut store, &path).unwrap());
        assert!(store.is_empty());
        assert!(path.exists());
    }

    #[test]
    fn test_reload_discards_unsaved_changes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");

        let mut store = Store::new();
        store.create("Saved", 20, true);
        save(&store, &path).unwrap();
        store.create("Unsaved", 21, false);

        reload(&mut store, &path).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.students()[0].name, "Saved");
    }

    #[test]
    fn test_load_accepts_four_space_indentation() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        fs::write(
            &path,
            "{\n    \"students\": [\n        {\n            \"id\": 4,\n            \"name\": \"Ada\",\n            \"age\": 20,\n            \"full-time\": false\n        }\n    ]\n}",
        )
        .unwrap();

        let store = load(&path).unwrap();
        assert_eq!(store.find(4), Some(&Student::new(4, "Ada", 20, false)));
    }
}
