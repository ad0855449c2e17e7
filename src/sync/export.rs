//! CSV export.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::Result;
use crate::storage::{self, absolute_path, atomic_write};
use crate::store::Store;
use crate::sync::parse::format_bool;
use crate::sync::types::CSV_HEADER;

/// Default CSV file name, relative to the working directory.
pub const DEFAULT_CSV_PATH: &str = "students.csv";

/// Exporter for CSV files.
///
/// Export always reflects the data file: the roster is refreshed from
/// `data_path` first, so edits that were never saved are not exported.
pub struct Exporter<'a> {
    store: &'a mut Store,
    data_path: &'a Path,
}

impl<'a> Exporter<'a> {
    #[must_use]
    pub fn new(store: &'a mut Store, data_path: &'a Path) -> Self {
        Self { store, data_path }
    }

    /// Write the roster to `csv_path` and return the absolute path written.
    ///
    /// # Errors
    ///
    /// Returns an error if the data file cannot be read or the CSV cannot
    /// be written.
    pub fn export(&mut self, csv_path: &Path) -> Result<PathBuf> {
        storage::refresh(self.store, self.data_path)?;

        let mut buffer = Vec::new();
        write_csv(self.store, &mut buffer)?;
        atomic_write(csv_path, &buffer)?;

        let written = absolute_path(csv_path)?;
        info!(path = %written.display(), students = self.store.len(), "Export complete");
        Ok(written)
    }
}

/// Write the header and one row per student, in store order.
///
/// # Errors
///
/// Returns an error if the underlying writer fails.
pub fn write_csv<W: Write>(store: &Store, writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(CSV_HEADER)?;

    for student in store {
        csv_writer.write_record([
            student.id.to_string().as_str(),
            student.name.as_str(),
            student.age.to_string().as_str(),
            format_bool(student.full_time),
        ])?;
    }

    csv_writer.flush()?;
    Ok(())
}
