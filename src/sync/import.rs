//! CSV import.
//!
//! Rows are planned against the roster with a pure function per mode
//! ([`plan_merge`], [`plan_replace`]) and only then applied and saved, so a
//! rejected CSV never leaves the roster half-updated.

use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

use tracing::{debug, info, warn};

use crate::error::Result;
use crate::model::Student;
use crate::storage;
use crate::store::Store;
use crate::sync::allocate::{MergeAllocator, ReplaceAllocator};
use crate::sync::parse::{parse_age, parse_full_time, parse_id, parse_name};
use crate::sync::types::{CsvRow, ImportMode, ImportOutcome, ImportStats};

/// Importer for CSV files.
///
/// Reads a CSV, refreshes the roster from its data file, reconciles the
/// rows according to the import mode, and saves the result.
pub struct Importer<'a> {
    store: &'a mut Store,
    data_path: &'a Path,
    mode: ImportMode,
}

impl<'a> Importer<'a> {
    /// Create a new importer for the roster saved at `data_path`.
    #[must_use]
    pub fn new(store: &'a mut Store, data_path: &'a Path, mode: ImportMode) -> Self {
        Self {
            store,
            data_path,
            mode,
        }
    }

    /// Import the CSV at `csv_path`.
    ///
    /// A missing or empty CSV is reported through [`ImportOutcome`] and
    /// leaves both the roster and the data file untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the CSV cannot be read or parsed as CSV, or if
    /// the data file cannot be read or written.
    pub fn import(&mut self, csv_path: &Path) -> Result<ImportOutcome> {
        let file = match File::open(csv_path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(path = %csv_path.display(), "CSV not found");
                return Ok(ImportOutcome::NotFound(csv_path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let rows = read_rows(file)?;
        if rows.is_empty() {
            warn!(path = %csv_path.display(), "CSV empty");
            return Ok(ImportOutcome::Empty(csv_path.to_path_buf()));
        }

        storage::refresh(self.store, self.data_path)?;

        let (students, mut stats) = match self.mode {
            ImportMode::Merge => plan_merge(self.store, &rows),
            ImportMode::Replace => plan_replace(&rows),
        };

        match self.mode {
            ImportMode::Merge => {
                for student in students {
                    self.store.push(student);
                }
            }
            ImportMode::Replace => self.store.replace_sorted(students),
        }
        stats.total = self.store.len();

        storage::save(self.store, self.data_path)?;

        if stats.coercions() > 0 {
            warn!(
                ids_reassigned = stats.ids_reassigned,
                names_generated = stats.names_generated,
                ages_defaulted = stats.ages_defaulted,
                "Some CSV fields were coerced"
            );
        }
        info!(
            path = %csv_path.display(),
            mode = %self.mode,
            imported = stats.imported,
            total = stats.total,
            "Import complete"
        );

        Ok(ImportOutcome::Imported(stats))
    }
}

/// Read every data row of a CSV with an `id,name,age,full-time` header.
///
/// Rows may be shorter than the header; missing fields read as `None`.
///
/// # Errors
///
/// Returns an error if the input is not valid UTF-8 CSV.
pub fn read_rows<R: Read>(reader: R) -> Result<Vec<CsvRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in csv_reader.deserialize() {
        let row: CsvRow = result?;
        rows.push(row);
    }
    debug!(rows = rows.len(), "Read CSV rows");
    Ok(rows)
}

/// Plan a merge: one new student per row, with ids that do not collide
/// with `store` or with each other.
///
/// Placeholder names use the row's resolved id.
#[must_use]
pub fn plan_merge(store: &Store, rows: &[CsvRow]) -> (Vec<Student>, ImportStats) {
    let mut alloc = MergeAllocator::for_store(store);
    let mut stats = ImportStats::new(ImportMode::Merge);

    let students = rows
        .iter()
        .map(|row| merge_row(&mut alloc, &mut stats, row))
        .collect();

    (students, stats)
}

/// Plan a replace: one student per row, ids unique within the batch.
///
/// Placeholder names use the allocator's candidate counter as it stood
/// before the row's id was resolved, which can differ from the id the row
/// finally gets. The returned list is in row order; sorting happens when it
/// is applied.
#[must_use]
pub fn plan_replace(rows: &[CsvRow]) -> (Vec<Student>, ImportStats) {
    let mut alloc = ReplaceAllocator::new();
    let mut stats = ImportStats::new(ImportMode::Replace);

    let students = rows
        .iter()
        .map(|row| replace_row(&mut alloc, &mut stats, row))
        .collect();

    (students, stats)
}

fn merge_row(alloc: &mut MergeAllocator, stats: &mut ImportStats, row: &CsvRow) -> Student {
    let id = alloc.resolve(parse_id(row.id.as_deref()));
    let id_value = *id.value();
    let name = parse_name(row.name.as_deref(), id_value);
    let age = parse_age(row.age.as_deref());
    let full_time = parse_full_time(row.full_time.as_deref());

    tally(stats, id.is_defaulted(), name.is_defaulted(), age.is_defaulted());
    Student::new(id.into_inner(), name.into_inner(), age.into_inner(), full_time)
}

fn replace_row(alloc: &mut ReplaceAllocator, stats: &mut ImportStats, row: &CsvRow) -> Student {
    let name = parse_name(row.name.as_deref(), alloc.placeholder_id());
    let age = parse_age(row.age.as_deref());
    let full_time = parse_full_time(row.full_time.as_deref());
    let id = alloc.resolve(parse_id(row.id.as_deref()));

    tally(stats, id.is_defaulted(), name.is_defaulted(), age.is_defaulted());
    Student::new(id.into_inner(), name.into_inner(), age.into_inner(), full_time)
}

fn tally(stats: &mut ImportStats, id: bool, name: bool, age: bool) {
    stats.imported += 1;
    stats.ids_reassigned += usize::from(id);
    stats.names_generated += usize::from(name);
    stats.ages_defaulted += usize::from(age);
}
