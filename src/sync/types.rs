//! Types for CSV import/export.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Column order of the CSV interchange format.
pub const CSV_HEADER: [&str; 4] = ["id", "name", "age", "full-time"];

/// Reconciliation policy for a CSV import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportMode {
    /// Append rows to the existing roster, reassigning colliding ids.
    #[default]
    Merge,
    /// Discard the roster and rebuild it from the CSV, sorted by id.
    Replace,
}

impl fmt::Display for ImportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Merge => write!(f, "merge"),
            Self::Replace => write!(f, "replace"),
        }
    }
}

impl FromStr for ImportMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "m" | "merge" => Ok(Self::Merge),
            "r" | "replace" => Ok(Self::Replace),
            other => Err(Error::InvalidArgument(format!("unknown import mode: {other}"))),
        }
    }
}

/// A field value that was either read from input or substituted.
///
/// Both variants carry the value that is used; the distinction only lets
/// callers report what was coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coerced<T> {
    /// Taken from the input as-is.
    Parsed(T),
    /// Input was missing, unparseable, or conflicting; a default was used.
    Defaulted(T),
}

impl<T> Coerced<T> {
    /// The value to use, regardless of origin.
    pub fn into_inner(self) -> T {
        match self {
            Self::Parsed(v) | Self::Defaulted(v) => v,
        }
    }

    /// Borrow the value.
    pub const fn value(&self) -> &T {
        match self {
            Self::Parsed(v) | Self::Defaulted(v) => v,
        }
    }

    #[must_use]
    pub const fn is_defaulted(&self) -> bool {
        matches!(self, Self::Defaulted(_))
    }
}

/// One CSV data row, as text. Missing columns deserialize as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CsvRow {
    pub id: Option<String>,
    pub name: Option<String>,
    pub age: Option<String>,
    #[serde(rename = "full-time")]
    pub full_time: Option<String>,
}

impl CsvRow {
    /// Build a row from string slices (mostly for tests).
    #[must_use]
    pub fn new(id: &str, name: &str, age: &str, full_time: &str) -> Self {
        Self {
            id: Some(id.to_string()),
            name: Some(name.to_string()),
            age: Some(age.to_string()),
            full_time: Some(full_time.to_string()),
        }
    }
}

/// Statistics for an import operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportStats {
    /// Mode the import ran in.
    pub mode: ImportMode,
    /// Rows turned into students.
    pub imported: usize,
    /// Rows whose id was missing, invalid, or already taken.
    pub ids_reassigned: usize,
    /// Rows whose name was blank and got a placeholder.
    pub names_generated: usize,
    /// Rows whose age could not be parsed and became 0.
    pub ages_defaulted: usize,
    /// Students in the roster after the import.
    pub total: usize,
}

impl ImportStats {
    #[must_use]
    pub fn new(mode: ImportMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Number of individual field coercions.
    #[must_use]
    pub fn coercions(&self) -> usize {
        self.ids_reassigned + self.names_generated + self.ages_defaulted
    }
}

/// Result of an import request.
///
/// Only I/O and CSV syntax problems are errors; a missing or empty CSV is
/// an ordinary outcome that imports nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportOutcome {
    /// Rows were applied and the roster saved.
    Imported(ImportStats),
    /// The CSV path does not exist. Nothing changed.
    NotFound(PathBuf),
    /// The CSV has no data rows. Nothing changed.
    Empty(PathBuf),
}

impl ImportOutcome {
    /// Number of records imported (0 unless `Imported`).
    #[must_use]
    pub fn count(&self) -> usize {
        match self {
            Self::Imported(stats) => stats.imported,
            Self::NotFound(_) | Self::Empty(_) => 0,
        }
    }

    /// Statistics, if anything was imported.
    #[must_use]
    pub fn stats(&self) -> Option<&ImportStats> {
        match self {
            Self::Imported(stats) => Some(stats),
            Self::NotFound(_) | Self::Empty(_) => None,
        }
    }
}
