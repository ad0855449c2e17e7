//! CSV interchange.
//!
//! The JSON data file is the roster's source of truth; CSV is only an
//! exchange format with the column order `id,name,age,full-time`.
//!
//! - **Export**: data file → CSV (always from freshly loaded state)
//! - **Import**: CSV → roster, in `merge` or `replace` mode
//! - **Parse**: lenient field coercion (`Coerced`) and the boolean-text parser
//! - **Allocate**: id collision resolution, one accumulator per batch
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use roster::store::Store;
//! use roster::sync::{Exporter, ImportMode, Importer};
//!
//! let data = Path::new("data.json");
//! let mut store = Store::new();
//!
//! let written = Exporter::new(&mut store, data).export(Path::new("students.csv"))?;
//! let outcome = Importer::new(&mut store, data, ImportMode::Merge).import(&written)?;
//! println!("imported {}", outcome.count());
//! # Ok::<(), roster::Error>(())
//! ```

mod allocate;
mod export;
mod import;
mod parse;
mod types;

pub use allocate::{MergeAllocator, ReplaceAllocator};
pub use export::{write_csv, Exporter, DEFAULT_CSV_PATH};
pub use import::{plan_merge, plan_replace, read_rows, Importer};
pub use parse::{format_bool, parse_age, parse_bool, parse_full_time, parse_id, parse_name};
pub use types::{Coerced, CsvRow, ImportMode, ImportOutcome, ImportStats, CSV_HEADER};
