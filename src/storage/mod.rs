//! Persistence layer for Roster.
//!
//! # Submodules
//!
//! - [`json`] - Load/save the store as the JSON data file
//! - [`file`] - Atomic write helpers shared with CSV export

pub mod file;
pub mod json;

pub use file::{absolute_path, atomic_write};
pub use json::{load, refresh, reload, save};
