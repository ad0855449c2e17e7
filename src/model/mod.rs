//! Data models for Roster.
//!
//! - Student
//! - StudentPatch (partial updates)

pub mod student;

pub use student::{Student, StudentPatch};
