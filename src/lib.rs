//! Roster - a console record manager for student entries.
//!
//! This crate provides the core functionality for the `roster` CLI tool.
//!
//! # Architecture
//!
//! - [`store`] - In-memory record store (create/find/update/delete)
//! - [`storage`] - JSON data file persistence
//! - [`sync`] - CSV export and merge/replace import
//! - [`model`] - Data types (Student)
//! - [`config`] - Data file resolution
//! - [`cli`] - Command-line interface using clap, plus the interactive shell
//! - [`error`] - Error types and handling

#![forbid(unsafe_code)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod model;
pub mod storage;
pub mod store;
pub mod sync;

pub use error::{Error, Result};
