//! CLI definitions using clap.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::sync::{parse_bool, ImportMode, DEFAULT_CSV_PATH};

pub mod commands;

/// Roster - manage a roster of students stored as JSON
#[derive(Parser, Debug)]
#[command(name = "roster", author, version, about, long_about = None)]
pub struct Cli {
    /// Command to run (default: interactive shell)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data file path (default: ~/.roster/data.json)
    #[arg(long, global = true, env = "ROSTER_DATA")]
    pub data: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress log output and plain-text error messages
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List students
    List {
        /// Show at most this many students (0 shows all)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show one student
    Show {
        /// Student ID
        id: u64,
    },

    /// Add a student
    Add(AddArgs),

    /// Update fields of a student
    Update(UpdateArgs),

    /// Flip a student's full-time flag
    Toggle {
        /// Student ID
        id: u64,
    },

    /// Delete a student
    Delete {
        /// Student ID
        id: u64,
    },

    /// Export the roster to CSV
    Export {
        /// Output CSV path
        #[arg(default_value = DEFAULT_CSV_PATH)]
        path: PathBuf,
    },

    /// Import students from CSV
    Import {
        /// Input CSV path
        #[arg(default_value = DEFAULT_CSV_PATH)]
        path: PathBuf,

        /// How to reconcile with the current roster
        #[arg(long, value_enum, default_value_t)]
        mode: ImportModeArg,
    },

    /// Interactive menu
    Shell,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print version information
    Version,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    /// Student name
    pub name: String,

    /// Age in years
    #[arg(long)]
    pub age: u32,

    /// Full-time enrollment (yes/no)
    #[arg(long, default_value = "yes", value_parser = parse_flag_bool, action = clap::ArgAction::Set)]
    pub full_time: bool,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    /// Student ID
    pub id: u64,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New age
    #[arg(long)]
    pub age: Option<u32>,

    /// New full-time flag (yes/no)
    #[arg(long, value_parser = parse_flag_bool, action = clap::ArgAction::Set)]
    pub full_time: Option<bool>,
}

/// Import mode as accepted on the command line.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ImportModeArg {
    /// Append rows, reassigning ids that collide
    #[default]
    Merge,
    /// Rebuild the roster from the CSV
    Replace,
}

impl From<ImportModeArg> for ImportMode {
    fn from(arg: ImportModeArg) -> Self {
        match arg {
            ImportModeArg::Merge => Self::Merge,
            ImportModeArg::Replace => Self::Replace,
        }
    }
}

/// Strict boolean parsing for flags.
///
/// Accepts the same true words as CSV import, plus explicit false words;
/// anything else is rejected rather than silently read as `false`.
fn parse_flag_bool(s: &str) -> Result<bool, String> {
    if parse_bool(s) {
        return Ok(true);
    }
    match s.trim().to_lowercase().as_str() {
        "0" | "false" | "f" | "no" | "n" => Ok(false),
        other => Err(format!("expected a bool (yes/no), got '{other}'")),
    }
}
