//! Commands about the tool itself: version and shell completions.

use crate::cli::Cli;
use crate::error::Result;
use clap::CommandFactory;
use clap_complete::Shell;
use std::io;

/// Print the version, as JSON when requested.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn version(json: bool) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if json {
        let output = serde_json::json!({ "name": "roster", "version": version });
        println!("{}", serde_json::to_string(&output)?);
    } else {
        println!("roster {version}");
    }
    Ok(())
}

/// Write a completion script for `shell` to stdout.
pub fn completions(shell: Shell) {
    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, bin_name, &mut io::stdout());
}
