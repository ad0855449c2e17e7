//! Roster CLI entry point.

use clap::Parser;
use roster::cli::commands;
use roster::cli::{Cli, Commands};
use roster::error::Error;
use std::io::IsTerminal;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    // Set up tracing based on verbosity
    init_tracing(cli.verbose, cli.quiet);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.json {
                eprintln!("{}", e.to_structured_json());
            } else if !cli.quiet {
                if let Some(hint) = e.hint() {
                    eprintln!("Error: {e}\n  Hint: {hint}");
                } else {
                    eprintln!("Error: {e}");
                }
            }
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    if quiet {
        return;
    }

    // Honor RUST_LOG if set, otherwise use verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        match verbose {
            0 => EnvFilter::new("warn"),
            1 => EnvFilter::new("info"),
            2 => EnvFilter::new("debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn run(cli: &Cli) -> Result<(), Error> {
    let data = cli.data.as_ref();
    let json = cli.json;

    match &cli.command {
        None | Some(Commands::Shell) => commands::shell::execute(data),

        // Records
        Some(Commands::List { limit }) => commands::student::list(*limit, data, json),
        Some(Commands::Show { id }) => commands::student::show(*id, data, json),
        Some(Commands::Add(args)) => commands::student::add(args, data, json),
        Some(Commands::Update(args)) => commands::student::update(args, data, json),
        Some(Commands::Toggle { id }) => commands::student::toggle(*id, data, json),
        Some(Commands::Delete { id }) => commands::student::delete(*id, data, json),

        // CSV interchange
        Some(Commands::Export { path }) => commands::sync::export(path, data, json),
        Some(Commands::Import { path, mode }) => {
            commands::sync::import(path, (*mode).into(), data, json)
        }

        Some(Commands::Completions { shell }) => {
            commands::meta::completions(*shell);
            Ok(())
        }
        Some(Commands::Version) => commands::meta::version(json),
    }
}
