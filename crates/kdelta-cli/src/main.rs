//! kdelta CLI
//!
//! Command-line interface for field-path diffing of object snapshots

use clap::{Parser, Subcommand, ValueEnum};
use kdelta_core::logging_facility::{init, Profile};

mod commands;

#[derive(Debug, Parser)]
#[command(name = "kdelta")]
#[command(about = "kdelta - Report changes at selected fields between two object snapshots", long_about = None)]
struct Cli {
    /// Log output format (logs go to stderr)
    #[arg(long, value_enum, global = true, default_value_t = LogFormat::Human)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Human,
    Json,
}

impl From<LogFormat> for Profile {
    fn from(format: LogFormat) -> Self {
        match format {
            LogFormat::Human => Profile::Development,
            LogFormat::Json => Profile::Production,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Diff two snapshots at the configured selectors
    Diff(commands::diff::DiffArgs),
    /// Evaluate one selector against a snapshot
    Eval(commands::eval::EvalArgs),
}

fn main() {
    let cli = Cli::parse();
    init(cli.log_format.into());

    let result = match cli.command {
        Commands::Diff(args) => commands::diff::execute(args),
        Commands::Eval(args) => commands::eval::execute(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
