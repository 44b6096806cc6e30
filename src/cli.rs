// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `typedag`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "typedag",
    version,
    about = "Build the demo listing view model through the typed step pipeline.",
    long_about = None
)]
pub struct CliArgs {
    /// Where the request came from (free-form, lands in the criteria).
    #[arg(long, value_name = "ORIGIN", default_value = "web")]
    pub origin: String,

    /// Request path whose segments become search terms.
    #[arg(long, value_name = "PATH", default_value = "/products/summer")]
    pub path: String,

    /// Site code forwarded into the criteria.
    #[arg(long, value_name = "CODE", default_value = "TDV")]
    pub site: String,

    /// Validate the step graph and print the planned batches, but don't
    /// execute any steps.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TYPEDAG_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
