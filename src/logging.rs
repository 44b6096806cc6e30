// src/logging.rs

//! Logging setup for `typedag` using `tracing` + `tracing-subscriber`.
//!
//! Priority for determining the log level:
//! 1. `--log-level` CLI flag (if provided)
//! 2. `TYPEDAG_LOG` environment variable (e.g. "info", "debug")
//! 3. default to `warn`, since the demo prints its result on stdout

use anyhow::Result;
use tracing_subscriber::fmt;

use crate::cli::LogLevel;

/// Initialise the global logging subscriber.
///
/// Safe to call once at startup.
pub fn init_logging(cli_level: Option<LogLevel>) -> Result<()> {
    fmt()
        .with_max_level(resolve_level(cli_level))
        .with_target(true)
        .init();

    Ok(())
}

fn resolve_level(cli_level: Option<LogLevel>) -> tracing::Level {
    if let Some(lvl) = cli_level {
        return match lvl {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        };
    }

    std::env::var("TYPEDAG_LOG")
        .ok()
        .and_then(|s| s.trim().to_lowercase().parse().ok())
        .unwrap_or(tracing::Level::WARN)
}
