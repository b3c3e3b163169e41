// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::engine::DEFAULT_DELAY_MS;

/// Command-line arguments for `watchrun`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "watchrun",
    version,
    about = "Re-run a command whenever files under a directory change.",
    long_about = None
)]
pub struct CliArgs {
    /// Enable verbose debugging output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Just run in the terminal (no screen clearing, no manual reruns).
    #[arg(short, long)]
    pub terminal: bool,

    /// Exclude files and directories matching this regular expression.
    #[arg(short = 'x', long, value_name = "REGEX", default_value = "")]
    pub exclude: String,

    /// The path to watch.
    #[arg(short, long, value_name = "PATH", default_value = ".")]
    pub path: PathBuf,

    /// Quiescence period in milliseconds before a rebuild is attempted.
    #[arg(short, long, value_name = "MS", default_value_t = DEFAULT_DELAY_MS)]
    pub delay: u64,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// Takes precedence over `--verbose` and `WATCHRUN_LOG`.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// The command to run, followed by its arguments.
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub command: Vec<String>,
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
