// src/config/model.rs

use std::path::PathBuf;
use std::time::Duration;

use crate::cli::CliArgs;
use crate::display::DisplayMode;
use crate::exec::CommandLine;
use crate::watch::ExcludeFilter;

/// Settings as given on the command line, before any checks.
#[derive(Debug, Clone)]
pub struct RawSettings {
    pub terminal_only: bool,
    pub exclude: String,
    pub root: PathBuf,
    pub delay_ms: u64,
    pub command: Vec<String>,
}

impl From<&CliArgs> for RawSettings {
    fn from(args: &CliArgs) -> Self {
        Self {
            terminal_only: args.terminal,
            exclude: args.exclude.clone(),
            root: args.path.clone(),
            delay_ms: args.delay,
            command: args.command.clone(),
        }
    }
}

/// Validated settings. Build with `Settings::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct Settings {
    pub display: DisplayMode,
    pub exclude: ExcludeFilter,
    /// Watch root, exactly as given (not canonicalized), so exclusion
    /// patterns see the same paths the user typed.
    pub root: PathBuf,
    pub delay: Duration,
    pub command: CommandLine,
}
