// src/config/validate.rs

use std::time::Duration;

use crate::config::model::{RawSettings, Settings};
use crate::display::DisplayMode;
use crate::errors::{Result, WatchrunError};
use crate::exec::CommandLine;
use crate::fs::{FileSystem, RealFileSystem};
use crate::watch::ExcludeFilter;

impl TryFrom<RawSettings> for Settings {
    type Error = WatchrunError;

    fn try_from(raw: RawSettings) -> std::result::Result<Self, Self::Error> {
        validate_with_fs(raw, &RealFileSystem)
    }
}

/// Validate `raw`, checking the watch root through `fs`.
pub fn validate_with_fs(raw: RawSettings, fs: &dyn FileSystem) -> Result<Settings> {
    let command = CommandLine::from_args(&raw.command)?;
    let exclude = ExcludeFilter::new(&raw.exclude)?;
    validate_root(&raw, fs)?;

    let display = if raw.terminal_only {
        DisplayMode::Terminal
    } else {
        DisplayMode::Interactive
    };

    Ok(Settings {
        display,
        exclude,
        root: raw.root,
        delay: Duration::from_millis(raw.delay_ms),
        command,
    })
}

fn validate_root(raw: &RawSettings, fs: &dyn FileSystem) -> Result<()> {
    if raw.root.as_os_str().is_empty() {
        return Err(WatchrunError::ConfigError(
            "watch path must not be empty".to_string(),
        ));
    }

    match fs.stat(&raw.root) {
        Ok(Some(_)) => Ok(()),
        Ok(None) => Err(WatchrunError::ConfigError(format!(
            "watch path {:?} does not exist",
            raw.root
        ))),
        Err(err) => Err(WatchrunError::ConfigError(format!(
            "failed to watch {:?}: {err}",
            raw.root
        ))),
    }
}
