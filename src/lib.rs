// src/lib.rs

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod watch;

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::{RawSettings, Settings};
use crate::display::{DisplayMode, DisplaySink, InteractiveSink, TerminalSink};
use crate::engine::{DebounceCore, Runtime, RuntimeEvent};
use crate::errors::{Result, WatchrunError};
use crate::exec::CommandRunner;
use crate::fs::RealFileSystem;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - settings validation
/// - the display sink
/// - the watcher thread
/// - the debounce runtime and command runner
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let settings = Settings::try_from(RawSettings::from(&args))?;
    debug!(?settings, "resolved settings");

    let display = open_display(settings.display)?;

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    let _watcher_handle = crate::watch::spawn_watcher(
        settings.root.clone(),
        settings.exclude.clone(),
        Arc::new(RealFileSystem),
        rt_tx.clone(),
    )?;

    // Ctrl-C → graceful shutdown. Also seen while a run is in progress; the
    // run is then dropped and its child killed.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    info!(root = ?settings.root, cmd = %settings.command, "watching");

    let core = DebounceCore::new(settings.delay, SystemTime::now());
    let runner = CommandRunner::new(settings.command);
    Runtime::new(core, rt_rx, display, runner).run().await
}

fn open_display(mode: DisplayMode) -> Result<Box<dyn DisplaySink>> {
    match mode {
        DisplayMode::Terminal => Ok(Box::new(TerminalSink::new())),
        DisplayMode::Interactive => {
            let wd = std::env::current_dir().map_err(|err| {
                WatchrunError::ConfigError(format!("failed to get the current directory: {err}"))
            })?;
            let sink = InteractiveSink::new(&wd).map_err(|err| {
                WatchrunError::ConfigError(format!("failed to open the interactive display: {err}"))
            })?;
            Ok(Box::new(sink))
        }
    }
}
