// src/engine/mod.rs

//! Rebuild coordination engine.
//!
//! This module ties together:
//! - the timing state (`last_change` / `last_run`) that decides whether a run
//!   is warranted
//! - the debounce timer that collapses bursts of changes into one run
//! - the main runtime event loop that reacts to:
//!   - change timestamps from the watcher thread
//!   - debounce timer expiry
//!   - manual rerun requests from the display
//!   - watcher failures and shutdown signals
//!
//! The pure state machine lives in [`core`] (on top of [`timing`]); the
//! async/IO shell is implemented in [`runtime`].

use std::time::SystemTime;

/// Quiescence period in milliseconds used when none is configured.
pub const DEFAULT_DELAY_MS: u64 = 200;

/// Why a run was started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerReason {
    /// First run after the process started.
    Startup,
    /// Debounce timer expired after filesystem changes.
    FileWatch,
    /// Rerun requested through the display.
    Manual,
}

/// Events flowing into the runtime from the watcher thread and Ctrl-C.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// Something under the watch root changed at `at`.
    Changed { at: SystemTime },
    /// The notification backend failed; the watch set can't be trusted.
    WatcherFailed { reason: String },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod core;
pub mod runtime;
pub mod timing;

pub use self::core::{CoreCommand, CoreInput, CoreStep, DebounceCore};
pub use runtime::Runtime;
pub use timing::TimingState;
