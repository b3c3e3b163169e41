// src/watch/mod.rs

//! File watching and change detection.
//!
//! This module is responsible for:
//! - Deciding which paths are excluded from watching ([`exclude`]).
//! - Building and growing the set of watched paths ([`scanner`],
//!   [`watch_set`]).
//! - Turning raw `notify` events into timestamped changes, walking up to the
//!   nearest existing ancestor for paths that are already gone
//!   ([`translator`]).
//! - Running all of the above on a background thread that feeds the engine
//!   ([`watcher`]).
//!
//! It does **not** decide when to run anything; it only reports when
//! something changed.

pub mod exclude;
pub mod scanner;
pub mod translator;
pub mod watch_set;
pub mod watcher;

pub use exclude::ExcludeFilter;
pub use scanner::DirectoryScanner;
pub use translator::{resolve_mod_time, ChangeEvent, ChangeKind, EventTranslator};
pub use watch_set::{Subscriber, WatchSet};
pub use watcher::{forward_changes, spawn_watcher, WatcherHandle};
