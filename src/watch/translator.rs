// src/watch/translator.rs

//! Turns raw notifications into timestamped changes.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use notify::event::ModifyKind;
use notify::{Event, EventKind};
use tracing::{debug, warn};

use crate::errors::{Result, WatchrunError};
use crate::fs::FileSystem;
use crate::watch::watch_set::{Subscriber, WatchSet};

/// Simplified notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Create,
    Modify,
    Remove,
    Rename,
}

impl ChangeKind {
    /// Classify a `notify` event kind. Pure access (open, read, close without
    /// write) is not a change and maps to `None`.
    pub fn from_event_kind(kind: &EventKind) -> Option<Self> {
        match kind {
            EventKind::Access(_) => None,
            EventKind::Create(_) => Some(ChangeKind::Create),
            EventKind::Modify(ModifyKind::Name(_)) => Some(ChangeKind::Rename),
            EventKind::Modify(_) => Some(ChangeKind::Modify),
            EventKind::Remove(_) => Some(ChangeKind::Remove),
            EventKind::Any | EventKind::Other => Some(ChangeKind::Modify),
        }
    }
}

/// A single observed change with its resolved timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeEvent {
    pub path: PathBuf,
    pub kind: ChangeKind,
    pub timestamp: SystemTime,
}

/// Modification time of `path`, or of its nearest existing ancestor when
/// `path` itself is gone.
///
/// An ancestor's mtime is only an approximation of when the missing path
/// changed, but nothing better survives a deletion.
pub fn resolve_mod_time(fs: &dyn FileSystem, path: &Path) -> Result<SystemTime> {
    let mut current = path.to_path_buf();
    loop {
        if let Some(stat) = fs.stat(&current)? {
            return Ok(stat.modified);
        }

        let parent = match current.parent() {
            Some(p) if p.as_os_str().is_empty() => PathBuf::from("."),
            Some(p) => p.to_path_buf(),
            None => return Err(WatchrunError::NoExistingAncestor(path.to_path_buf())),
        };
        if parent == current {
            return Err(WatchrunError::NoExistingAncestor(path.to_path_buf()));
        }
        current = parent;
    }
}

/// Resolves notifications against the filesystem and grows the watch set
/// when new directories appear, whether created or renamed into place.
#[derive(Debug)]
pub struct EventTranslator<S: Subscriber> {
    watch_set: WatchSet<S>,
}

impl<S: Subscriber> EventTranslator<S> {
    pub fn new(watch_set: WatchSet<S>) -> Self {
        Self { watch_set }
    }

    pub fn watch_set_mut(&mut self) -> &mut WatchSet<S> {
        &mut self.watch_set
    }

    /// Translate every path of a raw `notify` event.
    pub fn translate_event(&mut self, event: &Event) -> Vec<ChangeEvent> {
        let Some(kind) = ChangeKind::from_event_kind(&event.kind) else {
            return Vec::new();
        };

        event
            .paths
            .iter()
            .filter_map(|path| self.translate(path, kind))
            .collect()
    }

    /// Translate one `(path, kind)` notification.
    ///
    /// Returns `None` when the path is excluded or no timestamp can be
    /// resolved for it.
    pub fn translate(&mut self, path: &Path, kind: ChangeKind) -> Option<ChangeEvent> {
        if self.watch_set.exclude().matches(path) {
            debug!(path = ?path, ?kind, "ignoring change to excluded path");
            return None;
        }

        let timestamp = match resolve_mod_time(self.watch_set.scanner().fs().as_ref(), path) {
            Ok(t) => t,
            Err(err) => {
                warn!(path = ?path, error = %err, "failed to get event time");
                return None;
            }
        };

        debug!(path = ?path, ?kind, ?timestamp, "resolved change");

        // A directory can also arrive by being moved in.
        if matches!(kind, ChangeKind::Create | ChangeKind::Rename) {
            match self.watch_set.scanner().is_dir(path) {
                Ok(true) => self.watch_set.watch_recursive(path),
                Ok(false) => {}
                Err(err) => {
                    warn!(path = ?path, error = %err, "couldn't check if new path is a directory");
                }
            }
        }

        Some(ChangeEvent {
            path: path.to_path_buf(),
            kind,
            timestamp,
        })
    }
}
