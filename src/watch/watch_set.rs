// src/watch/watch_set.rs

//! The set of paths subscribed to change notifications.

use std::io;
use std::path::Path;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use crate::watch::exclude::ExcludeFilter;
use crate::watch::scanner::DirectoryScanner;

/// Low-level notification registration.
///
/// Production code uses `notify::RecommendedWatcher` in non-recursive mode;
/// tests can record registrations instead. Registering the same path twice
/// must be harmless.
pub trait Subscriber: Send {
    fn subscribe(&mut self, path: &Path) -> notify::Result<()>;
}

impl Subscriber for RecommendedWatcher {
    fn subscribe(&mut self, path: &Path) -> notify::Result<()> {
        self.watch(path, RecursiveMode::NonRecursive)
    }
}

/// Returns true if a registration failed only because the path is gone.
pub fn is_not_found(err: &notify::Error) -> bool {
    match &err.kind {
        notify::ErrorKind::PathNotFound => true,
        notify::ErrorKind::Io(io_err) => io_err.kind() == io::ErrorKind::NotFound,
        _ => false,
    }
}

/// Registers single paths and whole subtrees with a [`Subscriber`].
///
/// No record of registered paths is kept here; the notification backend
/// already dedupes by path.
pub struct WatchSet<S: Subscriber> {
    subscriber: S,
    scanner: DirectoryScanner,
    exclude: ExcludeFilter,
}

impl<S: Subscriber> std::fmt::Debug for WatchSet<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchSet")
            .field("exclude", &self.exclude)
            .finish_non_exhaustive()
    }
}

impl<S: Subscriber> WatchSet<S> {
    pub fn new(subscriber: S, scanner: DirectoryScanner, exclude: ExcludeFilter) -> Self {
        Self {
            subscriber,
            scanner,
            exclude,
        }
    }

    pub fn scanner(&self) -> &DirectoryScanner {
        &self.scanner
    }

    pub fn exclude(&self) -> &ExcludeFilter {
        &self.exclude
    }

    /// Register a single path. A path that vanished before registration is
    /// skipped silently; anything else is logged and skipped.
    pub fn watch(&mut self, path: &Path) {
        debug!(path = ?path, "watching");

        match self.subscriber.subscribe(path) {
            Ok(()) => {}
            Err(err) if is_not_found(&err) => {
                debug!(path = ?path, "no longer exists");
            }
            Err(err) => {
                warn!(path = ?path, error = %err, "failed to watch");
            }
        }
    }

    /// Register `path` and, if it is a directory, everything below it that
    /// is not excluded.
    ///
    /// Children are registered before their parent directory.
    pub fn watch_recursive(&mut self, path: &Path) {
        if self.exclude.matches(path) {
            debug!(path = ?path, "excluding");
            return;
        }

        match self.scanner.is_dir(path) {
            Ok(true) => self.watch_dir(path),
            Ok(false) => self.watch(path),
            Err(err) => {
                warn!(path = ?path, error = %err, "failed to watch");
            }
        }
    }

    fn watch_dir(&mut self, dir: &Path) {
        match self.scanner.list_children(dir) {
            Ok(children) => {
                for child in children {
                    self.watch_recursive(&child);
                }
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = ?dir, "directory vanished before it could be listed");
                return;
            }
            Err(err) => {
                warn!(path = ?dir, error = %err, "failed to list directory");
            }
        }

        self.watch(dir);
    }
}
