// src/fs/mock.rs

use super::{FileStat, FileSystem};
use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

#[derive(Debug, Clone)]
enum MockEntry {
    File { modified: SystemTime },
    Dir { modified: SystemTime },
}

#[derive(Debug, Default)]
struct MockState {
    entries: BTreeMap<PathBuf, MockEntry>,
    /// Paths whose `stat` fails with the given error kind.
    stat_failures: HashMap<PathBuf, io::ErrorKind>,
    /// Paths whose `read_dir` fails with the given error kind.
    list_failures: HashMap<PathBuf, io::ErrorKind>,
}

/// In-memory tree with explicit modification times.
///
/// Children are derived from the stored paths, so removing a directory entry
/// does not remove its descendants; tests that need that remove each path.
/// Cloning shares the underlying tree.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    state: Arc<Mutex<MockState>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating missing parent directories with the same mtime.
    pub fn add_file(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let mut state = self.lock();
        ensure_parents(&mut state, path.as_ref(), modified);
        state
            .entries
            .insert(path.as_ref().to_path_buf(), MockEntry::File { modified });
    }

    /// Add a directory, creating missing parent directories with the same mtime.
    pub fn add_dir(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let mut state = self.lock();
        ensure_parents(&mut state, path.as_ref(), modified);
        state
            .entries
            .insert(path.as_ref().to_path_buf(), MockEntry::Dir { modified });
    }

    /// Update the mtime of an existing entry.
    pub fn touch(&self, path: impl AsRef<Path>, modified: SystemTime) {
        let mut state = self.lock();
        match state.entries.get_mut(path.as_ref()) {
            Some(MockEntry::File { modified: m }) | Some(MockEntry::Dir { modified: m }) => {
                *m = modified;
            }
            None => {}
        }
    }

    pub fn remove(&self, path: impl AsRef<Path>) {
        self.lock().entries.remove(path.as_ref());
    }

    pub fn fail_stat(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        self.lock()
            .stat_failures
            .insert(path.as_ref().to_path_buf(), kind);
    }

    pub fn fail_read_dir(&self, path: impl AsRef<Path>, kind: io::ErrorKind) {
        self.lock()
            .list_failures
            .insert(path.as_ref().to_path_buf(), kind);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn ensure_parents(state: &mut MockState, path: &Path, modified: SystemTime) {
    let mut current = path.parent();
    while let Some(parent) = current {
        if parent.as_os_str().is_empty() {
            break;
        }
        state
            .entries
            .entry(parent.to_path_buf())
            .or_insert(MockEntry::Dir { modified });
        current = parent.parent();
    }
}

impl FileSystem for MockFileSystem {
    fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        let state = self.lock();
        if let Some(kind) = state.stat_failures.get(path) {
            return Err(io::Error::new(*kind, format!("injected stat failure for {path:?}")));
        }
        Ok(state.entries.get(path).map(|entry| match entry {
            MockEntry::File { modified } => FileStat {
                is_dir: false,
                modified: *modified,
            },
            MockEntry::Dir { modified } => FileStat {
                is_dir: true,
                modified: *modified,
            },
        }))
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let state = self.lock();
        if let Some(kind) = state.list_failures.get(path) {
            return Err(io::Error::new(*kind, format!("injected read_dir failure for {path:?}")));
        }
        match state.entries.get(path) {
            Some(MockEntry::Dir { .. }) => Ok(state
                .entries
                .keys()
                .filter(|p| p.parent() == Some(path))
                .cloned()
                .collect()),
            Some(MockEntry::File { .. }) => Err(io::Error::new(
                io::ErrorKind::Other,
                format!("not a directory: {path:?}"),
            )),
            None => Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("no such directory: {path:?}"),
            )),
        }
    }
}
