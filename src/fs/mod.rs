// src/fs/mod.rs

//! Filesystem access used by the watcher.
//!
//! Everything the watch layer learns about the tree (does a path exist, is it
//! a directory, when was it last modified, what does a directory contain)
//! goes through [`FileSystem`], so scanning and timestamp resolution can be
//! exercised against [`mock::MockFileSystem`] in tests.

use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

pub mod mock;

/// The parts of a `stat` the watcher cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
    pub modified: SystemTime,
}

/// Abstract filesystem interface.
pub trait FileSystem: Send + Sync + Debug {
    /// Stat `path`, following symlinks.
    ///
    /// Returns `Ok(None)` when nothing exists at `path`; every other failure
    /// is returned as an error.
    fn stat(&self, path: &Path) -> io::Result<Option<FileStat>>;

    /// Return the immediate entries of a directory as full paths, sorted.
    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn stat(&self, path: &Path) -> io::Result<Option<FileStat>> {
        match fs::metadata(path) {
            Ok(meta) => Ok(Some(FileStat {
                is_dir: meta.is_dir(),
                modified: meta.modified()?,
            })),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn read_dir(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            entries.push(entry?.path());
        }
        entries.sort();
        Ok(entries)
    }
}
