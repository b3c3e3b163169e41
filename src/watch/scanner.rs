// src/watch/scanner.rs

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::fs::FileSystem;

/// Answers the two questions directory expansion needs: is this a directory,
/// and what is directly inside it.
#[derive(Debug, Clone)]
pub struct DirectoryScanner {
    fs: Arc<dyn FileSystem>,
}

impl DirectoryScanner {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// A path that does not exist is not a directory. Files can disappear
    /// between an event firing and this check, so that is not an error.
    pub fn is_dir(&self, path: &Path) -> io::Result<bool> {
        Ok(self.fs.stat(path)?.is_some_and(|stat| stat.is_dir))
    }

    /// Immediate children (files and directories alike), sorted by name.
    pub fn list_children(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        self.fs.read_dir(path)
    }

    pub fn fs(&self) -> &Arc<dyn FileSystem> {
        &self.fs
    }
}
