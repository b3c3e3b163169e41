// src/errors.rs

//! Crate-wide error type and result alias.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchrunError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("invalid exclude pattern `{pattern}`: {source}")]
    InvalidExcludePattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("file notification error: {0}")]
    NotifyError(#[from] notify::Error),

    #[error("failed to find an existing directory for {0:?}")]
    NoExistingAncestor(PathBuf),

    #[error("watcher error: {0}")]
    WatcherFailed(String),
}

pub type Result<T> = std::result::Result<T, WatchrunError>;
