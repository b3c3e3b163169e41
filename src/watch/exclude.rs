// src/watch/exclude.rs

use std::path::Path;

use regex::Regex;

use crate::errors::{Result, WatchrunError};

/// Compiled exclusion pattern.
///
/// An empty pattern means nothing is excluded. The pattern is searched for
/// anywhere in the path as given (e.g. `./target/debug`), so anchor it when
/// needed: `^\./target`, `\.log$`.
#[derive(Debug, Clone, Default)]
pub struct ExcludeFilter {
    regex: Option<Regex>,
}

impl ExcludeFilter {
    pub fn new(pattern: &str) -> Result<Self> {
        if pattern.is_empty() {
            return Ok(Self::none());
        }
        let regex = Regex::new(pattern).map_err(|source| WatchrunError::InvalidExcludePattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { regex: Some(regex) })
    }

    /// A filter that excludes nothing.
    pub fn none() -> Self {
        Self { regex: None }
    }

    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    /// Returns true if `path` should be ignored.
    pub fn matches(&self, path: &Path) -> bool {
        match &self.regex {
            Some(regex) => regex.is_match(&path.to_string_lossy()),
            None => false,
        }
    }
}
