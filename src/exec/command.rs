// src/exec/command.rs

use std::fmt;

use crate::errors::{Result, WatchrunError};

/// Program plus arguments, run directly without a shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    program: String,
    args: Vec<String>,
}

impl CommandLine {
    /// Build from positional arguments; the first one is the program.
    pub fn from_args(words: &[String]) -> Result<Self> {
        match words.split_first() {
            Some((program, args)) if !program.is_empty() => Ok(Self {
                program: program.clone(),
                args: args.to_vec(),
            }),
            _ => Err(WatchrunError::ConfigError(
                "a command to run is required".to_string(),
            )),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

/// The transcript header: all words joined by single spaces.
impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}
