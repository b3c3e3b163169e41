// src/exec/mod.rs

//! Running the watched command.
//!
//! - [`backend`] provides the `RunBackend` trait the runtime talks to, so
//!   tests can swap in a fake that doesn't spawn processes.
//! - [`command`] holds the parsed command line.
//! - [`runner`] is the production backend: it spawns the command with
//!   `tokio::process::Command` and streams its combined output into the
//!   display surface.

pub mod backend;
pub mod command;
pub mod runner;

pub use backend::RunBackend;
pub use command::CommandLine;
pub use runner::CommandRunner;
