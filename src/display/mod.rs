// src/display/mod.rs

//! Where run transcripts go.
//!
//! The engine only needs two things from a display: a fresh surface to
//! render one run into, and (optionally) a stream of manual rerun requests.
//!
//! - [`TerminalSink`] appends every transcript to stdout and never asks for a
//!   rerun.
//! - [`InteractiveSink`] clears the terminal before each run and turns every
//!   line typed on stdin into a rerun request.

use std::io::{self, Write};

use tokio::sync::mpsc;

pub mod interactive;
pub mod terminal;

pub use interactive::InteractiveSink;
pub use terminal::TerminalSink;

/// Which display implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Terminal,
    Interactive,
}

/// Display surface consumed by the engine.
pub trait DisplaySink: Send {
    /// Begin rendering a new run.
    ///
    /// The returned writer is the surface for exactly one transcript; the
    /// rendering ends when it is dropped.
    fn redisplay(&mut self) -> io::Result<Box<dyn Write + Send + '_>>;

    /// Hand out the manual rerun source. `None` means reruns are never
    /// requested. Called once, when the runtime is built.
    fn rerun_requests(&mut self) -> Option<mpsc::Receiver<()>>;
}
