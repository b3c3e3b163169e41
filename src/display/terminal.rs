// src/display/terminal.rs

use std::io::{self, Write};

use tokio::sync::mpsc;

use super::DisplaySink;

/// Plain stdout display.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }
}

impl DisplaySink for TerminalSink {
    fn redisplay(&mut self) -> io::Result<Box<dyn Write + Send + '_>> {
        Ok(Box::new(io::stdout()))
    }

    fn rerun_requests(&mut self) -> Option<mpsc::Receiver<()>> {
        None
    }
}
