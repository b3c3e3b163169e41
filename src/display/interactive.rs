// src/display/interactive.rs

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::thread;

use tokio::sync::mpsc;
use tracing::debug;

use super::DisplaySink;

/// Clears the screen and rewinds the cursor.
const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Terminal display that redraws from a clean screen for every run and
/// reruns the command whenever a line is entered on stdin.
#[derive(Debug)]
pub struct InteractiveSink {
    title: String,
    rerun_rx: Option<mpsc::Receiver<()>>,
}

impl InteractiveSink {
    /// Start reading stdin for rerun requests. `dir` names the session in the
    /// title line.
    pub fn new(dir: &Path) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel::<()>(8);

        // Not joined: a pending stdin read can't be cancelled.
        thread::Builder::new()
            .name("watchrun-stdin".to_string())
            .spawn(move || {
                for line in io::stdin().lock().lines() {
                    if line.is_err() || tx.blocking_send(()).is_err() {
                        break;
                    }
                }
                debug!("stdin closed; no more manual reruns");
            })?;

        Ok(Self {
            title: format!("watchrun: {} (press Enter to rerun)", dir.display()),
            rerun_rx: Some(rx),
        })
    }
}

impl DisplaySink for InteractiveSink {
    fn redisplay(&mut self) -> io::Result<Box<dyn Write + Send + '_>> {
        let mut out = io::stdout();
        write!(out, "{CLEAR_SCREEN}{}\n\n", self.title)?;
        out.flush()?;
        Ok(Box::new(out))
    }

    fn rerun_requests(&mut self) -> Option<mpsc::Receiver<()>> {
        self.rerun_rx.take()
    }
}
