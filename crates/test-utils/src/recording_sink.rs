use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use watchrun::display::DisplaySink;

/// Display that keeps every transcript in memory, one entry per
/// `redisplay()`, and optionally exposes a manual rerun source.
#[derive(Debug, Clone)]
pub struct RecordingSink {
    renders: Arc<Mutex<Vec<Vec<u8>>>>,
    rerun_rx: Arc<Mutex<Option<mpsc::Receiver<()>>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            renders: Arc::new(Mutex::new(Vec::new())),
            rerun_rx: Arc::new(Mutex::new(None)),
        }
    }

    /// Sink with a rerun source; send `()` on the returned sender to request
    /// a rerun.
    pub fn with_reruns() -> (Self, mpsc::Sender<()>) {
        let (tx, rx) = mpsc::channel(8);
        let sink = Self::new();
        *sink.rerun_rx.lock().unwrap() = Some(rx);
        (sink, tx)
    }

    /// All transcripts so far, lossily decoded.
    pub fn transcripts(&self) -> Vec<String> {
        self.renders
            .lock()
            .unwrap()
            .iter()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .collect()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

/// Surface appending to one transcript slot.
struct RenderSurface {
    renders: Arc<Mutex<Vec<Vec<u8>>>>,
    index: usize,
}

impl Write for RenderSurface {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.renders.lock().unwrap()[self.index].extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl DisplaySink for RecordingSink {
    fn redisplay(&mut self) -> io::Result<Box<dyn Write + Send + '_>> {
        let index = {
            let mut renders = self.renders.lock().unwrap();
            renders.push(Vec::new());
            renders.len() - 1
        };
        Ok(Box::new(RenderSurface {
            renders: Arc::clone(&self.renders),
            index,
        }))
    }

    fn rerun_requests(&mut self) -> Option<mpsc::Receiver<()>> {
        self.rerun_rx.lock().unwrap().take()
    }
}
