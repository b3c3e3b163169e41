use std::future::Future;
use std::io::Write;
use std::pin::Pin;
use std::sync::{Arc, Mutex};
use std::time::{Duration, SystemTime};

use tokio::time::Instant;
use watchrun::display::DisplaySink;
use watchrun::exec::RunBackend;

use crate::clock::TestClock;

/// One run as seen by the fake.
#[derive(Debug, Clone)]
pub struct RunRecord {
    /// Tokio time the run started (paused-clock friendly).
    pub started: Instant,
    /// Fake wall-clock time the run started.
    pub started_at: SystemTime,
    /// Fake wall-clock completion time reported to the engine.
    pub completed_at: SystemTime,
}

/// A fake run backend that:
/// - records every run
/// - writes a one-line transcript into the display
/// - takes `duration` of Tokio time to complete (zero by default)
/// - stamps start and completion with ticks of a shared `TestClock`
pub struct FakeRunner {
    clock: TestClock,
    duration: Duration,
    runs: Arc<Mutex<Vec<RunRecord>>>,
}

impl FakeRunner {
    pub fn new(clock: TestClock, runs: Arc<Mutex<Vec<RunRecord>>>) -> Self {
        Self {
            clock,
            duration: Duration::ZERO,
            runs,
        }
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

impl RunBackend for FakeRunner {
    fn run<'a>(
        &'a mut self,
        display: &'a mut dyn DisplaySink,
    ) -> Pin<Box<dyn Future<Output = SystemTime> + Send + 'a>> {
        Box::pin(async move {
            let started = Instant::now();
            let started_at = self.clock.tick();
            let index = self.runs.lock().unwrap().len();

            if let Ok(mut out) = display.redisplay() {
                let _ = writeln!(out, "fake run {index}");
            }

            if !self.duration.is_zero() {
                tokio::time::sleep(self.duration).await;
            }

            let completed_at = self.clock.tick();
            self.runs.lock().unwrap().push(RunRecord {
                started,
                started_at,
                completed_at,
            });
            completed_at
        })
    }
}
