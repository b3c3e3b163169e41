use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime};

/// Strictly increasing fake wall clock shared between a test and its fakes.
///
/// Each `tick()` is one millisecond after the previous one, so change
/// timestamps and run completion times can be ordered exactly.
#[derive(Debug, Clone)]
pub struct TestClock {
    base: SystemTime,
    ticks: Arc<AtomicU64>,
}

impl TestClock {
    pub fn new() -> Self {
        Self {
            base: SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000),
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// The instant the clock started at (use as the runtime start time).
    pub fn start(&self) -> SystemTime {
        self.base
    }

    /// Advance and return the new time.
    pub fn tick(&self) -> SystemTime {
        let n = self.ticks.fetch_add(1, Ordering::SeqCst) + 1;
        self.base + Duration::from_millis(n)
    }

    /// Current time without advancing.
    pub fn now(&self) -> SystemTime {
        self.base + Duration::from_millis(self.ticks.load(Ordering::SeqCst))
    }
}

impl Default for TestClock {
    fn default() -> Self {
        Self::new()
    }
}
