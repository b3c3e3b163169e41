#![allow(dead_code)]

pub use watchrun_test_utils::{init_tracing, with_timeout};

use std::path::PathBuf;
use std::time::{Duration, SystemTime};

/// A fixed, readable base time for mock trees.
pub fn t(secs: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_600_000_000 + secs)
}

pub fn p(s: &str) -> PathBuf {
    PathBuf::from(s)
}
