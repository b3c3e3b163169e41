// src/engine/timing.rs

use std::time::SystemTime;

/// The two timestamps that decide whether a rebuild is warranted.
///
/// A run is warranted iff no run has completed yet, or the last run completed
/// before the last observed change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingState {
    last_change: SystemTime,
    last_run: Option<SystemTime>,
}

impl TimingState {
    /// `started_at` is the initial `last_change`.
    pub fn new(started_at: SystemTime) -> Self {
        Self {
            last_change: started_at,
            last_run: None,
        }
    }

    /// Record a change observed at `at`. Never moves `last_change` backwards.
    pub fn record_change(&mut self, at: SystemTime) {
        if at > self.last_change {
            self.last_change = at;
        }
    }

    /// Record the completion time of a run.
    pub fn record_run(&mut self, completed_at: SystemTime) {
        self.last_run = Some(match self.last_run {
            Some(prev) if prev > completed_at => prev,
            _ => completed_at,
        });
    }

    pub fn run_warranted(&self) -> bool {
        match self.last_run {
            None => true,
            Some(last_run) => last_run < self.last_change,
        }
    }

    pub fn last_change(&self) -> SystemTime {
        self.last_change
    }

    pub fn last_run(&self) -> Option<SystemTime> {
        self.last_run
    }
}
