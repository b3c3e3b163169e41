// src/engine/core.rs

//! Pure debounce state machine.
//!
//! [`DebounceCore`] consumes [`CoreInput`]s and produces:
//! - an updated timing state
//! - a list of [`CoreCommand`]s describing what the IO shell should do next
//!
//! The async shell (`engine::runtime::Runtime`) owns the actual timer, the
//! channels and the run backend. The core has no Tokio types and performs no
//! IO, so its decisions can be tested step by step.

use std::time::{Duration, SystemTime};

use crate::engine::TriggerReason;
use crate::engine::timing::TimingState;

/// Inputs to the core, one per event the runtime loop wakes up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreInput {
    /// A change with the given resolved timestamp.
    Changed(SystemTime),
    /// The debounce timer expired.
    TimerFired,
    /// The display asked for a rerun.
    RerunRequested,
    /// A run finished at the given time.
    RunCompleted(SystemTime),
}

/// Command produced by the core, to be executed by the outer IO shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreCommand {
    /// (Re)arm the debounce timer to fire after this delay, replacing any
    /// pending deadline.
    ArmTimer(Duration),
    /// Start a run now and report back with `CoreInput::RunCompleted`.
    StartRun(TriggerReason),
}

/// Decision returned by the core after handling a single input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoreStep {
    pub commands: Vec<CoreCommand>,
}

impl CoreStep {
    fn none() -> Self {
        Self::default()
    }

    fn one(command: CoreCommand) -> Self {
        Self {
            commands: vec![command],
        }
    }
}

#[derive(Debug, Clone)]
pub struct DebounceCore {
    timing: TimingState,
    delay: Duration,
}

impl DebounceCore {
    pub fn new(delay: Duration, started_at: SystemTime) -> Self {
        Self {
            timing: TimingState::new(started_at),
            delay,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn timing(&self) -> &TimingState {
        &self.timing
    }

    /// Handle a single input, updating timing state and returning the
    /// commands for the IO shell.
    pub fn step(&mut self, input: CoreInput) -> CoreStep {
        match input {
            CoreInput::Changed(at) => {
                self.timing.record_change(at);
                CoreStep::one(CoreCommand::ArmTimer(self.delay))
            }
            CoreInput::TimerFired => {
                if !self.timing.run_warranted() {
                    return CoreStep::none();
                }
                let reason = if self.timing.last_run().is_none() {
                    TriggerReason::Startup
                } else {
                    TriggerReason::FileWatch
                };
                CoreStep::one(CoreCommand::StartRun(reason))
            }
            CoreInput::RerunRequested => {
                CoreStep::one(CoreCommand::StartRun(TriggerReason::Manual))
            }
            CoreInput::RunCompleted(at) => {
                self.timing.record_run(at);
                CoreStep::none()
            }
        }
    }
}
