// src/engine/runtime.rs

use std::collections::VecDeque;
use std::fmt;
use std::time::SystemTime;

use tokio::sync::mpsc;
use tokio::time::{sleep, Duration, Instant};
use tracing::{debug, info};

use crate::display::DisplaySink;
use crate::errors::{Result, WatchrunError};
use crate::exec::RunBackend;

use super::core::DebounceCore;
use super::{CoreCommand, CoreInput, RuntimeEvent, TriggerReason};

/// What woke the loop up.
enum Wake {
    Event(Option<RuntimeEvent>),
    Rerun(Option<()>),
    Timer,
}

/// What woke a run in progress up.
enum DuringRun {
    Finished(SystemTime),
    Event(Option<RuntimeEvent>),
}

/// How a run ended.
enum RunEnd {
    /// Completed; carries the changes seen while it was running.
    Completed(Vec<SystemTime>),
    /// Abandoned because shutdown was requested.
    Shutdown,
}

/// Drives the debounce core in response to runtime events, the debounce
/// timer and rerun requests, and delegates runs to a `RunBackend`.
///
/// This is a pure IO shell around `DebounceCore`, which holds all the
/// decision logic. Runs are awaited inline, so two runs never overlap. While
/// a run is in progress only runtime events are read: changes are held until
/// the run's completion time has been fed back into the core, and a shutdown
/// request drops the run (killing the command).
pub struct Runtime<R: RunBackend> {
    core: DebounceCore,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    display: Box<dyn DisplaySink>,
    rerun_rx: Option<mpsc::Receiver<()>>,
    runner: R,
}

impl<R: RunBackend> fmt::Debug for Runtime<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

impl<R: RunBackend> Runtime<R> {
    pub fn new(
        core: DebounceCore,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        mut display: Box<dyn DisplaySink>,
        runner: R,
    ) -> Self {
        let rerun_rx = display.rerun_requests();
        Self {
            core,
            event_rx,
            display,
            rerun_rx,
            runner,
        }
    }

    /// Main event loop.
    ///
    /// The timer starts armed with a zero delay, so the command runs once
    /// right away. Returns `Ok(())` on shutdown or when the event channel
    /// closes, and an error if the watcher reports a failure.
    pub async fn run(mut self) -> Result<()> {
        info!(delay = ?self.core.delay(), "watchrun runtime started");

        let timer = sleep(Duration::ZERO);
        tokio::pin!(timer);
        let mut timer_armed = true;
        let mut inputs = VecDeque::new();

        loop {
            let wake = tokio::select! {
                event = self.event_rx.recv() => Wake::Event(event),
                req = next_rerun(&mut self.rerun_rx) => Wake::Rerun(req),
                () = &mut timer, if timer_armed => Wake::Timer,
            };

            let input = match wake {
                Wake::Event(Some(RuntimeEvent::Changed { at })) => CoreInput::Changed(at),
                Wake::Event(Some(RuntimeEvent::WatcherFailed { reason })) => {
                    return Err(WatchrunError::WatcherFailed(reason));
                }
                Wake::Event(Some(RuntimeEvent::ShutdownRequested)) => {
                    info!("shutdown requested; stopping runtime");
                    break;
                }
                Wake::Event(None) => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
                Wake::Rerun(Some(())) => CoreInput::RerunRequested,
                Wake::Rerun(None) => {
                    debug!("rerun source closed");
                    self.rerun_rx = None;
                    continue;
                }
                Wake::Timer => {
                    timer_armed = false;
                    CoreInput::TimerFired
                }
            };

            inputs.push_back(input);
            while let Some(input) = inputs.pop_front() {
                for command in self.core.step(input).commands {
                    match command {
                        CoreCommand::ArmTimer(delay) => {
                            timer.as_mut().reset(Instant::now() + delay);
                            timer_armed = true;
                        }
                        CoreCommand::StartRun(reason) => match self.start_run(reason).await? {
                            RunEnd::Completed(changes) => {
                                inputs.extend(changes.into_iter().map(CoreInput::Changed));
                            }
                            RunEnd::Shutdown => {
                                info!("shutdown requested during a run; abandoning it");
                                return Ok(());
                            }
                        },
                    }
                }
            }
        }

        info!("runtime exiting");
        Ok(())
    }

    async fn start_run(&mut self, reason: TriggerReason) -> Result<RunEnd> {
        debug!(?reason, timing = ?self.core.timing(), "starting run");

        let mut changes = Vec::new();
        let mut events_open = true;
        let run = self.runner.run(self.display.as_mut());
        tokio::pin!(run);

        let completed_at = loop {
            let wake = tokio::select! {
                at = &mut run => DuringRun::Finished(at),
                event = self.event_rx.recv(), if events_open => DuringRun::Event(event),
            };

            match wake {
                DuringRun::Finished(at) => break at,
                DuringRun::Event(Some(RuntimeEvent::Changed { at })) => changes.push(at),
                DuringRun::Event(Some(RuntimeEvent::WatcherFailed { reason })) => {
                    return Err(WatchrunError::WatcherFailed(reason));
                }
                DuringRun::Event(Some(RuntimeEvent::ShutdownRequested)) => {
                    return Ok(RunEnd::Shutdown);
                }
                // Picked up again by the main loop once the run is over.
                DuringRun::Event(None) => events_open = false,
            }
        };

        // Completion never produces commands.
        let _ = self.core.step(CoreInput::RunCompleted(completed_at));
        debug!(?reason, timing = ?self.core.timing(), "run completed");
        Ok(RunEnd::Completed(changes))
    }
}

/// Next rerun request, or never when the display has no rerun source.
async fn next_rerun(rerun_rx: &mut Option<mpsc::Receiver<()>>) -> Option<()> {
    match rerun_rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
