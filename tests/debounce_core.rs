// tests/debounce_core.rs

mod common;
use crate::common::t;

use std::time::Duration;

use watchrun::engine::{
    CoreCommand, CoreInput, DebounceCore, TimingState, TriggerReason,
};

const D: Duration = Duration::from_millis(200);

#[test]
fn first_timer_firing_starts_the_startup_run() {
    let mut core = DebounceCore::new(D, t(0));

    let step = core.step(CoreInput::TimerFired);
    assert_eq!(
        step.commands,
        vec![CoreCommand::StartRun(TriggerReason::Startup)]
    );
}

#[test]
fn change_rearms_the_timer_with_the_configured_delay() {
    let mut core = DebounceCore::new(D, t(0));

    let step = core.step(CoreInput::Changed(t(5)));
    assert_eq!(step.commands, vec![CoreCommand::ArmTimer(D)]);
    assert_eq!(core.timing().last_change(), t(5));
}

#[test]
fn timer_after_covering_run_does_nothing() {
    let mut core = DebounceCore::new(D, t(0));
    core.step(CoreInput::TimerFired);
    core.step(CoreInput::RunCompleted(t(1)));

    core.step(CoreInput::Changed(t(2)));
    core.step(CoreInput::TimerFired);
    // The run started by that firing completes after the change.
    core.step(CoreInput::RunCompleted(t(3)));

    let step = core.step(CoreInput::TimerFired);
    assert!(step.commands.is_empty());
}

#[test]
fn change_after_run_warrants_a_file_watch_run() {
    let mut core = DebounceCore::new(D, t(0));
    core.step(CoreInput::TimerFired);
    core.step(CoreInput::RunCompleted(t(1)));

    core.step(CoreInput::Changed(t(2)));
    let step = core.step(CoreInput::TimerFired);
    assert_eq!(
        step.commands,
        vec![CoreCommand::StartRun(TriggerReason::FileWatch)]
    );
}

#[test]
fn change_stamped_before_last_run_is_already_covered() {
    let mut core = DebounceCore::new(D, t(0));
    core.step(CoreInput::TimerFired);
    core.step(CoreInput::RunCompleted(t(10)));

    // E.g. output the command itself wrote while it was running.
    core.step(CoreInput::Changed(t(7)));
    let step = core.step(CoreInput::TimerFired);
    assert!(step.commands.is_empty());
}

#[test]
fn rerun_request_always_runs_and_leaves_the_timer_alone() {
    let mut core = DebounceCore::new(D, t(0));
    core.step(CoreInput::TimerFired);
    core.step(CoreInput::RunCompleted(t(1)));

    let step = core.step(CoreInput::RerunRequested);
    assert_eq!(
        step.commands,
        vec![CoreCommand::StartRun(TriggerReason::Manual)]
    );
}

#[test]
fn manual_run_covers_pending_change() {
    let mut core = DebounceCore::new(D, t(0));
    core.step(CoreInput::TimerFired);
    core.step(CoreInput::RunCompleted(t(1)));

    core.step(CoreInput::Changed(t(2)));
    core.step(CoreInput::RerunRequested);
    core.step(CoreInput::RunCompleted(t(3)));

    // The debounce timer armed by the change still fires, but has nothing to do.
    let step = core.step(CoreInput::TimerFired);
    assert!(step.commands.is_empty());
}

#[test]
fn last_change_never_moves_backwards() {
    let mut timing = TimingState::new(t(0));
    timing.record_change(t(9));
    timing.record_change(t(4));
    assert_eq!(timing.last_change(), t(9));
}

#[test]
fn last_run_is_unset_until_a_run_completes() {
    let mut timing = TimingState::new(t(0));
    assert_eq!(timing.last_run(), None);
    assert!(timing.run_warranted());

    timing.record_run(t(1));
    assert_eq!(timing.last_run(), Some(t(1)));
    assert!(!timing.run_warranted());
}

#[test]
fn equal_timestamps_do_not_warrant_a_run() {
    let mut timing = TimingState::new(t(0));
    timing.record_run(t(5));
    timing.record_change(t(5));
    assert!(!timing.run_warranted());
}
