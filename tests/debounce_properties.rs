// tests/debounce_properties.rs

use std::time::{Duration, SystemTime};

use proptest::prelude::*;
use watchrun::engine::{CoreCommand, CoreInput, DebounceCore};

const D: Duration = Duration::from_millis(200);

fn at(ms: u64) -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000) + Duration::from_millis(ms)
}

#[derive(Debug, Clone)]
enum Op {
    /// A change stamped `ms` after the simulated clock.
    Change(u64),
    Timer,
    Rerun,
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..50u64).prop_map(Op::Change),
        Just(Op::Timer),
        Just(Op::Rerun),
    ]
}

/// Drives the core like the runtime does: a `StartRun` command is completed
/// at the next clock value before anything else happens.
struct Sim {
    core: DebounceCore,
    now_ms: u64,
    runs: usize,
}

impl Sim {
    fn new() -> Self {
        Self {
            core: DebounceCore::new(D, at(0)),
            now_ms: 0,
            runs: 0,
        }
    }

    fn apply(&mut self, input: CoreInput) -> bool {
        let mut ran = false;
        for command in self.core.step(input).commands {
            if let CoreCommand::StartRun(_) = command {
                self.runs += 1;
                self.now_ms += 1;
                let done = at(self.now_ms);
                assert!(self.core.step(CoreInput::RunCompleted(done)).commands.is_empty());
                ran = true;
            }
        }
        ran
    }
}

proptest! {
    /// After a run completes at T, a timer firing only runs again if a change
    /// stamped after T was seen in between.
    #[test]
    fn timer_runs_only_for_changes_newer_than_last_run(
        ops in proptest::collection::vec(op_strategy(), 1..60)
    ) {
        let mut sim = Sim::new();
        sim.apply(CoreInput::TimerFired);

        // Independent bookkeeping: newest change stamp and last completion.
        let mut newest_change = 0u64;
        let mut last_completed = sim.now_ms;

        for op in ops {
            match op {
                Op::Change(offset) => {
                    let stamp = sim.now_ms + offset;
                    newest_change = newest_change.max(stamp);
                    sim.apply(CoreInput::Changed(at(stamp)));
                    sim.now_ms = sim.now_ms.max(stamp);
                }
                Op::Timer => {
                    let expected = newest_change > last_completed;
                    let ran = sim.apply(CoreInput::TimerFired);
                    prop_assert_eq!(ran, expected);
                    if ran {
                        last_completed = sim.now_ms;
                    }
                }
                Op::Rerun => {
                    prop_assert!(sim.apply(CoreInput::RerunRequested));
                    last_completed = sim.now_ms;
                }
            }
        }
    }

    /// Any burst of changes followed by a single timer firing yields exactly
    /// one run, and a second firing yields none.
    #[test]
    fn burst_collapses_into_one_run(offsets in proptest::collection::vec(1..100u64, 1..30)) {
        let mut sim = Sim::new();
        sim.apply(CoreInput::TimerFired);
        let runs_before = sim.runs;

        let base = sim.now_ms;
        for offset in offsets {
            let step = sim.core.step(CoreInput::Changed(at(base + offset)));
            prop_assert_eq!(step.commands, vec![CoreCommand::ArmTimer(D)]);
        }
        sim.now_ms = base + 100;

        prop_assert!(sim.apply(CoreInput::TimerFired));
        prop_assert!(!sim.apply(CoreInput::TimerFired));
        prop_assert_eq!(sim.runs, runs_before + 1);
    }

    #[test]
    fn last_change_is_monotonic(stamps in proptest::collection::vec(0..1_000u64, 1..50)) {
        let mut core = DebounceCore::new(D, at(0));
        let mut max_seen = at(0);
        for s in stamps {
            core.step(CoreInput::Changed(at(s)));
            max_seen = max_seen.max(at(s));
            prop_assert_eq!(core.timing().last_change(), max_seen);
        }
    }
}
