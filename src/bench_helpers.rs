use std::hint::black_box;
use std::time::Duration;

use strum::IntoEnumIterator;

use crate::phase::Phase;
use crate::snapshot::QueryStats;
use crate::timer_group::TimerGroup;

// Thin wrappers so benches can drive the hot paths without duplicating
// setup. Only compiled with the `bench-internal` feature.

/// A group with every phase timed, as a fully instrumented query would have.
pub fn full_timer_group() -> TimerGroup {
    let mut group = TimerGroup::new();
    for phase in Phase::iter() {
        group.record(phase, Duration::from_micros(100 * (phase.code() as u64 + 1)));
    }
    group
}

/// A group with only the outermost phases timed.
pub fn sparse_timer_group() -> TimerGroup {
    let mut group = TimerGroup::new();
    group.record(Phase::EvalTotal, Duration::from_millis(1500));
    group.record(Phase::ExecTotal, Duration::from_secs(2));
    group
}

pub fn timer_guard_overhead(iters: usize) -> u128 {
    let mut group = TimerGroup::new();
    for _ in 0..iters {
        let _guard = group.time(black_box(Phase::InnerEval));
    }
    group
        .timer(Phase::InnerEval)
        .map(|timer| timer.elapsed().as_nanos())
        .unwrap_or_default()
}

pub fn build_snapshots(group: &TimerGroup, iters: usize) -> f64 {
    let mut total = 0.0;
    for _ in 0..iters {
        let stats = QueryStats::from_timers(black_box(group));
        total += stats.exec_total_time;
    }
    total
}

pub fn serialize_snapshot(stats: &QueryStats) -> usize {
    serde_json::to_string(stats).map(|s| s.len()).unwrap_or_default()
}
