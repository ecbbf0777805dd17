//! Per-query collection of phase timers.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::time::Duration;

use tracing::trace;

use crate::phase::Phase;
use crate::snapshot::QueryStats;
use crate::timer::{Timer, TimerGuard};
use crate::traits::PhaseDurations;

/// Timers for one query, keyed by [`Phase`].
///
/// Timers are created lazily the first time a phase is touched, and the
/// group iterates them in creation order. Phases that were never touched are
/// absent, which a [`QueryStats`] snapshot reports as zero.
///
/// Phases nest: `ExecTotal` encloses `ExecQueueWait`, and `EvalTotal`
/// encloses `QueryPreparation` and `InnerEval`. A [`TimerGuard`] from
/// [`TimerGroup::time`] borrows the whole group, so it only suits the
/// innermost phase. Time enclosing phases with [`TimerGroup::measure`], or
/// with [`TimerGroup::start`] and [`TimerGroup::stop`].
///
/// ```rust
/// use query_stats::{Phase, TimerGroup};
///
/// let mut timers = TimerGroup::new();
/// timers.measure(Phase::ExecTotal, |timers| {
///     timers.measure(Phase::EvalTotal, |timers| {
///         let _inner = timers.time(Phase::InnerEval);
///         // ... evaluate ...
///     });
/// });
/// assert_eq!(timers.len(), 3);
/// ```
///
/// The group is owned by a single query. Wrap it in a lock to time phases
/// from several threads.
#[derive(Debug, Clone, Default)]
pub struct TimerGroup {
    timers: Vec<(Phase, Timer)>,
}

impl TimerGroup {
    /// An empty group with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// The timer for `phase`, created if it does not exist yet.
    pub fn timer_mut(&mut self, phase: Phase) -> &mut Timer {
        let idx = match self.position(phase) {
            Some(idx) => idx,
            None => {
                trace!(event = "TimerGroup", phase = phase.identifier(), "created timer");
                self.timers.push((phase, Timer::new()));
                self.timers.len() - 1
            }
        };
        &mut self.timers[idx].1
    }

    /// The timer for `phase`, if it has been touched.
    pub fn timer(&self, phase: Phase) -> Option<&Timer> {
        self.position(phase).map(|idx| &self.timers[idx].1)
    }

    /// Whether a timer exists for `phase`.
    pub fn contains(&self, phase: Phase) -> bool {
        self.position(phase).is_some()
    }

    /// Start (or keep running) the timer for `phase`.
    pub fn start(&mut self, phase: Phase) -> &mut Timer {
        self.timer_mut(phase).start()
    }

    /// Stop the timer for `phase`. Does nothing if no such timer exists.
    pub fn stop(&mut self, phase: Phase) {
        if let Some(idx) = self.position(phase) {
            self.timers[idx].1.stop();
        }
    }

    /// Time `phase` for as long as the returned guard lives.
    ///
    /// The guard borrows the group; see [`TimerGroup::measure`] for phases
    /// that enclose others.
    pub fn time(&mut self, phase: Phase) -> TimerGuard<'_> {
        self.timer_mut(phase).guard()
    }

    /// Time `phase` around `f`, which may time nested phases on the group.
    ///
    /// The interval is stopped on the normal return path only.
    pub fn measure<R>(&mut self, phase: Phase, f: impl FnOnce(&mut Self) -> R) -> R {
        self.start(phase);
        let result = f(self);
        self.stop(phase);
        result
    }

    /// Add an externally measured interval to `phase`.
    pub fn record(&mut self, phase: Phase, duration: Duration) {
        self.timer_mut(phase).record(duration);
    }

    /// Timers in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &Timer)> {
        self.timers.iter().map(|(phase, timer)| (*phase, timer))
    }

    /// Number of phases that have a timer.
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Whether no phase has been touched yet.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Snapshot the current state of every timer.
    pub fn stats(&self) -> QueryStats {
        QueryStats::from_timers(self)
    }

    /// Snapshot the group and hand the result to the installed stats sink.
    pub fn finish(&self) -> QueryStats {
        let stats = self.stats();
        #[cfg(feature = "observability")]
        crate::metrics::record_query_stats(&stats);
        stats
    }

    fn position(&self, phase: Phase) -> Option<usize> {
        self.timers.iter().position(|(p, _)| *p == phase)
    }
}

impl PhaseDurations for TimerGroup {
    fn elapsed_secs(&self, phase: Phase) -> Option<f64> {
        self.timer(phase).map(Timer::elapsed_secs)
    }
}

/// One line per timer, in creation order, e.g. `Inner eval time: 1.5s`.
impl Display for TimerGroup {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        for (idx, (phase, timer)) in self.iter().enumerate() {
            if idx > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {:?}", phase, timer.elapsed())?;
        }
        Ok(())
    }
}
