use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::phase::Phase;

/// Anything that can report accumulated time per [`Phase`], e.g. a
/// [`TimerGroup`](crate::TimerGroup) or a plain map of measured seconds.
pub trait PhaseDurations {
    /// Elapsed seconds so far for `phase`, or `None` if it was never timed.
    fn elapsed_secs(&self, phase: Phase) -> Option<f64>;
}

impl PhaseDurations for HashMap<Phase, f64> {
    fn elapsed_secs(&self, phase: Phase) -> Option<f64> {
        self.get(&phase).copied()
    }
}

impl PhaseDurations for BTreeMap<Phase, f64> {
    fn elapsed_secs(&self, phase: Phase) -> Option<f64> {
        self.get(&phase).copied()
    }
}

impl PhaseDurations for HashMap<Phase, Duration> {
    fn elapsed_secs(&self, phase: Phase) -> Option<f64> {
        self.get(&phase).map(Duration::as_secs_f64)
    }
}

impl<T: PhaseDurations + ?Sized> PhaseDurations for &T {
    fn elapsed_secs(&self, phase: Phase) -> Option<f64> {
        (**self).elapsed_secs(phase)
    }
}
