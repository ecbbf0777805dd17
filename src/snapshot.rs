//! Immutable, serializable snapshot of per-phase query timings.

use serde::{Deserialize, Deserializer, Serialize, de::Error as _};
use strum::IntoEnumIterator;
use tracing::debug;
use utoipa::ToSchema;

use crate::phase::Phase;
use crate::timer_group::TimerGroup;
use crate::traits::PhaseDurations;

/// Time spent in every [`Phase`] of a query, in seconds.
///
/// Every field is always present, finite and non-negative, and phases that
/// were never timed report `0.0`. The serialized key names are part of the
/// public contract and must not change:
///
/// | Phase              | Key                    |
/// |--------------------|------------------------|
/// | `EvalTotal`        | `evalTotalTime`        |
/// | `ResultSort`       | `resultSortTime`       |
/// | `QueryPreparation` | `queryPreparationTime` |
/// | `InnerEval`        | `innerEvalTime`        |
/// | `ResultAppend`     | `resultAppendTime`     |
/// | `ExecQueueWait`    | `execQueueTime`        |
/// | `ExecTotal`        | `execTotalTime`        |
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use query_stats::{Phase, QueryStats, TimerGroup};
///
/// let mut timers = TimerGroup::new();
/// timers.record(Phase::EvalTotal, Duration::from_millis(1500));
/// timers.record(Phase::ExecTotal, Duration::from_secs(2));
///
/// let stats = QueryStats::from_timers(&timers);
/// assert_eq!(stats.eval_total_time, 1.5);
/// assert_eq!(stats.inner_eval_time, 0.0);
/// assert_eq!(stats.exec_total_time, 2.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, ToSchema)]
pub struct QueryStats {
    #[serde(rename = "evalTotalTime", deserialize_with = "non_negative_secs")]
    pub eval_total_time: f64,
    #[serde(rename = "resultSortTime", deserialize_with = "non_negative_secs")]
    pub result_sort_time: f64,
    #[serde(rename = "queryPreparationTime", deserialize_with = "non_negative_secs")]
    pub query_preparation_time: f64,
    #[serde(rename = "innerEvalTime", deserialize_with = "non_negative_secs")]
    pub inner_eval_time: f64,
    #[serde(rename = "resultAppendTime", deserialize_with = "non_negative_secs")]
    pub result_append_time: f64,
    #[serde(rename = "execQueueTime", deserialize_with = "non_negative_secs")]
    pub exec_queue_time: f64,
    #[serde(rename = "execTotalTime", deserialize_with = "non_negative_secs")]
    pub exec_total_time: f64,
}

impl QueryStats {
    /// Build a snapshot from whatever `source` has measured so far.
    ///
    /// `source` is only read. Phases it has no timer for stay at `0.0`, and
    /// negative or non-finite readings are recorded as `0.0`.
    pub fn from_timers<S: PhaseDurations + ?Sized>(source: &S) -> Self {
        let mut stats = QueryStats::default();
        for phase in Phase::iter() {
            if let Some(secs) = source.elapsed_secs(phase) {
                *stats.slot_mut(phase) = sanitize_secs(secs);
            }
        }

        debug!(
            event = "QueryStats",
            eval_total = stats.eval_total_time,
            result_sort = stats.result_sort_time,
            query_preparation = stats.query_preparation_time,
            inner_eval = stats.inner_eval_time,
            result_append = stats.result_append_time,
            exec_queue = stats.exec_queue_time,
            exec_total = stats.exec_total_time
        );
        stats
    }

    /// Seconds recorded for `phase`.
    pub fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::EvalTotal => self.eval_total_time,
            Phase::ResultSort => self.result_sort_time,
            Phase::QueryPreparation => self.query_preparation_time,
            Phase::InnerEval => self.inner_eval_time,
            Phase::ResultAppend => self.result_append_time,
            Phase::ExecQueueWait => self.exec_queue_time,
            Phase::ExecTotal => self.exec_total_time,
        }
    }

    /// `(phase, seconds)` pairs in phase declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Phase, f64)> + '_ {
        Phase::iter().map(move |phase| (phase, self.get(phase)))
    }

    /// The key `phase` is serialized under, e.g. `"execQueueTime"`.
    pub const fn serialization_key(phase: Phase) -> &'static str {
        match phase {
            Phase::EvalTotal => "evalTotalTime",
            Phase::ResultSort => "resultSortTime",
            Phase::QueryPreparation => "queryPreparationTime",
            Phase::InnerEval => "innerEvalTime",
            Phase::ResultAppend => "resultAppendTime",
            Phase::ExecQueueWait => "execQueueTime",
            Phase::ExecTotal => "execTotalTime",
        }
    }

    fn slot_mut(&mut self, phase: Phase) -> &mut f64 {
        match phase {
            Phase::EvalTotal => &mut self.eval_total_time,
            Phase::ResultSort => &mut self.result_sort_time,
            Phase::QueryPreparation => &mut self.query_preparation_time,
            Phase::InnerEval => &mut self.inner_eval_time,
            Phase::ResultAppend => &mut self.result_append_time,
            Phase::ExecQueueWait => &mut self.exec_queue_time,
            Phase::ExecTotal => &mut self.exec_total_time,
        }
    }
}

fn sanitize_secs(secs: f64) -> f64 {
    if secs.is_finite() && secs > 0.0 { secs } else { 0.0 }
}

fn non_negative_secs<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let secs = f64::deserialize(deserializer)?;
    if secs.is_finite() && secs >= 0.0 {
        Ok(secs)
    } else {
        Err(D::Error::custom(format!(
            "phase duration must be a finite, non-negative number of seconds, got {secs}"
        )))
    }
}

impl From<&TimerGroup> for QueryStats {
    fn from(timers: &TimerGroup) -> Self {
        QueryStats::from_timers(timers)
    }
}
