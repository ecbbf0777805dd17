//! Vendor-agnostic delivery of query stats via a pluggable sink.
//!
//! Consumers implement [`StatsSink`] to forward finished [`QueryStats`] to
//! whatever backend they use (logs, Prometheus, OpenTelemetry, an API
//! response cache). The library never depends on a particular backend.
//!
//! **Note:** This module is only available when the `observability` feature is enabled.
//!
//! ## Usage
//!
//! ```ignore
//! use query_stats::metrics::{set_sink, StatsSink};
//! use query_stats::QueryStats;
//! use std::sync::Arc;
//!
//! struct LogSink;
//!
//! impl StatsSink for LogSink {
//!     fn on_query_stats(&self, stats: &QueryStats) {
//!         eprintln!("query took {}s", stats.exec_total_time);
//!     }
//! }
//!
//! set_sink(Arc::new(LogSink));
//! ```

use std::sync::{Arc, OnceLock};

use tracing::warn;

use crate::snapshot::QueryStats;

/// Consumer of finished query snapshots.
///
/// Called synchronously from [`TimerGroup::finish`](crate::TimerGroup::finish),
/// possibly from many threads at once, so implementations must be
/// thread-safe and should return quickly.
pub trait StatsSink: Send + Sync {
    fn on_query_stats(&self, stats: &QueryStats);
}

/// Default sink; stats are silently dropped.
struct NoOpSink;

impl StatsSink for NoOpSink {
    fn on_query_stats(&self, _stats: &QueryStats) {}
}

static SINK: OnceLock<Arc<dyn StatsSink>> = OnceLock::new();

fn sink() -> Arc<dyn StatsSink> {
    SINK.get_or_init(|| Arc::new(NoOpSink)).clone()
}

/// Set the global stats sink.
///
/// Call this once at startup, before the first query finishes. The sink
/// cannot be replaced afterwards; later calls are ignored with a warning.
pub fn set_sink(sink: Arc<dyn StatsSink>) {
    if SINK.set(sink).is_err() {
        warn!(
            "Stats sink was already initialized. Ignoring subsequent set_sink call. Set the sink before the first query finishes."
        );
    }
}

/// Dispatch `stats` to the installed sink.
pub fn record_query_stats(stats: &QueryStats) {
    sink().on_query_stats(stats);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_sink_impl() {
        let sink = NoOpSink;
        sink.on_query_stats(&QueryStats::default());
    }
}
