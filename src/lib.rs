// src/lib.rs
pub use error::StatsError;
pub use phase::{Phase, UNKNOWN_PHASE_NAME, display_name_for_code};
pub use snapshot::QueryStats;
pub use timer::{Timer, TimerGuard};
pub use timer_group::TimerGroup;
pub use traits::PhaseDurations;

mod error;
mod phase;
mod snapshot;
mod timer;
mod timer_group;
mod traits;

#[cfg(feature = "bench-internal")]
pub mod bench_helpers;
#[cfg(feature = "observability")]
pub mod metrics;
