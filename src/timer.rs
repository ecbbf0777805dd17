//! Accumulating timers for measuring phase durations.
//!
//! A [`Timer`] keeps the sum of every interval it has measured, so a phase
//! that is entered several times during one query reports its total cost.
//! [`TimerGuard`] is the RAII form: it records the elapsed time when dropped,
//! even if execution exits early via panic or return.

use std::time::{Duration, Instant};

/// Cumulative timer that can be started and stopped repeatedly.
#[derive(Debug, Clone, Default)]
pub struct Timer {
    accumulated: Duration,
    started: Option<Instant>,
}

impl Timer {
    /// A stopped timer with nothing recorded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start measuring a new interval. Starting a running timer is a no-op.
    pub fn start(&mut self) -> &mut Self {
        if self.started.is_none() {
            self.started = Some(Instant::now());
        }
        self
    }

    /// Stop the current interval and add it to the total.
    ///
    /// Stopping a timer that is not running does nothing.
    pub fn stop(&mut self) -> &mut Self {
        if let Some(started) = self.started.take() {
            self.accumulated += started.elapsed();
        }
        self
    }

    /// Whether an interval is currently being measured.
    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    /// Add an interval that was measured elsewhere.
    pub fn record(&mut self, duration: Duration) {
        self.accumulated += duration;
    }

    /// Total time so far, including the running interval if any.
    pub fn elapsed(&self) -> Duration {
        match self.started {
            Some(started) => self.accumulated + started.elapsed(),
            None => self.accumulated,
        }
    }

    /// [`Timer::elapsed`] in fractional seconds.
    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed().as_secs_f64()
    }

    /// Measure one interval for as long as the returned guard lives.
    pub fn guard(&mut self) -> TimerGuard<'_> {
        TimerGuard::new(self)
    }
}

/// RAII guard that adds its lifetime to a [`Timer`] on drop.
///
/// # Example
///
/// ```rust
/// use query_stats::Timer;
///
/// let mut timer = Timer::new();
/// {
///     let _guard = timer.guard();
///     // ... work being measured ...
/// } // guard is dropped here, timer is updated
/// assert!(!timer.is_running());
/// ```
pub struct TimerGuard<'a> {
    start: Instant,
    timer: &'a mut Timer,
}

impl<'a> TimerGuard<'a> {
    /// Start measuring an interval that is added to `timer` on drop.
    pub fn new(timer: &'a mut Timer) -> Self {
        Self {
            start: Instant::now(),
            timer,
        }
    }
}

impl Drop for TimerGuard<'_> {
    fn drop(&mut self) {
        self.timer.record(self.start.elapsed());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_guard_records_elapsed() {
        let mut timer = Timer::new();
        {
            let _guard = timer.guard();
            thread::sleep(Duration::from_millis(10));
        }
        assert!(timer.elapsed().as_millis() >= 10);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_guard_accumulates() {
        let mut timer = Timer::new();
        for _ in 0..3 {
            let _guard = timer.guard();
            thread::sleep(Duration::from_millis(5));
        }
        assert!(timer.elapsed().as_millis() >= 15);
    }

    #[test]
    fn test_start_stop_accumulates_across_restarts() {
        let mut timer = Timer::new();
        timer.start();
        thread::sleep(Duration::from_millis(5));
        timer.stop();
        let first = timer.elapsed();
        assert!(first.as_millis() >= 5);

        timer.start();
        thread::sleep(Duration::from_millis(5));
        timer.stop();
        assert!(timer.elapsed() >= first + Duration::from_millis(5));
    }

    #[test]
    fn test_stop_without_start_is_noop() {
        let mut timer = Timer::new();
        timer.stop().stop();
        assert_eq!(timer.elapsed(), Duration::ZERO);
        assert_eq!(timer.elapsed_secs(), 0.0);
    }

    #[test]
    fn test_double_start_keeps_first_instant() {
        let mut timer = Timer::new();
        timer.start();
        thread::sleep(Duration::from_millis(5));
        timer.start();
        timer.stop();
        assert!(timer.elapsed().as_millis() >= 5);
    }

    #[test]
    fn test_running_timer_reports_current_interval() {
        let mut timer = Timer::new();
        timer.record(Duration::from_secs(1));
        timer.start();
        thread::sleep(Duration::from_millis(2));
        assert!(timer.is_running());
        assert!(timer.elapsed() > Duration::from_secs(1));
    }

    #[test]
    fn test_record_adds_duration() {
        let mut timer = Timer::new();
        timer.record(Duration::from_millis(1500));
        timer.record(Duration::from_millis(500));
        assert_eq!(timer.elapsed_secs(), 2.0);
    }
}
