//! Tick scheduling
//!
//! The interval is wall-clock, independent of frame rate. Callers feed elapsed
//! milliseconds and run however many ticks come due.

use crate::consts::MAX_CATCHUP_TICKS;

/// Fixed-interval accumulator with start/stop
#[derive(Debug, Clone)]
pub struct IntervalScheduler {
    interval_ms: f64,
    accumulator: f64,
    running: bool,
    max_catchup: u32,
}

impl IntervalScheduler {
    /// Non-positive or non-finite intervals fall back to 1 ms
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms: sanitize_interval(interval_ms),
            accumulator: 0.0,
            running: false,
            max_catchup: MAX_CATCHUP_TICKS,
        }
    }

    pub fn with_max_catchup(mut self, max_catchup: u32) -> Self {
        self.max_catchup = max_catchup.max(1);
        self
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    pub fn set_interval_ms(&mut self, interval_ms: f64) {
        self.interval_ms = sanitize_interval(interval_ms);
    }

    /// First tick comes due one full interval after this
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.accumulator = 0.0;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = 0.0;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Add elapsed time, returning how many ticks are due
    ///
    /// Anything beyond `max_catchup` ticks is dropped so a stalled tab does
    /// not come back to a burst of work.
    pub fn advance(&mut self, elapsed_ms: f64) -> u32 {
        if !self.running || !elapsed_ms.is_finite() || elapsed_ms <= 0.0 {
            return 0;
        }
        self.accumulator += elapsed_ms;

        let due = (self.accumulator / self.interval_ms).floor();
        if due < 1.0 {
            return 0;
        }
        if due > self.max_catchup as f64 {
            log::warn!(
                "Dropping {} overdue projector ticks",
                due as u64 - self.max_catchup as u64
            );
            self.accumulator %= self.interval_ms;
            return self.max_catchup;
        }
        self.accumulator -= due * self.interval_ms;
        due as u32
    }
}

fn sanitize_interval(interval_ms: f64) -> f64 {
    if interval_ms.is_finite() && interval_ms > 0.0 {
        interval_ms
    } else {
        1.0
    }
}

/// How one tick's rays are shared between the primary cone and split beams
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RayBudget {
    /// Rays in the primary cone
    pub primary: u32,
    /// Number of split beams
    pub splits: u32,
    /// Rays in each split beam
    pub per_split: u32,
}

impl RayBudget {
    pub fn for_tick(rays_per_tick: u32, split_count: u32) -> Self {
        let primary = rays_per_tick.div_ceil(split_count.saturating_add(1));
        Self {
            primary,
            splits: split_count,
            per_split: (primary / 6).max(1),
        }
    }

    pub fn total(&self) -> u32 {
        self.primary + self.splits * self.per_split
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_nine_splits() {
        let budget = RayBudget::for_tick(200, 9);
        assert_eq!(budget.primary, 20);
        assert_eq!(budget.per_split, 3);
        assert_eq!(budget.total(), 47);
    }

    #[test]
    fn test_budget_no_splits() {
        let budget = RayBudget::for_tick(200, 0);
        assert_eq!(budget.primary, 200);
        assert_eq!(budget.total(), 200);
    }

    #[test]
    fn test_budget_rounds_up_and_floors_split() {
        let budget = RayBudget::for_tick(10, 2);
        assert_eq!(budget.primary, 4);
        assert_eq!(budget.per_split, 1);
        assert_eq!(budget.total(), 6);
    }

    #[test]
    fn test_scheduler_idle_until_started() {
        let mut sched = IntervalScheduler::new(50.0);
        assert_eq!(sched.advance(500.0), 0);
        sched.start();
        assert_eq!(sched.advance(49.0), 0);
        assert_eq!(sched.advance(1.0), 1);
        assert_eq!(sched.advance(120.0), 2);
        // 20 ms carried over
        assert_eq!(sched.advance(30.0), 1);
    }

    #[test]
    fn test_scheduler_stop_discards_progress() {
        let mut sched = IntervalScheduler::new(50.0);
        sched.start();
        sched.advance(40.0);
        sched.stop();
        assert_eq!(sched.advance(40.0), 0);
        sched.start();
        assert_eq!(sched.advance(40.0), 0);
        assert_eq!(sched.advance(10.0), 1);
    }

    #[test]
    fn test_scheduler_caps_catchup() {
        let mut sched = IntervalScheduler::new(10.0).with_max_catchup(3);
        sched.start();
        assert_eq!(sched.advance(1_000.0), 3);
        assert_eq!(sched.advance(0.0), 0);
        assert_eq!(sched.advance(f64::NAN), 0);
    }

    #[test]
    fn test_bad_interval_falls_back() {
        let sched = IntervalScheduler::new(-5.0);
        assert_eq!(sched.interval_ms(), 1.0);
    }
}
