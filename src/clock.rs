//! Tick sources
//!
//! A host feeds wall-clock or frame time into a `TickSource` and gets back
//! how many simulation ticks are due. The source never runs the engine
//! itself, so the same engine can be driven from a render loop, a timer
//! thread, or a test with virtual time.

use std::time::Duration;

pub trait TickSource {
    /// Feed elapsed time, return the number of ticks to run now
    fn advance(&mut self, elapsed: Duration) -> u32;

    /// Drop any partially accumulated time
    fn reset(&mut self);
}

/// Fixed timestep accumulator for frame-driven loops
///
/// Frames arrive at whatever rate the host manages; ticks come out at
/// exactly `step`. When a frame is very late the backlog is capped at
/// `max_substeps` and the rest is dropped.
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    step: Duration,
    max_substeps: u32,
    accumulator: Duration,
}

impl FixedTimestep {
    pub fn new(step: Duration, max_substeps: u32) -> Self {
        Self {
            step: step.max(Duration::from_nanos(1)),
            max_substeps: max_substeps.max(1),
            accumulator: Duration::ZERO,
        }
    }

    pub fn step(&self) -> Duration {
        self.step
    }

    /// Fraction of a step currently accumulated, for render interpolation
    pub fn alpha(&self) -> f32 {
        self.accumulator.as_secs_f32() / self.step.as_secs_f32()
    }
}

impl TickSource for FixedTimestep {
    fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }

        if self.accumulator >= self.step {
            log::trace!("Dropping {:?} of simulation backlog", self.accumulator);
            self.accumulator = Duration::ZERO;
        }
        substeps
    }

    fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

/// Wall-clock interval timer
///
/// Fires at most once per `advance`, like a browser interval that never
/// stacks missed callbacks. Leftover time within one interval carries over.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    interval: Duration,
    since_last: Duration,
}

impl IntervalTimer {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_nanos(1)),
            since_last: Duration::ZERO,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl TickSource for IntervalTimer {
    fn advance(&mut self, elapsed: Duration) -> u32 {
        self.since_last += elapsed;
        if self.since_last < self.interval {
            return 0;
        }
        let nanos = self.since_last.as_nanos() % self.interval.as_nanos();
        self.since_last = Duration::from_nanos(nanos as u64);
        1
    }

    fn reset(&mut self) {
        self.since_last = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_timestep_accumulates() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10), 8);
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
        assert_eq!(clock.advance(Duration::from_millis(4)), 0);
        assert_eq!(clock.advance(Duration::from_millis(4)), 1);
        assert_eq!(clock.advance(Duration::from_millis(25)), 2);
        assert!((clock.alpha() - 0.7).abs() < 0.01);
    }

    #[test]
    fn test_fixed_timestep_caps_backlog() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10), 3);
        assert_eq!(clock.advance(Duration::from_secs(1)), 3);
        // Backlog dropped, not replayed, including the partial step
        assert_eq!(clock.alpha(), 0.0);
        assert_eq!(clock.advance(Duration::ZERO), 0);
        assert_eq!(clock.advance(Duration::from_millis(9)), 0);
    }

    #[test]
    fn test_fixed_timestep_reset() {
        let mut clock = FixedTimestep::new(Duration::from_millis(10), 8);
        clock.advance(Duration::from_millis(9));
        clock.reset();
        assert_eq!(clock.advance(Duration::from_millis(9)), 0);
    }

    #[test]
    fn test_interval_timer_fires_once_per_interval() {
        let mut timer = IntervalTimer::new(Duration::from_millis(150));
        assert_eq!(timer.advance(Duration::from_millis(100)), 0);
        assert_eq!(timer.advance(Duration::from_millis(60)), 1);
        // 10ms carried over
        assert_eq!(timer.advance(Duration::from_millis(139)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_interval_timer_does_not_stack() {
        let mut timer = IntervalTimer::new(Duration::from_millis(150));
        assert_eq!(timer.advance(Duration::from_millis(1000)), 1);
        // 1000 % 150 = 100ms carried over
        assert_eq!(timer.advance(Duration::from_millis(49)), 0);
        assert_eq!(timer.advance(Duration::from_millis(1)), 1);
    }
}
