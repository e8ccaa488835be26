//! Frame clock and countdown timers
//!
//! Both measure monotonic wall time. Every method that reads the clock has an
//! `_at` twin taking the instant explicitly, so the simulation can be driven
//! from a single sampled instant per frame (and from fixed instants in tests).

use std::time::Instant;

/// Measures the time between successive ticks (the frame delta)
#[derive(Debug, Clone, Default)]
pub struct Clock {
    start: Option<Instant>,
    dt: f32,
    ticking: bool,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin ticking. Does nothing while already ticking.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if !self.ticking {
            self.ticking = true;
            self.start = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.ticking = false;
    }

    /// Seconds since the previous tick (or since `start`), 0 when stopped
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        if !self.ticking {
            return 0.0;
        }
        let from = self.start.unwrap_or(now);
        self.dt = now.saturating_duration_since(from).as_secs_f32();
        self.start = Some(now);
        self.dt
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Delta measured by the last tick
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Countdown over a fixed duration in seconds.
///
/// Elapsed time is always `now - start` from the single start point; ticks
/// never accumulate deltas.
#[derive(Debug, Clone)]
pub struct Timer {
    start: Option<Instant>,
    passed: f32,
    time: f32,
    ticking: bool,
}

impl Timer {
    /// Create a stopped timer lasting `time` seconds
    pub fn new(time: f32) -> Self {
        Self {
            start: None,
            passed: 0.0,
            time,
            ticking: false,
        }
    }

    /// Begin counting down. The start point is only recorded when not already ticking.
    pub fn start(&mut self) {
        self.start_at(Instant::now());
    }

    pub fn start_at(&mut self, now: Instant) {
        if !self.ticking {
            self.ticking = true;
            self.start = Some(now);
        }
    }

    pub fn stop(&mut self) {
        self.ticking = false;
    }

    /// Zero the elapsed counter; the ticking flag is left alone
    pub fn reset(&mut self) {
        self.passed = 0.0;
    }

    /// Advance the countdown and return the elapsed seconds.
    ///
    /// Returns 0 once the duration is used up: elapsed is clamped to the total
    /// and the timer stops.
    pub fn tick(&mut self) -> f32 {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> f32 {
        if self.ticking && self.passed < self.time {
            let from = self.start.unwrap_or(now);
            let passed = now.saturating_duration_since(from).as_secs_f32();
            if passed < self.time {
                self.passed = passed;
                return passed;
            }
        } else if self.passed < self.time {
            return 0.0;
        }
        self.passed = self.time;
        self.stop();
        0.0
    }

    pub fn set_timer(&mut self, time: f32) {
        self.time = time;
    }

    pub fn is_ticking(&self) -> bool {
        self.ticking
    }

    /// Remaining seconds; exactly 0 once expired
    pub fn time_left(&self) -> f32 {
        self.time - self.passed
    }

    pub fn duration(&self) -> f32 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn secs(s: f32) -> Duration {
        Duration::from_secs_f32(s)
    }

    #[test]
    fn test_clock_not_ticking_returns_zero() {
        let mut clock = Clock::new();
        assert_eq!(clock.tick(), 0.0);
        assert!(!clock.is_ticking());
    }

    #[test]
    fn test_clock_measures_between_ticks() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        clock.start_at(t0);
        let dt = clock.tick_at(t0 + secs(0.25));
        assert!((dt - 0.25).abs() < 1e-4);
        // Reference point moved: next delta is relative to the previous tick
        let dt = clock.tick_at(t0 + secs(0.35));
        assert!((dt - 0.1).abs() < 1e-4);
        assert!((clock.dt() - 0.1).abs() < 1e-4);
    }

    #[test]
    fn test_clock_start_is_idempotent() {
        let t0 = Instant::now();
        let mut clock = Clock::new();
        clock.start_at(t0);
        clock.start_at(t0 + secs(1.0));
        let dt = clock.tick_at(t0 + secs(1.5));
        assert!((dt - 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_timer_counts_from_start_point() {
        let t0 = Instant::now();
        let mut timer = Timer::new(2.0);
        timer.start_at(t0);
        assert!((timer.tick_at(t0 + secs(0.5)) - 0.5).abs() < 1e-4);
        // Elapsed is recomputed from the start point, not accumulated
        assert!((timer.tick_at(t0 + secs(0.75)) - 0.75).abs() < 1e-4);
        assert!((timer.time_left() - 1.25).abs() < 1e-4);
    }

    #[test]
    fn test_timer_clamps_at_expiry() {
        let t0 = Instant::now();
        let mut timer = Timer::new(0.5);
        timer.start_at(t0);
        assert_eq!(timer.tick_at(t0 + secs(0.8)), 0.0);
        assert!(!timer.is_ticking());
        assert_eq!(timer.time_left(), 0.0);

        // Further ticks stay clamped
        assert_eq!(timer.tick_at(t0 + secs(5.0)), 0.0);
        assert_eq!(timer.time_left(), 0.0);
    }

    #[test]
    fn test_timer_stopped_does_not_advance() {
        let t0 = Instant::now();
        let mut timer = Timer::new(1.0);
        assert_eq!(timer.tick_at(t0 + secs(3.0)), 0.0);
        assert_eq!(timer.time_left(), 1.0);
        assert!(!timer.is_ticking());
    }

    #[test]
    fn test_timer_reset_keeps_ticking_flag() {
        let t0 = Instant::now();
        let mut timer = Timer::new(1.0);
        timer.start_at(t0);
        timer.tick_at(t0 + secs(0.4));
        timer.reset();
        assert!(timer.is_ticking());
        assert_eq!(timer.time_left(), 1.0);
    }

    #[test]
    fn test_timer_restart_after_expiry() {
        let t0 = Instant::now();
        let mut timer = Timer::new(0.5);
        timer.start_at(t0);
        timer.tick_at(t0 + secs(1.0));
        assert_eq!(timer.time_left(), 0.0);

        timer.reset();
        timer.start_at(t0 + secs(2.0));
        assert!((timer.tick_at(t0 + secs(2.25)) - 0.25).abs() < 1e-4);
        assert!(timer.is_ticking());
    }
}
