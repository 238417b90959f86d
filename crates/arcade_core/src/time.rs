//! Frame clock
//!
//! Variable timestep: each tick reports the wall time since the previous
//! one, and everything that moves scales by it.

use std::time::{Duration, Instant};

/// Free-running frame clock. Ticks only while started.
#[derive(Debug, Default)]
pub struct FrameClock {
    running: bool,
    last_tick: Option<Instant>,
    tick_count: u64,
    total_elapsed: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start ticking from `now`. Returns `false` if already running.
    ///
    /// Restarting after a stop rebases the clock, so time spent stopped is
    /// never reported as elapsed.
    pub fn start_at(&mut self, now: Instant) -> bool {
        if self.running {
            return false;
        }
        self.running = true;
        self.last_tick = Some(now);
        true
    }

    /// Stop ticking. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        if !self.running {
            return false;
        }
        self.running = false;
        true
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance to `now`, returning the time elapsed since the previous tick,
    /// or `None` while stopped.
    pub fn advance(&mut self, now: Instant) -> Option<Duration> {
        if !self.running {
            return None;
        }
        let last = self.last_tick.unwrap_or(now);
        let elapsed = now.saturating_duration_since(last);
        self.last_tick = Some(now);
        self.tick_count += 1;
        self.total_elapsed += elapsed;
        Some(elapsed)
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn total_elapsed(&self) -> Duration {
        self.total_elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_elapsed_between_ticks() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        assert!(clock.start_at(t0));

        assert_eq!(clock.advance(t0 + Duration::from_millis(16)), Some(Duration::from_millis(16)));
        assert_eq!(clock.advance(t0 + Duration::from_millis(40)), Some(Duration::from_millis(24)));
        assert_eq!(clock.tick_count(), 2);
        assert_eq!(clock.total_elapsed(), Duration::from_millis(40));
    }

    #[test]
    fn start_and_stop_are_idempotent() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();

        assert!(!clock.stop());
        assert!(clock.start_at(t0));
        assert!(!clock.start_at(t0 + Duration::from_secs(5)));
        assert!(clock.stop());
        assert!(!clock.stop());
        assert_eq!(clock.advance(t0 + Duration::from_secs(1)), None);
        assert_eq!(clock.tick_count(), 0);
    }

    #[test]
    fn restart_does_not_count_stopped_time() {
        let t0 = Instant::now();
        let mut clock = FrameClock::new();
        clock.start_at(t0);
        clock.stop();

        clock.start_at(t0 + Duration::from_secs(10));
        let elapsed = clock.advance(t0 + Duration::from_millis(10_020));
        assert_eq!(elapsed, Some(Duration::from_millis(20)));
    }

    #[test]
    fn clock_going_backwards_reports_zero() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let mut clock = FrameClock::new();
        clock.start_at(t0);
        assert_eq!(clock.advance(t0 - Duration::from_millis(5)), Some(Duration::ZERO));
    }
}
