//! Frame rate tracking fed by the loop's measured elapsed time

use super::ring_buffer::RingBuffer;
use std::time::Duration;

pub struct FrameTimer {
    frame_times: RingBuffer<Duration>,
    frames: u64,
}

impl FrameTimer {
    pub fn new(window: usize) -> Self {
        Self {
            frame_times: RingBuffer::new(window),
            frames: 0,
        }
    }

    /// Record the wall time that elapsed since the previous frame.
    pub fn record(&mut self, elapsed: Duration) {
        self.frame_times.record(elapsed);
        self.frames += 1;
    }

    /// Total frames recorded since construction.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        let mean = self.frame_times.mean().as_secs_f64();
        if mean > 0.0 {
            1.0 / mean
        } else {
            0.0
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_times.mean().as_secs_f64() * 1000.0
    }

    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        let (min, max) = self.frame_times.min_max();
        (min.as_secs_f64() * 1000.0, max.as_secs_f64() * 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fps_follows_mean_frame_time() {
        let mut timer = FrameTimer::new(4);
        for _ in 0..4 {
            timer.record(Duration::from_millis(20));
        }

        assert_eq!(timer.frames(), 4);
        assert!((timer.fps() - 50.0).abs() < 1e-9);
        assert!((timer.frame_time_ms() - 20.0).abs() < 1e-9);
    }

    #[test]
    fn zero_elapsed_does_not_divide_by_zero() {
        let mut timer = FrameTimer::new(2);
        timer.record(Duration::ZERO);
        assert_eq!(timer.fps(), 0.0);
    }
}
