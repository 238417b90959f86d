//! Fixed-capacity sample window for rolling frame statistics

use std::time::Duration;

pub struct RingBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
    cursor: usize,
}

impl<T: Copy> RingBuffer<T> {
    /// A zero capacity is bumped to one so `record` never divides by zero.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
        }
    }

    /// Store a sample, overwriting the oldest once the window is full.
    pub fn record(&mut self, sample: T) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.cursor] = sample;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
    }

    /// Most recently recorded sample.
    pub fn latest(&self) -> Option<T> {
        if self.samples.is_empty() {
            return None;
        }
        let idx = (self.cursor + self.capacity - 1) % self.capacity;
        self.samples.get(idx).copied()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.cursor = 0;
    }
}

impl RingBuffer<Duration> {
    pub fn mean(&self) -> Duration {
        if self.samples.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.samples.iter().sum();
        total / self.samples.len() as u32
    }

    pub fn min_max(&self) -> (Duration, Duration) {
        let min = self.samples.iter().min().copied().unwrap_or_default();
        let max = self.samples.iter().max().copied().unwrap_or_default();
        (min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_drops_oldest_sample() {
        let mut window = RingBuffer::new(3);
        for ms in [10, 20, 30, 40] {
            window.record(Duration::from_millis(ms));
        }

        assert_eq!(window.len(), 3);
        assert_eq!(window.mean(), Duration::from_millis(30)); // (20 + 30 + 40) / 3
        assert_eq!(window.latest(), Some(Duration::from_millis(40)));
        assert_eq!(
            window.min_max(),
            (Duration::from_millis(20), Duration::from_millis(40))
        );
    }

    #[test]
    fn empty_window_reports_zero() {
        let window = RingBuffer::<Duration>::new(0);
        assert!(window.is_empty());
        assert_eq!(window.mean(), Duration::ZERO);
        assert_eq!(window.latest(), None);
    }
}
