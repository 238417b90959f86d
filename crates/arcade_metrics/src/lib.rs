//! Arcade Metrics - frame rate and event counting for the game loop
//!
//! Instrumentation compiles away entirely unless the `metrics` feature is
//! enabled; the stubs below keep the same API so callers never need `cfg`.
//!
//! # Usage
//!
//! ```ignore
//! use arcade_metrics::{Counter, FrameTimer};
//!
//! let mut timer = FrameTimer::new(60);
//! timer.record(elapsed);
//! println!("FPS: {:.1}", timer.fps());
//! ```

#[cfg(feature = "metrics")]
mod counter;
#[cfg(feature = "metrics")]
mod frame_timer;
#[cfg(feature = "metrics")]
mod ring_buffer;

#[cfg(feature = "metrics")]
pub use counter::Counter;
#[cfg(feature = "metrics")]
pub use frame_timer::FrameTimer;
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
pub struct FrameTimer;

#[cfg(not(feature = "metrics"))]
impl FrameTimer {
    pub fn new(_window: usize) -> Self { Self }
    pub fn record(&mut self, _elapsed: std::time::Duration) {}
    pub fn frames(&self) -> u64 { 0 }
    pub fn fps(&self) -> f64 { 0.0 }
    pub fn frame_time_ms(&self) -> f64 { 0.0 }
    pub fn frame_time_range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
}

#[cfg(not(feature = "metrics"))]
pub struct RingBuffer<T>(std::marker::PhantomData<T>);

#[cfg(not(feature = "metrics"))]
impl<T> RingBuffer<T> {
    pub fn new(_capacity: usize) -> Self { Self(std::marker::PhantomData) }
    pub fn record(&mut self, _sample: T) {}
    pub fn len(&self) -> usize { 0 }
    pub fn is_empty(&self) -> bool { true }
}

#[cfg(not(feature = "metrics"))]
#[derive(Default)]
pub struct Counter;

#[cfg(not(feature = "metrics"))]
impl Counter {
    pub fn new() -> Self { Self }
    pub fn increment(&mut self, _name: &'static str, _by: u64) {}
    pub fn get(&self, _name: &str) -> u64 { 0 }
    pub fn reset_all(&mut self) {}
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ { std::iter::empty() }
}
