use std::time::Duration;

/// Fixed-rate frame counter for designs that play once and then finish
/// (explosions and the like).
///
/// Elapsed time accumulates across ticks; each full `frame_delay` moves to
/// the next frame. The animation completes when the last frame has been
/// shown for its full delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameAnimation {
    frames: u32,
    frame_delay: Duration,
    current: u32,
    pending: Duration,
}

impl FrameAnimation {
    pub fn new(frames: u32, frame_delay: Duration) -> Self {
        Self {
            frames,
            frame_delay,
            current: 0,
            pending: Duration::ZERO,
        }
    }

    /// Returns `true` if the frame changed.
    pub fn advance(&mut self, elapsed: Duration) -> bool {
        if self.is_completed() {
            return false;
        }
        self.pending += elapsed;

        let mut changed = false;
        while self.current < self.frames && self.pending >= self.frame_delay {
            self.pending -= self.frame_delay;
            self.current += 1;
            changed = true;
        }
        changed
    }

    /// Index of the frame on show; equals `frames()` once completed.
    pub fn current_frame(&self) -> u32 {
        self.current
    }

    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn is_completed(&self) -> bool {
        self.current >= self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DELAY: Duration = Duration::from_millis(50);

    #[test]
    fn frames_advance_with_accumulated_time() {
        let mut anim = FrameAnimation::new(3, DELAY);

        assert!(!anim.advance(Duration::from_millis(30)));
        assert_eq!(anim.current_frame(), 0);
        assert!(anim.advance(Duration::from_millis(30)));
        assert_eq!(anim.current_frame(), 1);

        // A long tick skips frames rather than stretching the animation.
        assert!(anim.advance(Duration::from_millis(100)));
        assert_eq!(anim.current_frame(), 3);
        assert!(anim.is_completed());
        assert!(!anim.advance(DELAY));
        assert_eq!(anim.current_frame(), 3);
    }

    #[test]
    fn empty_animation_starts_completed() {
        let mut anim = FrameAnimation::new(0, DELAY);
        assert!(anim.is_completed());
        assert!(!anim.advance(DELAY));
    }
}
