//! 2D math for positioned entities
//!
//! Re-exports glam with the axis-aligned rectangle used by bounds checks
//! and the collision broad phase.

pub use glam::*;

/// Axis-aligned rectangle in surface coordinates (y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    /// Rectangle anchored at `location` (top-left) spanning `size`.
    /// Negative extents collapse to zero.
    pub fn new(location: Vec2, size: Vec2) -> Self {
        Self {
            min: location,
            max: location + size.max(Vec2::ZERO),
        }
    }

    pub fn from_min_max(min: Vec2, max: Vec2) -> Self {
        Self { min, max: max.max(min) }
    }

    pub fn location(&self) -> Vec2 {
        self.min
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// True when the rectangle covers no area (a shared edge or corner).
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Overlapping region of two rectangles.
    ///
    /// Edges are inclusive: rectangles that merely touch produce a
    /// degenerate intersection rather than `None`.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if min.x > max.x || min.y > max.y {
            return None;
        }
        Some(Rect { min, max })
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// Half-open containment: `min` is inside, `max` is not.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_rects_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::splat(5.0), Vec2::splat(10.0));

        let overlap = a.intersection(&b).unwrap();
        assert_eq!(overlap.min, Vec2::new(5.0, 5.0));
        assert_eq!(overlap.max, Vec2::new(10.0, 10.0));
        assert_eq!(overlap, b.intersection(&a).unwrap());
    }

    #[test]
    fn distant_rects_do_not_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::splat(20.0), Vec2::splat(10.0));
        assert_eq!(a.intersection(&b), None);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn touching_rects_have_degenerate_overlap() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::splat(10.0));

        let overlap = a.intersection(&b).unwrap();
        assert!(overlap.is_degenerate());
        assert_eq!(overlap.width(), 0.0);
    }

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(Vec2::ZERO, Vec2::splat(4.0));
        assert!(r.contains(Vec2::ZERO));
        assert!(r.contains(Vec2::splat(3.9)));
        assert!(!r.contains(Vec2::new(4.0, 1.0)));
    }
}
