use crate::math::Vec2;
use crate::sprite::{OpacityMask, Surface};
use std::time::Duration;

/// Presentation delegate of a positioned entity.
///
/// The engine never draws anything; it asks the design for its size, tells
/// it when it joins or leaves the surface, and, for pixel-perfect
/// collisions, asks whether a point is covered by its opaque shape.
pub trait SpriteDesign {
    /// Current width and height.
    fn size(&self) -> Vec2;

    /// Called once when the owning sprite is spawned.
    fn attach_to(&mut self, surface: &Surface) {
        let _ = surface;
    }

    /// Called once when the owning sprite is destroyed.
    fn detach_from(&mut self, surface: &Surface) {
        let _ = surface;
    }

    /// Opaque shape for the collision narrow phase. Designs without one are
    /// treated as solid over their whole rectangle.
    fn opacity_mask(&self) -> Option<&dyn OpacityMask> {
        None
    }

    /// Step an animated design forward. Static designs ignore it.
    fn advance(&mut self, elapsed: Duration) {
        let _ = elapsed;
    }

    /// True once a play-once animation has finished. Static designs never
    /// complete.
    fn is_completed(&self) -> bool {
        false
    }
}
