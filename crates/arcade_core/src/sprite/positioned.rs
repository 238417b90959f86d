use crate::math::{Rect, Vec2};
use crate::sprite::{MaskFrame, SpriteDesign, Surface};
use std::time::Duration;

/// What a positioned entity does when it crosses the surface edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryPolicy {
    /// Reappear at the opposite edge (toroidal movement).
    Wrap,
    /// Destroy the entity.
    Despawn,
}

/// Location, design and bounding surface of a positioned entity.
pub struct Sprite {
    location: Vec2,
    design: Box<dyn SpriteDesign>,
    surface: Surface,
    attached: bool,
}

impl Sprite {
    pub(crate) fn new(mut design: Box<dyn SpriteDesign>, location: Vec2, surface: Surface) -> Self {
        design.attach_to(&surface);
        Self {
            location,
            design,
            surface,
            attached: true,
        }
    }

    pub fn x(&self) -> f32 {
        self.location.x
    }

    pub fn y(&self) -> f32 {
        self.location.y
    }

    pub fn set_x(&mut self, x: f32) {
        self.location.x = x;
    }

    pub fn set_y(&mut self, y: f32) {
        self.location.y = y;
    }

    pub fn location(&self) -> Vec2 {
        self.location
    }

    pub fn set_location(&mut self, location: Vec2) {
        self.location = location;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.location += delta;
    }

    /// Size as currently reported by the design.
    pub fn size(&self) -> Vec2 {
        self.design.size()
    }

    pub fn width(&self) -> f32 {
        self.size().x
    }

    pub fn height(&self) -> f32 {
        self.size().y
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(self.location, self.size())
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    pub fn design(&self) -> &dyn SpriteDesign {
        self.design.as_ref()
    }

    pub fn design_mut(&mut self) -> &mut dyn SpriteDesign {
        self.design.as_mut()
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Advance the design's animation and report whether it has completed.
    pub fn advance_design(&mut self, elapsed: Duration) -> bool {
        self.design.advance(elapsed);
        self.design.is_completed()
    }

    pub fn is_design_completed(&self) -> bool {
        self.design.is_completed()
    }

    // Edge tests are inclusive: touching an edge counts as crossing it.

    pub fn beyond_right_bound(&self) -> bool {
        self.x() >= self.surface.width() - self.width()
    }

    pub fn beyond_left_bound(&self) -> bool {
        self.x() <= 0.0
    }

    pub fn beyond_bottom_bound(&self) -> bool {
        self.y() >= self.surface.height() - self.height()
    }

    pub fn beyond_upper_bound(&self) -> bool {
        self.y() <= 0.0
    }

    pub fn beyond_x_axis(&self) -> bool {
        self.beyond_left_bound() || self.beyond_right_bound()
    }

    pub fn beyond_y_axis(&self) -> bool {
        self.beyond_upper_bound() || self.beyond_bottom_bound()
    }

    pub fn out_of_bounds(&self) -> bool {
        self.beyond_x_axis() || self.beyond_y_axis()
    }

    /// Move a sprite that crossed an edge to just inside the opposite one.
    /// Returns `true` if it was moved.
    pub fn wrap_within_bounds(&mut self) -> bool {
        let mut wrapped = false;

        if self.beyond_right_bound() {
            self.location.x = 1.0;
            wrapped = true;
        } else if self.beyond_left_bound() {
            self.location.x = self.surface.width() - self.width();
            wrapped = true;
        }

        if self.beyond_bottom_bound() {
            self.location.y = 1.0;
            wrapped = true;
        } else if self.beyond_upper_bound() {
            self.location.y = self.surface.height() - self.height();
            wrapped = true;
        }

        wrapped
    }

    /// Whether `point` (surface coordinates) is covered by the design's
    /// opaque shape. Designs without a mask are solid.
    pub fn is_opaque_at(&self, point: Vec2) -> bool {
        match self.design.opacity_mask() {
            None => true,
            Some(mask) => match mask.frame() {
                MaskFrame::Local => mask.is_opaque_at(point - self.location),
                MaskFrame::Surface => mask.is_opaque_at(point),
            },
        }
    }

    /// Take the design off the surface. Only the first call reaches the design.
    pub(crate) fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            self.design.detach_from(&self.surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sprite::PixelMask;
    use crate::testing::{BoxDesign, SurfaceDot};

    fn sprite_at(x: f32, y: f32) -> Sprite {
        let surface = Surface::new(100.0, 80.0).unwrap();
        Sprite::new(Box::new(BoxDesign::square(10.0)), Vec2::new(x, y), surface)
    }

    #[test]
    fn edge_queries_are_inclusive() {
        assert!(!sprite_at(50.0, 40.0).out_of_bounds());
        assert!(sprite_at(90.0, 40.0).beyond_right_bound());
        assert!(!sprite_at(89.9, 40.0).beyond_right_bound());
        assert!(sprite_at(0.0, 40.0).beyond_left_bound());
        assert!(sprite_at(50.0, 70.0).beyond_bottom_bound());
        assert!(sprite_at(50.0, 0.0).beyond_upper_bound());
        assert!(sprite_at(50.0, -3.0).beyond_y_axis());
        assert!(!sprite_at(50.0, 40.0).beyond_x_axis());
    }

    #[test]
    fn wraps_past_right_edge_to_one() {
        // x = surfaceWidth - width + 1
        let mut sprite = sprite_at(91.0, 40.0);
        assert!(sprite.wrap_within_bounds());
        assert_eq!(sprite.location(), Vec2::new(1.0, 40.0));
    }

    #[test]
    fn wraps_past_left_and_top_to_far_edges() {
        let mut sprite = sprite_at(-2.0, -2.0);
        assert!(sprite.wrap_within_bounds());
        assert_eq!(sprite.location(), Vec2::new(90.0, 70.0));
    }

    #[test]
    fn wraps_past_bottom_to_one() {
        let mut sprite = sprite_at(30.0, 75.0);
        assert!(sprite.wrap_within_bounds());
        assert_eq!(sprite.location(), Vec2::new(30.0, 1.0));
    }

    #[test]
    fn inside_sprite_does_not_wrap() {
        let mut sprite = sprite_at(30.0, 30.0);
        assert!(!sprite.wrap_within_bounds());
        assert_eq!(sprite.location(), Vec2::new(30.0, 30.0));
    }

    #[test]
    fn bounds_follow_location_and_design_size() {
        let mut sprite = sprite_at(5.0, 5.0);
        sprite.translate(Vec2::new(2.5, -1.0));
        assert_eq!(sprite.bounds(), Rect::new(Vec2::new(7.5, 4.0), Vec2::splat(10.0)));
    }

    #[test]
    fn local_mask_is_sampled_relative_to_location() {
        let surface = Surface::new(100.0, 100.0).unwrap();
        let mut mask = PixelMask::new(4, 4);
        mask.set(1, 2, true);
        let sprite = Sprite::new(
            Box::new(BoxDesign::square(4.0).with_mask(mask)),
            Vec2::new(10.0, 10.0),
            surface,
        );

        assert!(sprite.is_opaque_at(Vec2::new(11.0, 12.0)));
        assert!(!sprite.is_opaque_at(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn surface_mask_is_sampled_in_surface_coordinates() {
        let surface = Surface::new(100.0, 100.0).unwrap();
        let sprite = Sprite::new(
            Box::new(BoxDesign::square(4.0).with_mask(SurfaceDot(Vec2::new(11.0, 12.0)))),
            Vec2::new(10.0, 10.0),
            surface,
        );

        assert!(sprite.is_opaque_at(Vec2::new(11.0, 12.0)));
        // The same point relative to the sprite is not shifted.
        assert!(!sprite.is_opaque_at(Vec2::new(21.0, 22.0)));
        assert!(!sprite.is_opaque_at(Vec2::new(1.0, 2.0)));
    }

    #[test]
    fn advance_design_reports_completion() {
        let surface = Surface::new(100.0, 100.0).unwrap();
        let design = BoxDesign::square(4.0).animated(2, Duration::from_millis(50));
        let mut sprite = Sprite::new(Box::new(design), Vec2::ZERO, surface);

        assert!(!sprite.advance_design(Duration::from_millis(50)));
        assert!(!sprite.is_design_completed());
        assert!(sprite.advance_design(Duration::from_millis(50)));
        assert!(sprite.is_design_completed());

        // Static designs never complete.
        let mut still = sprite_at(10.0, 10.0);
        assert!(!still.advance_design(Duration::from_secs(10)));
    }

    #[test]
    fn detach_reaches_design_once() {
        let design = BoxDesign::square(10.0);
        let attached = design.attached.clone();
        let surface = Surface::new(100.0, 100.0).unwrap();
        let mut sprite = Sprite::new(Box::new(design), Vec2::ZERO, surface);
        assert_eq!(attached.get(), 1);

        sprite.detach();
        sprite.detach();
        assert_eq!(attached.get(), 0);
        assert!(!sprite.is_attached());
    }
}
