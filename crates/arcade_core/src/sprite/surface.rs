use crate::error::EngineError;
use crate::math::{Rect, Vec2};

/// Dimensions of the drawing surface sprites are bounded by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    width: f32,
    height: f32,
}

impl Surface {
    pub fn new(width: f32, height: f32) -> Result<Self, EngineError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(EngineError::InvalidSurface { width, height });
        }
        Ok(Self { width, height })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(Vec2::ZERO, self.size())
    }
}
