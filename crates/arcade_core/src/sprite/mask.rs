use crate::math::Vec2;

/// Coordinate frame an [`OpacityMask`] is defined in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MaskFrame {
    /// Relative to the sprite's top-left corner.
    #[default]
    Local,
    /// Surface coordinates; the mask tracks the sprite's position itself.
    Surface,
}

/// Opaque-shape test used by pixel-perfect collision checks.
pub trait OpacityMask {
    fn is_opaque_at(&self, point: Vec2) -> bool;

    fn frame(&self) -> MaskFrame {
        MaskFrame::Local
    }
}

/// Row-major grid of opaque/transparent pixels in sprite-local coordinates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMask {
    width: u32,
    height: u32,
    pixels: Vec<bool>,
}

impl PixelMask {
    /// Fully transparent mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![false; width as usize * height as usize],
        }
    }

    /// Fully opaque mask.
    pub fn filled(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![true; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut opaque: impl FnMut(u32, u32) -> bool) -> Self {
        let mut mask = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                let idx = mask.index(x, y);
                mask.pixels[idx] = opaque(x, y);
            }
        }
        mask
    }

    /// Pixels outside the grid are ignored.
    pub fn set(&mut self, x: u32, y: u32, opaque: bool) {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = opaque;
        }
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height && self.pixels[self.index(x, y)]
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| **p).count()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl OpacityMask for PixelMask {
    fn is_opaque_at(&self, point: Vec2) -> bool {
        if !(point.x >= 0.0 && point.y >= 0.0) {
            return false;
        }
        self.get(point.x.floor() as u32, point.y.floor() as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_from_fn() {
        let mask = PixelMask::from_fn(4, 4, |x, y| (x + y) % 2 == 0);
        assert_eq!(mask.opaque_count(), 8);
        assert!(mask.is_opaque_at(Vec2::new(0.0, 0.0)));
        assert!(!mask.is_opaque_at(Vec2::new(1.0, 0.0)));
        assert!(mask.is_opaque_at(Vec2::new(1.5, 1.9)));
    }

    #[test]
    fn outside_the_grid_is_transparent() {
        let mask = PixelMask::filled(2, 2);
        assert!(!mask.is_opaque_at(Vec2::new(-0.5, 0.0)));
        assert!(!mask.is_opaque_at(Vec2::new(2.0, 0.0)));
        assert!(!mask.is_opaque_at(Vec2::new(f32::NAN, 0.0)));
    }

    #[test]
    fn set_ignores_out_of_range() {
        let mut mask = PixelMask::new(2, 2);
        mask.set(1, 1, true);
        mask.set(5, 5, true);
        assert_eq!(mask.opaque_count(), 1);
        assert!(mask.get(1, 1));
    }
}
