//! Positioned entities
//!
//! A [`Sprite`] gives an entity a location on a [`Surface`] and a size taken
//! from its [`SpriteDesign`], the presentation delegate owned by the
//! application. Together they define the bounding rectangle used for edge
//! checks and collision tests.

mod animation;
mod design;
mod mask;
mod positioned;
mod surface;

pub use animation::FrameAnimation;
pub use design::SpriteDesign;
pub use mask::{MaskFrame, OpacityMask, PixelMask};
pub use positioned::{BoundaryPolicy, Sprite};
pub use surface::Surface;
