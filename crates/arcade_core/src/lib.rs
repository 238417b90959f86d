//! Arcade Engine Core
//!
//! The real-time core of a small 2D game engine:
//! - Frame clock with a variable timestep
//! - Entity registry that tolerates spawn/destroy while it is being iterated
//! - Positioned entities (sprites) with edge wrap/despawn policies
//! - Two-phase collision detection between registered kind pairs
//! - An explicit [`Session`] owning all of the above
//!
//! Rendering, input and entity-specific movement live outside the core and
//! plug in through [`sprite::SpriteDesign`] and [`entity::Entity`].

pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod events;
pub mod math;
pub mod session;
pub mod sprite;
pub mod time;

#[cfg(test)]
pub(crate) mod testing;

pub use glam;

pub use collision::{Collider, CollisionMode, CollisionPair};
pub use config::SessionConfig;
pub use entity::{BoundaryOutcome, Entity, EntityContext, EntityId, EntityKind, World};
pub use error::{CallbackFailure, CallbackPhase, EngineError, EntityError, EntityResult, FrameError};
pub use events::{DestroyedEvent, FrameEvent, SubscriptionId};
pub use session::{Session, TickReport};
pub use sprite::{BoundaryPolicy, FrameAnimation, MaskFrame, OpacityMask, PixelMask, Sprite, SpriteDesign, Surface};

/// Engine version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
