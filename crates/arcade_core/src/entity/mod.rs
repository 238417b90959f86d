//! Entity lifecycle
//!
//! Entities are trait objects owned by a [`World`]. Every pass over the live
//! set (update or collision scan) iterates a snapshot of ids taken when the
//! pass starts, so callbacks may spawn and destroy freely: entities spawned
//! during a pass are first visited by the next pass, and entities destroyed
//! during a pass are never visited again.

mod behavior;
mod context;
mod handle;
mod kind;
mod registry;
mod world;

pub use behavior::Entity;
pub use context::{BoundaryOutcome, EntityContext};
pub use handle::{EntityId, EntityKind};
pub use kind::KindRegistry;
pub use registry::{EntityRegistry, PositionedEntities};
pub use world::{UpdatePass, World};

pub(crate) use registry::EntityCell;
