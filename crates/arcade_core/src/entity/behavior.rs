use crate::collision::Collider;
use crate::entity::EntityContext;
use crate::error::EntityResult;
use std::time::Duration;

/// Per-entity behaviour driven by the engine.
///
/// The engine only decides *when* these run. What an entity does on a tick
/// or on contact (move, spawn, destroy itself) is up to the implementation,
/// using the [`EntityContext`] it is handed.
///
/// Movement must scale by `elapsed`: the loop has no fixed timestep.
pub trait Entity {
    /// Called once per tick while the entity is alive.
    fn update(&mut self, ctx: &mut EntityContext<'_>, elapsed: Duration) -> EntityResult;

    /// Called when a registered pair collides. `other` describes the other
    /// participant as it was when the contact was detected; it may already
    /// have been destroyed by its own callback.
    fn on_collision(&mut self, ctx: &mut EntityContext<'_>, other: &Collider) -> EntityResult {
        let _ = (ctx, other);
        Ok(())
    }
}
