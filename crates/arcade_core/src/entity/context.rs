use crate::entity::{Entity, EntityId, EntityKind, World};
use crate::error::EngineError;
use crate::math::Vec2;
use crate::sprite::{BoundaryPolicy, Sprite, SpriteDesign, Surface};
use std::time::Duration;

/// What `enforce_bounds` did this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryOutcome {
    Inside,
    /// Crossed an edge and was moved to the opposite side.
    Wrapped,
    /// Crossed an edge and was destroyed.
    Departed,
}

/// Handle given to an entity while one of its callbacks runs.
///
/// Gives access to the entity's own sprite and to the world, so a callback
/// can move itself, spawn new entities, or destroy itself or others.
pub struct EntityContext<'a> {
    id: EntityId,
    kind: EntityKind,
    sprite: Option<&'a mut Sprite>,
    world: &'a mut World,
    destroyed: bool,
}

impl<'a> EntityContext<'a> {
    pub(crate) fn new(
        id: EntityId,
        kind: EntityKind,
        sprite: Option<&'a mut Sprite>,
        world: &'a mut World,
    ) -> Self {
        Self {
            id,
            kind,
            sprite,
            world,
            destroyed: false,
        }
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn kind_name(&self) -> &str {
        self.world.kinds().label(self.kind)
    }

    /// `None` for entities spawned without a sprite.
    pub fn sprite(&self) -> Option<&Sprite> {
        self.sprite.as_deref()
    }

    pub fn sprite_mut(&mut self) -> Option<&mut Sprite> {
        self.sprite.as_deref_mut()
    }

    pub fn surface(&self) -> Option<Surface> {
        self.world.surface()
    }

    /// Read-only view of the rest of the world.
    pub fn world(&self) -> &World {
        &*self.world
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.world.is_alive(id)
    }

    /// True once this entity has destroyed itself during the current callback.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Detach this entity's sprite and unregister it. Safe to call twice.
    pub fn destroy_self(&mut self) -> bool {
        if self.destroyed {
            return false;
        }
        self.destroyed = true;
        if let Some(sprite) = self.sprite.as_deref_mut() {
            sprite.detach();
        }
        self.world.destroy(self.id)
    }

    /// Destroy any entity, including this one. Returns `false` if it was
    /// already gone.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        if id == self.id {
            return self.destroy_self();
        }
        self.world.destroy(id)
    }

    /// Spawn an entity without a position. It is first updated next tick.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        entity: impl Entity + 'static,
    ) -> Result<EntityId, EngineError> {
        self.world.spawn(kind, entity)
    }

    /// Spawn a positioned entity on the world's surface.
    pub fn spawn_sprite(
        &mut self,
        kind: EntityKind,
        entity: impl Entity + 'static,
        design: impl SpriteDesign + 'static,
        location: Vec2,
    ) -> Result<EntityId, EngineError> {
        self.world.spawn_sprite(kind, entity, design, location)
    }

    /// Advance this entity's design by `elapsed` and destroy the entity on
    /// the tick its animation completes. Returns `true` on that tick.
    pub fn advance_animation(&mut self, elapsed: Duration) -> bool {
        if self.destroyed {
            return false;
        }
        let Some(sprite) = self.sprite.as_deref_mut() else {
            return false;
        };
        if !sprite.advance_design(elapsed) {
            return false;
        }
        self.destroy_self();
        true
    }

    /// Apply an edge policy to this entity's sprite: wrap it to the opposite
    /// edge or destroy it once it crosses any edge.
    ///
    /// Does nothing once the entity has destroyed itself.
    pub fn enforce_bounds(&mut self, policy: BoundaryPolicy) -> BoundaryOutcome {
        if self.destroyed {
            return BoundaryOutcome::Inside;
        }
        let Some(sprite) = self.sprite.as_deref_mut() else {
            return BoundaryOutcome::Inside;
        };

        match policy {
            BoundaryPolicy::Wrap => {
                if sprite.wrap_within_bounds() {
                    BoundaryOutcome::Wrapped
                } else {
                    BoundaryOutcome::Inside
                }
            }
            BoundaryPolicy::Despawn => {
                if sprite.out_of_bounds() {
                    self.destroy_self();
                    BoundaryOutcome::Departed
                } else {
                    BoundaryOutcome::Inside
                }
            }
        }
    }
}
