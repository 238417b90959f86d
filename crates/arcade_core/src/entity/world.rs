// world.rs - live entity set plus the kinds and surface it is bounded by

use crate::entity::{Entity, EntityCell, EntityContext, EntityId, EntityKind, EntityRegistry, KindRegistry};
use crate::error::{CallbackFailure, CallbackPhase, EngineError, EntityError, EntityResult};
use crate::events::{DestroyedEvent, DestroyedListener, SubscriptionId};
use crate::math::Vec2;
use crate::sprite::{Sprite, SpriteDesign, Surface};
use arcade_metrics::Counter;
use std::time::Duration;
use tracing::{debug, warn};

/// Outcome of one update pass.
#[derive(Debug, Default)]
pub struct UpdatePass {
    /// Entities whose `update` ran.
    pub visited: usize,
    pub failures: Vec<CallbackFailure>,
}

/// All live entities of a session, the kinds they may have and the surface
/// positioned entities are bounded by.
pub struct World {
    kinds: KindRegistry,
    registry: EntityRegistry,
    surface: Option<Surface>,
    counters: Counter,
}

impl World {
    /// Create an empty world with no surface attached.
    pub fn new() -> Self {
        Self {
            kinds: KindRegistry::new(),
            registry: EntityRegistry::new(),
            surface: None,
            counters: Counter::new(),
        }
    }

    pub fn kinds(&self) -> &KindRegistry {
        &self.kinds
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn counters(&self) -> &Counter {
        &self.counters
    }

    pub(crate) fn counters_mut(&mut self) -> &mut Counter {
        &mut self.counters
    }

    pub fn surface(&self) -> Option<Surface> {
        self.surface
    }

    /// Attach the drawing surface. Sprites spawned afterwards are bounded by it;
    /// existing sprites keep the surface they were created on.
    pub fn attach_surface(&mut self, surface: Surface) {
        debug!(width = surface.width(), height = surface.height(), "attached surface");
        self.surface = Some(surface);
    }

    pub fn define_kind(&mut self, name: &str) -> Result<EntityKind, EngineError> {
        self.kinds.define(name)
    }

    /// Register an entity without a position.
    pub fn spawn(
        &mut self,
        kind: EntityKind,
        entity: impl Entity + 'static,
    ) -> Result<EntityId, EngineError> {
        self.kinds.ensure(kind)?;
        Ok(self.insert(kind, Box::new(entity), None))
    }

    /// Register a positioned entity at `location`, attaching its design to
    /// the surface.
    ///
    /// Fails with `NoSurface` if no surface has been attached yet.
    pub fn spawn_sprite(
        &mut self,
        kind: EntityKind,
        entity: impl Entity + 'static,
        design: impl SpriteDesign + 'static,
        location: Vec2,
    ) -> Result<EntityId, EngineError> {
        self.kinds.ensure(kind)?;
        let surface = self.surface.ok_or(EngineError::NoSurface)?;
        let sprite = Sprite::new(Box::new(design), location, surface);
        Ok(self.insert(kind, Box::new(entity), Some(sprite)))
    }

    fn insert(&mut self, kind: EntityKind, entity: Box<dyn Entity>, sprite: Option<Sprite>) -> EntityId {
        let positioned = sprite.is_some();
        let id = self.registry.add(kind, EntityCell { entity, sprite });
        self.counters.increment("spawned", 1);
        debug!(entity = %id, kind = self.kinds.label(kind), positioned, "spawned entity");
        id
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.registry.contains(id)
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn sprite(&self, id: EntityId) -> Option<&Sprite> {
        self.registry.sprite(id)
    }

    /// Mutable access to a sprite from outside any callback (placing or
    /// steering an entity between ticks).
    pub fn sprite_mut(&mut self, id: EntityId) -> Option<&mut Sprite> {
        self.registry.sprite_mut(id)
    }

    /// Detach the entity's design, unregister it, then notify its destroyed
    /// listeners. Returns `false` if it was already destroyed.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        let Some(removed) = self.registry.remove(id) else {
            return false;
        };

        // A missing cell means the entity's own callback is running; its
        // context has already detached the sprite.
        if let Some(mut cell) = removed.cell {
            if let Some(sprite) = cell.sprite.as_mut() {
                sprite.detach();
            }
        }

        self.counters.increment("destroyed", 1);
        debug!(entity = %id, kind = self.kinds.label(removed.kind), "destroyed entity");

        let event = DestroyedEvent {
            id,
            kind: removed.kind,
        };
        for (_, listener) in removed.listeners {
            listener(&event);
        }
        true
    }

    /// Destroy every live entity in spawn order. Returns how many were destroyed.
    pub fn despawn_all(&mut self) -> usize {
        self.registry
            .ids()
            .into_iter()
            .filter(|&id| self.destroy(id))
            .count()
    }

    /// Subscribe to an entity's destruction. `None` if it is not alive.
    pub fn on_destroyed(
        &mut self,
        id: EntityId,
        listener: impl FnOnce(&DestroyedEvent) + 'static,
    ) -> Option<SubscriptionId> {
        let listener: DestroyedListener = Box::new(listener);
        self.registry.subscribe_destroyed(id, listener)
    }

    pub fn unsubscribe_destroyed(&mut self, id: EntityId, sub: SubscriptionId) -> bool {
        self.registry.unsubscribe_destroyed(id, sub)
    }

    /// Run `update` on a snapshot of the live set taken now.
    ///
    /// Entities spawned during the pass wait for the next one; entities
    /// destroyed during the pass are skipped if not yet visited. A failing
    /// update is logged and recorded, and the pass carries on.
    pub fn update(&mut self, elapsed: Duration) -> UpdatePass {
        let mut pass = UpdatePass::default();

        for id in self.registry.ids() {
            let Some((kind, result)) = self.invoke(id, |entity, ctx| entity.update(ctx, elapsed)) else {
                continue;
            };
            pass.visited += 1;
            if let Err(error) = result {
                pass.failures
                    .push(self.callback_failed(id, kind, CallbackPhase::Update, error));
            }
        }

        pass
    }

    /// Run one callback on a live entity with a context around it.
    ///
    /// `None` if the entity is not alive (or is already inside a callback).
    pub(crate) fn invoke<F>(&mut self, id: EntityId, f: F) -> Option<(EntityKind, EntityResult)>
    where
        F: FnOnce(&mut dyn Entity, &mut EntityContext<'_>) -> EntityResult,
    {
        let kind = self.registry.kind_of(id)?;
        let mut cell = self.registry.take(id)?;

        let result = {
            let EntityCell { entity, sprite } = &mut cell;
            let mut ctx = EntityContext::new(id, kind, sprite.as_mut(), self);
            f(entity.as_mut(), &mut ctx)
        };

        self.registry.restore(id, cell);
        Some((kind, result))
    }

    pub(crate) fn callback_failed(
        &mut self,
        entity: EntityId,
        kind: EntityKind,
        phase: CallbackPhase,
        error: EntityError,
    ) -> CallbackFailure {
        self.counters.increment("callback_failures", 1);
        warn!(
            entity = %entity,
            kind = self.kinds.label(kind),
            ?phase,
            error = %error,
            "entity callback failed"
        );
        CallbackFailure {
            entity,
            kind,
            phase,
            error,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
