use crate::collision::{broad_phase, narrow_phase, Collider, CollisionMode, CollisionPair, CollisionTable};
use crate::entity::{EntityId, EntityKind, KindRegistry, World};
use crate::error::{CallbackFailure, CallbackPhase, EngineError};
use tracing::{debug, trace};

/// Outcome of one collision scan.
#[derive(Debug, Default)]
pub struct CollisionReport {
    /// Pairs whose kinds are registered together and were both alive when reached.
    pub tested: usize,
    /// Contacts found, in scan order.
    pub pairs: Vec<CollisionPair>,
    pub failures: Vec<CallbackFailure>,
}

/// Kind-pair interest table plus the per-frame pair scan.
pub struct CollisionManager {
    table: CollisionTable,
    default_mode: CollisionMode,
}

impl CollisionManager {
    pub fn new(default_mode: CollisionMode) -> Self {
        Self {
            table: CollisionTable::new(),
            default_mode,
        }
    }

    pub fn table(&self) -> &CollisionTable {
        &self.table
    }

    pub fn default_mode(&self) -> CollisionMode {
        self.default_mode
    }

    /// Register a symmetric pair using the default mode.
    pub fn register_pair(
        &mut self,
        kinds: &KindRegistry,
        a: EntityKind,
        b: EntityKind,
    ) -> Result<(), EngineError> {
        self.register_pair_with_mode(kinds, a, b, self.default_mode)
    }

    /// Register a symmetric pair. Both kinds must already be defined.
    pub fn register_pair_with_mode(
        &mut self,
        kinds: &KindRegistry,
        a: EntityKind,
        b: EntityKind,
        mode: CollisionMode,
    ) -> Result<(), EngineError> {
        kinds.ensure(a)?;
        kinds.ensure(b)?;

        let added = self.table.register(a, b, mode);
        debug!(
            first = kinds.label(a),
            second = kinds.label(b),
            ?mode,
            added,
            "registered collision pair"
        );
        Ok(())
    }

    /// Scan every unordered pair of live positioned entities once and notify
    /// both participants of each contact.
    ///
    /// The scan runs over a snapshot taken on entry. Callbacks may spawn or
    /// destroy entities: new ones are scanned next frame, and a participant
    /// destroyed mid-scan is skipped for the rest of it. Within a pair the
    /// earlier-spawned entity is notified first; the second is only notified
    /// if it is still alive. Callback errors are logged, collected in the
    /// report, and do not stop the scan.
    pub fn detect_collisions(&self, world: &mut World) -> CollisionReport {
        let snapshot = world.registry().positioned();
        let ids = snapshot.as_slice();
        let mut report = CollisionReport::default();

        for (n, &a) in ids.iter().enumerate() {
            for &b in &ids[n + 1..] {
                if !world.is_alive(a) {
                    break;
                }
                if !world.is_alive(b) {
                    continue;
                }
                if !self.interested(world, a, b) {
                    continue;
                }
                report.tested += 1;

                let Some(pair) = self.test_pair(world, a, b) else {
                    continue;
                };
                trace!(
                    first = %pair.first.id,
                    second = %pair.second.id,
                    mode = ?pair.mode,
                    "collision"
                );
                world.counters_mut().increment("collisions", 1);

                Self::dispatch(world, &pair, &mut report.failures);
                report.pairs.push(pair);
            }
        }

        report
    }

    fn interested(&self, world: &World, a: EntityId, b: EntityId) -> bool {
        let registry = world.registry();
        match (registry.kind_of(a), registry.kind_of(b)) {
            (Some(ka), Some(kb)) => self.table.is_interested(ka, kb),
            _ => false,
        }
    }

    /// Broad phase, then narrow phase when the pair is pixel-perfect.
    fn test_pair(&self, world: &World, a: EntityId, b: EntityId) -> Option<CollisionPair> {
        let registry = world.registry();
        let (kind_a, kind_b) = (registry.kind_of(a)?, registry.kind_of(b)?);
        let mode = self.table.mode_for(kind_a, kind_b)?;
        let (sprite_a, sprite_b) = (registry.sprite(a)?, registry.sprite(b)?);

        let (bounds_a, bounds_b) = (sprite_a.bounds(), sprite_b.bounds());
        let overlap = broad_phase(&bounds_a, &bounds_b)?;

        if mode == CollisionMode::PixelPerfect {
            narrow_phase(
                &overlap,
                |p| sprite_a.is_opaque_at(p),
                |p| sprite_b.is_opaque_at(p),
            )?;
        }

        Some(CollisionPair {
            first: Collider {
                id: a,
                kind: kind_a,
                bounds: bounds_a,
            },
            second: Collider {
                id: b,
                kind: kind_b,
                bounds: bounds_b,
            },
            overlap,
            mode,
        })
    }

    fn dispatch(world: &mut World, pair: &CollisionPair, failures: &mut Vec<CallbackFailure>) {
        for (receiver, other) in [(&pair.first, &pair.second), (&pair.second, &pair.first)] {
            let outcome = world.invoke(receiver.id, |entity, ctx| entity.on_collision(ctx, other));
            if let Some((kind, Err(error))) = outcome {
                let phase = CallbackPhase::Collision { other: other.id };
                failures.push(world.callback_failed(receiver.id, kind, phase, error));
            }
        }
    }
}

impl Default for CollisionManager {
    fn default() -> Self {
        Self::new(CollisionMode::default())
    }
}
