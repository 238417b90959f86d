use crate::collision::CollisionMode;
use crate::entity::EntityKind;
use std::collections::HashMap;

/// Symmetric kind-pair interest table.
///
/// Registering `(a, b)` makes `a` interested in `b` and `b` in `a`; the pair
/// is stored once under its ordered key.
#[derive(Debug, Clone, Default)]
pub struct CollisionTable {
    pairs: HashMap<(EntityKind, EntityKind), CollisionMode>,
}

impl CollisionTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: EntityKind, b: EntityKind) -> (EntityKind, EntityKind) {
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Returns `true` if the pair was not registered before. Registering an
    /// existing pair again only replaces its mode.
    pub fn register(&mut self, a: EntityKind, b: EntityKind, mode: CollisionMode) -> bool {
        self.pairs.insert(Self::key(a, b), mode).is_none()
    }

    pub fn mode_for(&self, a: EntityKind, b: EntityKind) -> Option<CollisionMode> {
        self.pairs.get(&Self::key(a, b)).copied()
    }

    pub fn is_interested(&self, a: EntityKind, b: EntityKind) -> bool {
        self.pairs.contains_key(&Self::key(a, b))
    }

    /// Kinds `kind` collides with, in ascending order.
    pub fn interest_set(&self, kind: EntityKind) -> Vec<EntityKind> {
        let mut kinds: Vec<_> = self
            .pairs
            .keys()
            .filter_map(|&(a, b)| match (a == kind, b == kind) {
                (true, _) => Some(b),
                (_, true) => Some(a),
                _ => None,
            })
            .collect();
        kinds.sort();
        kinds
    }

    /// Number of distinct registered pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}
