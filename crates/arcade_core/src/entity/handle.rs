//! Entity and kind handles

use std::fmt;

/// Identity of a live or destroyed entity.
///
/// Ids are allocated in spawn order and never reused within a session, so
/// ordering by id is ordering by spawn time.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(u64);

impl EntityId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "entity#{}", self.0)
    }
}

/// Logical category of an entity (projectile, obstacle, player craft...),
/// used to decide collision interest. Created by `KindRegistry::define`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityKind(u16);

impl EntityKind {
    pub(crate) const fn new(index: u16) -> Self {
        Self(index)
    }

    pub fn index(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kind#{}", self.0)
    }
}
