//! Ordered store of live entities
//!
//! Slots are keyed by [`EntityId`] in a `BTreeMap`; ids grow monotonically,
//! so iteration order is spawn order.
//!
//! While an entity's callback runs, its [`EntityCell`] is taken out of the
//! slot and handed to the callback. The slot stays registered, so the entity
//! is still alive; destroying it removes the slot, and the cell is dropped
//! when the callback returns instead of being restored.

use crate::entity::{Entity, EntityId, EntityKind};
use crate::events::{DestroyedListener, SubscriptionId};
use crate::sprite::Sprite;
use std::collections::BTreeMap;

/// The owned parts of an entity: its behaviour and, when positioned, its sprite.
pub(crate) struct EntityCell {
    pub(crate) entity: Box<dyn Entity>,
    pub(crate) sprite: Option<Sprite>,
}

struct Slot {
    kind: EntityKind,
    positioned: bool,
    /// `None` while the entity's own callback is running.
    cell: Option<EntityCell>,
    listeners: Vec<(SubscriptionId, DestroyedListener)>,
}

/// What `remove` hands back so the caller can finish teardown.
pub(crate) struct Removed {
    pub(crate) kind: EntityKind,
    pub(crate) cell: Option<EntityCell>,
    pub(crate) listeners: Vec<(SubscriptionId, DestroyedListener)>,
}

pub struct EntityRegistry {
    next_id: u64,
    next_subscription: u64,
    slots: BTreeMap<EntityId, Slot>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_subscription: 1,
            slots: BTreeMap::new(),
        }
    }

    pub(crate) fn add(&mut self, kind: EntityKind, cell: EntityCell) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;

        self.slots.insert(
            id,
            Slot {
                kind,
                positioned: cell.sprite.is_some(),
                cell: Some(cell),
                listeners: Vec::new(),
            },
        );
        id
    }

    /// Unregister `id`. `None` if it was never registered or is already gone.
    pub(crate) fn remove(&mut self, id: EntityId) -> Option<Removed> {
        let slot = self.slots.remove(&id)?;
        Some(Removed {
            kind: slot.kind,
            cell: slot.cell,
            listeners: slot.listeners,
        })
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.slots.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.slots.get(&id).map(|slot| slot.kind)
    }

    /// Ids of every live entity, in spawn order.
    pub fn ids(&self) -> Vec<EntityId> {
        self.slots.keys().copied().collect()
    }

    /// Snapshot of the live entities that have a sprite.
    pub fn positioned(&self) -> PositionedEntities {
        PositionedEntities {
            ids: self
                .slots
                .iter()
                .filter(|(_, slot)| slot.positioned)
                .map(|(id, _)| *id)
                .collect(),
        }
    }

    /// The entity's sprite, unless it has none or its callback is running.
    pub fn sprite(&self, id: EntityId) -> Option<&Sprite> {
        self.slots.get(&id)?.cell.as_ref()?.sprite.as_ref()
    }

    pub(crate) fn sprite_mut(&mut self, id: EntityId) -> Option<&mut Sprite> {
        self.slots.get_mut(&id)?.cell.as_mut()?.sprite.as_mut()
    }

    pub(crate) fn take(&mut self, id: EntityId) -> Option<EntityCell> {
        self.slots.get_mut(&id)?.cell.take()
    }

    /// Put a taken cell back. Returns `false` (dropping the cell) when the
    /// entity was destroyed while it was out.
    pub(crate) fn restore(&mut self, id: EntityId, cell: EntityCell) -> bool {
        match self.slots.get_mut(&id) {
            Some(slot) => {
                slot.cell = Some(cell);
                true
            }
            None => false,
        }
    }

    pub(crate) fn subscribe_destroyed(
        &mut self,
        id: EntityId,
        listener: DestroyedListener,
    ) -> Option<SubscriptionId> {
        let slot = self.slots.get_mut(&id)?;
        let sub = SubscriptionId::new(self.next_subscription);
        self.next_subscription += 1;
        slot.listeners.push((sub, listener));
        Some(sub)
    }

    pub(crate) fn unsubscribe_destroyed(&mut self, id: EntityId, sub: SubscriptionId) -> bool {
        let Some(slot) = self.slots.get_mut(&id) else {
            return false;
        };
        let before = slot.listeners.len();
        slot.listeners.retain(|(existing, _)| *existing != sub);
        slot.listeners.len() != before
    }
}

impl Default for EntityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids of positioned entities captured at a point in time.
///
/// Iterating is lazy and can be repeated; entities destroyed after the
/// snapshot was taken are still listed, so consumers check liveness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionedEntities {
    ids: Vec<EntityId>,
}

impl PositionedEntities {
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, EntityId>> {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[EntityId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl<'a> IntoIterator for &'a PositionedEntities {
    type Item = EntityId;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, EntityId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
