//! Frame-ready and entity-destroyed notifications

use crate::entity::{EntityId, EntityKind};
use std::time::Duration;

/// Handle returned by a subscription, used to unsubscribe.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

/// Payload of the frame-ready notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameEvent {
    /// 1-based tick number.
    pub tick: u64,
    /// Wall time since the previous tick.
    pub elapsed: Duration,
}

/// Payload of the entity-destroyed notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DestroyedEvent {
    pub id: EntityId,
    pub kind: EntityKind,
}

pub type FrameObserver = Box<dyn FnMut(&FrameEvent)>;
pub type DestroyedListener = Box<dyn FnOnce(&DestroyedEvent)>;

/// Observers of the frame-ready notification, notified in subscription order.
#[derive(Default)]
pub struct FrameObservers {
    next_id: u64,
    observers: Vec<(SubscriptionId, FrameObserver)>,
}

impl FrameObservers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, observer: FrameObserver) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId::new(self.next_id);
        self.observers.push((id, observer));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    pub fn notify(&mut self, event: &FrameEvent) {
        for (_, observer) in &mut self.observers {
            observer(event);
        }
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}
