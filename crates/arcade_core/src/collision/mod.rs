//! Collision detection between registered kind pairs
//!
//! Every frame the [`CollisionManager`] walks all unordered pairs of live
//! positioned entities (O(N²), no spatial partitioning), skips pairs whose
//! kinds were never registered together, rejects pairs whose bounding boxes
//! do not meet (broad phase) and, for pixel-perfect pairs, confirms the hit
//! by sampling both opaque masks across the overlap (narrow phase).

mod manager;
mod phase;
mod table;

pub use manager::{CollisionManager, CollisionReport};
pub use phase::{broad_phase, narrow_phase};
pub use table::CollisionTable;

use crate::entity::{EntityId, EntityKind};
use crate::math::Rect;
use serde::{Deserialize, Serialize};

/// Which test is authoritative for a kind pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionMode {
    /// Overlapping bounding boxes collide.
    BoundingBox,
    /// Bounding boxes only pre-filter; opaque masks must share a point.
    #[default]
    PixelPerfect,
}

/// One participant of a contact, as seen when the contact was detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: EntityId,
    pub kind: EntityKind,
    pub bounds: Rect,
}

/// A detected contact. `first` was spawned before `second` and is notified first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionPair {
    pub first: Collider,
    pub second: Collider,
    /// Broad-phase intersection of the two bounding boxes.
    pub overlap: Rect,
    pub mode: CollisionMode,
}
