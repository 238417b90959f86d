//! Engine errors and entity callback failures

use crate::entity::{EntityId, EntityKind};
use thiserror::Error;

/// Error returned by an entity's `update` or `on_collision`.
pub type EntityError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for entity callbacks.
pub type EntityResult = Result<(), EntityError>;

/// Setup and usage errors raised by a session.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("entity kind '{name}' is already defined")]
    DuplicateKind { name: String },

    #[error("entity kind {kind} is not defined in this session")]
    UnknownKind { kind: EntityKind },

    #[error("too many entity kinds (limit is {limit})")]
    KindLimit { limit: usize },

    #[error("no surface attached; positioned entities need a surface to be bounded by")]
    NoSurface,

    #[error("surface dimensions must be positive and finite (got {width}x{height})")]
    InvalidSurface { width: f32, height: f32 },
}

/// Which callback failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackPhase {
    Update,
    Collision { other: EntityId },
}

/// A callback error caught at a pass boundary.
#[derive(Debug)]
pub struct CallbackFailure {
    pub entity: EntityId,
    pub kind: EntityKind,
    pub phase: CallbackPhase,
    pub error: EntityError,
}

/// A tick completed, but some entity callbacks failed along the way.
#[derive(Debug, Error)]
#[error("{} entity callback(s) failed during tick {tick}", .failures.len())]
pub struct FrameError {
    pub tick: u64,
    pub failures: Vec<CallbackFailure>,
}
