//! Session configuration

use crate::collision::CollisionMode;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for an engine session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Pause between ticks when driven by `Session::run`. Zero means uncapped:
    /// tick again as soon as the previous tick returns.
    pub tick_interval_ms: u64,
    /// Run collision detection at the end of every tick. When disabled the
    /// application calls `Session::detect_collisions` itself.
    pub detect_collisions_each_frame: bool,
    /// Mode used by `register_pair` when no mode is given.
    pub default_collision_mode: CollisionMode,
    /// Number of frames in the rolling frame-rate window.
    pub fps_window: usize,
}

impl SessionConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 0,
            detect_collisions_each_frame: true,
            default_collision_mode: CollisionMode::PixelPerfect,
            fps_window: 60,
        }
    }
}
