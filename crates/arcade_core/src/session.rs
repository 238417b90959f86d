//! Engine session
//!
//! A [`Session`] owns everything one running game needs: the frame clock,
//! the world of live entities, the collision table and the frame observers.
//! Sessions are plain values; any number can coexist (one per test, say).
//!
//! Each tick runs in a fixed order on the calling thread:
//!
//! 1. the clock measures elapsed wall time since the previous tick,
//! 2. every live entity is updated with it,
//! 3. frame observers are notified,
//! 4. collision detection runs (unless the application drives it itself).
//!
//! # Example
//!
//! ```ignore
//! let mut session = Session::new(SessionConfig::default());
//! session.attach_surface(Surface::new(800.0, 600.0)?);
//! let ship = session.define_kind("ship")?;
//! let rock = session.define_kind("rock")?;
//! session.register_pair(ship, rock)?;
//! session.spawn_sprite(ship, Ship::default(), ShipDesign::new(), Vec2::new(400.0, 300.0))?;
//!
//! session.run(|_, report| {
//!     if report.tick >= 600 { ControlFlow::Break(()) } else { ControlFlow::Continue(()) }
//! });
//! ```

use crate::collision::{CollisionManager, CollisionMode, CollisionPair, CollisionReport};
use crate::config::SessionConfig;
use crate::entity::{Entity, EntityId, EntityKind, PositionedEntities, UpdatePass, World};
use crate::error::{CallbackFailure, EngineError, FrameError};
use crate::events::{DestroyedEvent, FrameEvent, FrameObservers, SubscriptionId};
use crate::math::Vec2;
use crate::sprite::{Sprite, SpriteDesign, Surface};
use crate::time::FrameClock;
use arcade_metrics::{Counter, FrameTimer};
use std::ops::ControlFlow;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// What happened during one tick.
#[derive(Debug)]
pub struct TickReport {
    pub tick: u64,
    pub elapsed: Duration,
    /// Entities whose `update` ran.
    pub updated: usize,
    pub collisions: Vec<CollisionPair>,
    /// Callback errors caught during the update pass and the collision scan.
    pub failures: Vec<CallbackFailure>,
}

impl TickReport {
    pub fn failures(&self) -> &[CallbackFailure] {
        &self.failures
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn caught callback failures into an error for the application.
    pub fn check(self) -> Result<Self, FrameError> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(FrameError {
                tick: self.tick,
                failures: self.failures,
            })
        }
    }
}

pub struct Session {
    config: SessionConfig,
    clock: FrameClock,
    world: World,
    collisions: CollisionManager,
    observers: FrameObservers,
    frame_timer: FrameTimer,
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            clock: FrameClock::new(),
            world: World::new(),
            collisions: CollisionManager::new(config.default_collision_mode),
            observers: FrameObservers::new(),
            frame_timer: FrameTimer::new(config.fps_window),
            config,
        }
    }

    pub fn with_surface(config: SessionConfig, surface: Surface) -> Self {
        let mut session = Self::new(config);
        session.attach_surface(surface);
        session
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn collisions(&self) -> &CollisionManager {
        &self.collisions
    }

    pub fn attach_surface(&mut self, surface: Surface) {
        self.world.attach_surface(surface);
    }

    pub fn surface(&self) -> Option<Surface> {
        self.world.surface()
    }

    // --- setup -------------------------------------------------------------

    pub fn define_kind(&mut self, name: &str) -> Result<EntityKind, EngineError> {
        self.world.define_kind(name)
    }

    /// Register a symmetric collision pair using the configured default mode.
    pub fn register_pair(&mut self, a: EntityKind, b: EntityKind) -> Result<(), EngineError> {
        self.collisions.register_pair(self.world.kinds(), a, b)
    }

    pub fn register_pair_with_mode(
        &mut self,
        a: EntityKind,
        b: EntityKind,
        mode: CollisionMode,
    ) -> Result<(), EngineError> {
        self.collisions
            .register_pair_with_mode(self.world.kinds(), a, b, mode)
    }

    // --- entities ----------------------------------------------------------

    pub fn spawn(
        &mut self,
        kind: EntityKind,
        entity: impl Entity + 'static,
    ) -> Result<EntityId, EngineError> {
        self.world.spawn(kind, entity)
    }

    pub fn spawn_sprite(
        &mut self,
        kind: EntityKind,
        entity: impl Entity + 'static,
        design: impl SpriteDesign + 'static,
        location: Vec2,
    ) -> Result<EntityId, EngineError> {
        self.world.spawn_sprite(kind, entity, design, location)
    }

    /// Returns `false` if the entity was already destroyed.
    pub fn destroy(&mut self, id: EntityId) -> bool {
        self.world.destroy(id)
    }

    pub fn despawn_all(&mut self) -> usize {
        self.world.despawn_all()
    }

    pub fn is_alive(&self, id: EntityId) -> bool {
        self.world.is_alive(id)
    }

    pub fn entity_count(&self) -> usize {
        self.world.len()
    }

    pub fn sprite(&self, id: EntityId) -> Option<&Sprite> {
        self.world.sprite(id)
    }

    pub fn sprite_mut(&mut self, id: EntityId) -> Option<&mut Sprite> {
        self.world.sprite_mut(id)
    }

    pub fn positioned_entities(&self) -> PositionedEntities {
        self.world.registry().positioned()
    }

    // --- notifications -----------------------------------------------------

    pub fn subscribe_frames(&mut self, observer: impl FnMut(&FrameEvent) + 'static) -> SubscriptionId {
        self.observers.subscribe(Box::new(observer))
    }

    pub fn unsubscribe_frames(&mut self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }

    pub fn on_destroyed(
        &mut self,
        id: EntityId,
        listener: impl FnOnce(&DestroyedEvent) + 'static,
    ) -> Option<SubscriptionId> {
        self.world.on_destroyed(id, listener)
    }

    pub fn unsubscribe_destroyed(&mut self, id: EntityId, sub: SubscriptionId) -> bool {
        self.world.unsubscribe_destroyed(id, sub)
    }

    // --- loop --------------------------------------------------------------

    /// Start the clock. Returns `false` if already running.
    pub fn start(&mut self) -> bool {
        self.start_at(Instant::now())
    }

    pub fn start_at(&mut self, now: Instant) -> bool {
        let started = self.clock.start_at(now);
        if started {
            info!(entities = self.world.len(), "game loop started");
        }
        started
    }

    /// Stop the clock; later ticks do nothing. Returns `false` if already stopped.
    pub fn stop(&mut self) -> bool {
        let stopped = self.clock.stop();
        if stopped {
            info!(ticks = self.clock.tick_count(), "game loop stopped");
        }
        stopped
    }

    pub fn is_running(&self) -> bool {
        self.clock.is_running()
    }

    pub fn tick_count(&self) -> u64 {
        self.clock.tick_count()
    }

    pub fn tick(&mut self) -> Option<TickReport> {
        self.tick_at(Instant::now())
    }

    /// Run one tick as of `now`. `None` while the session is stopped.
    pub fn tick_at(&mut self, now: Instant) -> Option<TickReport> {
        let elapsed = self.clock.advance(now)?;
        let tick = self.clock.tick_count();

        let UpdatePass { visited, mut failures } = self.world.update(elapsed);

        self.frame_timer.record(elapsed);
        self.world.counters_mut().increment("ticks", 1);
        self.observers.notify(&FrameEvent { tick, elapsed });

        let mut collisions = Vec::new();
        if self.config.detect_collisions_each_frame {
            let report = self.collisions.detect_collisions(&mut self.world);
            collisions = report.pairs;
            failures.extend(report.failures);
        }

        if !failures.is_empty() {
            debug!(tick, failures = failures.len(), "tick finished with callback failures");
        }

        Some(TickReport {
            tick,
            elapsed,
            updated: visited,
            collisions,
            failures,
        })
    }

    /// Run the collision scan now, outside of `tick`.
    pub fn detect_collisions(&mut self) -> CollisionReport {
        self.collisions.detect_collisions(&mut self.world)
    }

    /// Start the clock and tick until `on_tick` breaks or the session is
    /// stopped, pausing `tick_interval_ms` between ticks. Returns the number
    /// of ticks run.
    pub fn run<F>(&mut self, mut on_tick: F) -> u64
    where
        F: FnMut(&mut Session, TickReport) -> ControlFlow<()>,
    {
        self.start();
        let interval = self.config.tick_interval();
        let mut ticks = 0;

        while let Some(report) = self.tick() {
            ticks += 1;
            if on_tick(self, report).is_break() {
                break;
            }
            if !interval.is_zero() {
                std::thread::sleep(interval);
            }
        }

        ticks
    }

    // --- metrics -----------------------------------------------------------

    /// Rolling frame rate (zero when the `metrics` feature is off).
    pub fn fps(&self) -> f64 {
        self.frame_timer.fps()
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_timer.frame_time_ms()
    }

    /// Shortest and longest frame in the rolling window, in milliseconds.
    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        self.frame_timer.frame_time_range_ms()
    }

    /// Event counters: `ticks`, `spawned`, `destroyed`, `collisions`,
    /// `callback_failures`.
    pub fn counters(&self) -> &Counter {
        self.world.counters()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.world.despawn_all();
    }
}
