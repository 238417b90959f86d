//! Demo game: a ship, some rocks and the shots between them

use arcade_core::glam::Vec2;
use arcade_core::{
    BoundaryPolicy, Collider, Entity, EntityContext, EntityKind, EntityResult, FrameAnimation,
    OpacityMask, PixelMask, SpriteDesign,
};
use arcade_services::{InputSource, InputState, Key};
use std::cell::RefCell;
use std::f32::consts::TAU;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, info};

pub const SHIP_SIZE: u32 = 24;
const SHIP_TURN_RATE: f32 = 3.0; // radians per second
const SHIP_THRUST: f32 = 120.0; // pixels per second
const SHOT_SIZE: f32 = 3.0;
const SHOT_SPEED: f32 = 400.0;
const RELOAD: Duration = Duration::from_millis(300);
const ROCK_SPEED: f32 = 60.0;
const EXPLOSION_SIZE: f32 = 32.0;
const EXPLOSION_FRAMES: u32 = 7;
const EXPLOSION_FRAME_DELAY: Duration = Duration::from_millis(50);

/// Kind tags handed to every demo entity so collision handlers can tell
/// what they hit.
#[derive(Debug, Clone, Copy)]
pub struct Kinds {
    pub ship: EntityKind,
    pub rock: EntityKind,
    pub shot: EntityKind,
    pub explosion: EntityKind,
}

/// Unit vector for a heading measured clockwise from "up" (screen y grows down).
fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.sin(), -angle.cos())
}

// --- designs -----------------------------------------------------------------

/// Solid shape described by a pixel mask.
pub struct MaskedDesign {
    mask: PixelMask,
}

impl MaskedDesign {
    /// Upward-pointing triangle.
    pub fn ship() -> Self {
        let side = SHIP_SIZE;
        let mask = PixelMask::from_fn(side, side, |x, y| {
            let half_width = (y as f32 + 1.0) / 2.0;
            (x as f32 - side as f32 / 2.0).abs() <= half_width
        });
        Self { mask }
    }

    pub fn rock(size: RockSize) -> Self {
        let diameter = size.diameter();
        let r = diameter as f32 / 2.0;
        let mask = PixelMask::from_fn(diameter, diameter, |x, y| {
            let d = Vec2::new(x as f32 + 0.5 - r, y as f32 + 0.5 - r);
            d.length_squared() <= r * r
        });
        Self { mask }
    }
}

impl SpriteDesign for MaskedDesign {
    fn size(&self) -> Vec2 {
        Vec2::new(self.mask.width() as f32, self.mask.height() as f32)
    }

    fn opacity_mask(&self) -> Option<&dyn OpacityMask> {
        Some(&self.mask)
    }
}

pub struct ShotDesign;

impl SpriteDesign for ShotDesign {
    fn size(&self) -> Vec2 {
        Vec2::splat(SHOT_SIZE)
    }
}

/// Play-once explosion; the frames themselves are left to a renderer.
pub struct ExplosionDesign {
    animation: FrameAnimation,
}

impl ExplosionDesign {
    pub fn new() -> Self {
        Self {
            animation: FrameAnimation::new(EXPLOSION_FRAMES, EXPLOSION_FRAME_DELAY),
        }
    }
}

impl Default for ExplosionDesign {
    fn default() -> Self {
        Self::new()
    }
}

impl SpriteDesign for ExplosionDesign {
    fn size(&self) -> Vec2 {
        Vec2::splat(EXPLOSION_SIZE)
    }

    fn advance(&mut self, elapsed: Duration) {
        if self.animation.advance(elapsed) {
            debug!(frame = self.animation.current_frame(), "explosion frame");
        }
    }

    fn is_completed(&self) -> bool {
        self.animation.is_completed()
    }
}

// --- ship --------------------------------------------------------------------

pub struct Ship {
    kinds: Kinds,
    input: Rc<RefCell<InputState>>,
    angle: f32,
    since_fired: Duration,
}

impl Ship {
    pub fn new(kinds: Kinds, input: Rc<RefCell<InputState>>) -> Self {
        Self {
            kinds,
            input,
            angle: 0.0,
            since_fired: RELOAD,
        }
    }
}

impl Entity for Ship {
    fn update(&mut self, ctx: &mut EntityContext<'_>, elapsed: Duration) -> EntityResult {
        let dt = elapsed.as_secs_f32();
        let input = self.input.borrow();

        if input.is_pressed(Key::Left) {
            self.angle -= SHIP_TURN_RATE * dt;
        }
        if input.is_pressed(Key::Right) {
            self.angle += SHIP_TURN_RATE * dt;
        }
        self.angle = self.angle.rem_euclid(TAU);

        if input.is_pressed(Key::Up) {
            if let Some(sprite) = ctx.sprite_mut() {
                sprite.translate(heading(self.angle) * SHIP_THRUST * dt);
            }
        }
        ctx.enforce_bounds(BoundaryPolicy::Wrap);

        self.since_fired = self.since_fired.saturating_add(elapsed);
        let fire = input.is_pressed(Key::Space) && self.since_fired >= RELOAD;
        drop(input);

        if fire {
            let Some(bounds) = ctx.sprite().map(|s| s.bounds()) else {
                return Ok(());
            };
            let muzzle = bounds.location()
                + bounds.size() / 2.0
                + heading(self.angle) * (SHIP_SIZE as f32 / 2.0);
            let shot = Shot::new(self.kinds, heading(self.angle) * SHOT_SPEED);
            let id = ctx.spawn_sprite(self.kinds.shot, shot, ShotDesign, muzzle)?;
            debug!(shot = %id, angle = self.angle, "fired");
            self.since_fired = Duration::ZERO;
        }
        Ok(())
    }

    fn on_collision(&mut self, ctx: &mut EntityContext<'_>, other: &Collider) -> EntityResult {
        if other.kind == self.kinds.rock {
            info!(rock = %other.id, "ship hit a rock");
            ctx.destroy_self();
        }
        Ok(())
    }
}

// --- shot --------------------------------------------------------------------

pub struct Shot {
    kinds: Kinds,
    velocity: Vec2,
}

impl Shot {
    pub fn new(kinds: Kinds, velocity: Vec2) -> Self {
        Self { kinds, velocity }
    }
}

impl Entity for Shot {
    fn update(&mut self, ctx: &mut EntityContext<'_>, elapsed: Duration) -> EntityResult {
        let delta = self.velocity * elapsed.as_secs_f32();
        if let Some(sprite) = ctx.sprite_mut() {
            sprite.translate(delta);
        }
        ctx.enforce_bounds(BoundaryPolicy::Despawn);
        Ok(())
    }

    /// Hitting a rock leaves an explosion centred on the impact.
    fn on_collision(&mut self, ctx: &mut EntityContext<'_>, other: &Collider) -> EntityResult {
        if other.kind != self.kinds.rock {
            return Ok(());
        }

        let at = ctx.sprite().map(|s| s.location()).unwrap_or(other.bounds.location());
        ctx.destroy_self();
        ctx.spawn_sprite(
            self.kinds.explosion,
            Explosion,
            ExplosionDesign::new(),
            at - Vec2::splat(EXPLOSION_SIZE / 2.0),
        )?;
        Ok(())
    }
}

// --- explosion ---------------------------------------------------------------

/// Stays put until its design's animation has played out.
pub struct Explosion;

impl Entity for Explosion {
    fn update(&mut self, ctx: &mut EntityContext<'_>, elapsed: Duration) -> EntityResult {
        if ctx.advance_animation(elapsed) {
            debug!(explosion = %ctx.id(), "explosion finished");
        }
        Ok(())
    }
}

// --- rock --------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RockSize {
    Large,
    Medium,
    Small,
}

impl RockSize {
    fn diameter(self) -> u32 {
        match self {
            RockSize::Large => 64,
            RockSize::Medium => 32,
            RockSize::Small => 16,
        }
    }

    fn smaller(self) -> Option<RockSize> {
        match self {
            RockSize::Large => Some(RockSize::Medium),
            RockSize::Medium => Some(RockSize::Small),
            RockSize::Small => None,
        }
    }
}

pub struct Rock {
    kinds: Kinds,
    size: RockSize,
    angle: f32,
}

impl Rock {
    pub fn new(kinds: Kinds, size: RockSize, angle: f32) -> Self {
        Self { kinds, size, angle }
    }
}

impl Entity for Rock {
    fn update(&mut self, ctx: &mut EntityContext<'_>, elapsed: Duration) -> EntityResult {
        let delta = heading(self.angle) * ROCK_SPEED * elapsed.as_secs_f32();
        if let Some(sprite) = ctx.sprite_mut() {
            sprite.translate(delta);
        }
        ctx.enforce_bounds(BoundaryPolicy::Wrap);
        Ok(())
    }

    /// A shot breaks the rock into three smaller ones; small rocks vanish.
    fn on_collision(&mut self, ctx: &mut EntityContext<'_>, other: &Collider) -> EntityResult {
        if other.kind != self.kinds.shot {
            return Ok(());
        }

        let origin = ctx.sprite().map(|s| s.location()).unwrap_or_default();
        ctx.destroy_self();

        let Some(size) = self.size.smaller() else {
            return Ok(());
        };
        for n in 0..3 {
            let angle = self.angle + TAU / 3.0 * n as f32 + 0.5;
            let offset = heading(angle) * size.diameter() as f32 / 2.0;
            ctx.spawn_sprite(
                self.kinds.rock,
                Rock::new(self.kinds, size, angle),
                MaskedDesign::rock(size),
                origin + offset,
            )?;
        }
        debug!(rock = %ctx.id(), ?size, "rock broke up");
        Ok(())
    }
}
