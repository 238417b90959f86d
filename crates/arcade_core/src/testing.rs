//! Shared fixtures for unit tests

use crate::collision::Collider;
use crate::entity::{BoundaryOutcome, Entity, EntityContext, EntityId, EntityKind};
use crate::error::EntityResult;
use crate::math::Vec2;
use crate::sprite::{BoundaryPolicy, FrameAnimation, MaskFrame, OpacityMask, SpriteDesign, Surface};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

/// Square design that counts attach/detach calls.
pub(crate) struct BoxDesign {
    size: Vec2,
    mask: Option<Box<dyn OpacityMask>>,
    animation: Option<FrameAnimation>,
    pub(crate) attached: Rc<Cell<i32>>,
}

impl BoxDesign {
    pub(crate) fn square(side: f32) -> Self {
        Self {
            size: Vec2::splat(side),
            mask: None,
            animation: None,
            attached: Rc::new(Cell::new(0)),
        }
    }

    pub(crate) fn with_mask(mut self, mask: impl OpacityMask + 'static) -> Self {
        self.mask = Some(Box::new(mask));
        self
    }

    pub(crate) fn animated(mut self, frames: u32, frame_delay: Duration) -> Self {
        self.animation = Some(FrameAnimation::new(frames, frame_delay));
        self
    }
}

impl SpriteDesign for BoxDesign {
    fn size(&self) -> Vec2 {
        self.size
    }

    fn attach_to(&mut self, _surface: &Surface) {
        self.attached.set(self.attached.get() + 1);
    }

    fn detach_from(&mut self, _surface: &Surface) {
        self.attached.set(self.attached.get() - 1);
    }

    fn opacity_mask(&self) -> Option<&dyn OpacityMask> {
        self.mask.as_deref()
    }

    fn advance(&mut self, elapsed: Duration) {
        if let Some(animation) = self.animation.as_mut() {
            animation.advance(elapsed);
        }
    }

    fn is_completed(&self) -> bool {
        self.animation.as_ref().is_some_and(FrameAnimation::is_completed)
    }
}

/// Mask in surface coordinates, opaque at a single point.
pub(crate) struct SurfaceDot(pub(crate) Vec2);

impl OpacityMask for SurfaceDot {
    fn is_opaque_at(&self, point: Vec2) -> bool {
        point == self.0
    }

    fn frame(&self) -> MaskFrame {
        MaskFrame::Surface
    }
}

#[derive(Default)]
pub(crate) struct Journal {
    pub(crate) updates: Vec<EntityId>,
    pub(crate) hits: Vec<(EntityId, EntityId)>,
    pub(crate) order: Vec<&'static str>,
    pub(crate) bounds: Vec<BoundaryOutcome>,
}

pub(crate) type SharedJournal = Rc<RefCell<Journal>>;

pub(crate) fn journal() -> SharedJournal {
    Rc::new(RefCell::new(Journal::default()))
}

/// Configurable entity that records what happens to it.
pub(crate) struct Puppet {
    log: SharedJournal,
    velocity: Vec2,
    policy: Option<BoundaryPolicy>,
    victims: Option<Rc<RefCell<Vec<EntityId>>>>,
    spawn_on_update: Option<EntityKind>,
    spawn_on_hit: Option<(EntityKind, Vec2)>,
    destroy_on_hit: bool,
    destroy_other_on_hit: bool,
    fail_on_hit: bool,
    fail_on_update: bool,
    expire_with_animation: bool,
}

impl Puppet {
    pub(crate) fn new(log: SharedJournal) -> Self {
        Self {
            log,
            velocity: Vec2::ZERO,
            policy: None,
            victims: None,
            spawn_on_update: None,
            spawn_on_hit: None,
            destroy_on_hit: false,
            destroy_other_on_hit: false,
            fail_on_hit: false,
            fail_on_update: false,
            expire_with_animation: false,
        }
    }

    /// Pixels per second.
    pub(crate) fn moving(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub(crate) fn with_policy(mut self, policy: BoundaryPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    /// Destroy every listed entity on each update.
    pub(crate) fn destroying(mut self, victims: Rc<RefCell<Vec<EntityId>>>) -> Self {
        self.victims = Some(victims);
        self
    }

    /// Spawn one plain entity on the first update.
    pub(crate) fn spawning(mut self, kind: EntityKind) -> Self {
        self.spawn_on_update = Some(kind);
        self
    }

    /// Spawn a 10x10 sprite at `at` on every hit.
    pub(crate) fn spawning_sprite(mut self, kind: EntityKind, at: Vec2) -> Self {
        self.spawn_on_hit = Some((kind, at));
        self
    }

    pub(crate) fn destroying_on_hit(mut self) -> Self {
        self.destroy_on_hit = true;
        self
    }

    pub(crate) fn destroying_other_on_hit(mut self) -> Self {
        self.destroy_other_on_hit = true;
        self
    }

    pub(crate) fn failing_on_hit(mut self) -> Self {
        self.fail_on_hit = true;
        self
    }

    /// Advance the design each update and go away when it completes.
    pub(crate) fn expiring(mut self) -> Self {
        self.expire_with_animation = true;
        self
    }

    pub(crate) fn failing_on_update(mut self) -> Self {
        self.fail_on_update = true;
        self
    }
}

impl Entity for Puppet {
    fn update(&mut self, ctx: &mut EntityContext<'_>, elapsed: Duration) -> EntityResult {
        {
            let mut log = self.log.borrow_mut();
            log.updates.push(ctx.id());
            log.order.push("update");
        }

        if let Some(victims) = &self.victims {
            let victims = victims.borrow().clone();
            for victim in victims {
                ctx.destroy(victim);
            }
        }

        let velocity = self.velocity;
        if let Some(sprite) = ctx.sprite_mut() {
            sprite.translate(velocity * elapsed.as_secs_f32());
        }
        if let Some(policy) = self.policy {
            let outcome = ctx.enforce_bounds(policy);
            self.log.borrow_mut().bounds.push(outcome);
        }
        if self.expire_with_animation && ctx.advance_animation(elapsed) {
            self.log.borrow_mut().order.push("expired");
        }

        if let Some(kind) = self.spawn_on_update.take() {
            ctx.spawn(kind, Puppet::new(self.log.clone()))?;
        }

        if self.fail_on_update {
            return Err("update failed".into());
        }
        Ok(())
    }

    fn on_collision(&mut self, ctx: &mut EntityContext<'_>, other: &Collider) -> EntityResult {
        {
            let mut log = self.log.borrow_mut();
            log.hits.push((ctx.id(), other.id));
            log.order.push("collision");
        }

        if let Some((kind, at)) = self.spawn_on_hit {
            ctx.spawn_sprite(kind, Puppet::new(self.log.clone()), BoxDesign::square(10.0), at)?;
        }
        if self.destroy_other_on_hit {
            ctx.destroy(other.id);
        }
        if self.destroy_on_hit {
            ctx.destroy_self();
        }

        if self.fail_on_hit {
            return Err("collision handler failed".into());
        }
        Ok(())
    }
}
