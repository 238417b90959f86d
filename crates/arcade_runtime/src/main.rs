//! Arcade Engine Runtime
//!
//! Headless demo: boots a session from settings, drives the ship with a
//! scripted keyboard, and logs what the engine did.
//!
//! Usage: `arcade [settings.json]`

mod asteroids;

use anyhow::{Context, Result};
use arcade_core::glam::Vec2;
use arcade_core::{CollisionMode, Session};
use arcade_services::{InputState, Key, Settings};
use asteroids::{Kinds, MaskedDesign, RockSize, Rock, Ship, SHIP_SIZE};
use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;
use tracing::{info, warn};

const MAX_TICKS: u64 = 600;
const DEMO_TICK_INTERVAL_MS: u64 = 16;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Arcade Engine v{}", arcade_core::VERSION);

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(&path)
            .with_context(|| format!("loading settings from {path}"))?,
        None => {
            let mut settings = Settings::default();
            settings.session.tick_interval_ms = DEMO_TICK_INTERVAL_MS;
            settings
        }
    };

    let surface = settings.surface().context("invalid surface in settings")?;
    let mut session = Session::with_surface(settings.session.clone(), surface);

    let kinds = Kinds {
        ship: session.define_kind("ship")?,
        rock: session.define_kind("rock")?,
        shot: session.define_kind("shot")?,
        explosion: session.define_kind("explosion")?,
    };
    session.register_pair(kinds.ship, kinds.rock)?;
    session.register_pair_with_mode(kinds.shot, kinds.rock, CollisionMode::BoundingBox)?;

    let input = Rc::new(RefCell::new(InputState::new()));
    let ship = session.spawn_sprite(
        kinds.ship,
        Ship::new(kinds, Rc::clone(&input)),
        MaskedDesign::ship(),
        centred(surface.size(), Vec2::splat(SHIP_SIZE as f32)),
    )?;
    session.on_destroyed(ship, |event| info!(ship = %event.id, "ship lost"));

    let corners = [
        Vec2::new(40.0, 40.0),
        Vec2::new(surface.width() - 120.0, 40.0),
        Vec2::new(40.0, surface.height() - 120.0),
        Vec2::new(surface.width() - 120.0, surface.height() - 120.0),
    ];
    for (n, corner) in corners.into_iter().enumerate() {
        let angle = 0.7 + 1.6 * n as f32;
        session.spawn_sprite(
            kinds.rock,
            Rock::new(kinds, RockSize::Large, angle),
            MaskedDesign::rock(RockSize::Large),
            corner,
        )?;
    }

    session.subscribe_frames(|frame| {
        if frame.tick % 120 == 0 {
            tracing::debug!(tick = frame.tick, elapsed = ?frame.elapsed, "frame");
        }
    });

    info!(entities = session.entity_count(), "Runtime initialized successfully");

    let ticks = session.run(|session, report| {
        script_input(&mut input.borrow_mut(), report.tick);

        for pair in &report.collisions {
            info!(first = %pair.first.id, second = %pair.second.id, mode = ?pair.mode, "collision");
        }
        if let Err(err) = report.check() {
            warn!(%err, "frame finished with failures");
        }

        let rocks_left = session
            .world()
            .registry()
            .ids()
            .into_iter()
            .filter(|&id| session.world().registry().kind_of(id) == Some(kinds.rock))
            .count();

        if rocks_left == 0 || !session.is_alive(ship) || session.tick_count() >= MAX_TICKS {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    session.stop();

    let (shortest_ms, longest_ms) = session.frame_time_range_ms();
    info!(
        ticks,
        fps = session.fps(),
        frame_ms = session.frame_time_ms(),
        shortest_ms,
        longest_ms,
        "run finished"
    );
    for (name, value) in session.counters().iter() {
        info!(counter = name, value, "metrics");
    }
    let remaining = session.despawn_all();
    info!(remaining, "session torn down");

    Ok(())
}

/// Top-left corner that puts a sprite of `size` in the middle of `area`.
fn centred(area: Vec2, size: Vec2) -> Vec2 {
    (area - size) / 2.0
}

/// Keyboard script standing in for a player: turn, thrust, and fire in bursts.
fn script_input(input: &mut InputState, tick: u64) {
    input.clear();
    if tick % 40 < 10 {
        input.press(Key::Space);
    }
    match tick % 240 {
        0..=59 => input.press(Key::Left),
        120..=149 => input.press(Key::Up),
        180..=209 => input.press(Key::Right),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arcade_services::InputSource;

    #[test]
    fn ship_starts_in_the_middle_of_the_surface() {
        let at = centred(Vec2::new(800.0, 600.0), Vec2::splat(SHIP_SIZE as f32));
        assert_eq!(at, Vec2::new(388.0, 288.0));
        assert_eq!(at + Vec2::splat(SHIP_SIZE as f32 / 2.0), Vec2::new(400.0, 300.0));
    }

    #[test]
    fn script_fires_in_bursts() {
        let mut input = InputState::new();
        script_input(&mut input, 5);
        assert!(input.is_pressed(Key::Space));
        assert!(input.is_pressed(Key::Left));
        script_input(&mut input, 135);
        assert!(!input.is_pressed(Key::Space));
        assert!(input.is_pressed(Key::Up));
    }
}
