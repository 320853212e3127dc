//! Fixed timestep simulation tick
//!
//! Routes input, advances entities and drives the level state machine.

use glam::Vec2;

use super::duck::Duck;
use super::particle::spawn_burst;
use super::state::{GameEvent, GamePhase, GameState, MAX_PARTICLES, NoticeKind};
use crate::consts::PARTICLES_PER_HIT;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Pointer click in screen coordinates
    pub click: Option<Vec2>,
    /// Pause toggle
    pub pause: bool,
    /// Complete the current level immediately (debug/testing)
    pub force_complete: bool,
}

/// What a shot attempt did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShotOutcome {
    /// Not in the playing phase; nothing changed
    Ignored,
    /// Pool empty; nothing changed
    NoBullets,
    /// Bullet fired, nothing hit
    Miss,
    /// Bullet fired, the duck with this id was hit
    Hit { duck_id: u32 },
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.pause {
        state.paused = !state.paused;
        log::debug!("Paused: {}", state.paused);
    }

    if input.force_complete && state.phase == GamePhase::Playing {
        log::info!("Forcing level {} complete", state.level);
        state.hits_this_level = state.config.ducks_to_clear;
        check_level_complete(state);
    }

    // Clicks still land while paused, against the frozen field
    if let Some(pos) = input.click {
        click(state, pos);
    }

    if state.paused {
        return;
    }

    state.time_ticks += 1;

    if let Some(notice) = state.notice.as_mut() {
        notice.remaining = (notice.remaining - dt).max(0.0);
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    // Spawn
    let count = state.spawner.update(dt, &mut state.rng);
    for _ in 0..count {
        spawn_duck(state);
    }

    // Move ducks, then resolve escapes and finished falls in one compaction pass
    for duck in &mut state.ducks {
        duck.update(dt);
    }

    let screen_w = state.config.screen_w;
    let screen_h = state.config.screen_h;
    let escaped: Vec<u32> = state
        .ducks
        .iter()
        .filter(|d| d.has_escaped(screen_w))
        .map(|d| d.id)
        .collect();
    state
        .ducks
        .retain(|d| !d.has_escaped(screen_w) && !d.fall_finished(screen_h));

    for duck_id in escaped {
        if state.phase != GamePhase::Playing {
            break;
        }
        on_duck_escaped(state, duck_id);
    }

    // Particles
    for particle in &mut state.particles {
        particle.update(dt);
    }
    state.particles.retain(|p| !p.is_expired());
}

/// Pointer click: shoot while playing, otherwise advance the state machine
pub fn click(state: &mut GameState, pos: Vec2) {
    match state.phase {
        GamePhase::Playing => {
            shoot(state, pos);
        }
        GamePhase::LevelEnd | GamePhase::GameOver | GamePhase::Victory => advance(state),
    }
}

/// Fire at `pos`. Only meaningful while playing.
pub fn shoot(state: &mut GameState, pos: Vec2) -> ShotOutcome {
    if state.phase != GamePhase::Playing {
        return ShotOutcome::Ignored;
    }

    if !state.bullets.try_consume() {
        state.set_notice(NoticeKind::NoBullets, "No bullets!");
        state.push_event(GameEvent::DryFire);
        return ShotOutcome::NoBullets;
    }
    state.push_event(GameEvent::Shot { x: pos.x, y: pos.y });

    let Some(index) = super::collision::resolve_shot(&state.ducks, pos) else {
        log::debug!("Miss at ({:.0}, {:.0}), bullets={}", pos.x, pos.y, state.bullets);
        state.set_notice(NoticeKind::Miss, "Miss!");
        state.push_event(GameEvent::Missed);
        return ShotOutcome::Miss;
    };

    let points = state.points_per_hit();
    let duck = &mut state.ducks[index];
    duck.kill(&mut state.rng);
    let duck_id = duck.id;
    let origin = duck.pos;

    state.score += points;
    state.hits_this_level += 1;
    spawn_burst(
        &mut state.particles,
        origin,
        PARTICLES_PER_HIT,
        MAX_PARTICLES,
        &mut state.rng,
    );
    state.set_notice(NoticeKind::Hit, "Hit!");
    state.push_event(GameEvent::DuckHit { duck_id, points });
    log::debug!(
        "Hit duck {} ({}/{}), score={}",
        duck_id,
        state.hits_this_level,
        state.config.ducks_to_clear,
        state.score
    );

    check_level_complete(state);

    ShotOutcome::Hit { duck_id }
}

/// Leave a non-playing phase on click
pub fn advance(state: &mut GameState) {
    match state.phase {
        GamePhase::Playing => {}
        GamePhase::LevelEnd => {
            if state.is_last_level() {
                enter_victory(state);
            } else {
                state.level += 1;
                state.setup_level();
            }
        }
        GamePhase::GameOver => {
            log::info!("Retrying level {}", state.level);
            state.setup_level();
        }
        GamePhase::Victory => {
            log::info!("Restarting from level 1");
            state.level = 1;
            state.score = 0;
            state.setup_level();
        }
    }
}

/// Spawn one duck for the current level
fn spawn_duck(state: &mut GameState) {
    let id = state.next_entity_id();
    let duck = Duck::spawn(id, state.level, &state.config, &mut state.rng);
    log::debug!(
        "Spawned duck {} at ({:.0}, {:.0}) vx={:.0}",
        duck.id,
        duck.pos.x,
        duck.pos.y,
        duck.vx
    );
    state.ducks.push(duck);
}

fn on_duck_escaped(state: &mut GameState, duck_id: u32) {
    state.health = state.health.saturating_sub(1);
    state.set_notice(NoticeKind::DuckEscaped, "Duck escaped! -1 health");
    state.push_event(GameEvent::DuckEscaped { duck_id });
    log::debug!("Duck {} escaped, health={}", duck_id, state.health);

    if state.health == 0 {
        state.phase = GamePhase::GameOver;
        state.set_notice(
            NoticeKind::LevelFailed,
            format!("Level {} failed.", state.level),
        );
        state.push_event(GameEvent::LevelFailed { level: state.level });
        log::info!("Level {} failed, score={}", state.level, state.score);
    }
}

/// Quota reached: level end, or victory on the final level
fn check_level_complete(state: &mut GameState) {
    if state.phase != GamePhase::Playing || state.hits_this_level < state.config.ducks_to_clear {
        return;
    }

    state.set_notice(
        NoticeKind::LevelCleared,
        format!("Level {} complete!", state.level),
    );
    state.push_event(GameEvent::LevelCleared { level: state.level });
    log::info!("Level {} cleared, score={}", state.level, state.score);

    if state.is_last_level() {
        enter_victory(state);
    } else {
        state.phase = GamePhase::LevelEnd;
    }
}

fn enter_victory(state: &mut GameState) {
    state.phase = GamePhase::Victory;
    state.push_event(GameEvent::Victory { score: state.score });
    log::info!("Victory! Final score {}", state.score);
}
