//! Level state machine scenarios: clearing, failing, retrying, victory

use duck_hunt::consts::SIM_DT;
use duck_hunt::sim::{
    BulletPool, Duck, GameEvent, GamePhase, GameState, Heading, ShotOutcome, TickInput, advance,
    shoot, tick,
};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Put a flying duck at a known spot
fn place_duck(state: &mut GameState, rng: &mut Pcg32, x: f32, y: f32) -> u32 {
    let id = state.next_entity_id();
    let mut duck = Duck::spawn(id, state.level, &state.config, rng);
    duck.pos = Vec2::new(x, y);
    state.ducks.push(duck);
    id
}

/// Put a duck one tick away from escaping past the right edge
fn place_escaping_duck(state: &mut GameState, rng: &mut Pcg32) -> u32 {
    let x = state.config.screen_w + 139.0;
    let id = place_duck(state, rng, x, 300.0);
    let duck = state.ducks.last_mut().unwrap();
    duck.heading = Heading::Right;
    duck.vx = 200.0;
    id
}

fn hit_one(state: &mut GameState, rng: &mut Pcg32) -> ShotOutcome {
    place_duck(state, rng, 500.0, 300.0);
    shoot(state, Vec2::new(500.0, 300.0))
}

fn count_events(state: &mut GameState, pred: impl Fn(&GameEvent) -> bool) -> usize {
    state.drain_events().iter().filter(|e| pred(*e)).count()
}

#[test]
fn ten_hits_without_escapes_clears_level_one() {
    let mut state = GameState::new(1);
    let mut rng = Pcg32::seed_from_u64(1);

    for i in 1..=10 {
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(matches!(hit_one(&mut state, &mut rng), ShotOutcome::Hit { .. }));
        assert_eq!(state.hits_this_level, i);
    }

    assert_eq!(state.phase, GamePhase::LevelEnd);
    assert_eq!(state.health, 5);
    assert_eq!(state.score, 10 * 120);
    assert_eq!(state.notice_text(), Some("Level 1 complete!"));

    // Quota is never exceeded: further shots are ignored
    place_duck(&mut state, &mut rng, 500.0, 300.0);
    assert_eq!(shoot(&mut state, Vec2::new(500.0, 300.0)), ShotOutcome::Ignored);
    assert_eq!(state.hits_this_level, 10);
}

#[test]
fn five_escapes_fail_level_one() {
    let mut state = GameState::new(1);
    let mut rng = Pcg32::seed_from_u64(2);

    for remaining in (0..5u8).rev() {
        place_escaping_duck(&mut state, &mut rng);
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert_eq!(state.health, remaining);
        if remaining > 0 {
            assert_eq!(state.phase, GamePhase::Playing);
            assert_eq!(state.notice_text(), Some("Duck escaped! -1 health"));
        }
    }

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.hits_this_level, 0);
    assert_eq!(state.notice_text(), Some("Level 1 failed."));
}

#[test]
fn simultaneous_escapes_fail_exactly_once() {
    let mut state = GameState::new(3);
    let mut rng = Pcg32::seed_from_u64(3);
    state.drain_events();

    for _ in 0..8 {
        place_escaping_duck(&mut state, &mut rng);
    }
    tick(&mut state, &TickInput::default(), SIM_DT);

    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.health, 0);
    let events = state.drain_events();
    let failed = events
        .iter()
        .filter(|e| matches!(e, GameEvent::LevelFailed { .. }))
        .count();
    let escaped = events
        .iter()
        .filter(|e| matches!(e, GameEvent::DuckEscaped { .. }))
        .count();
    assert_eq!(failed, 1);
    assert_eq!(escaped, 5);

    // Game over is frozen until the player clicks
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.health, 0);
}

#[test]
fn level_six_bullet_pool_runs_dry() {
    let mut state = GameState::new(4);
    let mut rng = Pcg32::seed_from_u64(4);
    state.level = 6;
    state.setup_level();
    assert_eq!(state.bullets, BulletPool::Remaining(15));

    // Any mix of hits and misses
    for shot in 0..15u32 {
        let outcome = if shot % 3 == 0 {
            hit_one(&mut state, &mut rng)
        } else {
            shoot(&mut state, Vec2::new(10.0, 10.0))
        };
        assert_ne!(outcome, ShotOutcome::NoBullets);
        assert_eq!(state.bullets, BulletPool::Remaining(14 - shot));
    }
    assert_eq!(state.hits_this_level, 5);

    let id = place_duck(&mut state, &mut rng, 500.0, 300.0);
    let score = state.score;
    state.drain_events();

    assert_eq!(shoot(&mut state, Vec2::new(500.0, 300.0)), ShotOutcome::NoBullets);
    assert_eq!(state.bullets, BulletPool::Remaining(0));
    assert_eq!(state.score, score);
    assert_eq!(state.hits_this_level, 5);
    let duck = state.ducks.iter().find(|d| d.id == id).unwrap();
    assert!(duck.is_flying());
    assert_eq!(state.notice_text(), Some("No bullets!"));
    assert_eq!(state.drain_events(), vec![GameEvent::DryFire]);
}

#[test]
fn early_levels_never_spend_bullets() {
    let mut state = GameState::new(5);
    for level in 1..=5 {
        state.level = level;
        state.setup_level();
        for _ in 0..50 {
            shoot(&mut state, Vec2::new(10.0, 10.0));
        }
        assert_eq!(state.bullets, BulletPool::Unlimited);
    }
}

#[test]
fn retry_keeps_score_and_level() {
    let mut state = GameState::new(6);
    let mut rng = Pcg32::seed_from_u64(6);
    state.level = 3;
    state.setup_level();

    hit_one(&mut state, &mut rng);
    hit_one(&mut state, &mut rng);
    let score = state.score;
    assert!(!state.particles.is_empty());

    for _ in 0..5 {
        place_escaping_duck(&mut state, &mut rng);
    }
    tick(&mut state, &TickInput::default(), SIM_DT);
    assert_eq!(state.phase, GamePhase::GameOver);

    tick(
        &mut state,
        &TickInput {
            click: Some(Vec2::new(1.0, 1.0)),
            ..Default::default()
        },
        SIM_DT,
    );
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.level, 3);
    assert_eq!(state.score, score);
    assert_eq!(state.health, 5);
    assert_eq!(state.hits_this_level, 0);
    assert!(state.ducks.is_empty());
    assert!(state.particles.is_empty());
}

#[test]
fn final_level_goes_straight_to_victory_and_restarts() {
    let mut state = GameState::new(7);
    let mut rng = Pcg32::seed_from_u64(7);
    state.level = 10;
    state.setup_level();
    state.drain_events();

    for _ in 0..10 {
        hit_one(&mut state, &mut rng);
    }
    assert_eq!(state.phase, GamePhase::Victory);
    assert_eq!(
        count_events(&mut state, |e| matches!(e, GameEvent::Victory { .. })),
        1
    );

    advance(&mut state);
    assert_eq!(state.phase, GamePhase::Playing);
    assert_eq!(state.level, 1);
    assert_eq!(state.score, 0);
    assert_eq!(state.bullets, BulletPool::Unlimited);
}

#[test]
fn force_complete_walks_through_every_level() {
    let mut state = GameState::new(8);
    let force = TickInput {
        force_complete: true,
        ..Default::default()
    };
    let click = TickInput {
        click: Some(Vec2::new(0.0, 0.0)),
        ..Default::default()
    };

    for level in 1..=9 {
        assert_eq!(state.level, level);
        tick(&mut state, &force, SIM_DT);
        assert_eq!(state.phase, GamePhase::LevelEnd);
        tick(&mut state, &click, SIM_DT);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    assert_eq!(state.level, 10);
    tick(&mut state, &force, SIM_DT);
    assert_eq!(state.phase, GamePhase::Victory);
}

#[test]
fn unattended_game_eventually_fails() {
    let mut state = GameState::new(9);
    let mut ticks = 0;
    while state.phase == GamePhase::Playing {
        tick(&mut state, &TickInput::default(), SIM_DT);
        assert!(state.health <= 5);
        ticks += 1;
        assert!(ticks < 60 * 60, "no game over after a minute");
    }
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.health, 0);
}
