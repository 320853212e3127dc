//! Duck entity: spawn, flight path, death fall

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::point_in_ellipse;
use crate::config::GameConfig;
use crate::consts::*;

/// Which way a duck is flying
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heading {
    Left,
    Right,
}

impl Heading {
    pub fn sign(&self) -> f32 {
        match self {
            Heading::Left => -1.0,
            Heading::Right => 1.0,
        }
    }
}

/// Duck life state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum DuckState {
    /// Alive and crossing the screen
    Flying,
    /// Shot; tumbling toward the ground
    Falling {
        fall_speed: f32,
        /// -1.0 or 1.0, lateral drift direction picked at hit time
        drift: f32,
        /// Seconds since the hit
        elapsed: f32,
    },
}

/// A duck entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Duck {
    pub id: u32,
    pub pos: Vec2,
    /// Horizontal velocity (px/s, signed)
    pub vx: f32,
    pub heading: Heading,
    /// Vertical wobble amplitude (px)
    pub wobble_amp: f32,
    /// Vertical wobble period (s)
    pub wobble_period: f32,
    /// Seconds alive (drives the wobble)
    pub age: f32,
    pub width: f32,
    pub height: f32,
    /// Wing-flap animation phase (radians, render hint)
    pub flap: f32,
    pub state: DuckState,
}

impl Duck {
    /// Spawn a duck just off a random screen edge, heading across
    pub fn spawn(id: u32, level: u32, config: &GameConfig, rng: &mut impl Rng) -> Self {
        let heading = if rng.random_bool(0.5) {
            Heading::Right
        } else {
            Heading::Left
        };
        let (top, bottom) = config
            .spawn_band()
            .unwrap_or((DUCK_SPAWN_TOP as i32, DUCK_SPAWN_TOP as i32));
        let y = rng.random_range(top..=bottom) as f32;
        let x = match heading {
            Heading::Right => -DUCK_SPAWN_MARGIN,
            Heading::Left => config.screen_w + DUCK_SPAWN_MARGIN,
        };

        let speed_factor = 1.0 + level.saturating_sub(1) as f32 * DUCK_SPEED_PER_LEVEL;
        let jitter = 0.95 + rng.random::<f32>() * 0.35;
        let vx = heading.sign() * config.duck_base_speed * speed_factor * jitter;

        let wobble_amp = 18.0 + rng.random::<f32>() * 18.0;
        let wobble_period = 1.0 + rng.random::<f32>() * 1.6;
        let flap = rng.random::<f32>() * TAU;

        Self {
            id,
            pos: Vec2::new(x, y),
            vx,
            heading,
            wobble_amp,
            wobble_period,
            age: 0.0,
            width: (DUCK_WIDTH * config.duck_scale).trunc(),
            height: (DUCK_HEIGHT * config.duck_scale).trunc(),
            flap,
            state: DuckState::Flying,
        }
    }

    pub fn is_flying(&self) -> bool {
        matches!(self.state, DuckState::Flying)
    }

    /// Advance one tick
    pub fn update(&mut self, dt: f32) {
        match &mut self.state {
            DuckState::Flying => {
                self.age += dt;
                let phase = self.age * TAU / self.wobble_period;
                self.pos.y += phase.sin() * self.wobble_amp * dt;
                self.pos.x += self.vx * dt;
                self.flap += dt * 20.0;
            }
            DuckState::Falling {
                fall_speed,
                drift,
                elapsed,
            } => {
                *fall_speed += FALL_GRAVITY * dt;
                self.pos.y += *fall_speed * dt;
                self.pos.x += FALL_DRIFT_SPEED * *drift * dt;
                *elapsed += dt;
            }
        }
    }

    /// Elliptical hit area centered on the duck. Falling ducks can't be hit.
    pub fn hit_test(&self, point: Vec2) -> bool {
        if !self.is_flying() {
            return false;
        }
        point_in_ellipse(point, self.pos, self.hit_radii())
    }

    /// Semi-axes of the hit ellipse
    pub fn hit_radii(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * DUCK_HIT_SCALE
    }

    /// Switch to the death fall
    pub fn kill(&mut self, rng: &mut impl Rng) {
        if self.is_flying() {
            let fall_speed = 80.0 + rng.random::<f32>() * 80.0;
            let drift = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
            self.state = DuckState::Falling {
                fall_speed,
                drift,
                elapsed: 0.0,
            };
        }
    }

    /// Flying duck has crossed fully past either horizontal edge
    pub fn has_escaped(&self, screen_w: f32) -> bool {
        self.is_flying()
            && (self.pos.x < -DUCK_ESCAPE_MARGIN || self.pos.x > screen_w + DUCK_ESCAPE_MARGIN)
    }

    /// Falling duck has hit the ground or run out its animation
    pub fn fall_finished(&self, screen_h: f32) -> bool {
        match self.state {
            DuckState::Falling { elapsed, .. } => {
                self.pos.y > screen_h + FALL_REMOVE_MARGIN || elapsed > FALL_TIMEOUT
            }
            DuckState::Flying => false,
        }
    }

    /// Death animation progress in [0, 1] (render hint)
    pub fn fall_progress(&self) -> f32 {
        match self.state {
            DuckState::Falling { elapsed, .. } => (elapsed / FALL_TIMEOUT).min(1.0),
            DuckState::Flying => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn duck_at(x: f32, y: f32) -> Duck {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(7);
        let mut duck = Duck::spawn(1, 1, &config, &mut rng);
        duck.pos = Vec2::new(x, y);
        duck
    }

    #[test]
    fn test_spawn_enters_from_edge_toward_center() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(42);
        for id in 0..200 {
            let duck = Duck::spawn(id, 1, &config, &mut rng);
            match duck.heading {
                Heading::Right => {
                    assert_eq!(duck.pos.x, -DUCK_SPAWN_MARGIN);
                    assert!(duck.vx > 0.0);
                }
                Heading::Left => {
                    assert_eq!(duck.pos.x, config.screen_w + DUCK_SPAWN_MARGIN);
                    assert!(duck.vx < 0.0);
                }
            }
            assert!(duck.pos.y >= 110.0 && duck.pos.y <= config.screen_h - 220.0);
            assert!(duck.wobble_amp >= 18.0 && duck.wobble_amp < 36.0);
            assert!(duck.wobble_period >= 1.0 && duck.wobble_period < 2.6);
            assert!(duck.is_flying());
        }
    }

    #[test]
    fn test_speed_scales_with_level() {
        let config = GameConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let lvl1 = Duck::spawn(1, 1, &config, &mut rng);
        let mut rng = Pcg32::seed_from_u64(3);
        let lvl10 = Duck::spawn(1, 10, &config, &mut rng);
        let ratio = lvl10.vx.abs() / lvl1.vx.abs();
        assert!((ratio - (1.0 + 9.0 * DUCK_SPEED_PER_LEVEL)).abs() < 1e-4);
        assert!(lvl1.vx.abs() >= 120.0 * 0.95 && lvl1.vx.abs() <= 120.0 * 1.3);
    }

    #[test]
    fn test_hit_test_ellipse() {
        let duck = duck_at(500.0, 300.0);
        // Semi-axes 40.8 x 33.6
        assert!(duck.hit_test(Vec2::new(500.0, 300.0)));
        assert!(duck.hit_test(Vec2::new(540.0, 300.0)));
        assert!(!duck.hit_test(Vec2::new(542.0, 300.0)));
        assert!(duck.hit_test(Vec2::new(500.0, 333.0)));
        assert!(!duck.hit_test(Vec2::new(500.0, 335.0)));
        // Inside the bounding box but outside the ellipse
        assert!(!duck.hit_test(Vec2::new(535.0, 330.0)));
    }

    #[test]
    fn test_falling_duck_cannot_be_hit() {
        let mut duck = duck_at(500.0, 300.0);
        let mut rng = Pcg32::seed_from_u64(1);
        duck.kill(&mut rng);
        assert!(!duck.hit_test(Vec2::new(500.0, 300.0)));
        assert!(!duck.has_escaped(1000.0));
    }

    #[test]
    fn test_flight_moves_horizontally() {
        let mut duck = duck_at(0.0, 300.0);
        let vx = duck.vx;
        for _ in 0..60 {
            duck.update(1.0 / 60.0);
        }
        assert!((duck.pos.x - vx).abs() < 0.01);
        // Wobble stays within amplitude * period / (2π) * 2 of start
        assert!((duck.pos.y - 300.0).abs() <= duck.wobble_amp * duck.wobble_period);
    }

    #[test]
    fn test_escape_margin() {
        let mut duck = duck_at(-140.0, 300.0);
        assert!(!duck.has_escaped(1000.0));
        duck.pos.x = -140.5;
        assert!(duck.has_escaped(1000.0));
        duck.pos.x = 1140.5;
        assert!(duck.has_escaped(1000.0));
    }

    #[test]
    fn test_fall_accelerates_and_finishes() {
        let mut duck = duck_at(500.0, 300.0);
        let mut rng = Pcg32::seed_from_u64(9);
        duck.kill(&mut rng);
        let mut last_dy = 0.0;
        let mut ticks = 0;
        while !duck.fall_finished(640.0) {
            let before = duck.pos.y;
            duck.update(1.0 / 60.0);
            let dy = duck.pos.y - before;
            assert!(dy > last_dy);
            last_dy = dy;
            ticks += 1;
            assert!(ticks < 1000);
        }
        // Falls off the bottom well before the timeout
        assert!(duck.fall_progress() < 1.0);
        assert!(duck.pos.y > 640.0 + FALL_REMOVE_MARGIN);
    }

    #[test]
    fn test_fall_times_out() {
        let mut duck = duck_at(500.0, -10_000.0);
        let mut rng = Pcg32::seed_from_u64(9);
        duck.kill(&mut rng);
        for _ in 0..181 {
            duck.update(1.0 / 60.0);
        }
        assert!(duck.fall_finished(640.0));
        assert_eq!(duck.fall_progress(), 1.0);
    }
}
