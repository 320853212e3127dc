//! Hit burst particles (visual only, never affect gameplay)

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::FALL_GRAVITY;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Seconds since spawn
    pub age: f32,
    /// Seconds until removal
    pub lifetime: f32,
    pub size: f32,
}

impl Particle {
    /// Random spark flying up and out from `origin`
    pub fn spark(origin: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos: origin,
            vel: Vec2::new(
                rng.random_range(-220.0..=220.0),
                rng.random_range(-160.0..=-40.0),
            ),
            age: 0.0,
            lifetime: rng.random_range(0.5..=1.1),
            size: rng.random_range(2.0..=6.0),
        }
    }

    pub fn update(&mut self, dt: f32) {
        self.age += dt;
        self.vel.y += FALL_GRAVITY * dt;
        self.pos += self.vel * dt;
    }

    pub fn is_expired(&self) -> bool {
        self.age > self.lifetime
    }

    /// Remaining life in [0, 1] (render hint for size/alpha)
    pub fn fade(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }
}

/// Spawn `count` sparks at `origin`, never exceeding `max` live particles
pub fn spawn_burst(
    particles: &mut Vec<Particle>,
    origin: Vec2,
    count: usize,
    max: usize,
    rng: &mut impl Rng,
) {
    let room = max.saturating_sub(particles.len());
    particles.extend((0..count.min(room)).map(|_| Particle::spark(origin, rng)));
}
