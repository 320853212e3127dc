//! Duck spawn pacing
//!
//! One duck per interval, plus a level-scaled chance of a bonus duck on
//! the same tick. The bonus chance is a tunable, not a core mechanic:
//! setting either bonus field in `GameConfig` to 0 turns it off.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::GameConfig;

/// Seconds between spawns for `level`: non-increasing, floored
pub fn spawn_interval_for_level(config: &GameConfig, level: u32) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (config.base_spawn_interval - steps * config.spawn_interval_step).max(config.min_spawn_interval)
}

/// Chance of a bonus duck accompanying each spawn at `level`
pub fn bonus_chance_for_level(config: &GameConfig, level: u32) -> f32 {
    let steps = level.saturating_sub(1) as f32;
    (steps * config.bonus_chance_per_level).clamp(0.0, config.bonus_chance_max)
}

/// Spawn timer for the current level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Spawner {
    /// Seconds since the last spawn
    pub timer: f32,
    /// Seconds between spawns
    pub interval: f32,
    /// Probability of a second duck per spawn
    pub bonus_chance: f32,
}

impl Spawner {
    pub fn for_level(config: &GameConfig, level: u32) -> Self {
        Self {
            timer: 0.0,
            interval: spawn_interval_for_level(config, level),
            bonus_chance: bonus_chance_for_level(config, level),
        }
    }

    /// Advance the timer; returns how many ducks to spawn this tick (0, 1 or 2)
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) -> usize {
        self.timer += dt;
        if self.timer < self.interval {
            return 0;
        }
        self.timer = 0.0;
        if self.bonus_chance > 0.0 && rng.random::<f32>() < self.bonus_chance {
            2
        } else {
            1
        }
    }
}
