//! Game configuration
//!
//! Supplied once at `GameState` construction. Defaults come from
//! `crate::consts`; a JSON file may override any subset of fields.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::BulletPool;

/// Why a configuration was rejected
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Config file could not be read
    Io { path: String, message: String },
    /// Config text is not valid JSON for `GameConfig`
    Parse(String),
    /// A field holds a value the simulation cannot run with
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, message } => write!(f, "failed to read config {path}: {message}"),
            Self::Parse(message) => write!(f, "invalid config JSON: {message}"),
            Self::Invalid { field, reason } => write!(f, "invalid config field `{field}`: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Level rules, play area and difficulty tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Level rules ===
    /// Number of levels; clearing the last one is victory
    pub total_levels: u32,
    /// Health at the start of every level
    pub health_per_level: u8,
    /// Hits required to clear a level
    pub ducks_to_clear: u32,
    /// Levels up to and including this one have unlimited bullets
    pub unlimited_bullet_levels: u32,
    /// Bullet pool for each level after `unlimited_bullet_levels`
    pub bullets_per_limited_level: u32,

    // === Play area ===
    pub screen_w: f32,
    pub screen_h: f32,

    // === Ducks ===
    pub duck_base_speed: f32,
    pub duck_scale: f32,

    // === Spawn pacing ===
    /// Seconds between spawns at level 1
    pub base_spawn_interval: f32,
    /// Interval reduction per level
    pub spawn_interval_step: f32,
    /// Interval floor
    pub min_spawn_interval: f32,
    /// Bonus duck chance gained per level above 1 (0 disables bonus ducks)
    pub bonus_chance_per_level: f32,
    /// Bonus duck chance cap
    pub bonus_chance_max: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_levels: TOTAL_LEVELS,
            health_per_level: HEALTH_PER_LEVEL,
            ducks_to_clear: DUCKS_TO_CLEAR,
            unlimited_bullet_levels: UNLIMITED_BULLET_LEVELS,
            bullets_per_limited_level: BULLETS_PER_LIMITED_LEVEL,

            screen_w: SCREEN_W,
            screen_h: SCREEN_H,

            duck_base_speed: DUCK_BASE_SPEED,
            duck_scale: DUCK_SCALE,

            base_spawn_interval: BASE_SPAWN_INTERVAL,
            spawn_interval_step: SPAWN_INTERVAL_STEP,
            min_spawn_interval: MIN_SPAWN_INTERVAL,
            bonus_chance_per_level: BONUS_CHANCE_PER_LEVEL,
            bonus_chance_max: BONUS_CHANCE_MAX,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config. Missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), ConfigError> {
            log::warn!("Rejecting config: {field} {reason}");
            Err(ConfigError::Invalid { field, reason })
        }

        if self.total_levels == 0 {
            return invalid("total_levels", "must be at least 1");
        }
        if self.health_per_level == 0 {
            return invalid("health_per_level", "must be at least 1");
        }
        if self.ducks_to_clear == 0 {
            return invalid("ducks_to_clear", "must be at least 1");
        }
        if !(self.screen_w > 0.0) {
            return invalid("screen_w", "must be positive");
        }
        if !(self.screen_h > 0.0) {
            return invalid("screen_h", "must be positive");
        }
        if self.spawn_band().is_none() {
            return invalid("screen_h", "leaves no vertical band for ducks to fly in");
        }
        if !(self.duck_base_speed > 0.0) {
            return invalid("duck_base_speed", "must be positive");
        }
        if !(self.duck_scale > 0.0) {
            return invalid("duck_scale", "must be positive");
        }
        if !(self.min_spawn_interval > 0.0) {
            return invalid("min_spawn_interval", "must be positive");
        }
        if !(self.spawn_interval_step >= 0.0) {
            return invalid("spawn_interval_step", "must not be negative");
        }
        if !(self.base_spawn_interval >= self.min_spawn_interval) {
            return invalid("base_spawn_interval", "must not be below min_spawn_interval");
        }
        if !(0.0..=1.0).contains(&self.bonus_chance_per_level) {
            return invalid("bonus_chance_per_level", "must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.bonus_chance_max) {
            return invalid("bonus_chance_max", "must be within [0, 1]");
        }
        Ok(())
    }

    /// Vertical band `(top, bottom)` ducks spawn in, in whole pixels
    pub fn spawn_band(&self) -> Option<(i32, i32)> {
        let top = DUCK_SPAWN_TOP as i32;
        let bottom = (self.screen_h - DUCK_SPAWN_BOTTOM) as i32;
        (bottom >= top).then_some((top, bottom))
    }

    /// Bullet pool a level starts with
    pub fn bullet_pool_for_level(&self, level: u32) -> BulletPool {
        if level > self.unlimited_bullet_levels {
            BulletPool::Remaining(self.bullets_per_limited_level)
        } else {
            BulletPool::Unlimited
        }
    }

    /// Whether `level` is the final level
    pub fn is_last_level(&self, level: u32) -> bool {
        level >= self.total_levels
    }
}
