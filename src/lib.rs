//! Duck Hunt - A single-screen arcade shooting game core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ducks, spawning, shooting, level flow)
//! - `config`: Game configuration supplied at construction time
//! - `game_loop`: Fixed timestep driver and the read-only render boundary

pub mod config;
pub mod game_loop;
pub mod sim;

pub use config::{ConfigError, GameConfig};
pub use game_loop::{GameLoop, HudSnapshot, NullRenderer, Renderer};
pub use sim::{GamePhase, GameState, TickInput, tick};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matches the target frame rate)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest wall-clock frame the loop will try to catch up on
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Level progression
    pub const TOTAL_LEVELS: u32 = 10;
    pub const HEALTH_PER_LEVEL: u8 = 5;
    /// Hits required to clear a level
    pub const DUCKS_TO_CLEAR: u32 = 10;
    /// Levels up to and including this one have unlimited bullets
    pub const UNLIMITED_BULLET_LEVELS: u32 = 5;
    pub const BULLETS_PER_LIMITED_LEVEL: u32 = 15;

    /// Play area
    pub const SCREEN_W: f32 = 1000.0;
    pub const SCREEN_H: f32 = 640.0;

    /// Duck defaults
    pub const DUCK_BASE_SPEED: f32 = 120.0;
    pub const DUCK_SCALE: f32 = 1.0;
    pub const DUCK_WIDTH: f32 = 68.0;
    pub const DUCK_HEIGHT: f32 = 56.0;
    /// Hit ellipse semi-axes as a fraction of duck width/height
    pub const DUCK_HIT_SCALE: f32 = 0.6;
    /// Speed gain per level above 1 (multiplicative on base speed)
    pub const DUCK_SPEED_PER_LEVEL: f32 = 0.12;
    /// Ducks start this far beyond the screen edge
    pub const DUCK_SPAWN_MARGIN: f32 = 80.0;
    /// Ducks beyond this distance past the screen edge have escaped
    pub const DUCK_ESCAPE_MARGIN: f32 = 140.0;
    /// Vertical spawn band: [top, screen_h - bottom]
    pub const DUCK_SPAWN_TOP: f32 = 110.0;
    pub const DUCK_SPAWN_BOTTOM: f32 = 220.0;

    /// Death fall
    pub const FALL_GRAVITY: f32 = 600.0;
    pub const FALL_DRIFT_SPEED: f32 = 60.0;
    pub const FALL_TIMEOUT: f32 = 3.0;
    /// Falling ducks are removed below screen_h + this
    pub const FALL_REMOVE_MARGIN: f32 = 120.0;

    /// Spawn pacing (seconds between spawns)
    pub const BASE_SPAWN_INTERVAL: f32 = 1.2;
    pub const SPAWN_INTERVAL_STEP: f32 = 0.08;
    pub const MIN_SPAWN_INTERVAL: f32 = 0.35;
    /// Bonus duck chance per level above 1, and its cap
    pub const BONUS_CHANCE_PER_LEVEL: f32 = 0.06;
    pub const BONUS_CHANCE_MAX: f32 = 0.45;

    /// Scoring
    pub const HIT_BASE_SCORE: u64 = 100;
    pub const HIT_LEVEL_BONUS: u64 = 20;

    /// Particles spawned per hit
    pub const PARTICLES_PER_HIT: usize = 16;
}

