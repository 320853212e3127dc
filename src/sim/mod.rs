//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Seeded RNG only (one stream, owned by `GameState`)
//! - Stable iteration order (spawn order, which is entity ID order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod duck;
pub mod particle;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{point_in_ellipse, resolve_shot};
pub use duck::{Duck, DuckState, Heading};
pub use particle::Particle;
pub use spawner::{Spawner, bonus_chance_for_level, spawn_interval_for_level};
pub use state::{
    BulletPool, GameEvent, GamePhase, GameState, Notice, NoticeKind, MAX_EVENTS, MAX_PARTICLES,
};
pub use tick::{ShotOutcome, TickInput, advance, click, shoot, tick};
