//! Game state and core simulation types
//!
//! Everything a renderer needs to draw a frame lives here, and nothing
//! outside this struct influences the next tick.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::duck::Duck;
use super::particle::Particle;
use super::spawner::Spawner;
use crate::config::GameConfig;

/// Current phase of the level state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ducks are flying, clicks shoot
    Playing,
    /// Level quota reached, click to start the next level
    LevelEnd,
    /// Health ran out, click to retry the same level
    GameOver,
    /// Final level cleared, click to start over from level 1
    Victory,
}

/// Ammunition for the current level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletPool {
    Unlimited,
    Remaining(u32),
}

impl BulletPool {
    /// Consume one bullet. Returns false (and changes nothing) when empty.
    pub fn try_consume(&mut self) -> bool {
        match self {
            BulletPool::Unlimited => true,
            BulletPool::Remaining(0) => false,
            BulletPool::Remaining(n) => {
                *n -= 1;
                true
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, BulletPool::Remaining(0))
    }
}

impl std::fmt::Display for BulletPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BulletPool::Unlimited => write!(f, "∞"),
            BulletPool::Remaining(n) => write!(f, "{n}"),
        }
    }
}

/// What a transient notice is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeKind {
    LevelStart,
    Hit,
    Miss,
    NoBullets,
    DuckEscaped,
    LevelCleared,
    LevelFailed,
}

impl NoticeKind {
    /// How long the notice stays on screen (seconds)
    pub fn duration(&self) -> f32 {
        match self {
            NoticeKind::LevelStart => 2.2,
            NoticeKind::Hit => 1.2,
            NoticeKind::Miss => 0.9,
            NoticeKind::NoBullets | NoticeKind::DuckEscaped => 1.6,
            NoticeKind::LevelCleared | NoticeKind::LevelFailed => 2.5,
        }
    }
}

/// A user-facing message that fades after a short time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
    /// Seconds left on screen
    pub remaining: f32,
}

impl Notice {
    pub fn new(kind: NoticeKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            remaining: kind.duration(),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.remaining > 0.0 && !self.text.is_empty()
    }
}

/// One-shot events for frontends (sound, screen flashes).
/// Drained with `GameState::drain_events`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A bullet was fired (and consumed, if the pool is finite)
    Shot { x: f32, y: f32 },
    /// Trigger pulled on an empty pool
    DryFire,
    DuckHit { duck_id: u32, points: u64 },
    Missed,
    DuckEscaped { duck_id: u32 },
    LevelStarted { level: u32 },
    LevelCleared { level: u32 },
    LevelFailed { level: u32 },
    Victory { score: u64 },
}

/// Maximum queued events; the oldest are dropped when a frontend never drains
pub const MAX_EVENTS: usize = 64;

/// Maximum live particles
pub const MAX_PARTICLES: usize = 256;

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Rules and tuning for this game
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded random source; all randomness in the simulation draws from it
    pub(crate) rng: Pcg32,
    /// Current level (1-based)
    pub level: u32,
    pub score: u64,
    pub health: u8,
    pub bullets: BulletPool,
    pub hits_this_level: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub phase: GamePhase,
    /// Pause toggle (debug key); a paused game still takes clicks but time stops
    pub paused: bool,
    /// Live ducks (spawn order, which is id order)
    pub ducks: Vec<Duck>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    pub spawner: Spawner,
    /// Current transient message, if any
    pub notice: Option<Notice>,
    /// Pending one-shot events
    #[serde(skip)]
    pub events: VecDeque<GameEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameState {
    /// Create a new game at level 1 with the default config
    pub fn new(seed: u64) -> Self {
        Self::with_config(GameConfig::default(), seed)
    }

    /// Create a new game at level 1. The config is expected to be validated.
    pub fn with_config(config: GameConfig, seed: u64) -> Self {
        let mut state = Self {
            spawner: Spawner::for_level(&config, 1),
            bullets: config.bullet_pool_for_level(1),
            health: config.health_per_level,
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            level: 1,
            score: 0,
            hits_this_level: 0,
            time_ticks: 0,
            phase: GamePhase::Playing,
            paused: false,
            ducks: Vec::new(),
            particles: Vec::new(),
            notice: None,
            events: VecDeque::new(),
            next_id: 1,
        };

        state.setup_level();

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Reset everything that is per-level and enter `Playing`
    pub fn setup_level(&mut self) {
        self.health = self.config.health_per_level;
        self.hits_this_level = 0;
        self.ducks.clear();
        self.particles.clear();
        self.bullets = self.config.bullet_pool_for_level(self.level);
        self.spawner = Spawner::for_level(&self.config, self.level);
        self.phase = GamePhase::Playing;
        self.set_notice(
            NoticeKind::LevelStart,
            format!(
                "Level {} - Get {} hits!",
                self.level, self.config.ducks_to_clear
            ),
        );
        self.push_event(GameEvent::LevelStarted { level: self.level });
        log::info!(
            "Level {} started: bullets={}, spawn interval={:.2}s",
            self.level,
            self.bullets,
            self.spawner.interval
        );
    }

    /// Replace the current notice
    pub fn set_notice(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice::new(kind, text));
    }

    /// Text of the notice currently on screen
    pub fn notice_text(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| n.is_visible())
            .map(|n| n.text.as_str())
    }

    /// Queue a one-shot event, dropping the oldest if the queue is full
    pub fn push_event(&mut self, event: GameEvent) {
        if self.events.len() >= MAX_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    /// Take all pending events, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.events.drain(..).collect()
    }

    /// Live (not falling) ducks
    pub fn flying_ducks(&self) -> impl Iterator<Item = &Duck> {
        self.ducks.iter().filter(|d| d.is_flying())
    }

    /// Points awarded for a hit at the current level
    pub fn points_per_hit(&self) -> u64 {
        crate::consts::HIT_BASE_SCORE + self.level as u64 * crate::consts::HIT_LEVEL_BONUS
    }

    pub fn is_last_level(&self) -> bool {
        self.config.is_last_level(self.level)
    }
}
