//! Fixed timestep driver and render boundary
//!
//! The frontend owns the clock and the window. Each frame it hands the
//! elapsed wall-clock time to `GameLoop::frame`, which runs whole
//! simulation ticks and then asks a `Renderer` to draw the result.

use std::collections::VecDeque;
use std::fmt;

use glam::Vec2;

use crate::consts::*;
use crate::sim::{BulletPool, GamePhase, GameState, TickInput, tick};

/// Anything that can present the game state. The core never draws.
pub trait Renderer {
    /// Draw one frame. `time` is seconds of simulated time since start.
    fn render(&mut self, state: &GameState, time: f64);
}

/// Renderer that draws nothing (headless runs, tests)
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _state: &GameState, _time: f64) {}
}

/// Text-level view of the HUD
#[derive(Debug, Clone, PartialEq)]
pub struct HudSnapshot {
    pub level: u32,
    pub total_levels: u32,
    pub score: u64,
    pub health: u8,
    pub max_health: u8,
    pub bullets: BulletPool,
    pub hits: u32,
    pub quota: u32,
    pub phase: GamePhase,
    pub paused: bool,
    /// Active notice, if still on screen
    pub notice: Option<String>,
}

impl HudSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            level: state.level,
            total_levels: state.config.total_levels,
            score: state.score,
            health: state.health,
            max_health: state.config.health_per_level,
            bullets: state.bullets,
            hits: state.hits_this_level,
            quota: state.config.ducks_to_clear,
            phase: state.phase,
            paused: state.paused,
            notice: state.notice_text().map(str::to_owned),
        }
    }

    /// Banner and hint shown over the play field outside of `Playing`
    pub fn overlay(&self) -> Option<(String, &'static str)> {
        match self.phase {
            GamePhase::Playing => None,
            GamePhase::LevelEnd => Some((
                format!("Level {} Cleared!", self.level),
                "Click to continue",
            )),
            GamePhase::GameOver => Some(("Level Failed".to_owned(), "Click to retry level")),
            GamePhase::Victory => Some((
                "Victory!".to_owned(),
                "You cleared all levels. Click to restart.",
            )),
        }
    }
}

impl fmt::Display for HudSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Level: {}/{}  Score: {}  Health: {}/{}  Bullets: {}  Hits: {}/{}",
            self.level,
            self.total_levels,
            self.score,
            self.health,
            self.max_health,
            self.bullets,
            self.hits,
            self.quota
        )
    }
}

/// Game instance plus the frame-to-tick accumulator
pub struct GameLoop {
    pub state: GameState,
    accumulator: f32,
    /// Clicks waiting for a tick; one is consumed per tick
    pending_clicks: VecDeque<Vec2>,
    /// One-shot keys for the next tick
    input: TickInput,
    running: bool,
    sim_time: f64,
    // FPS tracking
    frame_dts: [f32; 60],
    frame_index: usize,
    // Track phase changes for logging
    last_phase: GamePhase,
}

impl GameLoop {
    pub fn new(state: GameState) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            accumulator: 0.0,
            pending_clicks: VecDeque::new(),
            input: TickInput::default(),
            running: true,
            sim_time: 0.0,
            frame_dts: [0.0; 60],
            frame_index: 0,
            last_phase,
        }
    }

    /// Queue a pointer click for the next tick
    pub fn click(&mut self, x: f32, y: f32) {
        self.pending_clicks.push_back(Vec2::new(x, y));
    }

    /// Pause toggle key
    pub fn toggle_pause(&mut self) {
        self.input.pause = !self.input.pause;
    }

    /// Debug key: finish the current level
    pub fn force_complete(&mut self) {
        self.input.force_complete = true;
    }

    /// Quit signal; `frame` stops ticking once set
    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Run simulation ticks for `frame_dt` seconds of wall-clock time,
    /// then render once. Returns the number of ticks run.
    pub fn frame(&mut self, frame_dt: f32, renderer: &mut impl Renderer) -> u32 {
        if !self.running {
            return 0;
        }

        // A bad clock reading counts as no time passing
        let frame_dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += frame_dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let mut input = self.input.clone();
            input.click = self.pending_clicks.pop_front();
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            self.sim_time += SIM_DT as f64;
            substeps += 1;

            // Clear one-shot inputs after processing
            self.input = TickInput::default();
        }

        self.frame_dts[self.frame_index] = frame_dt;
        self.frame_index = (self.frame_index + 1) % self.frame_dts.len();

        let current_phase = self.state.phase;
        if current_phase != self.last_phase {
            log::info!("Phase {:?} -> {:?}", self.last_phase, current_phase);
            self.last_phase = current_phase;
        }

        renderer.render(&self.state, self.sim_time);
        substeps
    }

    /// Frames per second averaged over the last 60 frames
    pub fn fps(&self) -> u32 {
        let total: f32 = self.frame_dts.iter().sum();
        let frames = self.frame_dts.iter().filter(|dt| **dt > 0.0).count();
        if total > 0.0 {
            (frames as f32 / total).round() as u32
        } else {
            0
        }
    }

    pub fn hud(&self) -> HudSnapshot {
        HudSnapshot::from_state(&self.state)
    }
}
