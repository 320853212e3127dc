//! Duck Hunt headless runner
//!
//! Drives the game core with a simple autopilot shooter and logs the HUD.
//! Useful for balancing the config and for watching the level flow without
//! a graphical frontend.
//!
//! Usage:
//!   RUST_LOG=info cargo run -- --seed 7 --seconds 300
//!   RUST_LOG=debug cargo run -- --config tuning.json --accuracy 0.6

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use duck_hunt::consts::SIM_DT;
use duck_hunt::sim::{GameEvent, GamePhase, GameState};
use duck_hunt::{GameConfig, GameLoop, HudSnapshot, Renderer};

#[derive(Parser)]
#[command(name = "duck-hunt")]
#[command(about = "Run the duck hunt game core headless with an autopilot shooter")]
struct Args {
    /// Game seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// JSON config file (missing fields keep their defaults)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Chance the autopilot aims at a duck rather than at empty sky
    #[arg(long, default_value_t = 0.8)]
    accuracy: f64,

    /// Ticks between autopilot shots
    #[arg(long, default_value_t = 30)]
    fire_interval: u64,
}

/// Logs the HUD once per simulated second and every overlay change
#[derive(Default)]
struct LogRenderer {
    last_second: i64,
    last_overlay: Option<String>,
}

impl Renderer for LogRenderer {
    fn render(&mut self, state: &GameState, time: f64) {
        let hud = HudSnapshot::from_state(state);

        let second = time.floor() as i64;
        if second != self.last_second {
            self.last_second = second;
            log::info!("[{:>4}s] {}", second, hud);
        }

        let overlay = hud.overlay().map(|(title, hint)| format!("{title} ({hint})"));
        if overlay != self.last_overlay {
            if let Some(text) = &overlay {
                log::info!("== {} ==", text);
            }
            self.last_overlay = overlay;
        }
    }
}

/// Clicks on ducks (or the sky) at a fixed cadence, and through overlays
struct Autopilot {
    rng: Pcg32,
    accuracy: f64,
    fire_interval: u64,
}

impl Autopilot {
    fn act(&mut self, game: &mut GameLoop) {
        let state = &game.state;
        if state.time_ticks % self.fire_interval != 0 {
            return;
        }

        if state.phase != GamePhase::Playing {
            game.click(0.0, 0.0);
            return;
        }

        let screen_w = state.config.screen_w;
        let visible: Vec<_> = state
            .flying_ducks()
            .filter(|d| d.pos.x >= 0.0 && d.pos.x <= screen_w)
            .map(|d| d.pos)
            .collect();
        if visible.is_empty() {
            return;
        }

        let target = visible[self.rng.random_range(0..visible.len())];
        if self.rng.random_bool(self.accuracy.clamp(0.0, 1.0)) {
            game.click(target.x, target.y);
        } else {
            game.click(target.x, target.y + 120.0);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };

    log::info!("Duck Hunt (headless) starting, seed={}", args.seed);

    let mut game = GameLoop::new(GameState::with_config(config, args.seed));
    let mut renderer = LogRenderer::default();
    let mut autopilot = Autopilot {
        rng: Pcg32::seed_from_u64(args.seed ^ 0x5eed),
        accuracy: args.accuracy,
        fire_interval: args.fire_interval.max(1),
    };

    let mut shots = 0u32;
    let mut hits = 0u32;
    let mut escapes = 0u32;
    let mut victories = 0u32;

    let total_ticks = (args.seconds.max(0.0) / SIM_DT) as u64;
    for _ in 0..total_ticks {
        autopilot.act(&mut game);
        game.frame(SIM_DT, &mut renderer);

        // Stands in for the audio frontend
        for event in game.state.drain_events() {
            match event {
                GameEvent::Shot { .. } => shots += 1,
                GameEvent::DuckHit { .. } => hits += 1,
                GameEvent::DuckEscaped { .. } => escapes += 1,
                GameEvent::Victory { .. } => victories += 1,
                _ => {}
            }
        }

        if !game.is_running() {
            break;
        }
    }

    let hud = game.hud();
    println!();
    println!("=== RUN SUMMARY ===");
    println!("  Seed:       {}", args.seed);
    println!("  Reached:    level {}/{}", hud.level, hud.total_levels);
    println!("  Score:      {}", hud.score);
    println!("  Shots:      {}", shots);
    println!("  Hits:       {}", hits);
    println!("  Escapes:    {}", escapes);
    println!("  Victories:  {}", victories);

    Ok(())
}
