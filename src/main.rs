//! Wormwood headless runner
//!
//! Plays the autopilot for a fixed number of ticks and prints a JSON summary.
//! Usage: `wormwood [settings.json]`

#[cfg(not(target_arch = "wasm32"))]
use serde::Serialize;
#[cfg(not(target_arch = "wasm32"))]
use wormwood::Settings;
#[cfg(not(target_arch = "wasm32"))]
use wormwood::sim::{FrameTable, GameEvent, GameState, InputSnapshot, Snapshot, tick};

/// Event tallies over a whole run
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Default, Serialize)]
struct RunSummary {
    seed: u64,
    ticks: u64,
    games_started: u32,
    rounds_completed: u32,
    game_overs: u32,
    glyphs_collected: u64,
    perfect_parries: u32,
    missed_parries: u32,
    ranged_hits: u32,
    enemies_destroyed: u32,
    pills_taken: u32,
    final_state: Option<Snapshot>,
}

#[cfg(not(target_arch = "wasm32"))]
impl RunSummary {
    fn record(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted => self.games_started += 1,
            GameEvent::Collected { .. } => self.glyphs_collected += 1,
            GameEvent::PerfectParry { .. } => self.perfect_parries += 1,
            GameEvent::MissedParry { .. } => self.missed_parries += 1,
            GameEvent::RangedHit { .. } => self.ranged_hits += 1,
            GameEvent::EnemyDestroyed { .. } => self.enemies_destroyed += 1,
            GameEvent::PillTaken(_) => self.pills_taken += 1,
            GameEvent::RoundComplete { .. } => self.rounds_completed += 1,
            GameEvent::GameOver { .. } => self.game_overs += 1,
            GameEvent::PillsOffered | GameEvent::RoundStarted { .. } | GameEvent::ReturnedToMenu => {}
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Wormwood (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    log::info!(
        "Seed {} | character set {} | {} ticks",
        settings.seed,
        settings.character_set.as_str(),
        settings.demo_ticks
    );

    // No asset loader in headless mode: every frame set is a placeholder
    let mut state = GameState::from_settings(&settings, FrameTable::placeholder());
    let input = InputSnapshot {
        idle_mode: true,
        ..Default::default()
    };

    let mut summary = RunSummary {
        seed: settings.seed,
        ..Default::default()
    };
    let frame_time = settings.tick_duration();

    for _ in 0..settings.demo_ticks {
        let started = std::time::Instant::now();
        tick(&mut state, &input);
        state.events.iter().for_each(|e| summary.record(e));

        if settings.realtime {
            if let Some(rest) = frame_time.checked_sub(started.elapsed()) {
                std::thread::sleep(rest);
            }
        }
    }

    summary.ticks = state.time_ticks;
    summary.final_state = Some(state.snapshot());

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize run summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library on the web; there is no headless runner
}
