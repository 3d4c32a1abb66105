//! Barrage entry point
//!
//! Headless driver: owns the loop, supplies the clock and intent each tick,
//! and reports what the renderer would see.
//!
//! Usage: `barrage [settings.json]` (log level via `RUST_LOG`).

use std::time::{Duration, Instant};

use barrage::Settings;
use barrage::sim::{GameEvent, GameState, TickInput, tick};

fn main() {
    env_logger::init();
    log::info!("Barrage (headless) starting...");

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };

    let seed = settings.resolve_seed();
    let mut state = GameState::new(seed, settings.viewport());
    log::info!(
        "Session initialized with seed {} ({}x{})",
        seed,
        state.viewport.width,
        state.viewport.height
    );

    let summary = run(&mut state, &settings);

    log::info!(
        "Finished after {} ticks: {} runs, best score {}, last score {}",
        summary.ticks,
        summary.runs,
        summary.best_score,
        state.score
    );
    println!(
        "ticks={} runs={} best_score={} final_score={} phase={:?}",
        summary.ticks, summary.runs, summary.best_score, state.score, state.phase
    );
}

/// What happened over a whole driver run
struct RunSummary {
    ticks: u64,
    runs: u32,
    best_score: u64,
}

fn run(state: &mut GameState, settings: &Settings) -> RunSummary {
    let started = Instant::now();
    let frame = Duration::from_secs_f64(settings.tick_ms() / 1000.0);

    let mut summary = RunSummary {
        ticks: 0,
        runs: 1,
        best_score: 0,
    };
    let mut restart_pending = false;

    for i in 0..settings.max_ticks {
        let now_ms = if settings.realtime {
            started.elapsed().as_millis() as u64
        } else {
            (i as f64 * settings.tick_ms()) as u64
        };

        let input = TickInput {
            now_ms,
            autopilot: settings.autopilot,
            restart: restart_pending,
            ..Default::default()
        };
        if restart_pending {
            summary.runs += 1;
            restart_pending = false;
        }

        tick(state, &input);
        summary.ticks += 1;
        summary.best_score = summary.best_score.max(state.score);

        for event in &state.events {
            match event {
                GameEvent::BossSpawned { id } => log::info!("Tick {}: boss {} arrived", state.time_ticks, id),
                GameEvent::GameOver { score } => log::info!("Tick {}: run over, score {}", state.time_ticks, score),
                other => log::trace!("Tick {}: {:?}", state.time_ticks, other),
            }
        }

        if settings.snapshot_every > 0 && i % settings.snapshot_every == 0 {
            match state.snapshot().to_json() {
                Ok(json) => println!("{json}"),
                Err(e) => log::error!("Snapshot serialization failed: {}", e),
            }
        }

        if state.is_game_over() {
            if !settings.auto_restart {
                break;
            }
            restart_pending = true;
        }

        if settings.realtime {
            let target = frame * (i as u32 + 1);
            if let Some(wait) = target.checked_sub(started.elapsed()) {
                std::thread::sleep(wait);
            }
        }
    }

    summary
}
