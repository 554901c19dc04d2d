//! Brick Break entry point
//!
//! Headless driver: runs one autopilot session against the real ranking file
//! and prints the final frame as JSON. A windowed front end would replace
//! `autopilot_input` with keyboard sampling and draw each `FrameView`.
//!
//! Usage: `brick-break [config.json]`

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};

use brick_break::consts::TICK_RATE;
use brick_break::sim::{FrameView, GameEvent, GamePhase, GameState, autopilot_input, tick};
use brick_break::{FileRankingStore, GameConfig, RankingStore};

/// Ten minutes of play at the simulation rate
const MAX_TICKS: u64 = TICK_RATE as u64 * 60 * 10;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Brick Break (headless) starting...");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = GameConfig::load_or_default(config_path.as_deref());
    let mut store = FileRankingStore::new(config.ranking_path.clone());

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0);
    let mut state = GameState::new(config, seed);
    log::info!(
        "Session seeded with {} (brick resolution: {})",
        seed,
        state.config.brick_resolution.as_str()
    );

    let mut ticks = 0;
    while ticks < MAX_TICKS && state.phase != GamePhase::GameOver {
        let input = autopilot_input(&state);
        for event in tick(&mut state, &input, &mut store) {
            match event {
                GameEvent::LifeLost { lives_left } => log::info!("Life lost, {} left", lives_left),
                GameEvent::GameOver { score, rank: Some(rank) } => {
                    log::info!("Score {} entered the ranking at #{}", score, rank)
                }
                other => log::debug!("{:?}", other),
            }
        }
        ticks += 1;
    }

    if state.phase != GamePhase::GameOver {
        log::info!(
            "Stopped after {} ticks at level {} with score {}",
            ticks,
            state.level,
            state.score
        );
    }

    let ranking = store.load();
    let view = FrameView::capture(&state, &ranking);
    let json = serde_json::to_string_pretty(&view).context("serializing final frame")?;
    println!("{}", json);

    for (i, entry) in ranking.entries().iter().enumerate() {
        log::info!("{:>2}. {}: {}", i + 1, entry.name, entry.score);
    }
    Ok(())
}
