//! Lane Hopper entry point
//!
//! Headless runner: builds a world, lets the autopilot play it at a fixed
//! timestep and reports how the run ended.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use lane_hopper::consts::SIM_DT;
use lane_hopper::sim::{GameEvent, GamePhase, GameState, PcgSource, TickInput, WorldView, tick};
use lane_hopper::{FileHighScore, ScrollMode, Settings};

#[derive(Parser, Debug)]
#[command(name = "lane-hopper")]
#[command(about = "Headless lane-crossing world driven by the built-in autopilot")]
struct Cli {
    /// World seed (random when omitted and not set in the config)
    #[arg(long)]
    seed: Option<u64>,
    /// Maximum ticks to simulate at 60 Hz
    #[arg(long, default_value_t = 18_000)]
    ticks: u64,
    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Where the best score is kept (overrides the config)
    #[arg(long)]
    high_score_file: Option<PathBuf>,
    /// Centre the window on the player instead of scrolling
    #[arg(long, default_value_t = false)]
    camera_follow: bool,
    /// Print the final visible window as JSON
    #[arg(long, default_value_t = false)]
    dump_view: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading settings from {}", path.display()))?;
            Settings::from_json(&json)
                .with_context(|| format!("parsing settings from {}", path.display()))?
        }
        None => Settings::default(),
    };
    if let Some(path) = cli.high_score_file {
        settings.high_score_path = path;
    }
    if cli.camera_follow {
        settings.scroll_mode = ScrollMode::CameraFollow;
    }

    let rng = match cli.seed.or(settings.seed) {
        Some(seed) => PcgSource::seeded(seed),
        None => PcgSource::from_entropy(),
    };
    let seed = rng.seed();
    let store = FileHighScore::new(settings.high_score_path.clone());

    log::info!(
        "Lane Hopper starting (seed {}, {} mode)",
        seed,
        settings.scroll_mode.as_str()
    );

    let mut state = GameState::new(settings, Box::new(rng), Box::new(store));
    let input = TickInput {
        idle_mode: true,
        ..Default::default()
    };

    let mut ticks = 0;
    while ticks < cli.ticks {
        tick(&mut state, &input, SIM_DT);
        ticks += 1;
        for event in state.drain_events() {
            match event {
                GameEvent::TrainWarning { row } => log::debug!("Train warning on row {}", row),
                GameEvent::NewHighScore { score } => log::info!("New high score {}", score),
                other => log::trace!("{:?}", other),
            }
        }
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    println!("seed:       {}", seed);
    println!("ticks:      {}", ticks);
    println!("score:      {}", state.score());
    println!("high score: {}", state.high_score);
    match state.death_cause {
        Some(cause) => println!("ended by:   {:?}", cause),
        None => println!("ended by:   tick limit"),
    }

    if cli.dump_view {
        let json = WorldView::capture(&state)
            .to_json()
            .context("serializing world view")?;
        println!("{}", json);
    }

    Ok(())
}
