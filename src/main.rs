//! Math Ball Catcher entry point
//!
//! Runs the game loop at a fixed rate. Input comes from the demo autoplayer
//! and frames go to the headless log renderer.

use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;

use math_ball::audio;
use math_ball::bot::{Bot, BotConfig};
use math_ball::consts::SIM_DT;
use math_ball::renderer::{FrameView, LogRenderer, Renderer};
use math_ball::settings::{SETTINGS_FILE, Settings};
use math_ball::sim::{GameEvent, GameState, tick};

#[derive(Debug, Parser)]
#[command(name = "math-ball", version, about = "Math Ball Catcher (demo autoplay)")]
struct Cli {
    /// Settings file (JSON); missing files fall back to defaults
    #[arg(long, default_value = SETTINGS_FILE)]
    settings: PathBuf,

    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Name the autoplayer types in
    #[arg(long, default_value = "Demo")]
    name: String,

    /// Chance the autoplayer answers correctly
    #[arg(long, default_value_t = 0.8)]
    accuracy: f64,

    /// Sessions to play before quitting
    #[arg(long, default_value_t = 1)]
    rounds: u32,

    /// Run as fast as possible instead of at 60 Hz
    #[arg(long)]
    fast: bool,

    /// Seconds per session (overrides the settings file)
    #[arg(long)]
    duration: Option<f32>,
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::SessionStarted => log::info!("Session started"),
        GameEvent::GameOver => log::info!("Time's up!"),
        GameEvent::Quit => log::info!("Quit requested"),
        other => log::debug!("{other:?}"),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut settings = Settings::load(&cli.settings);
    if let Some(duration) = cli.duration.filter(|d| *d > 0.0) {
        settings.session_duration = duration;
    }
    let seed = cli.seed.or(settings.seed).unwrap_or_else(clock_seed);
    log::info!("Math Ball Catcher starting (seed {seed})");

    let background = math_ball::assets::probe_background(&settings.asset_dir);
    let mut audio = audio::open(&settings);
    let mut renderer = LogRenderer::default().with_background(background);

    let mut state = GameState::with_duration(seed, settings.session_duration);
    state.particles_enabled = settings.particles;

    let mut bot = Bot::new(
        BotConfig {
            name: cli.name,
            accuracy: cli.accuracy,
            rounds: cli.rounds.max(1),
            ..BotConfig::default()
        },
        seed ^ 0x9E37_79B9_7F4A_7C15,
    );

    let frame_budget = Duration::from_secs_f32(SIM_DT);
    loop {
        let frame_start = Instant::now();

        let input = bot.next_input(&state);
        let events = tick(&mut state, &input, SIM_DT);
        events.iter().for_each(log_event);
        audio::dispatch(audio.as_mut(), &events);
        renderer.render(&FrameView::new(&state));

        if state.quit {
            break;
        }
        if cli.ticks.is_some_and(|limit| state.time_ticks >= limit) {
            log::info!("Tick limit reached");
            break;
        }

        if !cli.fast {
            if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
                thread::sleep(rest);
            }
        }
    }

    log::info!(
        "Finished after {} ticks: score {}, {} of {} correct",
        state.time_ticks,
        state.stats.score,
        state.stats.correct_answers,
        state.stats.problems_solved
    );
}
