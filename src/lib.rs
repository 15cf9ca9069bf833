//! Math Ball Catcher - an arcade arithmetic game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (problems, entities, screens, scoring)
//! - `renderer`: Rendering seam and a headless log renderer
//! - `audio`: Audio cue seam, silent sink and optional asset playback
//! - `settings`: JSON-backed game settings
//! - `bot`: Demo autoplayer that drives the game through input events

pub mod assets;
pub mod audio;
pub mod bot;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Visible play area
    pub const SCREEN_WIDTH: f32 = 1300.0;
    pub const SCREEN_HEIGHT: f32 = 800.0;

    /// Default session length in seconds
    pub const SESSION_DURATION: f32 = 30.0;

    /// Ball defaults
    pub const BALL_MIN_RADIUS: u32 = 50;
    pub const BALL_MAX_RADIUS: u32 = 80;
    /// Fall speed range in pixels per tick
    pub const BALL_MIN_SPEED: f32 = 1.5;
    pub const BALL_MAX_SPEED: f32 = 3.5;
    /// Horizontal spawn inset from either screen edge
    pub const BALL_SPAWN_INSET: f32 = 80.0;
    pub const BALL_SPAWN_MIN_Y: f32 = -120.0;
    pub const BALL_SPAWN_MAX_Y: f32 = -60.0;
    /// Distance below the screen before a ball is discarded
    pub const OUT_OF_BOUNDS_MARGIN: f32 = 100.0;
    pub const PULSE_STEP: f32 = 0.1;
    pub const PULSE_AMPLITUDE: f32 = 5.0;

    /// Spawner tuning
    pub const MAX_BALLS: usize = 8;
    pub const LOW_OCCUPANCY: usize = 4;
    pub const SPAWN_CHANCE_LOW: f64 = 0.025;
    pub const SPAWN_CHANCE_HIGH: f64 = 0.015;

    /// Particle defaults
    pub const PARTICLE_LIFE: i32 = 30;
    pub const PARTICLE_GRAVITY: f32 = 0.1;
    pub const BURST_CLICK: usize = 12;
    pub const BURST_CORRECT: usize = 25;
    pub const BURST_WRONG: usize = 20;
    pub const BURST_FINALE: usize = 40;

    /// Scoring
    pub const SCORE_CORRECT: i64 = 5;
    pub const SCORE_WRONG: i64 = 2;
    /// Tolerance when comparing against non-integral answers
    pub const ANSWER_EPSILON: f64 = 0.01;
    /// Ticks the CORRECT/WRONG banner stays up
    pub const FEEDBACK_TICKS: u32 = 150;

    /// Text entry limits (in characters)
    pub const MAX_NAME_LEN: usize = 25;
    pub const MAX_ANSWER_LEN: usize = 10;
}

/// Center of the visible play area
#[inline]
pub fn screen_center() -> Vec2 {
    Vec2::new(consts::SCREEN_WIDTH / 2.0, consts::SCREEN_HEIGHT / 2.0)
}
