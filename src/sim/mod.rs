//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod entity;
pub mod input;
pub mod problem;
pub mod session;
pub mod state;
pub mod tick;

pub use entity::{BALL_PALETTE, Ball, Color, Particle};
pub use input::{InputEvent, Key};
pub use problem::{AnswerError, Operation, Problem};
pub use state::{Feedback, GameEvent, GameState, Screen, SessionStats};
pub use tick::tick;
