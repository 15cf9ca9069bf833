//! Rendering seam
//!
//! The game doesn't draw anything itself. Each frame the loop builds a
//! [`FrameView`] from the state and hands it to a [`Renderer`].

pub mod headless;
pub mod view;

pub use headless::LogRenderer;
pub use view::{BallSprite, FrameView, Hud, ParticleSprite, Rating, TimeBand};

/// Something that can present a frame
pub trait Renderer {
    fn render(&mut self, frame: &FrameView);
}
