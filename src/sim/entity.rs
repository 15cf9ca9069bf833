//! Falling balls and particle effects

use glam::Vec2;
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use super::problem::Problem;
use crate::consts::*;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(255, 255, 255);
    pub const BLUE: Color = Color(0, 100, 255);
    pub const GREEN: Color = Color(0, 255, 0);
    pub const RED: Color = Color(255, 0, 0);
    pub const YELLOW: Color = Color(255, 255, 0);
    pub const PURPLE: Color = Color(128, 0, 128);
    pub const ORANGE: Color = Color(255, 165, 0);
    pub const PINK: Color = Color(255, 192, 203);
    pub const CYAN: Color = Color(0, 255, 255);
}

/// Colors a ball can be spawned with
pub const BALL_PALETTE: [Color; 8] = [
    Color::BLUE,
    Color::GREEN,
    Color::RED,
    Color::YELLOW,
    Color::PURPLE,
    Color::ORANGE,
    Color::PINK,
    Color::CYAN,
];

/// A falling ball carrying one problem
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub id: u32,
    pub pos: Vec2,
    pub radius: f32,
    /// Pixels per tick
    pub fall_speed: f32,
    pub color: Color,
    /// Phase of the size pulse (visual only)
    pub pulse: f32,
    problem: Problem,
}

impl Ball {
    pub fn new(id: u32, pos: Vec2, radius: f32, fall_speed: f32, color: Color, problem: Problem) -> Self {
        Self {
            id,
            pos,
            radius,
            fall_speed,
            color,
            pulse: 0.0,
            problem,
        }
    }

    /// Spawn a ball just above the screen with random size, speed and color
    pub fn spawn<R: Rng + ?Sized>(id: u32, rng: &mut R) -> Self {
        let x = rng.random_range(BALL_SPAWN_INSET..=SCREEN_WIDTH - BALL_SPAWN_INSET);
        let y = rng.random_range(BALL_SPAWN_MIN_Y..=BALL_SPAWN_MAX_Y);
        let radius = rng.random_range(BALL_MIN_RADIUS..=BALL_MAX_RADIUS) as f32;
        let fall_speed = rng.random_range(BALL_MIN_SPEED..BALL_MAX_SPEED);
        let color = *BALL_PALETTE.choose(rng).unwrap_or(&Color::BLUE);
        let problem = Problem::generate(rng);
        Self::new(id, Vec2::new(x, y), radius, fall_speed, color, problem)
    }

    /// The problem is fixed for the ball's whole life
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    /// Advance one tick
    pub fn update(&mut self) {
        self.pos.y += self.fall_speed;
        self.pulse += PULSE_STEP;
    }

    /// Radius including the pulse, for drawing
    pub fn pulsed_radius(&self) -> f32 {
        self.radius + (PULSE_AMPLITUDE * self.pulse.sin()).trunc()
    }

    /// Whether a point lies on the ball
    pub fn contains(&self, point: Vec2) -> bool {
        self.pos.distance(point) <= self.radius
    }

    pub fn is_out_of_bounds(&self) -> bool {
        self.pos.y > SCREEN_HEIGHT + OUT_OF_BOUNDS_MARGIN
    }
}

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks left to live
    pub life: i32,
    pub size: f32,
    pub color: Color,
}

impl Particle {
    pub fn new<R: Rng + ?Sized>(pos: Vec2, color: Color, rng: &mut R) -> Self {
        Self {
            pos,
            vel: Vec2::new(rng.random_range(-3.0..3.0), rng.random_range(-5.0..-1.0)),
            life: PARTICLE_LIFE,
            size: rng.random_range(2..=5) as f32,
            color,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
        self.vel.y += PARTICLE_GRAVITY;
        self.life -= 1;
    }

    pub fn is_alive(&self) -> bool {
        self.life > 0
    }
}

/// Create `count` particles at a point
pub fn burst<R: Rng + ?Sized>(
    particles: &mut Vec<Particle>,
    pos: Vec2,
    color: Color,
    count: usize,
    rng: &mut R,
) {
    particles.extend((0..count).map(|_| Particle::new(pos, color, rng)));
}

/// Advance all particles and drop the ones that burned out this tick
pub fn update_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.update();
    }
    particles.retain(Particle::is_alive);
}
