//! Game state and screen transitions
//!
//! `GameState` is the single context object the loop owns and hands to
//! [`tick`](super::tick::tick). Session fields are only reset through the
//! transition methods here.

use log::{debug, info};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Ball, Particle};
use crate::consts::*;

/// Which screen the game is on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    /// Title screen, waiting for start
    Menu,
    /// Typing the player name
    NameEntry,
    /// Active session
    Playing,
    /// Session ended, showing results
    GameOver,
}

/// Something the outer shell should react to (audio, logging, rendering)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    SessionStarted,
    BallSelected { id: u32 },
    AnswerCorrect { id: u32 },
    AnswerWrong { id: u32 },
    /// A selected ball fell off screen before being answered
    SelectionExpired { id: u32 },
    GameOver,
    /// Back to name entry from the game over screen
    Restarted,
    Quit,
}

/// The CORRECT/WRONG banner shown after an answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub correct: bool,
    pub ticks_remaining: u32,
}

/// Per-session statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionStats {
    pub score: i64,
    pub problems_solved: u32,
    pub correct_answers: u32,
    /// Seconds left on the countdown
    pub time_remaining: f32,
    /// Ticks played so far (the countdown is derived from this)
    pub elapsed_ticks: u64,
    /// Id of the selected ball (always present in `GameState::balls`)
    pub selected: Option<u32>,
    /// Answer text typed for the selected ball
    pub input_text: String,
    pub feedback: Option<Feedback>,
}

impl SessionStats {
    pub fn new(duration: f32) -> Self {
        Self {
            score: 0,
            problems_solved: 0,
            correct_answers: 0,
            time_remaining: duration,
            elapsed_ticks: 0,
            selected: None,
            input_text: String::new(),
            feedback: None,
        }
    }

    /// Fraction of answered problems that were correct (0 before any answer)
    pub fn accuracy(&self) -> f32 {
        self.correct_answers as f32 / self.problems_solved.max(1) as f32
    }

    /// Accuracy as a whole percentage, as shown on the HUD
    pub fn accuracy_percent(&self) -> u32 {
        self.correct_answers * 100 / self.problems_solved.max(1)
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.input_text.clear();
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub screen: Screen,
    pub player_name: String,
    /// Full session length in seconds
    pub session_duration: f32,
    pub stats: SessionStats,
    /// Active balls in spawn order
    pub balls: Vec<Ball>,
    /// Visual particles (not gameplay-affecting)
    pub particles: Vec<Particle>,
    /// Whether particle bursts are created at all
    pub particles_enabled: bool,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Set once a quit was requested; the loop should stop
    pub quit: bool,
    /// Next ball ID
    next_id: u32,
}

impl GameState {
    /// Create a new game state on the menu screen
    pub fn new(seed: u64) -> Self {
        Self::with_duration(seed, SESSION_DURATION)
    }

    pub fn with_duration(seed: u64, session_duration: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            screen: Screen::Menu,
            player_name: String::new(),
            session_duration,
            stats: SessionStats::new(session_duration),
            balls: Vec::new(),
            particles: Vec::new(),
            particles_enabled: true,
            time_ticks: 0,
            quit: false,
            next_id: 1,
        }
    }

    /// Allocate a new ball ID
    pub fn next_ball_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn selected_ball(&self) -> Option<&Ball> {
        let id = self.stats.selected?;
        self.balls.iter().find(|b| b.id == id)
    }

    /// Menu -> NameEntry
    pub fn open_name_entry(&mut self) -> bool {
        if self.screen != Screen::Menu {
            debug!("Ignoring start request on {:?}", self.screen);
            return false;
        }
        self.screen = Screen::NameEntry;
        true
    }

    /// NameEntry -> Playing. Refused while the trimmed name is empty.
    pub fn start_session(&mut self) -> bool {
        if self.screen != Screen::NameEntry {
            return false;
        }
        if self.player_name.trim().is_empty() {
            debug!("Refusing to start a session without a player name");
            return false;
        }

        self.stats = SessionStats::new(self.session_duration);
        self.balls.clear();
        self.particles.clear();
        self.screen = Screen::Playing;
        info!(
            "Session started for {:?} ({}s)",
            self.player_name.trim(),
            self.session_duration
        );
        true
    }

    /// Playing -> GameOver
    pub fn end_session(&mut self) -> bool {
        if self.screen != Screen::Playing {
            return false;
        }
        self.stats.time_remaining = 0.0;
        self.stats.clear_selection();
        self.screen = Screen::GameOver;
        info!(
            "Game over: score {} ({}/{} correct, {}%)",
            self.stats.score,
            self.stats.correct_answers,
            self.stats.problems_solved,
            self.stats.accuracy_percent()
        );
        true
    }

    /// GameOver -> NameEntry, clearing the previous player's name
    pub fn restart(&mut self) -> bool {
        if self.screen != Screen::GameOver {
            return false;
        }
        self.player_name.clear();
        self.screen = Screen::NameEntry;
        true
    }

    /// Append a typed character to the player name
    pub fn push_name_char(&mut self, ch: char) -> bool {
        if self.screen != Screen::NameEntry
            || ch.is_control()
            || self.player_name.chars().count() >= MAX_NAME_LEN
        {
            return false;
        }
        self.player_name.push(ch);
        true
    }

    pub fn pop_name_char(&mut self) -> bool {
        self.screen == Screen::NameEntry && self.player_name.pop().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_on_menu() {
        let state = GameState::new(1);
        assert_eq!(state.screen, Screen::Menu);
        assert!(state.balls.is_empty());
        assert_eq!(state.stats.time_remaining, SESSION_DURATION);
    }

    #[test]
    fn test_accuracy_guards_zero() {
        let mut stats = SessionStats::new(30.0);
        assert_eq!(stats.accuracy(), 0.0);
        assert_eq!(stats.accuracy_percent(), 0);
        stats.problems_solved = 3;
        stats.correct_answers = 2;
        assert!((stats.accuracy() - 2.0 / 3.0).abs() < 1e-6);
        assert_eq!(stats.accuracy_percent(), 66);
    }

    #[test]
    fn test_same_seed_same_rng() {
        use rand::Rng;
        let mut a = GameState::new(77);
        let mut b = GameState::new(77);
        let rolls_a: Vec<u32> = (0..8).map(|_| a.rng.random()).collect();
        let rolls_b: Vec<u32> = (0..8).map(|_| b.rng.random()).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn test_whitespace_name_refused() {
        let mut state = GameState::new(1);
        assert!(state.open_name_entry());
        state.player_name = "   \t ".into();
        assert!(!state.start_session());
        assert_eq!(state.screen, Screen::NameEntry);
    }

    #[test]
    fn test_start_resets_session() {
        let mut state = GameState::new(1);
        state.open_name_entry();
        state.player_name = "Ada".into();
        state.stats.score = -12;
        state.stats.problems_solved = 4;
        state.particles.push(Particle {
            pos: glam::Vec2::ZERO,
            vel: glam::Vec2::ZERO,
            life: 3,
            size: 2.0,
            color: crate::sim::entity::Color::RED,
        });
        assert!(state.start_session());
        assert_eq!(state.screen, Screen::Playing);
        assert_eq!(state.stats, SessionStats::new(state.session_duration));
        assert!(state.balls.is_empty() && state.particles.is_empty());
    }

    #[test]
    fn test_name_length_limit() {
        let mut state = GameState::new(1);
        state.open_name_entry();
        for _ in 0..40 {
            state.push_name_char('é');
        }
        assert_eq!(state.player_name.chars().count(), MAX_NAME_LEN);
        assert!(state.pop_name_char());
        assert_eq!(state.player_name.chars().count(), MAX_NAME_LEN - 1);
        assert!(!state.push_name_char('\r'));
    }

    #[test]
    fn test_illegal_transitions_are_noops() {
        let mut state = GameState::new(1);
        assert!(!state.start_session());
        assert!(!state.end_session());
        assert!(!state.restart());
        assert_eq!(state.screen, Screen::Menu);
    }

    #[test]
    fn test_restart_clears_name() {
        let mut state = GameState::new(1);
        state.open_name_entry();
        state.player_name = "Ada".into();
        state.start_session();
        assert!(state.end_session());
        assert!(state.restart());
        assert_eq!(state.screen, Screen::NameEntry);
        assert!(state.player_name.is_empty());
    }
}
