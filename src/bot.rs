//! Demo autoplayer
//!
//! Plays the game through the same input events a person would produce:
//! starts from the menu, types a name, clicks the lowest visible ball and
//! types an answer (sometimes a wrong one on purpose).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::SCREEN_HEIGHT;
use crate::sim::{GameState, InputEvent, Key, Screen};

#[derive(Debug, Clone)]
pub struct BotConfig {
    pub name: String,
    /// Chance of typing the right answer (0.0 - 1.0)
    pub accuracy: f64,
    /// Ticks between keystrokes/clicks
    pub think_ticks: u32,
    /// Sessions to play before quitting
    pub rounds: u32,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            name: "Demo".to_string(),
            accuracy: 0.8,
            think_ticks: 12,
            rounds: 1,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Bot {
    config: BotConfig,
    rng: Pcg32,
    cooldown: u32,
    /// Answer text still to type for the current selection
    pending: Vec<char>,
    rounds_played: u32,
    last_screen: Screen,
}

impl Bot {
    pub fn new(config: BotConfig, seed: u64) -> Self {
        Self {
            config,
            rng: Pcg32::seed_from_u64(seed),
            cooldown: 0,
            pending: Vec::new(),
            rounds_played: 0,
            last_screen: Screen::Menu,
        }
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// Input events for the next tick
    pub fn next_input(&mut self, state: &GameState) -> Vec<InputEvent> {
        if state.screen != self.last_screen {
            if state.screen == Screen::GameOver {
                self.rounds_played += 1;
            }
            self.last_screen = state.screen;
            self.pending.clear();
        }

        if self.cooldown > 0 {
            self.cooldown -= 1;
            return Vec::new();
        }
        self.cooldown = self.config.think_ticks;

        match state.screen {
            Screen::Menu => vec![InputEvent::key(Key::Space)],
            Screen::NameEntry => self.type_name(state),
            Screen::Playing => self.play(state),
            Screen::GameOver => {
                if self.rounds_played < self.config.rounds {
                    vec![InputEvent::key(Key::Space)]
                } else {
                    vec![InputEvent::key(Key::Escape)]
                }
            }
        }
    }

    fn type_name(&self, state: &GameState) -> Vec<InputEvent> {
        let typed = state.player_name.chars().count();
        match self.config.name.chars().nth(typed) {
            Some(ch) => vec![InputEvent::char(ch)],
            None => vec![InputEvent::key(Key::Enter)],
        }
    }

    fn play(&mut self, state: &GameState) -> Vec<InputEvent> {
        let Some(ball) = state.selected_ball() else {
            self.pending.clear();
            // Go for the ball closest to falling off
            return state
                .balls
                .iter()
                .filter(|b| b.pos.y > 0.0 && b.pos.y < SCREEN_HEIGHT)
                .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
                .map(|b| vec![InputEvent::MouseDown(Vec2::new(b.pos.x, b.pos.y))])
                .unwrap_or_default();
        };

        if self.pending.is_empty() && state.stats.input_text.is_empty() {
            let answer = ball.problem().answer() as i64;
            let guess = if self.rng.random_bool(self.config.accuracy.clamp(0.0, 1.0)) {
                answer
            } else {
                answer + self.rng.random_range(1..=9)
            };
            // Typed in reverse so `pop` yields the next character
            self.pending = guess.to_string().chars().rev().collect();
        }

        match self.pending.pop() {
            Some(ch) => vec![InputEvent::char(ch)],
            None => vec![InputEvent::key(Key::Enter)],
        }
    }
}
