//! Input routing
//!
//! Raw events are mapped to actions according to the current screen. Events
//! that mean nothing on the current screen are dropped.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::session;
use super::state::{GameEvent, GameState, Screen};

/// Logical key identifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Key {
    Enter,
    Backspace,
    Space,
    Escape,
    /// A key that produced a printable character
    Char,
    Other,
}

/// A discrete input event from the platform
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    KeyDown { key: Key, ch: Option<char> },
    MouseDown(Vec2),
    /// Window closed
    Quit,
}

impl InputEvent {
    /// Key press that also types `ch` (letters, digits, punctuation)
    pub fn char(ch: char) -> Self {
        let key = if ch == ' ' { Key::Space } else { Key::Char };
        InputEvent::KeyDown { key, ch: Some(ch) }
    }

    /// Key press that doesn't type anything
    pub fn key(key: Key) -> Self {
        let ch = match key {
            Key::Space => Some(' '),
            _ => None,
        };
        InputEvent::KeyDown { key, ch }
    }

    pub fn click(x: f32, y: f32) -> Self {
        InputEvent::MouseDown(Vec2::new(x, y))
    }
}

/// Apply one event to the state
pub fn route(state: &mut GameState, event: &InputEvent, events: &mut Vec<GameEvent>) {
    match *event {
        InputEvent::Quit => request_quit(state, events),
        InputEvent::MouseDown(point) => {
            if state.screen == Screen::Playing && state.stats.selected.is_none() {
                session::select_at(state, point, events);
            }
        }
        InputEvent::KeyDown { key, ch } => match state.screen {
            Screen::Menu => {
                if key == Key::Space {
                    state.open_name_entry();
                }
            }
            Screen::NameEntry => name_entry_key(state, key, ch, events),
            Screen::Playing => playing_key(state, key, ch, events),
            Screen::GameOver => match key {
                Key::Space => {
                    if state.restart() {
                        events.push(GameEvent::Restarted);
                    }
                }
                Key::Escape => request_quit(state, events),
                _ => {}
            },
        },
    }
}

fn request_quit(state: &mut GameState, events: &mut Vec<GameEvent>) {
    if !state.quit {
        state.quit = true;
        events.push(GameEvent::Quit);
    }
}

fn name_entry_key(state: &mut GameState, key: Key, ch: Option<char>, events: &mut Vec<GameEvent>) {
    match key {
        Key::Enter => {
            if state.start_session() {
                events.push(GameEvent::SessionStarted);
            }
        }
        Key::Backspace => {
            state.pop_name_char();
        }
        _ => {
            if let Some(ch) = ch {
                state.push_name_char(ch);
            }
        }
    }
}

fn playing_key(state: &mut GameState, key: Key, ch: Option<char>, events: &mut Vec<GameEvent>) {
    if state.stats.selected.is_none() {
        return;
    }
    match key {
        Key::Enter => {
            session::submit_answer(state, events);
        }
        Key::Backspace => {
            session::pop_answer_char(state);
        }
        _ => {
            if let Some(ch) = ch {
                session::push_answer_char(state, ch);
            }
        }
    }
}
