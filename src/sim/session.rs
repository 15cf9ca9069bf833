//! Session controller: timer, spawning, selection and answer resolution
//!
//! These run only while [`Screen::Playing`]; callers in `tick` and `input`
//! are responsible for gating on the screen.

use glam::Vec2;
use log::{debug, info};
use rand::Rng;

use super::entity::{Ball, Color, burst, update_particles};
use super::state::{Feedback, GameEvent, GameState, Screen};
use crate::consts::*;
use crate::screen_center;

/// Spawn particles unless effects are turned off
pub fn emit_burst(state: &mut GameState, pos: Vec2, color: Color, count: usize) {
    if state.particles_enabled {
        burst(&mut state.particles, pos, color, count, &mut state.rng);
    }
}

/// Advance the countdown by one tick of `dt`. Returns true on the tick the
/// session ends.
///
/// Elapsed time is kept as a tick count so the end tick doesn't drift on
/// long sessions.
pub fn update_timer(state: &mut GameState, dt: f32, events: &mut Vec<GameEvent>) -> bool {
    if state.screen != Screen::Playing {
        return false;
    }
    state.stats.elapsed_ticks += 1;
    let elapsed = state.stats.elapsed_ticks as f64 * f64::from(dt);
    state.stats.time_remaining = (f64::from(state.session_duration) - elapsed).max(0.0) as f32;

    if state.stats.time_remaining > 0.0 {
        return false;
    }
    if state.end_session() {
        emit_burst(state, screen_center(), Color::YELLOW, BURST_FINALE);
        events.push(GameEvent::GameOver);
        return true;
    }
    false
}

/// Move balls down and discard the ones that left the screen.
///
/// If the selected ball is discarded its selection and typed text go too.
pub fn update_balls(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for ball in state.balls.iter_mut() {
        ball.update();
    }

    let selected = state.stats.selected;
    let mut expired_selection = false;
    state.balls.retain(|ball| {
        let keep = !ball.is_out_of_bounds();
        if !keep && Some(ball.id) == selected {
            expired_selection = true;
        }
        keep
    });

    if expired_selection {
        if let Some(id) = selected {
            debug!("Selected ball {id} fell off screen");
            events.push(GameEvent::SelectionExpired { id });
        }
        state.stats.clear_selection();
    }
}

/// Count down the answer banner
pub fn update_feedback(state: &mut GameState) {
    if let Some(feedback) = state.stats.feedback.as_mut() {
        feedback.ticks_remaining = feedback.ticks_remaining.saturating_sub(1);
        if feedback.ticks_remaining == 0 {
            state.stats.feedback = None;
        }
    }
}

/// Probability of spawning a ball this tick given how many are active
pub fn spawn_chance(active: usize) -> f64 {
    if active < LOW_OCCUPANCY {
        SPAWN_CHANCE_LOW
    } else {
        SPAWN_CHANCE_HIGH
    }
}

/// Maybe add a ball. Thins out as the screen fills, capped at `MAX_BALLS`.
pub fn maybe_spawn(state: &mut GameState) -> Option<u32> {
    let roll: f64 = state.rng.random();
    if roll >= spawn_chance(state.balls.len()) {
        return None;
    }
    spawn_ball(state)
}

/// Add a ball right away (if under the cap)
pub fn spawn_ball(state: &mut GameState) -> Option<u32> {
    if state.balls.len() >= MAX_BALLS {
        return None;
    }
    let id = state.next_ball_id();
    let ball = Ball::spawn(id, &mut state.rng);
    debug!("Spawned ball {id}: {}", ball.problem().question());
    state.balls.push(ball);
    Some(id)
}

/// Select the first ball (in spawn order) under the point.
///
/// Only one ball can be selected at a time; clicks while a selection is
/// active are ignored.
pub fn select_at(state: &mut GameState, point: Vec2, events: &mut Vec<GameEvent>) -> bool {
    if state.screen != Screen::Playing || state.stats.selected.is_some() {
        return false;
    }
    let Some(ball) = state.balls.iter().find(|b| b.contains(point)) else {
        return false;
    };
    let (id, pos, color) = (ball.id, ball.pos, ball.color);

    state.stats.selected = Some(id);
    state.stats.input_text.clear();
    emit_burst(state, pos, color, BURST_CLICK);
    events.push(GameEvent::BallSelected { id });
    true
}

/// Append a character to the answer being typed.
///
/// Digits append up to the length limit; a minus sign only as the first
/// character; a single decimal point.
pub fn push_answer_char(state: &mut GameState, ch: char) -> bool {
    if state.stats.selected.is_none() {
        return false;
    }
    let text = &mut state.stats.input_text;
    if text.chars().count() >= MAX_ANSWER_LEN {
        return false;
    }
    let accepted = match ch {
        '0'..='9' => true,
        '-' => text.is_empty(),
        '.' => !text.contains('.'),
        _ => false,
    };
    if accepted {
        text.push(ch);
    }
    accepted
}

pub fn pop_answer_char(state: &mut GameState) -> bool {
    state.stats.selected.is_some() && state.stats.input_text.pop().is_some()
}

/// Resolve the typed answer against the selected ball.
///
/// Returns `Some(correct)` when the answer was scored, `None` when nothing
/// happened (no selection, or text that doesn't parse).
pub fn submit_answer(state: &mut GameState, events: &mut Vec<GameEvent>) -> Option<bool> {
    let id = state.stats.selected?;
    let index = state.balls.iter().position(|b| b.id == id)?;

    let guess = match state.balls[index].problem().parse_guess(&state.stats.input_text) {
        Ok(guess) => guess,
        Err(err) => {
            debug!("Answer not scored: {err}");
            return None;
        }
    };

    let ball = state.balls.remove(index);
    let correct = ball.problem().is_correct(guess);
    let stats = &mut state.stats;
    stats.problems_solved += 1;

    if correct {
        stats.score += SCORE_CORRECT;
        stats.correct_answers += 1;
        events.push(GameEvent::AnswerCorrect { id });
    } else {
        stats.score -= SCORE_WRONG;
        events.push(GameEvent::AnswerWrong { id });
    }
    info!(
        "{} = {} answered {} ({}), score {}",
        ball.problem().question(),
        ball.problem().answer(),
        stats.input_text,
        if correct { "correct" } else { "wrong" },
        stats.score
    );

    stats.clear_selection();
    stats.feedback = Some(Feedback {
        correct,
        ticks_remaining: FEEDBACK_TICKS,
    });

    let (color, count) = if correct {
        (Color::GREEN, BURST_CORRECT)
    } else {
        (Color::RED, BURST_WRONG)
    };
    emit_burst(state, ball.pos, color, count);
    Some(correct)
}

/// Advance every particle, on any screen
pub fn update_effects(state: &mut GameState) {
    update_particles(&mut state.particles);
}
