//! Fixed timestep simulation tick
//!
//! Core game loop step. Order within a tick is fixed: consume input events,
//! update the timer, update entities, spawn.

use super::input::{InputEvent, route};
use super::session;
use super::state::{GameEvent, GameState, Screen};

/// Advance the game state by one fixed timestep.
///
/// Returns the events produced this tick, in order.
pub fn tick(state: &mut GameState, input: &[InputEvent], dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for event in input {
        route(state, event, &mut events);
        if state.quit {
            return events;
        }
    }

    state.time_ticks += 1;

    // Particles keep animating on every screen (the finale burst plays
    // over the game over screen)
    session::update_effects(state);

    if state.screen != Screen::Playing {
        return events;
    }

    // The clock starts counting on the tick after the session begins
    if !events.contains(&GameEvent::SessionStarted)
        && session::update_timer(state, dt, &mut events)
    {
        return events;
    }

    session::update_balls(state, &mut events);
    session::update_feedback(state);
    session::maybe_spawn(state);

    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::input::Key;

    fn start(state: &mut GameState) {
        let mut input = vec![InputEvent::key(Key::Space)];
        input.extend("Ada".chars().map(InputEvent::char));
        input.push(InputEvent::key(Key::Enter));
        let events = tick(state, &input, SIM_DT);
        assert_eq!(events, vec![GameEvent::SessionStarted]);
    }

    #[test]
    fn test_menu_idles() {
        let mut state = GameState::new(12345);
        for _ in 0..100 {
            tick(&mut state, &[], SIM_DT);
        }
        assert_eq!(state.screen, Screen::Menu);
        assert!(state.balls.is_empty());
    }

    #[test]
    fn test_timer_reaches_zero_once() {
        let mut state = GameState::with_duration(7, 1.0);
        start(&mut state);
        assert_eq!(state.screen, Screen::Playing);

        let events = tick(&mut state, &[], 0.5);
        assert!(events.is_empty());
        assert_eq!(state.stats.time_remaining, 0.5);

        let events = tick(&mut state, &[], 0.5);
        assert_eq!(events, vec![GameEvent::GameOver]);
        assert_eq!(state.screen, Screen::GameOver);
        assert_eq!(state.stats.time_remaining, 0.0);
        assert_eq!(state.particles.len(), BURST_FINALE);

        for _ in 0..10 {
            let events = tick(&mut state, &[], 0.5);
            assert!(!events.contains(&GameEvent::GameOver));
        }
        assert_eq!(state.screen, Screen::GameOver);
    }

    fn ticks_until_game_over(duration: f32) -> u64 {
        let mut state = GameState::with_duration(3, duration);
        start(&mut state);
        let mut ticks = 0;
        while state.screen == Screen::Playing {
            tick(&mut state, &[], SIM_DT);
            ticks += 1;
        }
        ticks
    }

    #[test]
    fn test_session_ends_on_exact_tick() {
        assert_eq!(ticks_until_game_over(SESSION_DURATION), SESSION_DURATION as u64 * 60);
        assert_eq!(ticks_until_game_over(600.0), 36_000);
        assert_eq!(ticks_until_game_over(3600.0), 216_000);
    }

    #[test]
    fn test_finale_particles_fade_on_game_over() {
        let mut state = GameState::with_duration(7, SIM_DT);
        start(&mut state);
        tick(&mut state, &[], SIM_DT);
        assert_eq!(state.screen, Screen::GameOver);
        for _ in 0..PARTICLE_LIFE {
            tick(&mut state, &[], SIM_DT);
        }
        assert!(state.particles.is_empty());
    }

    #[test]
    fn test_balls_rain_down() {
        let mut state = GameState::new(2024);
        start(&mut state);
        let mut max_seen = 0;
        for _ in 0..1500 {
            tick(&mut state, &[], SIM_DT);
            assert!(state.balls.len() <= MAX_BALLS);
            max_seen = max_seen.max(state.balls.len());
        }
        assert!(max_seen > 0);
        assert_eq!(state.screen, Screen::Playing);
    }

    #[test]
    fn test_quit_stops_tick() {
        let mut state = GameState::new(1);
        let events = tick(&mut state, &[InputEvent::Quit, InputEvent::key(Key::Space)], SIM_DT);
        assert_eq!(events, vec![GameEvent::Quit]);
        assert_eq!(state.screen, Screen::Menu);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);
        start(&mut state1);
        start(&mut state2);

        for i in 0..600 {
            let input = if i % 50 == 0 {
                vec![InputEvent::click(650.0, 200.0), InputEvent::char('4')]
            } else if i % 50 == 1 {
                vec![InputEvent::key(Key::Enter)]
            } else {
                Vec::new()
            };
            let e1 = tick(&mut state1, &input, SIM_DT);
            let e2 = tick(&mut state2, &input, SIM_DT);
            assert_eq!(e1, e2);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.stats, state2.stats);
        assert_eq!(state1.balls.len(), state2.balls.len());
        for (a, b) in state1.balls.iter().zip(&state2.balls) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.problem(), b.problem());
        }
    }
}
