//! Headless renderer that reports frames through the log

use std::path::{Path, PathBuf};

use super::{FrameView, Renderer};
use crate::sim::Screen;

/// Logs screen changes, plus a HUD line every `interval` frames while playing
#[derive(Debug)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
    last_screen: Option<Screen>,
    last_line: Option<String>,
    /// Image drawn behind every screen, if one was found
    background: Option<PathBuf>,
}

impl LogRenderer {
    pub fn new(interval: u64) -> Self {
        Self {
            interval: interval.max(1),
            frames: 0,
            last_screen: None,
            last_line: None,
            background: None,
        }
    }

    pub fn with_background(mut self, background: Option<PathBuf>) -> Self {
        self.background = background;
        self
    }

    pub fn background(&self) -> Option<&Path> {
        self.background.as_deref()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// The most recent line written to the log
    pub fn last_line(&self) -> Option<&str> {
        self.last_line.as_deref()
    }

    fn hud_line(frame: &FrameView) -> String {
        let hud = &frame.hud;
        let mut line = format!(
            "[{}] time {}s ({:?}) score {} solved {} accuracy {}% balls {}",
            hud.player_name,
            hud.seconds_left,
            hud.time_band,
            hud.score,
            hud.solved,
            hud.accuracy_percent,
            hud.active_balls
        );
        if let Some((question, typed)) = hud.prompt {
            line.push_str(&format!(" | {question} = {typed}_"));
        }
        if let Some(feedback) = &hud.feedback {
            line.push_str(&format!(" | {feedback}"));
        }
        line
    }
}

impl Default for LogRenderer {
    fn default() -> Self {
        Self::new(60)
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, frame: &FrameView) {
        self.frames += 1;

        if self.last_screen != Some(frame.screen) {
            self.last_screen = Some(frame.screen);
            let mut line = match frame.screen {
                Screen::Menu => "MATH BALL CATCHER - press SPACE to start".to_string(),
                Screen::NameEntry => "Enter your name and press ENTER".to_string(),
                Screen::Playing => format!("Go, {}!", frame.hud.player_name),
                Screen::GameOver => format!(
                    "GAME OVER - {} final score {} ({} solved, {}% accuracy)",
                    frame.hud.rating.title(),
                    frame.hud.score,
                    frame.hud.solved,
                    frame.hud.accuracy_percent
                ),
            };
            if let Some(background) = &self.background {
                line.push_str(&format!(" [background {}]", background.display()));
            }
            log::info!("{line}");
            self.last_line = Some(line);
            return;
        }

        if frame.screen == Screen::Playing && self.frames.is_multiple_of(self.interval) {
            let line = Self::hud_line(frame);
            log::debug!("{line}");
            self.last_line = Some(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_reports_screen_changes() {
        let mut renderer = LogRenderer::new(2);
        let mut state = GameState::new(1);
        renderer.render(&FrameView::new(&state));
        assert!(renderer.last_line().unwrap().contains("press SPACE"));

        state.player_name = "Ada".into();
        state.screen = Screen::Playing;
        renderer.render(&FrameView::new(&state));
        assert_eq!(renderer.last_line(), Some("Go, Ada!"));

        renderer.render(&FrameView::new(&state));
        renderer.render(&FrameView::new(&state));
        assert!(renderer.last_line().unwrap().starts_with("[Ada] time 30s"));
        assert_eq!(renderer.frames(), 4);
    }

    #[test]
    fn test_game_over_line_shows_rating() {
        let mut renderer = LogRenderer::default();
        let mut state = GameState::new(1);
        state.screen = Screen::GameOver;
        state.stats.score = 160;
        state.stats.problems_solved = 32;
        state.stats.correct_answers = 32;
        renderer.render(&FrameView::new(&state));
        assert_eq!(
            renderer.last_line(),
            Some("GAME OVER - MATH GENIUS! final score 160 (32 solved, 100% accuracy)")
        );
    }

    #[test]
    fn test_background_is_drawn_behind_screens() {
        let renderer = LogRenderer::default();
        assert_eq!(renderer.background(), None);

        let mut renderer = renderer.with_background(Some(PathBuf::from("assets/bg.png")));
        assert_eq!(renderer.background(), Some(Path::new("assets/bg.png")));
        renderer.render(&FrameView::new(&GameState::new(1)));
        assert!(renderer.last_line().unwrap().ends_with("[background assets/bg.png]"));
    }
}
