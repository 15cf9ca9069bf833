//! Read-only frame snapshot for renderers

use glam::Vec2;

use crate::consts::{SCORE_CORRECT, SCORE_WRONG};
use crate::sim::{Color, GameState, Screen};

/// Color band of the countdown on the HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeBand {
    /// 45 seconds or more
    Plenty,
    /// Under 45 seconds
    Hurry,
    /// Under 20 seconds
    Critical,
}

impl TimeBand {
    pub fn for_seconds(seconds: f32) -> Self {
        if seconds < 20.0 {
            TimeBand::Critical
        } else if seconds < 45.0 {
            TimeBand::Hurry
        } else {
            TimeBand::Plenty
        }
    }

    pub fn color(self) -> Color {
        match self {
            TimeBand::Plenty => Color::GREEN,
            TimeBand::Hurry => Color::ORANGE,
            TimeBand::Critical => Color::RED,
        }
    }
}

/// Grade shown on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rating {
    Genius,
    Expert,
    Scholar,
    Student,
    Learner,
}

impl Rating {
    /// Grade a finished session. Higher grades need both the score and the
    /// accuracy (whole percent).
    pub fn for_result(score: i64, accuracy_percent: u32) -> Self {
        if score >= 150 && accuracy_percent >= 80 {
            Rating::Genius
        } else if score >= 100 && accuracy_percent >= 70 {
            Rating::Expert
        } else if score >= 60 && accuracy_percent >= 60 {
            Rating::Scholar
        } else if score >= 30 {
            Rating::Student
        } else {
            Rating::Learner
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Rating::Genius => "MATH GENIUS!",
            Rating::Expert => "MATH EXPERT!",
            Rating::Scholar => "MATH SCHOLAR!",
            Rating::Student => "MATH STUDENT!",
            Rating::Learner => "MATH LEARNER!",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Rating::Genius => Color::YELLOW,
            Rating::Expert => Color::ORANGE,
            Rating::Scholar => Color::GREEN,
            Rating::Student => Color::CYAN,
            Rating::Learner => Color::PURPLE,
        }
    }
}

/// Score text color: red once the score is negative
pub fn score_color(score: i64) -> Color {
    if score >= 0 { Color::GREEN } else { Color::RED }
}

pub fn accuracy_color(accuracy_percent: u32) -> Color {
    if accuracy_percent >= 70 {
        Color::GREEN
    } else if accuracy_percent >= 50 {
        Color::ORANGE
    } else {
        Color::RED
    }
}

/// Text of the answer banner
pub fn feedback_text(correct: bool) -> String {
    if correct {
        format!("CORRECT! +{SCORE_CORRECT} points")
    } else {
        format!("WRONG! -{SCORE_WRONG} points")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BallSprite<'a> {
    pub pos: Vec2,
    /// Radius including the pulse
    pub radius: f32,
    pub color: Color,
    pub label: &'a str,
    pub selected: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSprite {
    pub pos: Vec2,
    pub size: f32,
    pub color: Color,
}

/// Values shown on the heads-up display
#[derive(Debug, Clone, PartialEq)]
pub struct Hud<'a> {
    pub player_name: &'a str,
    /// Whole seconds left
    pub seconds_left: u32,
    pub time_band: TimeBand,
    pub score: i64,
    pub score_color: Color,
    pub solved: u32,
    pub accuracy_percent: u32,
    pub accuracy_color: Color,
    /// Grade for the current results (shown once the session is over)
    pub rating: Rating,
    pub active_balls: usize,
    /// Question of the selected ball and the answer typed so far
    pub prompt: Option<(&'a str, &'a str)>,
    /// Text of the answer banner, while it is up
    pub feedback: Option<String>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameView<'a> {
    pub screen: Screen,
    pub tick: u64,
    pub balls: Vec<BallSprite<'a>>,
    pub particles: Vec<ParticleSprite>,
    pub hud: Hud<'a>,
}

impl<'a> FrameView<'a> {
    pub fn new(state: &'a GameState) -> Self {
        let selected = state.stats.selected;
        let balls = state
            .balls
            .iter()
            .map(|ball| BallSprite {
                pos: ball.pos,
                radius: ball.pulsed_radius(),
                color: ball.color,
                label: ball.problem().question(),
                selected: Some(ball.id) == selected,
            })
            .collect();
        let particles = state
            .particles
            .iter()
            .map(|p| ParticleSprite {
                pos: p.pos,
                size: p.size,
                color: p.color,
            })
            .collect();

        let stats = &state.stats;
        let accuracy_percent = stats.accuracy_percent();
        let hud = Hud {
            player_name: state.player_name.as_str(),
            seconds_left: stats.time_remaining.max(0.0) as u32,
            time_band: TimeBand::for_seconds(stats.time_remaining),
            score: stats.score,
            score_color: score_color(stats.score),
            solved: stats.problems_solved,
            accuracy_percent,
            accuracy_color: accuracy_color(accuracy_percent),
            rating: Rating::for_result(stats.score, accuracy_percent),
            active_balls: state.balls.len(),
            prompt: state
                .selected_ball()
                .map(|ball| (ball.problem().question(), stats.input_text.as_str())),
            feedback: stats.feedback.map(|f| feedback_text(f.correct)),
        };

        Self {
            screen: state.screen,
            tick: state.time_ticks,
            balls,
            particles,
            hud,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Ball, Feedback, Problem};

    #[test]
    fn test_time_bands() {
        assert_eq!(TimeBand::for_seconds(90.0), TimeBand::Plenty);
        assert_eq!(TimeBand::for_seconds(45.0), TimeBand::Plenty);
        assert_eq!(TimeBand::for_seconds(44.9), TimeBand::Hurry);
        assert_eq!(TimeBand::for_seconds(19.9), TimeBand::Critical);
        assert_eq!(TimeBand::Critical.color(), Color::RED);
    }

    #[test]
    fn test_view_reflects_selection() {
        let mut state = GameState::new(3);
        state.screen = Screen::Playing;
        state.player_name = "Ada".into();
        state.balls.push(Ball::new(
            4,
            Vec2::new(100.0, 100.0),
            60.0,
            2.0,
            Color::CYAN,
            Problem::division(9, 13),
        ));
        state.stats.selected = Some(4);
        state.stats.input_text = "11".into();
        state.stats.feedback = Some(Feedback {
            correct: false,
            ticks_remaining: 3,
        });

        let view = FrameView::new(&state);
        assert_eq!(view.balls.len(), 1);
        assert!(view.balls[0].selected);
        assert_eq!(view.balls[0].label, "117 / 9");
        assert_eq!(view.hud.prompt, Some(("117 / 9", "11")));
        assert_eq!(view.hud.feedback.as_deref(), Some("WRONG! -2 points"));
        assert_eq!(view.hud.seconds_left, 30);
        assert_eq!(view.hud.active_balls, 1);
    }

    #[test]
    fn test_rating_thresholds() {
        let cases = [
            (150, 80, Rating::Genius),
            (149, 80, Rating::Expert),
            (150, 79, Rating::Expert),
            (100, 70, Rating::Expert),
            (99, 70, Rating::Scholar),
            (100, 69, Rating::Scholar),
            (60, 60, Rating::Scholar),
            (59, 60, Rating::Student),
            (60, 59, Rating::Student),
            (30, 0, Rating::Student),
            (29, 100, Rating::Learner),
            (-10, 0, Rating::Learner),
        ];
        for (score, accuracy, expected) in cases {
            assert_eq!(
                Rating::for_result(score, accuracy),
                expected,
                "score {score}, accuracy {accuracy}%"
            );
        }
        assert_eq!(Rating::Genius.color(), Color::YELLOW);
        assert_eq!(Rating::Learner.title(), "MATH LEARNER!");
    }

    #[test]
    fn test_stat_colors() {
        assert_eq!(score_color(0), Color::GREEN);
        assert_eq!(score_color(-1), Color::RED);
        assert_eq!(accuracy_color(70), Color::GREEN);
        assert_eq!(accuracy_color(69), Color::ORANGE);
        assert_eq!(accuracy_color(50), Color::ORANGE);
        assert_eq!(accuracy_color(49), Color::RED);
    }

    #[test]
    fn test_banner_follows_scoring() {
        assert_eq!(feedback_text(true), format!("CORRECT! +{SCORE_CORRECT} points"));
        assert_eq!(feedback_text(false), format!("WRONG! -{SCORE_WRONG} points"));
    }

    #[test]
    fn test_game_over_hud_grades_results() {
        let mut state = GameState::new(3);
        state.screen = Screen::GameOver;
        state.stats.score = -4;
        state.stats.problems_solved = 4;
        state.stats.correct_answers = 2;
        let view = FrameView::new(&state);
        assert_eq!(view.hud.rating, Rating::Learner);
        assert_eq!(view.hud.score_color, Color::RED);
        assert_eq!(view.hud.accuracy_percent, 50);
        assert_eq!(view.hud.accuracy_color, Color::ORANGE);
    }
}
