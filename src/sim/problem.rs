//! Arithmetic problem generation
//!
//! Every ball carries one [`Problem`]. Problems are built from an
//! [`Operation`] with concrete operands, so the question text and the answer
//! always come from the same numbers.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::ANSWER_EPSILON;

/// Denominators used by fraction-to-percentage problems
pub const PERCENT_DENOMINATORS: [i64; 5] = [2, 4, 5, 8, 10];

/// A single arithmetic operation with its operands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    Add(i64, i64),
    Sub(i64, i64),
    Mul(i64, i64),
    Div { dividend: i64, divisor: i64 },
    Square(i64),
    Power { base: i64, exp: u32 },
    Percent { num: i64, den: i64 },
    /// `a + b x c`
    AddMul(i64, i64, i64),
    /// `a - b / c`, division truncates toward zero
    SubDiv(i64, i64, i64),
    /// `(a + b) x c`
    ParenAddMul(i64, i64, i64),
}

impl Operation {
    /// Exact value of the operation
    pub fn evaluate(&self) -> f64 {
        match *self {
            Operation::Add(a, b) => (a + b) as f64,
            Operation::Sub(a, b) => (a - b) as f64,
            Operation::Mul(a, b) => (a * b) as f64,
            Operation::Div { dividend, divisor } => (dividend / divisor) as f64,
            Operation::Square(base) => (base * base) as f64,
            Operation::Power { base, exp } => base.pow(exp) as f64,
            Operation::Percent { num, den } => ((num * 100) as f64 / den as f64).round(),
            Operation::AddMul(a, b, c) => (a + b * c) as f64,
            Operation::SubDiv(a, b, c) => (a - b / c) as f64,
            Operation::ParenAddMul(a, b, c) => ((a + b) * c) as f64,
        }
    }

    /// Question text as shown on the ball
    pub fn question(&self) -> String {
        match *self {
            Operation::Add(a, b) => format!("{a} + {b}"),
            Operation::Sub(a, b) => format!("{a} - {b}"),
            Operation::Mul(a, b) => format!("{a} x {b}"),
            Operation::Div { dividend, divisor } => format!("{dividend} / {divisor}"),
            Operation::Square(base) => format!("{base}²"),
            Operation::Power { base, exp } => format!("{base}^{exp}"),
            Operation::Percent { num, den } => format!("{num}/{den} as %"),
            Operation::AddMul(a, b, c) => format!("{a} + {b} x {c}"),
            Operation::SubDiv(a, b, c) => format!("{a} - {b} / {c}"),
            Operation::ParenAddMul(a, b, c) => format!("({a} + {b}) x {c}"),
        }
    }

    /// Pick a random operation from the problem templates.
    ///
    /// The eight top-level categories are equally likely; the "mixed"
    /// category then picks one of its three variants.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..8) {
            0 => Operation::Add(rng.random_range(45..=150), rng.random_range(35..=120)),
            1 => {
                let a = rng.random_range(80..=200);
                // Upper bound deliberately allows b > a (negative answers)
                Operation::Sub(a, rng.random_range(30..=a + 20))
            }
            2 => Operation::Mul(rng.random_range(12..=25), rng.random_range(11..=20)),
            3 => {
                let divisor = rng.random_range(8..=15);
                let answer = rng.random_range(12..=25);
                Operation::Div {
                    dividend: divisor * answer,
                    divisor,
                }
            }
            4 => Operation::Square(rng.random_range(8..=15)),
            5 => Operation::Power {
                base: rng.random_range(3..=8),
                exp: rng.random_range(2..=3),
            },
            6 => {
                let den = *PERCENT_DENOMINATORS.choose(rng).unwrap_or(&2);
                Operation::Percent {
                    num: rng.random_range(1..=den * 3),
                    den,
                }
            }
            _ => Self::random_mixed(rng),
        }
    }

    fn random_mixed<R: Rng + ?Sized>(rng: &mut R) -> Self {
        match rng.random_range(0..3) {
            0 => Operation::AddMul(
                rng.random_range(10..=30),
                rng.random_range(5..=12),
                rng.random_range(3..=8),
            ),
            1 => {
                let c = rng.random_range(2..=6);
                let b = c * rng.random_range(4..=10);
                Operation::SubDiv(rng.random_range(20..=50), b, c)
            }
            _ => Operation::ParenAddMul(
                rng.random_range(8..=20),
                rng.random_range(5..=15),
                rng.random_range(3..=7),
            ),
        }
    }
}

/// A question and its exact answer. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Problem {
    op: Operation,
    question: String,
    answer: f64,
}

impl Problem {
    pub fn new(op: Operation) -> Self {
        Self {
            question: op.question(),
            answer: op.evaluate(),
            op,
        }
    }

    /// Generate a random problem
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::new(Operation::random(rng))
    }

    /// Division problem built from its divisor and (whole) answer
    pub fn division(divisor: i64, answer: i64) -> Self {
        Self::new(Operation::Div {
            dividend: divisor * answer,
            divisor,
        })
    }

    pub fn operation(&self) -> Operation {
        self.op
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> f64 {
        self.answer
    }

    /// True when the answer has no fractional part
    pub fn is_integral(&self) -> bool {
        self.answer.fract() == 0.0
    }

    /// Parse typed text the way this problem expects it.
    ///
    /// Integral answers only accept whole numbers; anything else accepts
    /// decimals.
    pub fn parse_guess(&self, text: &str) -> Result<f64, AnswerError> {
        parse_answer(text, self.is_integral())
    }

    /// Compare a parsed guess against the answer
    pub fn is_correct(&self, guess: f64) -> bool {
        if self.is_integral() {
            guess == self.answer
        } else {
            (guess - self.answer).abs() < ANSWER_EPSILON
        }
    }
}

/// Why typed answer text could not be read as a number
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnswerError {
    #[error("no answer entered")]
    Empty,
    #[error("`{0}` is not a whole number")]
    NotWhole(String),
    #[error("`{0}` is not a number")]
    Malformed(String),
}

/// Parse answer text, either as a whole number or as a decimal
pub fn parse_answer(text: &str, whole: bool) -> Result<f64, AnswerError> {
    let text = text.trim();
    if text.is_empty() {
        return Err(AnswerError::Empty);
    }
    if whole {
        text.parse::<i64>()
            .map(|n| n as f64)
            .map_err(|_| AnswerError::NotWhole(text.to_string()))
    } else {
        match text.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(v),
            _ => Err(AnswerError::Malformed(text.to_string())),
        }
    }
}
