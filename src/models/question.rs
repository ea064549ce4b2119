use serde::Deserialize;

/// Default absolute deviation accepted for numeric answers when a
/// question does not specify its own tolerance.
pub const DEFAULT_TOLERANCE: f64 = 0.2;

/// A single authored question.
///
/// The JSON representation uses the pool format of the learning unit:
/// `{"type": "mc", ...}` or `{"type": "num", ...}`.
#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    /// Multiple choice with exactly one correct option index.
    #[serde(rename = "mc")]
    MultipleChoice {
        text: String,
        options: Vec<String>,
        correct: usize,
        explain: String,
    },

    /// Free numeric answer graded within an absolute tolerance.
    #[serde(rename = "num")]
    Numeric {
        text: String,
        #[serde(default)]
        unit: Option<String>,
        answer: f64,
        #[serde(default = "default_tolerance")]
        tol: f64,
        explain: String,
    },
}

fn default_tolerance() -> f64 {
    DEFAULT_TOLERANCE
}

impl Question {
    pub fn text(&self) -> &str {
        match self {
            Question::MultipleChoice { text, .. } | Question::Numeric { text, .. } => text,
        }
    }

    pub fn explain(&self) -> &str {
        match self {
            Question::MultipleChoice { explain, .. } | Question::Numeric { explain, .. } => {
                explain
            }
        }
    }
}

/// A named subject area with its full question pool and a display title.
#[derive(Clone, Debug, Deserialize)]
pub struct Topic {
    pub id: String,
    pub title: String,
    pub questions: Vec<Question>,
}

/// A parsed answer as submitted by the learner.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Answer {
    /// Selected option index for a multiple-choice question.
    Choice(usize),
    /// Numeric value for a free-answer question.
    Value(f64),
}
