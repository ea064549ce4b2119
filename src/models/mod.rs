//! Domain types shared across the engine and the UI.

mod question;

pub use question::{Answer, Question, Topic, DEFAULT_TOLERANCE};

/// Top-level screen the application is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Welcome,
    Quiz,
    Summary,
}
