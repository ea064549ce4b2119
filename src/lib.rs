//! # thermo-quiz
//!
//! A terminal quiz engine for a heat-and-temperature learning unit.
//!
//! Each topic keeps its own question pool; a session draws a random
//! sample per topic, grades answers one at a time, and counts results
//! into a progress file that survives restarts.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use thermo_quiz::progress::ProgressStore;
//! use thermo_quiz::{Quiz, QuizError, DEFAULT_SAMPLE_SIZE};
//!
//! fn main() -> Result<(), QuizError> {
//!     let store = ProgressStore::new("progress.json");
//!     let quiz = Quiz::with_default_pools(store, DEFAULT_SAMPLE_SIZE, StdRng::from_os_rng())?;
//!
//!     // Run the quiz in the terminal
//!     quiz.run()?;
//!
//!     Ok(())
//! }
//! ```

mod app;
mod data;
mod models;
pub mod progress;
pub mod session;
pub mod terminal;
mod ui;

use std::io;
use std::path::Path;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use rand::rngs::StdRng;

pub use app::{App, Feedback, InputState, Tone, DEFAULT_SAMPLE_SIZE};
pub use data::{load_default_pools, load_pools_from_path, LoadError};
pub use models::{Answer, AppState, Question, Topic, DEFAULT_TOLERANCE};

use progress::ProgressStore;

/// Error type for quiz operations.
#[derive(Debug)]
pub enum QuizError {
    /// Error loading question pools.
    Load(LoadError),
    /// IO error during quiz execution or while saving progress.
    Io(io::Error),
}

impl std::fmt::Display for QuizError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QuizError::Load(e) => write!(f, "Failed to load question pools: {}", e),
            QuizError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for QuizError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            QuizError::Load(e) => Some(e),
            QuizError::Io(e) => Some(e),
        }
    }
}

impl From<LoadError> for QuizError {
    fn from(err: LoadError) -> Self {
        QuizError::Load(err)
    }
}

impl From<io::Error> for QuizError {
    fn from(err: io::Error) -> Self {
        QuizError::Io(err)
    }
}

/// A quiz instance that can be run in the terminal.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a new quiz from explicit topic pools.
    pub fn new(
        topics: Vec<Topic>,
        store: ProgressStore,
        sample_size: usize,
        rng: StdRng,
    ) -> Result<Self, QuizError> {
        if topics.is_empty() {
            return Err(QuizError::Load(LoadError::Invalid(
                "no topics defined".to_string(),
            )));
        }
        Ok(Self {
            app: App::new(topics, store, sample_size, rng),
        })
    }

    /// Create a quiz over the built-in question pools.
    pub fn with_default_pools(
        store: ProgressStore,
        sample_size: usize,
        rng: StdRng,
    ) -> Result<Self, QuizError> {
        let topics = load_default_pools()?;
        Self::new(topics, store, sample_size, rng)
    }

    /// Load the question pools from a JSON file.
    pub fn from_json<P: AsRef<Path>>(
        path: P,
        store: ProgressStore,
        sample_size: usize,
        rng: StdRng,
    ) -> Result<Self, QuizError> {
        let topics = load_pools_from_path(path)?;
        Self::new(topics, store, sample_size, rng)
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the quiz UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), QuizError> {
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app);
        terminal::restore()?;
        result
    }

    /// Get a reference to the underlying app for custom handling.
    pub fn app(&self) -> &App {
        &self.app
    }

    /// Get a mutable reference to the underlying app for custom handling.
    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}

fn run_event_loop(terminal: &mut terminal::AppTerminal, app: &mut App) -> Result<(), QuizError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code)? {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> Result<bool, QuizError> {
    match app.state {
        AppState::Welcome => Ok(handle_welcome_input(app, key)),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Summary => handle_summary_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> Result<bool, QuizError> {
    match key {
        KeyCode::Up | KeyCode::Char('k') => app.select_previous_option(),
        KeyCode::Down | KeyCode::Char('j') => app.select_next_option(),
        KeyCode::Tab | KeyCode::Right => app.next_topic(),
        KeyCode::BackTab | KeyCode::Left => app.previous_topic(),
        KeyCode::Enter => app.confirm()?,
        KeyCode::Backspace => app.pop_input_char(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset()?,
        KeyCode::Char(c) => app.push_input_char(c),
        _ => {}
    }
    Ok(false)
}

fn handle_summary_input(app: &mut App, key: KeyCode) -> Result<bool, QuizError> {
    match key {
        KeyCode::Char('n') | KeyCode::Char('N') => app.new_round(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.reset()?,
        KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(true),
        _ => {}
    }
    Ok(false)
}
