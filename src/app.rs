use std::io;

use rand::rngs::StdRng;

use crate::models::{Answer, AppState, Question, Topic};
use crate::progress::{aggregate, GlobalProgress, ProgressMap, ProgressRecord, ProgressStore};
use crate::session::{AdvanceOutcome, Phase, QuizSession, SubmitOutcome};

/// Questions drawn per topic and session.
pub const DEFAULT_SAMPLE_SIZE: usize = 5;

const MAX_NUMERIC_INPUT_LEN: usize = 16;

/// Pending user input for the active question.
#[derive(Debug, Clone, PartialEq)]
pub enum InputState {
    /// Selected option index, none until the learner picks one.
    Choice(Option<usize>),
    /// Numeric answer buffer as typed (decimal comma allowed).
    Value(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Good,
    Bad,
    Info,
}

/// Feedback line emitted by the last action.
#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub text: String,
    pub tone: Tone,
}

/// Application root: one quiz session per topic plus the persisted
/// progress counters and the derived overall score.
pub struct App {
    pub state: AppState,
    topics: Vec<Topic>,
    sessions: Vec<QuizSession>,
    active: usize,
    sample_size: usize,
    store: ProgressStore,
    records: ProgressMap,
    overall: GlobalProgress,
    input: InputState,
    feedback: Option<Feedback>,
    rng: StdRng,
}

impl App {
    pub fn new(
        topics: Vec<Topic>,
        store: ProgressStore,
        sample_size: usize,
        mut rng: StdRng,
    ) -> Self {
        let sessions = start_sessions(&topics, sample_size, &mut rng);
        let records = store.load();
        let overall = aggregate(&records);

        let mut app = Self {
            state: AppState::Welcome,
            topics,
            sessions,
            active: 0,
            sample_size,
            store,
            records,
            overall,
            input: InputState::Choice(None),
            feedback: None,
            rng,
        };
        app.reset_input();
        app
    }

    pub fn sessions(&self) -> &[QuizSession] {
        &self.sessions
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    pub fn active_session(&self) -> &QuizSession {
        &self.sessions[self.active]
    }

    pub fn overall(&self) -> GlobalProgress {
        self.overall
    }

    pub fn feedback(&self) -> Option<&Feedback> {
        self.feedback.as_ref()
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Persisted counters for one topic (zero if never answered).
    pub fn record_for(&self, topic_id: &str) -> ProgressRecord {
        self.records.get(topic_id).copied().unwrap_or_default()
    }

    pub fn start_quiz(&mut self) {
        self.state = AppState::Quiz;
    }

    pub fn next_topic(&mut self) {
        self.focus_topic((self.active + 1) % self.sessions.len());
    }

    pub fn previous_topic(&mut self) {
        self.focus_topic((self.active + self.sessions.len() - 1) % self.sessions.len());
    }

    fn focus_topic(&mut self, index: usize) {
        self.active = index;
        self.feedback = None;
        self.reset_input();
    }

    pub fn select_next_option(&mut self) {
        self.move_selection(1);
    }

    pub fn select_previous_option(&mut self) {
        self.move_selection(-1);
    }

    fn move_selection(&mut self, step: isize) {
        if self.active_session().phase() != Phase::Presenting {
            return;
        }
        let Some(Question::MultipleChoice { options, .. }) =
            self.active_session().current_question()
        else {
            return;
        };
        let len = options.len() as isize;

        if let InputState::Choice(selected) = &mut self.input {
            let next = match *selected {
                Some(i) => (i as isize + step).rem_euclid(len),
                None if step < 0 => len - 1,
                None => 0,
            };
            *selected = Some(next as usize);
        }
    }

    /// Append one character to the numeric answer buffer.
    pub fn push_input_char(&mut self, c: char) {
        if self.active_session().phase() != Phase::Presenting {
            return;
        }
        if let InputState::Value(buffer) = &mut self.input {
            let accepted = c.is_ascii_digit() || matches!(c, '.' | ',' | '-');
            if accepted && buffer.len() < MAX_NUMERIC_INPUT_LEN {
                buffer.push(c);
            }
        }
    }

    pub fn pop_input_char(&mut self) {
        if let InputState::Value(buffer) = &mut self.input {
            buffer.pop();
        }
    }

    /// Parse the pending input into an answer, if there is one.
    ///
    /// A decimal comma is read as a decimal point.
    pub fn current_answer(&self) -> Option<Answer> {
        match &self.input {
            InputState::Choice(selected) => selected.map(Answer::Choice),
            InputState::Value(buffer) => buffer
                .replace(',', ".")
                .parse::<f64>()
                .ok()
                .map(Answer::Value),
        }
    }

    /// Handle the confirm key: grade while presenting, move on while
    /// locked, hop to the next open topic when this one is done.
    pub fn confirm(&mut self) -> io::Result<()> {
        match self.active_session().phase() {
            Phase::Presenting => self.submit_answer(),
            Phase::Locked { .. } => {
                self.advance();
                Ok(())
            }
            Phase::Finished => {
                self.focus_next_unfinished();
                Ok(())
            }
        }
    }

    fn submit_answer(&mut self) -> io::Result<()> {
        let answer = self.current_answer();
        let outcome = self.sessions[self.active].submit(answer);

        match outcome {
            SubmitOutcome::Graded { correct, feedback } => {
                let topic_id = self.sessions[self.active].topic_id().to_string();
                self.records = self.store.record(&topic_id, correct)?;
                self.overall = aggregate(&self.records);
                self.feedback = Some(Feedback {
                    text: feedback,
                    tone: if correct { Tone::Good } else { Tone::Bad },
                });
            }
            SubmitOutcome::Invalid { message } => {
                self.feedback = Some(Feedback {
                    text: message.to_string(),
                    tone: Tone::Info,
                });
            }
            SubmitOutcome::Ignored => {}
        }
        Ok(())
    }

    fn advance(&mut self) {
        match self.sessions[self.active].advance() {
            AdvanceOutcome::Next => {
                self.feedback = None;
                self.reset_input();
            }
            AdvanceOutcome::Finished { correct, answered } => {
                self.feedback = Some(Feedback {
                    text: format!("Fertig! In diesem Block: {}/{} richtig.", correct, answered),
                    tone: Tone::Good,
                });
                if self.all_finished() {
                    self.state = AppState::Summary;
                }
            }
            AdvanceOutcome::Ignored => {}
        }
    }

    fn focus_next_unfinished(&mut self) {
        if self.all_finished() {
            self.state = AppState::Summary;
            return;
        }
        let len = self.sessions.len();
        for offset in 1..=len {
            let index = (self.active + offset) % len;
            if !self.sessions[index].is_finished() {
                self.focus_topic(index);
                return;
            }
        }
    }

    pub fn all_finished(&self) -> bool {
        self.sessions.iter().all(QuizSession::is_finished)
    }

    /// Draw fresh random samples for every topic, keeping the persisted
    /// progress counters.
    pub fn new_round(&mut self) {
        self.sessions = start_sessions(&self.topics, self.sample_size, &mut self.rng);
        self.active = 0;
        self.feedback = None;
        self.state = AppState::Quiz;
        self.reset_input();
    }

    /// Clear all persisted progress and reinitialize every session.
    ///
    /// The only destructive operation; triggered explicitly by the
    /// learner.
    pub fn reset(&mut self) -> io::Result<()> {
        self.store.clear()?;
        self.records = ProgressMap::new();
        self.overall = aggregate(&self.records);
        self.new_round();
        self.feedback = Some(Feedback {
            text: "Fortschritt gelöscht – neue Zufallsfragen.".to_string(),
            tone: Tone::Info,
        });
        Ok(())
    }

    fn reset_input(&mut self) {
        self.input = match self.active_session().current_question() {
            Some(Question::Numeric { .. }) => InputState::Value(String::new()),
            _ => InputState::Choice(None),
        };
    }
}

fn start_sessions(topics: &[Topic], sample_size: usize, rng: &mut StdRng) -> Vec<QuizSession> {
    topics
        .iter()
        .map(|topic| QuizSession::start(topic, sample_size, rng))
        .collect()
}
