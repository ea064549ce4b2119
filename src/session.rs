//! Per-topic quiz run: random sample, one question at a time, grading.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::{Answer, Question, Topic};

/// Validation message shown when submitting without a usable answer.
pub const MSG_PICK_ANSWER: &str = "Bitte erst eine Antwort auswählen/eingeben.";

/// Where a session currently is within its sampled questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for an answer to the current question.
    Presenting,
    /// Current question has been graded; answer can no longer change.
    Locked { correct: bool },
    /// All sampled questions are done; input is disabled.
    Finished,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The answer was graded and counted.
    Graded { correct: bool, feedback: String },
    /// No usable answer; nothing changed.
    Invalid { message: &'static str },
    /// Submit is not valid in the current phase; nothing changed.
    Ignored,
}

/// Result of moving past a graded question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to the next question.
    Next,
    /// The session is over; session-local tally.
    Finished { correct: u32, answered: u32 },
    /// Advance is not valid in the current phase; nothing changed.
    Ignored,
}

/// One quiz run over a random sample of a topic's pool.
///
/// Sessions are in-memory only; only the per-topic counters in the
/// progress store survive a restart.
pub struct QuizSession {
    topic_id: String,
    title: String,
    questions: Vec<Question>,
    current: usize,
    phase: Phase,
    answered: u32,
    correct: u32,
}

impl QuizSession {
    /// Start a session: uniform shuffle of the pool, truncated to
    /// `sample_size` questions.
    pub fn start<R: Rng + ?Sized>(topic: &Topic, sample_size: usize, rng: &mut R) -> Self {
        let mut questions = topic.questions.clone();
        questions.shuffle(rng);
        questions.truncate(sample_size);

        let phase = if questions.is_empty() {
            Phase::Finished
        } else {
            Phase::Presenting
        };

        Self {
            topic_id: topic.id.clone(),
            title: topic.title.clone(),
            questions,
            current: 0,
            phase,
            answered: 0,
            correct: 0,
        }
    }

    pub fn topic_id(&self) -> &str {
        &self.topic_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.phase, Phase::Locked { .. })
    }

    /// 1-based position within the sample, and the sample length.
    pub fn position(&self) -> (usize, usize) {
        (self.current + 1, self.questions.len())
    }

    /// Session-local (correct, answered) tally.
    pub fn tally(&self) -> (u32, u32) {
        (self.correct, self.answered)
    }

    pub fn current_question(&self) -> Option<&Question> {
        if self.is_finished() {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    #[cfg(test)]
    fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Grade an answer for the current question.
    ///
    /// Only valid while presenting; a graded question stays graded, so a
    /// second submit is ignored. A missing, mistyped, or out-of-range
    /// answer yields a validation message and changes nothing.
    pub fn submit(&mut self, answer: Option<Answer>) -> SubmitOutcome {
        if self.phase != Phase::Presenting {
            return SubmitOutcome::Ignored;
        }

        let Some(answer) = answer else {
            return SubmitOutcome::Invalid {
                message: MSG_PICK_ANSWER,
            };
        };

        let question = &self.questions[self.current];
        let correct = match (question, answer) {
            (
                Question::MultipleChoice {
                    options, correct, ..
                },
                Answer::Choice(chosen),
            ) => {
                if chosen >= options.len() {
                    return SubmitOutcome::Invalid {
                        message: MSG_PICK_ANSWER,
                    };
                }
                chosen == *correct
            }
            (Question::Numeric { answer: expected, tol, .. }, Answer::Value(value)) => {
                (value - expected).abs() <= *tol
            }
            _ => {
                return SubmitOutcome::Invalid {
                    message: MSG_PICK_ANSWER,
                }
            }
        };

        self.answered += 1;
        if correct {
            self.correct += 1;
        }
        self.phase = Phase::Locked { correct };

        let feedback = if correct {
            format!("Richtig. {}", question.explain())
        } else {
            format!("Nicht ganz. {}", question.explain())
        };

        SubmitOutcome::Graded { correct, feedback }
    }

    /// Move past a graded question, finishing the session after the last
    /// one. Only valid while locked.
    pub fn advance(&mut self) -> AdvanceOutcome {
        if !self.is_locked() {
            return AdvanceOutcome::Ignored;
        }

        if self.current + 1 < self.questions.len() {
            self.current += 1;
            self.phase = Phase::Presenting;
            AdvanceOutcome::Next
        } else {
            self.phase = Phase::Finished;
            AdvanceOutcome::Finished {
                correct: self.correct,
                answered: self.answered,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::models::DEFAULT_TOLERANCE;

    fn mc(text: &str, options: &[&str], correct: usize) -> Question {
        Question::MultipleChoice {
            text: text.to_string(),
            options: options.iter().map(|s| s.to_string()).collect(),
            correct,
            explain: "Erklärung.".to_string(),
        }
    }

    fn num(text: &str, answer: f64, tol: f64) -> Question {
        Question::Numeric {
            text: text.to_string(),
            unit: Some("K".to_string()),
            answer,
            tol,
            explain: "Erklärung.".to_string(),
        }
    }

    fn topic(id: &str, questions: Vec<Question>) -> Topic {
        Topic {
            id: id.to_string(),
            title: id.to_string(),
            questions,
        }
    }

    fn numbered_topic(pool_size: usize) -> Topic {
        let questions = (0..pool_size)
            .map(|i| mc(&format!("q{i}"), &["a", "b"], 0))
            .collect();
        topic("t", questions)
    }

    #[test]
    fn test_sample_is_distinct_and_capped() {
        let topic = numbered_topic(8);
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let session = QuizSession::start(&topic, 5, &mut rng);

            let texts: HashSet<&str> =
                session.questions().iter().map(|q| q.text()).collect();
            assert_eq!(texts.len(), 5);
        }
    }

    #[test]
    fn test_sample_never_exceeds_pool() {
        let topic = numbered_topic(3);
        let mut rng = StdRng::seed_from_u64(1);
        let session = QuizSession::start(&topic, 5, &mut rng);
        assert_eq!(session.position(), (1, 3));
    }

    #[test]
    fn test_sampling_covers_the_whole_pool_over_many_runs() {
        // Distributional check: with a uniform shuffle, every pool
        // question must show up in some sample eventually.
        let topic = numbered_topic(8);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen: HashSet<String> = HashSet::new();

        for _ in 0..200 {
            let session = QuizSession::start(&topic, 5, &mut rng);
            seen.extend(session.questions().iter().map(|q| q.text().to_string()));
        }

        assert_eq!(seen.len(), 8);
    }

    #[test]
    fn test_mc_grading_by_index() {
        let topic = topic("t", vec![mc("q", &["a", "b", "c"], 1)]);

        for (chosen, expected) in [(0, false), (1, true), (2, false)] {
            let mut rng = StdRng::seed_from_u64(0);
            let mut session = QuizSession::start(&topic, 5, &mut rng);
            match session.submit(Some(Answer::Choice(chosen))) {
                SubmitOutcome::Graded { correct, .. } => assert_eq!(correct, expected),
                other => panic!("expected graded outcome, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_numeric_grading_within_tolerance() {
        // The 25°C-in-Kelvin question from the skalen pool.
        let topic = topic("skalen", vec![num("Wie viel Kelvin sind 25°C?", 298.15, 0.2)]);

        let cases = [
            (298.15, true),
            (298.1, true),
            (298.35, true),
            (297.5, false),
            (298.15 + 0.2 + 1e-6, false),
        ];
        for (input, expected) in cases {
            let mut rng = StdRng::seed_from_u64(0);
            let mut session = QuizSession::start(&topic, 5, &mut rng);
            match session.submit(Some(Answer::Value(input))) {
                SubmitOutcome::Graded { correct, .. } => {
                    assert_eq!(correct, expected, "input {}", input)
                }
                other => panic!("expected graded outcome, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_default_tolerance_applies() {
        let json = r#"{"type":"num","text":"q","answer":10.0,"explain":"."}"#;
        let question: Question = serde_json::from_str(json).unwrap();
        let topic = topic("t", vec![question]);

        let mut rng = StdRng::seed_from_u64(0);
        let mut session = QuizSession::start(&topic, 5, &mut rng);
        match session.submit(Some(Answer::Value(10.0 + DEFAULT_TOLERANCE))) {
            SubmitOutcome::Graded { correct, .. } => assert!(correct),
            other => panic!("expected graded outcome, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_answer_is_validation_not_grading() {
        let topic = topic("t", vec![mc("q", &["a", "b"], 0)]);
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = QuizSession::start(&topic, 5, &mut rng);

        assert_eq!(
            session.submit(None),
            SubmitOutcome::Invalid {
                message: MSG_PICK_ANSWER
            }
        );
        assert_eq!(session.phase(), Phase::Presenting);
        assert_eq!(session.tally(), (0, 0));
    }

    #[test]
    fn test_out_of_range_choice_is_validation() {
        let topic = topic("t", vec![mc("q", &["a", "b"], 0)]);
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = QuizSession::start(&topic, 5, &mut rng);

        assert!(matches!(
            session.submit(Some(Answer::Choice(2))),
            SubmitOutcome::Invalid { .. }
        ));
        assert_eq!(session.phase(), Phase::Presenting);
    }

    #[test]
    fn test_submit_while_locked_is_ignored() {
        let topic = topic("t", vec![mc("q", &["a", "b"], 0)]);
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = QuizSession::start(&topic, 5, &mut rng);

        session.submit(Some(Answer::Choice(0)));
        assert_eq!(session.tally(), (1, 1));

        // Answers cannot change after grading: at most one grading
        // event per question.
        assert_eq!(session.submit(Some(Answer::Choice(1))), SubmitOutcome::Ignored);
        assert_eq!(session.tally(), (1, 1));
        assert_eq!(session.phase(), Phase::Locked { correct: true });
    }

    #[test]
    fn test_advance_walks_to_finished_with_session_tally() {
        let topic = topic(
            "t",
            vec![mc("q0", &["a", "b"], 0), mc("q1", &["a", "b"], 1)],
        );
        let mut rng = StdRng::seed_from_u64(0);
        let mut session = QuizSession::start(&topic, 2, &mut rng);

        // Advance before grading is a no-op.
        assert_eq!(session.advance(), AdvanceOutcome::Ignored);

        session.submit(Some(Answer::Choice(0)));
        assert_eq!(session.advance(), AdvanceOutcome::Next);
        assert_eq!(session.position(), (2, 2));

        session.submit(Some(Answer::Choice(0)));
        let (correct, answered) = match session.advance() {
            AdvanceOutcome::Finished { correct, answered } => (correct, answered),
            other => panic!("expected finished, got {:?}", other),
        };
        // Choice 0 is right for q0 and wrong for q1, whatever the
        // shuffle order.
        assert_eq!(answered, 2);
        assert_eq!(correct, 1);

        assert!(session.is_finished());
        assert!(session.current_question().is_none());
        assert_eq!(session.submit(Some(Answer::Choice(0))), SubmitOutcome::Ignored);
        assert_eq!(session.advance(), AdvanceOutcome::Ignored);
    }
}
