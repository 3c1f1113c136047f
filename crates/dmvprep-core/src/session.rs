//! The session state machine.
//!
//! Sequences Welcome, Loading, Quiz, Results, with Error as a recoverable
//! branch. All transitions happen on the caller's thread in response to
//! discrete user actions or the completion of the one in-flight generation
//! call; the session itself is fully transient and rebuilt each run.

use crate::demo::demo_quiz;
use crate::error::GenerateError;
use crate::model::{QuizData, UserAnswers};

/// Screens of the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Welcome,
    Loading,
    Quiz,
    Results,
    Error,
}

/// Fallback message when a generation failure carries no text.
const GENERIC_FAILURE: &str =
    "We encountered an issue crafting your unique exam. Please try again.";

/// Message shown for any authentication-shaped failure.
const AUTH_FAILURE: &str = "Authentication Failed: Please re-select your Google API Key.";

/// Handed out by [`Session::begin_loading`]. A result delivered with a
/// stale token is discarded, so a late response to an abandoned request
/// cannot resurrect an old quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// In-progress quiz session.
#[derive(Debug)]
pub struct Session {
    phase: Phase,
    quiz: Option<QuizData>,
    answers: UserAnswers,
    error: Option<String>,
    generation: u64,
}

impl Session {
    pub fn new() -> Self {
        Self {
            phase: Phase::Welcome,
            quiz: None,
            answers: UserAnswers::new(),
            error: None,
            generation: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn quiz(&self) -> Option<&QuizData> {
        self.quiz.as_ref()
    }

    pub fn answers(&self) -> &UserAnswers {
        &self.answers
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Welcome|Error -> Loading, clearing the prior error, answers, and
    /// quiz. Returns the token the eventual generation outcome must
    /// present; `None` when the transition is not available.
    pub fn begin_loading(&mut self) -> Option<LoadToken> {
        if !matches!(self.phase, Phase::Welcome | Phase::Error) {
            return None;
        }
        self.phase = Phase::Loading;
        self.error = None;
        self.answers.clear();
        self.quiz = None;
        self.generation += 1;
        Some(LoadToken(self.generation))
    }

    /// Deliver the generation outcome. Outcomes arriving outside Loading or
    /// carrying a superseded token are silently discarded.
    pub fn finish_loading(&mut self, token: LoadToken, outcome: Result<QuizData, GenerateError>) {
        if self.phase != Phase::Loading || token.0 != self.generation {
            return;
        }
        match outcome {
            Ok(quiz) => {
                self.quiz = Some(quiz);
                self.phase = Phase::Quiz;
            }
            Err(e) => {
                self.error = Some(normalize_failure(&e));
                self.phase = Phase::Error;
            }
        }
    }

    /// Switch to the built-in quiz, from any phase. Keeps the flow usable
    /// when the remote generator is unreachable.
    pub fn load_demo(&mut self) {
        // Orphan any in-flight generation so its late result is dropped.
        self.generation += 1;
        self.quiz = Some(demo_quiz());
        self.answers.clear();
        self.error = None;
        self.phase = Phase::Quiz;
    }

    /// Record an answer. Quiz phase only; the first answer for a question
    /// is final. Does not transition.
    pub fn answer(&mut self, question_id: &str, option: &str) {
        if self.phase != Phase::Quiz {
            return;
        }
        self.answers
            .entry(question_id.to_string())
            .or_insert_with(|| option.to_string());
    }

    /// Quiz -> Results, capturing the final answer map.
    pub fn complete(&mut self, answers: UserAnswers) {
        if self.phase != Phase::Quiz {
            return;
        }
        self.answers = answers;
        self.phase = Phase::Results;
    }

    /// Results -> Welcome. Quiz data and answers are dropped; the seen-
    /// question history is not touched.
    pub fn retry(&mut self) {
        if self.phase != Phase::Results {
            return;
        }
        self.quiz = None;
        self.answers.clear();
        self.phase = Phase::Welcome;
    }

    /// Error -> Welcome, discarding the error.
    pub fn back_to_welcome(&mut self) {
        if self.phase != Phase::Error {
            return;
        }
        self.error = None;
        self.phase = Phase::Welcome;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a generation failure to the user-visible message.
///
/// Authentication-shaped failures are rewritten to one fixed remediation
/// string no matter which layer produced the wording; everything else
/// passes through verbatim.
fn normalize_failure(err: &GenerateError) -> String {
    if matches!(err, GenerateError::AuthenticationFailed) {
        return AUTH_FAILURE.to_string();
    }
    let msg = err.to_string();
    if msg.trim().is_empty() {
        return GENERIC_FAILURE.to_string();
    }
    const AUTH_MARKERS: [&str; 4] = [
        "401",
        "UNAUTHENTICATED",
        "CREDENTIALS_MISSING",
        "Authentication failed",
    ];
    if AUTH_MARKERS.iter().any(|m| msg.contains(m)) {
        AUTH_FAILURE.to_string()
    } else {
        msg
    }
}

/// Whether an error message should surface the host key-selection hint.
pub fn is_auth_message(message: &str) -> bool {
    message.contains("Authentication") || message.contains("API Key")
}
