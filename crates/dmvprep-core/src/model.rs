//! Core data model types for dmvprep.
//!
//! These are the fundamental types the whole system uses to represent a
//! quiz request, the generated quiz, and the user's answers. Field names
//! serialize in camelCase to match the schema declared to the generator.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Difficulty requested for a whole quiz.
///
/// `Mix` is a config-level value only; individual questions always carry a
/// concrete [`QuestionDifficulty`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Mix,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Medium => write!(f, "medium"),
            Difficulty::Hard => write!(f, "hard"),
            Difficulty::Mix => write!(f, "mix"),
        }
    }
}

impl FromStr for Difficulty {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "mix" => Ok(Difficulty::Mix),
            other => Err(format!("unknown difficulty: {other}")),
        }
    }
}

/// Difficulty of a single generated question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionDifficulty {
    Easy,
    Medium,
    Hard,
}

impl fmt::Display for QuestionDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionDifficulty::Easy => write!(f, "easy"),
            QuestionDifficulty::Medium => write!(f, "medium"),
            QuestionDifficulty::Hard => write!(f, "hard"),
        }
    }
}

/// How questions should be phrased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Scenario,
    Straightforward,
    Mixed,
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Style::Scenario => write!(f, "scenario"),
            Style::Straightforward => write!(f, "straightforward"),
            Style::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "scenario" => Ok(Style::Scenario),
            "straightforward" => Ok(Style::Straightforward),
            "mixed" => Ok(Style::Mixed),
            other => Err(format!("unknown style: {other}")),
        }
    }
}

/// Handbook topic the quiz should concentrate on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Focus {
    Mix,
    /// Math oriented.
    Numeric,
    /// Rules for drivers under 21.
    Minors,
    /// Alcohol and drugs.
    Dui,
    /// Signs and signals.
    Signs,
    /// Penalties and fines.
    Fines,
}

impl fmt::Display for Focus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Focus::Mix => write!(f, "mix"),
            Focus::Numeric => write!(f, "numeric"),
            Focus::Minors => write!(f, "minors"),
            Focus::Dui => write!(f, "dui"),
            Focus::Signs => write!(f, "signs"),
            Focus::Fines => write!(f, "fines"),
        }
    }
}

impl FromStr for Focus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mix" => Ok(Focus::Mix),
            "numeric" => Ok(Focus::Numeric),
            "minors" => Ok(Focus::Minors),
            "dui" => Ok(Focus::Dui),
            "signs" => Ok(Focus::Signs),
            "fines" => Ok(Focus::Fines),
            other => Err(format!("unknown focus: {other}")),
        }
    }
}

/// The four user-chosen parameters that shape one generation request.
///
/// Immutable once submitted; consumed by a single generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizConfig {
    pub difficulty: Difficulty,
    pub style: Style,
    pub focus: Focus,
    pub question_count: u32,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Mix,
            style: Style::Mixed,
            focus: Focus::Mix,
            question_count: 10,
        }
    }
}

/// A single multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    /// Unique within one [`QuizData`], not across sessions.
    pub question_id: String,
    pub difficulty: QuestionDifficulty,
    pub question: String,
    /// Presentation order of the choices.
    pub options: Vec<String>,
    /// Expected to equal exactly one element of `options`; the generator is
    /// trusted, not verified (see [`QuizData::lint`]).
    pub correct_answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_image_url: Option<String>,
    /// When present, index i pairs with option i.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option_image_urls: Option<Vec<String>>,
}

/// One generated quiz, in presentation order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizData {
    pub quiz_title: String,
    /// Declared count; should match `questions.len()` but is not enforced.
    pub total_questions: u32,
    pub questions: Vec<Question>,
}

impl QuizData {
    /// Advisory check of the invariants the remote generator is trusted to
    /// uphold. Violations are reported as warnings, never rejected.
    pub fn lint(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.total_questions as usize != self.questions.len() {
            warnings.push(format!(
                "declared {} questions but {} were returned",
                self.total_questions,
                self.questions.len()
            ));
        }

        let mut seen_ids = HashSet::new();
        for q in &self.questions {
            if !seen_ids.insert(q.question_id.as_str()) {
                warnings.push(format!("duplicate question id: {}", q.question_id));
            }
            if !q.options.contains(&q.correct_answer) {
                warnings.push(format!(
                    "question {}: correct answer is not among the options",
                    q.question_id
                ));
            }
            if let Some(urls) = &q.option_image_urls {
                if urls.len() != q.options.len() {
                    warnings.push(format!(
                        "question {}: {} option images for {} options",
                        q.question_id,
                        urls.len(),
                        q.options.len()
                    ));
                }
            }
        }

        warnings
    }
}

/// Question id to the single selected option. Absence means unanswered;
/// the first recorded answer is final.
pub type UserAnswers = HashMap<String, String>;
