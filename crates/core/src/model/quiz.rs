use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{QuestionId, QuizId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizStateError {
    #[error("quiz answers were already submitted")]
    AlreadySubmitted,

    #[error("{} question(s) still unanswered", .missing.len())]
    Incomplete { missing: Vec<QuestionId> },
}

//
// ─── DEFINITION ────────────────────────────────────────────────────────────────
//

/// How a question's options may be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestionKind {
    Single,
    Multiple,
}

impl QuestionKind {
    /// Map the backend's `question_type` string.
    #[must_use]
    pub fn from_question_type(raw: &str) -> Self {
        match raw {
            "multiple_select" | "multi_choice" | "multiple_answer" | "checkbox" => {
                Self::Multiple
            }
            _ => Self::Single,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub text: String,
}

/// A question as rendered in the quiz form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    pub id: QuestionId,
    pub text: String,
    pub kind: QuestionKind,
    pub options: Vec<QuestionOption>,
}

/// Everything needed to render a quiz form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizDefinition {
    pub id: QuizId,
    pub title: String,
    pub passing_score: Option<u32>,
    pub max_attempts: Option<u32>,
    pub questions: Vec<QuizQuestion>,
}

impl QuizDefinition {
    pub fn question_ids(&self) -> impl Iterator<Item = &QuestionId> {
        self.questions.iter().map(|q| &q.id)
    }

    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&QuizQuestion> {
        self.questions.iter().find(|q| &q.id == id)
    }
}

//
// ─── ANSWERS ───────────────────────────────────────────────────────────────────
//

/// A recorded answer: one value, or a set of values for multi-select questions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Single(String),
    Multi(BTreeSet<String>),
}

impl Answer {
    /// An emptied multi-select set does not count as an answer.
    #[must_use]
    pub fn is_answered(&self) -> bool {
        match self {
            Answer::Single(_) => true,
            Answer::Multi(values) => !values.is_empty(),
        }
    }

    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        match self {
            Answer::Single(current) => current == value,
            Answer::Multi(values) => values.contains(value),
        }
    }
}

/// Selection semantics of the control that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Single,
    Multi { checked: bool },
}

/// Client-held answers for one quiz attempt.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuizState {
    answers: BTreeMap<QuestionId, Answer>,
    submitted: bool,
}

impl QuizState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn answers(&self) -> &BTreeMap<QuestionId, Answer> {
        &self.answers
    }

    #[must_use]
    pub fn answer(&self, id: &QuestionId) -> Option<&Answer> {
        self.answers.get(id)
    }

    #[must_use]
    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Record a control change.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::AlreadySubmitted` once the attempt is submitted.
    pub fn record(
        &mut self,
        question_id: QuestionId,
        value: impl Into<String>,
        selection: Selection,
    ) -> Result<(), QuizStateError> {
        if self.submitted {
            return Err(QuizStateError::AlreadySubmitted);
        }
        let value = value.into();
        match selection {
            Selection::Single => {
                self.answers.insert(question_id, Answer::Single(value));
            }
            Selection::Multi { checked } => {
                let entry = self
                    .answers
                    .entry(question_id)
                    .or_insert_with(|| Answer::Multi(BTreeSet::new()));
                // A question that switched kind starts over as a set.
                if let Answer::Single(_) = entry {
                    *entry = Answer::Multi(BTreeSet::new());
                }
                if let Answer::Multi(values) = entry {
                    if checked {
                        values.insert(value);
                    } else {
                        values.remove(&value);
                    }
                }
            }
        }
        Ok(())
    }

    /// Questions from `expected` without a usable answer, in the given order.
    #[must_use]
    pub fn unanswered<'a>(
        &self,
        expected: impl IntoIterator<Item = &'a QuestionId>,
    ) -> Vec<QuestionId> {
        expected
            .into_iter()
            .filter(|id| !self.answers.get(*id).is_some_and(Answer::is_answered))
            .cloned()
            .collect()
    }

    /// Check completeness against the rendered questions.
    ///
    /// # Errors
    ///
    /// Returns `QuizStateError::Incomplete` listing unanswered questions, or
    /// `QuizStateError::AlreadySubmitted`.
    pub fn ensure_complete<'a>(
        &self,
        expected: impl IntoIterator<Item = &'a QuestionId>,
    ) -> Result<(), QuizStateError> {
        if self.submitted {
            return Err(QuizStateError::AlreadySubmitted);
        }
        let missing = self.unanswered(expected);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(QuizStateError::Incomplete { missing })
        }
    }

    /// Snapshot of the answers as the submit request body.
    #[must_use]
    pub fn submission(&self) -> QuizSubmission {
        QuizSubmission {
            answers: self.answers.clone(),
        }
    }

    pub fn mark_submitted(&mut self) {
        self.submitted = true;
    }
}

/// Body of the quiz submit request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSubmission {
    pub answers: BTreeMap<QuestionId, Answer>,
}

//
// ─── RESULTS ───────────────────────────────────────────────────────────────────
//

/// Server-side grading of one question.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionResult {
    #[serde(default)]
    pub question_id: Option<u64>,
    pub is_correct: bool,
    #[serde(default)]
    pub points: Option<u32>,
    #[serde(default)]
    pub explanation: Option<String>,
}

/// Graded outcome of a quiz attempt.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuizResult {
    pub score: f64,
    pub passed: bool,
    #[serde(default)]
    pub results: Vec<QuestionResult>,
    #[serde(default)]
    pub attempts_left: i64,
    #[serde(default)]
    pub total_points: Option<u32>,
    #[serde(default)]
    pub earned_points: Option<u32>,
}

impl QuizResult {
    /// Remaining attempts, only when some are left.
    #[must_use]
    pub fn attempts_remaining(&self) -> Option<u32> {
        u32::try_from(self.attempts_left).ok().filter(|left| *left > 0)
    }

    #[must_use]
    pub fn correct_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_correct).count()
    }
}
