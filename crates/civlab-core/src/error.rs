//! Error types for the quiz engine and the banding functions.
//!
//! Rejected quiz transitions are reported as values rather than panics so
//! that a front end can log and ignore them. None of them change state.

use thiserror::Error;

/// Errors returned by [`Quiz`](crate::quiz::Quiz) transitions and by
/// [`Question`](crate::model::Question) construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuizError {
    /// The option index is outside the current question's options.
    #[error("option {index} is out of range for a question with {option_count} options")]
    InvalidSelection { index: usize, option_count: usize },

    /// `advance` was called with no pending selection.
    #[error("cannot advance without a selected answer")]
    PrematureAdvance,

    /// The quiz has reached its result state; only `restart` is accepted.
    #[error("quiz is already completed")]
    AlreadyCompleted,

    /// A quiz needs at least one question.
    #[error("quiz has no questions")]
    EmptyQuiz,

    /// A question violates its construction invariants.
    #[error("invalid question: {0}")]
    InvalidQuestion(String),
}

impl QuizError {
    /// Returns `true` for rejected calls that are harmless no-ops, typically
    /// triggered by rapid input rather than by miswired callers.
    pub fn is_benign(&self) -> bool {
        matches!(self, QuizError::PrematureAdvance | QuizError::AlreadyCompleted)
    }
}

/// Errors from the banding lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BandError {
    /// No banding table is registered under this identifier.
    #[error("unknown domain: {0}")]
    UnknownDomain(String),
}
