//! The quiz engine.
//!
//! A [`Quiz`] walks forward through a borrowed slice of questions. The caller
//! picks an option with [`Quiz::select_answer`], moves on with
//! [`Quiz::advance`] and can start over at any time with [`Quiz::restart`].
//! Each question contributes at most one point, no matter how often it is
//! replayed.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::QuizError;
use crate::model::Question;

/// Callbacks fired after each accepted transition.
///
/// Front ends register an observer to redraw instead of polling the quiz.
/// Rejected calls never notify.
pub trait QuizObserver {
    fn on_select(&self, question: usize, option: usize, correct: bool);
    fn on_advance(&self, from: usize, to: usize);
    fn on_complete(&self, summary: &QuizSummary);
    fn on_restart(&self);
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl QuizObserver for NoopObserver {
    fn on_select(&self, _: usize, _: usize, _: bool) {}
    fn on_advance(&self, _: usize, _: usize) {}
    fn on_complete(&self, _: &QuizSummary) {}
    fn on_restart(&self) {}
}

/// Externally visible state of a quiz.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    InProgress {
        index: usize,
        selected: Option<usize>,
        score: usize,
    },
    Completed {
        score: usize,
        total: usize,
    },
}

/// Result of a successful [`Quiz::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Moved on to the question at `index`.
    Next { index: usize },
    /// The last question was answered.
    Finished { score: usize, total: usize },
}

/// Feedback for the pending selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feedback<'q> {
    pub correct: bool,
    pub correct_option: usize,
    pub explanation: &'q str,
}

/// Serializable snapshot of a quiz result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizSummary {
    pub score: usize,
    pub total: usize,
    pub percentage: u32,
    pub completed: bool,
}

/// A single quiz attempt over a fixed set of questions.
pub struct Quiz<'q> {
    questions: &'q [Question],
    current: usize,
    selected: Option<usize>,
    answered: BTreeSet<usize>,
    completed: bool,
    observers: Vec<Box<dyn QuizObserver + 'q>>,
}

impl<'q> Quiz<'q> {
    /// Start a quiz at the first question.
    pub fn new(questions: &'q [Question]) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptyQuiz);
        }
        Ok(Self {
            questions,
            current: 0,
            selected: None,
            answered: BTreeSet::new(),
            completed: false,
            observers: Vec::new(),
        })
    }

    /// Register an observer that is notified after every accepted transition.
    pub fn subscribe(&mut self, observer: Box<dyn QuizObserver + 'q>) {
        self.observers.push(observer);
    }

    /// Set the pending answer for the current question.
    ///
    /// Replaces any earlier pending answer. Does not move or score.
    pub fn select_answer(&mut self, option: usize) -> Result<(), QuizError> {
        if self.completed {
            tracing::debug!(option, "selection ignored, quiz completed");
            return Err(QuizError::AlreadyCompleted);
        }
        let question = self.current_question();
        if option >= question.option_count() {
            return Err(QuizError::InvalidSelection {
                index: option,
                option_count: question.option_count(),
            });
        }

        self.selected = Some(option);
        let correct = question.is_correct(option);
        tracing::debug!(question = self.current, option, correct, "answer selected");
        for observer in &self.observers {
            observer.on_select(self.current, option, correct);
        }
        Ok(())
    }

    /// Score the pending answer and move to the next question, or finish.
    ///
    /// With no pending answer this is rejected with
    /// [`QuizError::PrematureAdvance`] and nothing changes.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        if self.completed {
            return Err(QuizError::AlreadyCompleted);
        }
        let Some(selected) = self.selected else {
            tracing::debug!(question = self.current, "advance ignored, nothing selected");
            return Err(QuizError::PrematureAdvance);
        };

        if self.current_question().is_correct(selected) && self.answered.insert(self.current) {
            tracing::debug!(question = self.current, score = self.score(), "point scored");
        }

        if self.is_last_question() {
            // The selection stays so the last feedback can still be rendered.
            self.completed = true;
            let summary = self.summary();
            tracing::debug!(score = summary.score, total = summary.total, "quiz completed");
            for observer in &self.observers {
                observer.on_complete(&summary);
            }
            return Ok(Advance::Finished {
                score: summary.score,
                total: summary.total,
            });
        }

        let from = self.current;
        self.current += 1;
        self.selected = None;
        tracing::debug!(from, to = self.current, "advanced");
        for observer in &self.observers {
            observer.on_advance(from, self.current);
        }
        Ok(Advance::Next {
            index: self.current,
        })
    }

    /// Discard the attempt and go back to the first question.
    pub fn restart(&mut self) {
        self.current = 0;
        self.selected = None;
        self.answered.clear();
        self.completed = false;
        tracing::debug!("quiz restarted");
        for observer in &self.observers {
            observer.on_restart();
        }
    }

    pub fn questions(&self) -> &'q [Question] {
        self.questions
    }

    pub fn current_question(&self) -> &'q Question {
        let questions: &'q [Question] = self.questions;
        &questions[self.current]
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn selected_option(&self) -> Option<usize> {
        self.selected
    }

    /// Number of distinct questions answered correctly.
    pub fn score(&self) -> usize {
        self.answered.len()
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn is_last_question(&self) -> bool {
        self.current + 1 == self.questions.len()
    }

    pub fn phase(&self) -> QuizPhase {
        if self.completed {
            QuizPhase::Completed {
                score: self.score(),
                total: self.total(),
            }
        } else {
            QuizPhase::InProgress {
                index: self.current,
                selected: self.selected,
                score: self.score(),
            }
        }
    }

    /// Fraction of questions already passed, for a progress bar.
    pub fn percent_complete(&self) -> f64 {
        self.current as f64 / self.total() as f64
    }

    /// Score as a rounded percentage. Only meaningful once completed.
    pub fn final_percentage(&self) -> u32 {
        (self.score() as f64 / self.total() as f64 * 100.0).round() as u32
    }

    /// Correctness and explanation for the pending selection, if any.
    pub fn feedback(&self) -> Option<Feedback<'q>> {
        let question = self.current_question();
        self.selected.map(|option| Feedback {
            correct: question.is_correct(option),
            correct_option: question.correct_option(),
            explanation: question.explanation(),
        })
    }

    pub fn summary(&self) -> QuizSummary {
        QuizSummary {
            score: self.score(),
            total: self.total(),
            percentage: self.final_percentage(),
            completed: self.completed,
        }
    }
}
