//! Core content types for civlab.
//!
//! Questions are grouped into banks, and each bank belongs to one
//! engineering discipline.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::QuizError;

/// A single multiple-choice question.
///
/// Fields are private so the option/answer invariants established by
/// [`Question::new`] cannot be broken afterwards.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_option: usize,
    explanation: String,
}

impl Question {
    /// Build a question, checking that it has at least two options and that
    /// `correct_option` indexes one of them.
    pub fn new(
        text: impl Into<String>,
        options: Vec<String>,
        correct_option: usize,
        explanation: impl Into<String>,
    ) -> Result<Self, QuizError> {
        let text = text.into();
        if options.len() < 2 {
            return Err(QuizError::InvalidQuestion(format!(
                "'{text}' has {} option(s), at least 2 are required",
                options.len()
            )));
        }
        if correct_option >= options.len() {
            return Err(QuizError::InvalidQuestion(format!(
                "'{text}' marks option {correct_option} as correct but has only {} options",
                options.len()
            )));
        }
        Ok(Self {
            text,
            options,
            correct_option,
            explanation: explanation.into(),
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    pub fn correct_option(&self) -> usize {
        self.correct_option
    }

    /// Explanation shown once an answer has been picked.
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    pub fn is_correct(&self, option: usize) -> bool {
        option == self.correct_option
    }
}

/// Engineering disciplines covered by the learning material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Discipline {
    Structural,
    Geotechnical,
    Transportation,
    Environmental,
    Surveying,
}

impl Discipline {
    pub const ALL: [Discipline; 5] = [
        Discipline::Structural,
        Discipline::Geotechnical,
        Discipline::Transportation,
        Discipline::Environmental,
        Discipline::Surveying,
    ];
}

impl fmt::Display for Discipline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Discipline::Structural => write!(f, "structural"),
            Discipline::Geotechnical => write!(f, "geotechnical"),
            Discipline::Transportation => write!(f, "transportation"),
            Discipline::Environmental => write!(f, "environmental"),
            Discipline::Surveying => write!(f, "surveying"),
        }
    }
}

impl FromStr for Discipline {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "structural" | "struct" => Ok(Discipline::Structural),
            "geotechnical" | "geo" => Ok(Discipline::Geotechnical),
            "transportation" | "transport" => Ok(Discipline::Transportation),
            "environmental" | "env" => Ok(Discipline::Environmental),
            "surveying" | "survey" => Ok(Discipline::Surveying),
            other => Err(format!("unknown discipline: {other}")),
        }
    }
}

/// A named, ordered collection of questions.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionBank {
    /// Unique identifier for this bank.
    pub id: String,
    /// Human-readable title.
    pub title: String,
    /// Discipline the bank belongs to.
    pub discipline: Discipline,
    /// Short description of the topic.
    pub description: String,
    /// The questions, in presentation order.
    pub questions: Vec<Question>,
}
