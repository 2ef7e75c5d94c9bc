//! TOML question-bank parser.
//!
//! Loads question banks from TOML files and directories, and validates them.

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::model::{Discipline, Question, QuestionBank};

/// Intermediate TOML structure for parsing question-bank files.
#[derive(Debug, Deserialize)]
struct TomlBankFile {
    bank: TomlBankHeader,
    #[serde(default)]
    questions: Vec<TomlQuestion>,
}

#[derive(Debug, Deserialize)]
struct TomlBankHeader {
    id: String,
    title: String,
    discipline: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct TomlQuestion {
    text: String,
    options: Vec<String>,
    correct_option: usize,
    #[serde(default)]
    explanation: String,
}

/// Parse a single TOML file into a `QuestionBank`.
pub fn parse_bank(path: &Path) -> Result<QuestionBank> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read question bank file: {}", path.display()))?;

    parse_bank_str(&content, path)
}

/// Parse a TOML string into a `QuestionBank` (useful for testing and for
/// embedded content).
pub fn parse_bank_str(content: &str, source_path: &Path) -> Result<QuestionBank> {
    let parsed: TomlBankFile = toml::from_str(content)
        .with_context(|| format!("failed to parse TOML: {}", source_path.display()))?;

    let discipline: Discipline = parsed
        .bank
        .discipline
        .parse()
        .map_err(|e: String| anyhow::anyhow!("{}: {}", source_path.display(), e))?;

    anyhow::ensure!(
        !parsed.questions.is_empty(),
        "question bank '{}' has no questions",
        parsed.bank.id
    );

    let questions = parsed
        .questions
        .into_iter()
        .enumerate()
        .map(|(i, q)| {
            Question::new(q.text, q.options, q.correct_option, q.explanation).with_context(|| {
                format!(
                    "question {} in bank '{}' is invalid",
                    i + 1,
                    parsed.bank.id
                )
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(QuestionBank {
        id: parsed.bank.id,
        title: parsed.bank.title,
        discipline,
        description: parsed.bank.description,
        questions,
    })
}

/// Recursively load all `.toml` question-bank files from a directory.
pub fn load_bank_directory(dir: &Path) -> Result<Vec<QuestionBank>> {
    let mut banks = Vec::new();

    if !dir.is_dir() {
        anyhow::bail!("not a directory: {}", dir.display());
    }

    let mut entries = std::fs::read_dir(dir)
        .with_context(|| format!("failed to read directory: {}", dir.display()))?
        .collect::<std::io::Result<Vec<_>>>()?;
    entries.sort_by_key(|e| e.path());

    for entry in entries {
        let path = entry.path();

        if path.is_dir() {
            banks.extend(load_bank_directory(&path)?);
        } else if path.extension().is_some_and(|ext| ext == "toml") {
            match parse_bank(&path) {
                Ok(bank) => banks.push(bank),
                Err(e) => {
                    tracing::warn!("skipping {}: {:#}", path.display(), e);
                }
            }
        }
    }

    Ok(banks)
}

/// A warning from question-bank validation.
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    /// 1-based question number (if applicable).
    pub question: Option<usize>,
    /// Warning message.
    pub message: String,
}

/// Validate a question bank for issues that do not prevent it from loading.
pub fn validate_bank(bank: &QuestionBank) -> Vec<ValidationWarning> {
    let mut warnings = Vec::new();

    if bank.title.trim().is_empty() {
        warnings.push(ValidationWarning {
            question: None,
            message: "bank title is empty".into(),
        });
    }

    // Check for repeated question text
    let mut seen_text = HashSet::new();
    for (i, q) in bank.questions.iter().enumerate() {
        if !seen_text.insert(q.text().trim().to_lowercase()) {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: format!("duplicate question: {}", q.text()),
            });
        }
    }

    for (i, q) in bank.questions.iter().enumerate() {
        if q.text().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "question text is empty".into(),
            });
        }

        if q.explanation().trim().is_empty() {
            warnings.push(ValidationWarning {
                question: Some(i + 1),
                message: "no explanation provided".into(),
            });
        }

        let mut seen_options = HashSet::new();
        for option in q.options() {
            if !seen_options.insert(option.trim()) {
                warnings.push(ValidationWarning {
                    question: Some(i + 1),
                    message: format!("duplicate option: {option}"),
                });
            }
        }
    }

    warnings
}
