//! Built-in question banks.
//!
//! The banks ship inside the binary as TOML and go through the same parser
//! as banks loaded from disk.

use std::path::Path;

use anyhow::{Context, Result};

use crate::model::{Discipline, QuestionBank};
use crate::parser::parse_bank_str;

/// `(file name, contents)` of every embedded bank. Discipline page quizzes
/// come first, then the concept library.
const BUILTIN_BANKS: &[(&str, &str)] = &[
    ("structural.toml", include_str!("../banks/structural.toml")),
    ("geotechnical.toml", include_str!("../banks/geotechnical.toml")),
    ("transportation.toml", include_str!("../banks/transportation.toml")),
    ("environmental.toml", include_str!("../banks/environmental.toml")),
    (
        "concept-bending-moment-shear.toml",
        include_str!("../banks/concept-bending-moment-shear.toml"),
    ),
    (
        "concept-beam-deflection.toml",
        include_str!("../banks/concept-beam-deflection.toml"),
    ),
    (
        "concept-soil-classification.toml",
        include_str!("../banks/concept-soil-classification.toml"),
    ),
    (
        "concept-bearing-capacity.toml",
        include_str!("../banks/concept-bearing-capacity.toml"),
    ),
    (
        "concept-traffic-flow-theory.toml",
        include_str!("../banks/concept-traffic-flow-theory.toml"),
    ),
    (
        "concept-water-treatment.toml",
        include_str!("../banks/concept-water-treatment.toml"),
    ),
    (
        "concept-levelling-contouring.toml",
        include_str!("../banks/concept-levelling-contouring.toml"),
    ),
];

/// Parse every built-in bank.
pub fn builtin_banks() -> Result<Vec<QuestionBank>> {
    BUILTIN_BANKS
        .iter()
        .map(|(name, content)| {
            parse_bank_str(content, Path::new(name))
                .with_context(|| format!("built-in bank {name} is broken"))
        })
        .collect()
}

/// Look up a built-in bank by id.
pub fn builtin_bank(id: &str) -> Result<Option<QuestionBank>> {
    Ok(builtin_banks()?.into_iter().find(|b| b.id == id))
}

/// The discipline page quiz, i.e. the first built-in bank of `discipline`.
pub fn discipline_bank(discipline: Discipline) -> Result<Option<QuestionBank>> {
    Ok(builtin_banks()?
        .into_iter()
        .find(|b| b.discipline == discipline))
}
