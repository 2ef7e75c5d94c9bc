//! The `civlab banks` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use civlab_core::config::{load_config_from, CivlabConfig};
use civlab_core::content::builtin_banks;
use civlab_core::model::{Discipline, QuestionBank};
use civlab_core::parser::load_bank_directory;

/// Where a bank was loaded from.
pub enum BankSource {
    BuiltIn,
    Configured(PathBuf),
}

/// Built-in banks followed by the banks from the configured directory.
pub fn load_all_banks(config: &CivlabConfig) -> Result<Vec<(QuestionBank, BankSource)>> {
    let mut banks: Vec<(QuestionBank, BankSource)> = builtin_banks()?
        .into_iter()
        .map(|b| (b, BankSource::BuiltIn))
        .collect();

    if let Some(dir) = &config.banks_dir {
        if dir.is_dir() {
            for bank in load_bank_directory(dir)? {
                if banks.iter().any(|(b, _)| b.id == bank.id) {
                    tracing::warn!(
                        "bank '{}' in {} shadows an earlier bank with the same id, skipping",
                        bank.id,
                        dir.display()
                    );
                    continue;
                }
                banks.push((bank, BankSource::Configured(dir.clone())));
            }
        } else {
            tracing::warn!("configured banks_dir {} does not exist", dir.display());
        }
    }

    Ok(banks)
}

pub fn execute(discipline: Option<String>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let filter: Option<Discipline> = discipline
        .map(|d| d.parse().map_err(|e: String| anyhow::anyhow!("{}", e)))
        .transpose()?;

    let mut table = Table::new();
    table.set_header(vec!["Id", "Title", "Discipline", "Questions", "Source"]);

    let mut shown = 0;
    for (bank, source) in load_all_banks(&config)? {
        if filter.is_some_and(|d| d != bank.discipline) {
            continue;
        }
        let source = match source {
            BankSource::BuiltIn => "built-in".to_string(),
            BankSource::Configured(dir) => dir.display().to_string(),
        };
        table.add_row(vec![
            Cell::new(&bank.id),
            Cell::new(&bank.title),
            Cell::new(bank.discipline),
            Cell::new(bank.questions.len()),
            Cell::new(source),
        ]);
        shown += 1;
    }

    if shown == 0 {
        println!("No question banks match.");
    } else {
        println!("{table}");
    }

    Ok(())
}
