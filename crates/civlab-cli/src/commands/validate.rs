//! The `civlab validate` command.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;

use civlab_core::parser;

pub fn execute(bank_path: PathBuf) -> Result<()> {
    let banks = if bank_path.is_dir() {
        parser::load_bank_directory(&bank_path)?
    } else {
        vec![parser::parse_bank(&bank_path)?]
    };

    let mut total_warnings = 0;
    let mut seen_ids: HashMap<&str, &str> = HashMap::new();

    for bank in &banks {
        println!(
            "Question bank: {} [{}] ({} questions)",
            bank.title,
            bank.discipline,
            bank.questions.len()
        );

        if let Some(first) = seen_ids.insert(bank.id.as_str(), bank.title.as_str()) {
            println!("  WARNING: bank id '{}' is also used by '{first}'", bank.id);
            total_warnings += 1;
        }

        let warnings = parser::validate_bank(bank);
        for w in &warnings {
            let prefix = w
                .question
                .map(|n| format!("  [Q{n}]"))
                .unwrap_or_else(|| "  ".to_string());
            println!("{prefix} WARNING: {}", w.message);
        }
        total_warnings += warnings.len();
    }

    if total_warnings == 0 {
        println!("All question banks valid.");
    } else {
        println!("\n{total_warnings} warning(s) found.");
    }

    Ok(())
}
