//! The `civlab init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    if std::path::Path::new("civlab.toml").exists() {
        println!("civlab.toml already exists, skipping.");
    } else {
        std::fs::write("civlab.toml", SAMPLE_CONFIG)?;
        println!("Created civlab.toml");
    }

    std::fs::create_dir_all("question-banks")?;
    let example_path = std::path::Path::new("question-banks/example.toml");
    if example_path.exists() {
        println!("question-banks/example.toml already exists, skipping.");
    } else {
        std::fs::write(example_path, EXAMPLE_BANK)?;
        println!("Created question-banks/example.toml");
    }

    println!("\nNext steps:");
    println!("  1. Run: civlab validate --bank question-banks/example.toml");
    println!("  2. Run: civlab quiz --bank-id example");
    println!("  3. Run: civlab band slope-stability 30");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# civlab configuration

# Extra question banks, loaded next to the built-in ones.
banks_dir = "question-banks"

default_discipline = "structural"
show_explanations = true
animation_interval_ms = 50
"#;

const EXAMPLE_BANK: &str = r#"[bank]
id = "example"
title = "Example Quiz"
discipline = "surveying"
description = "A small bank to get started with your own questions"

[[questions]]
text = "What instrument is used for measuring horizontal and vertical angles?"
options = ["Dumpy level", "Theodolite", "Planimeter", "Ranging rod"]
correct_option = 1
explanation = "A theodolite measures both horizontal and vertical angles."

[[questions]]
text = "Contour lines that are closely spaced indicate:"
options = ["Flat ground", "A steep slope", "A water body", "An overhang"]
correct_option = 1
explanation = "Close spacing means the elevation changes quickly over a short distance."
"#;
