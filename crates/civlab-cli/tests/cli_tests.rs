//! CLI integration tests using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn civlab() -> Command {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("civlab").unwrap();
    cmd.env_remove("CIVLAB_BANKS_DIR")
        .env_remove("CIVLAB_ANIMATION_INTERVAL_MS");
    cmd
}

/// A command isolated from any config in the working directory or home.
fn civlab_in(dir: &TempDir) -> Command {
    let mut cmd = civlab();
    cmd.current_dir(dir.path()).env("HOME", dir.path());
    cmd
}

#[test]
fn band_slope_stability() {
    civlab()
        .args(["band", "slope-stability", "30"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Band: Marginally Stable"))
        .stdout(predicate::str::contains("guidance"));
}

#[test]
fn band_json_output() {
    civlab()
        .args(["band", "water-quality", "75", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"label\": \"Excellent - Safe\""))
        .stdout(predicate::str::contains("\"domain\": \"water-quality\""))
        .stdout(predicate::str::contains("turbidity"));
}

#[test]
fn band_accepts_negative_values() {
    civlab()
        .args(["band", "air-quality", "-5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Band: Good"))
        .stdout(predicate::str::contains("outside the slider range"));
}

#[test]
fn band_unknown_domain() {
    civlab()
        .args(["band", "hydraulics", "10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn band_unknown_format() {
    civlab()
        .args(["band", "traffic-level", "10", "--format", "xml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown format"));
}

#[test]
fn domains_lists_every_domain() {
    civlab()
        .arg("domains")
        .assert()
        .success()
        .stdout(predicate::str::contains("slope-stability"))
        .stdout(predicate::str::contains("air-quality"))
        .stdout(predicate::str::contains("F - Congested"));
}

#[test]
fn banks_lists_builtins() {
    let dir = TempDir::new().unwrap();
    civlab_in(&dir)
        .arg("banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("structural"))
        .stdout(predicate::str::contains("levelling-contouring"))
        .stdout(predicate::str::contains("built-in"));
}

#[test]
fn banks_filter_by_discipline() {
    let dir = TempDir::new().unwrap();
    civlab_in(&dir)
        .args(["banks", "--discipline", "surveying"])
        .assert()
        .success()
        .stdout(predicate::str::contains("levelling-contouring"))
        .stdout(predicate::str::contains("geotechnical").not());
}

/// A small valid bank with the given id and title.
fn bank_toml(id: &str, title: &str) -> String {
    format!(
        r#"[bank]
id = "{id}"
title = "{title}"
discipline = "structural"

[[questions]]
text = "What does a cantilever beam rest on?"
options = ["One fixed support", "Two pinned supports"]
correct_option = 0
explanation = "A cantilever is fixed at one end and free at the other."
"#
    )
}

#[test]
fn banks_skips_configured_bank_with_builtin_id() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir(dir.path().join("extra")).unwrap();
    std::fs::write(
        dir.path().join("extra/shadow.toml"),
        bank_toml("structural", "Shadow Quiz"),
    )
    .unwrap();
    std::fs::write(dir.path().join("civlab.toml"), "banks_dir = \"extra\"\n").unwrap();

    let assert = civlab_in(&dir)
        .arg("banks")
        .assert()
        .success()
        .stderr(predicate::str::contains("shadows an earlier bank"));

    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    assert!(!stdout.contains("Shadow Quiz"));
    assert_eq!(stdout.matches("Structural Engineering Quiz").count(), 1);
    let row = stdout
        .lines()
        .find(|l| l.contains("Structural Engineering Quiz"))
        .unwrap();
    assert!(row.contains("built-in"));
}

#[test]
fn validate_reports_duplicate_bank_ids() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("a.toml"), bank_toml("dup", "First Copy")).unwrap();
    std::fs::write(dir.path().join("b.toml"), bank_toml("dup", "Second Copy")).unwrap();

    civlab()
        .arg("validate")
        .arg("--bank")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "bank id 'dup' is also used by 'First Copy'",
        ))
        .stdout(predicate::str::contains("1 warning(s) found."));
}

#[test]
fn validate_builtin_directory() {
    civlab()
        .args(["validate", "--bank", "../civlab-core/banks"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Structural Engineering Quiz"))
        .stdout(predicate::str::contains("Water Treatment Process"))
        .stdout(predicate::str::contains("All question banks valid."));
}

#[test]
fn validate_nonexistent_file() {
    civlab()
        .args(["validate", "--bank", "nonexistent.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

#[test]
fn validate_reports_warnings() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("weak.toml");
    std::fs::write(
        &path,
        r#"[bank]
id = "weak"
title = "Weak"
discipline = "structural"

[[questions]]
text = "Pick one"
options = ["A", "A"]
correct_option = 0
"#,
    )
    .unwrap();

    civlab()
        .arg("validate")
        .arg("--bank")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("no explanation provided"))
        .stdout(predicate::str::contains("duplicate option"))
        .stdout(predicate::str::contains("warning(s) found"));
}

#[test]
fn quiz_playthrough_scores_answers() {
    let dir = TempDir::new().unwrap();
    civlab_in(&dir)
        .args(["quiz", "--bank-id", "structural"])
        .write_stdin("2\n\n3\n\n1\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Question 1 of 3"))
        .stdout(predicate::str::contains("Correct!"))
        .stdout(predicate::str::contains(
            "Incorrect (you picked 1, the answer is 2)",
        ))
        .stdout(predicate::str::contains("Press Enter to finish the quiz."))
        .stdout(predicate::str::contains("Quiz Complete!"))
        .stdout(predicate::str::contains("2 / 3"))
        .stdout(predicate::str::contains("You got 67% correct!"));
}

#[test]
fn quiz_requires_selection_before_advancing() {
    let dir = TempDir::new().unwrap();
    civlab_in(&dir)
        .args(["quiz", "--discipline", "geotechnical"])
        .write_stdin("\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Pick an answer first."))
        .stdout(predicate::str::contains("Quiz abandoned at question 1 of 3"));
}

#[test]
fn quiz_restart_after_completion() {
    let dir = TempDir::new().unwrap();
    civlab_in(&dir)
        .args(["quiz", "--bank-id", "structural", "--no-explanations"])
        .write_stdin("2\n\n3\n\n2\n\nr\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 / 3"))
        .stdout(predicate::str::contains("You got 100% correct!"))
        .stdout(predicate::str::contains("Quiz abandoned at question 1 of 3 (0 correct so far)"));
}

#[test]
fn quiz_json_summary() {
    let dir = TempDir::new().unwrap();
    civlab_in(&dir)
        .args(["quiz", "--bank-id", "structural", "--format", "json"])
        .write_stdin("2\n\n3\n\n1\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\": 2"))
        .stdout(predicate::str::contains("\"percentage\": 67"))
        .stdout(predicate::str::contains("\"completed\": true"));
}

#[test]
fn quiz_unknown_bank_id() {
    let dir = TempDir::new().unwrap();
    civlab_in(&dir)
        .args(["quiz", "--bank-id", "hydraulics"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no question bank with id"));
}

#[test]
fn init_creates_files() {
    let dir = TempDir::new().unwrap();

    civlab_in(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created civlab.toml"))
        .stdout(predicate::str::contains("Created question-banks/example.toml"));

    assert!(dir.path().join("civlab.toml").exists());
    assert!(dir.path().join("question-banks/example.toml").exists());
}

#[test]
fn init_skips_existing() {
    let dir = TempDir::new().unwrap();

    civlab_in(&dir).arg("init").assert().success();

    civlab_in(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
}

#[test]
fn init_bank_is_playable() {
    let dir = TempDir::new().unwrap();
    civlab_in(&dir).arg("init").assert().success();

    civlab_in(&dir)
        .arg("banks")
        .assert()
        .success()
        .stdout(predicate::str::contains("example"));

    civlab_in(&dir)
        .args(["quiz", "--bank-id", "example"])
        .write_stdin("2\n\n2\n\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("2 / 2"));
}

#[test]
fn animate_renders_frames() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("fast.toml");
    std::fs::write(&config, "animation_interval_ms = 1\n").unwrap();

    civlab_in(&dir)
        .args(["animate", "--volume", "60", "--frames", "3", "--config"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("5 vehicles"))
        .stdout(predicate::str::contains(">"));
}

#[test]
fn animate_rejects_out_of_range_volume() {
    civlab()
        .args(["animate", "--volume", "150"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("volume must be between 0 and 100"));
}

#[test]
fn help_output() {
    civlab()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Civil-engineering quizzes and visual metrics",
        ));
}

#[test]
fn version_output() {
    civlab()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("civlab"));
}
