//! The `civlab quiz` command.

use std::io::BufRead;
use std::path::PathBuf;

use anyhow::{Context, Result};

use civlab_core::config::load_config_from;
use civlab_core::content::discipline_bank;
use civlab_core::error::QuizError;
use civlab_core::model::{Discipline, Question, QuestionBank};
use civlab_core::parser::parse_bank;
use civlab_core::quiz::{Quiz, QuizObserver, QuizSummary};

use super::banks::load_all_banks;

/// Renders question changes and the result screen on stdout.
struct ConsoleObserver<'q> {
    questions: &'q [Question],
}

impl ConsoleObserver<'_> {
    fn print_question(&self, index: usize) {
        let question = &self.questions[index];
        println!();
        println!("Question {} of {}", index + 1, self.questions.len());
        println!("{}", question.text());
        for (i, option) in question.options().iter().enumerate() {
            println!("  {}. {option}", i + 1);
        }
    }
}

impl QuizObserver for ConsoleObserver<'_> {
    // Answer feedback is printed by the input loop from `Quiz::feedback`.
    fn on_select(&self, _question: usize, _option: usize, _correct: bool) {}

    fn on_advance(&self, _from: usize, to: usize) {
        self.print_question(to);
    }

    fn on_complete(&self, summary: &QuizSummary) {
        println!();
        println!("Quiz Complete!");
        println!("{} / {}", summary.score, summary.total);
        println!("You got {}% correct!", summary.percentage);
        println!("Type r to retake the quiz, or press Enter to exit.");
    }

    fn on_restart(&self) {
        self.print_question(0);
    }
}

pub fn execute(
    bank_id: Option<String>,
    bank_path: Option<PathBuf>,
    discipline: Option<String>,
    no_explanations: bool,
    format: String,
    config_path: Option<PathBuf>,
) -> Result<()> {
    anyhow::ensure!(
        matches!(format.as_str(), "text" | "json"),
        "unknown format: {format} (expected text or json)"
    );
    let config = load_config_from(config_path.as_deref())?;
    let bank = select_bank(bank_id, bank_path, discipline, config.default_discipline, || {
        load_all_banks(&config)
    })?;

    let show_explanations = config.show_explanations && !no_explanations;
    let stdin = std::io::stdin();
    let summary = run(&bank, show_explanations, stdin.lock())?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn select_bank(
    bank_id: Option<String>,
    bank_path: Option<PathBuf>,
    discipline: Option<String>,
    default_discipline: Discipline,
    all_banks: impl FnOnce() -> Result<Vec<(QuestionBank, super::banks::BankSource)>>,
) -> Result<QuestionBank> {
    if let Some(path) = bank_path {
        return parse_bank(&path);
    }

    if let Some(id) = bank_id {
        return all_banks()?
            .into_iter()
            .map(|(bank, _)| bank)
            .find(|bank| bank.id == id)
            .with_context(|| format!("no question bank with id '{id}'"));
    }

    let discipline = match discipline {
        Some(d) => d.parse().map_err(|e: String| anyhow::anyhow!("{}", e))?,
        None => default_discipline,
    };
    discipline_bank(discipline)?
        .with_context(|| format!("no built-in question bank for {discipline}"))
}

fn print_feedback(quiz: &Quiz<'_>, show_explanations: bool) {
    let (Some(feedback), Some(selected)) = (quiz.feedback(), quiz.selected_option()) else {
        return;
    };
    if feedback.correct {
        println!("Correct!");
    } else {
        println!(
            "Incorrect (you picked {}, the answer is {})",
            selected + 1,
            feedback.correct_option + 1
        );
    }
    if show_explanations && !feedback.explanation.is_empty() {
        println!("{}", feedback.explanation);
    }
    if quiz.is_last_question() {
        println!("Press Enter to finish the quiz.");
    } else {
        println!("Press Enter for the next question.");
    }
}

/// Drive a quiz from line-based input until it is finished or abandoned.
fn run(bank: &QuestionBank, show_explanations: bool, input: impl BufRead) -> Result<QuizSummary> {
    let mut quiz = Quiz::new(&bank.questions)?;
    let observer = ConsoleObserver {
        questions: quiz.questions(),
    };

    println!("{}", bank.title);
    if !bank.description.is_empty() {
        println!("{}", bank.description);
    }
    println!("Answer with the option number, press Enter to continue, q to quit.");
    observer.print_question(0);
    quiz.subscribe(Box::new(observer));

    for line in input.lines() {
        let line = line.context("failed to read answer")?;
        let answer = line.trim();

        if quiz.is_completed() {
            if answer.eq_ignore_ascii_case("r") {
                quiz.restart();
                continue;
            }
            break;
        }

        let outcome = match answer {
            "q" | "Q" => break,
            "" | "n" | "N" => quiz.advance().map(|_| ()),
            number => match number.parse::<usize>() {
                Ok(n) if n >= 1 => quiz
                    .select_answer(n - 1)
                    .map(|()| print_feedback(&quiz, show_explanations)),
                _ => {
                    println!("Please enter an option number.");
                    continue;
                }
            },
        };

        match outcome {
            Ok(()) => {}
            Err(QuizError::PrematureAdvance) => println!("Pick an answer first."),
            Err(QuizError::InvalidSelection { option_count, .. }) => {
                println!("Please choose an option between 1 and {option_count}.")
            }
            Err(e) if e.is_benign() => tracing::debug!("ignored input '{answer}': {e}"),
            Err(e) => println!("{e}"),
        }
    }

    if !quiz.is_completed() {
        println!(
            "\nQuiz abandoned at question {} of {} ({} correct so far).",
            quiz.current_index() + 1,
            quiz.total(),
            quiz.score()
        );
    }

    Ok(quiz.summary())
}
