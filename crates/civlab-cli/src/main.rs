//! civlab CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "civlab",
    version,
    about = "Civil-engineering quizzes and visual metrics"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a quiz interactively
    Quiz {
        /// Built-in or configured bank id (e.g. "geotechnical")
        #[arg(long, conflicts_with_all = ["bank", "discipline"])]
        bank_id: Option<String>,

        /// Path to a question bank .toml file
        #[arg(long, conflicts_with = "discipline")]
        bank: Option<PathBuf>,

        /// Discipline whose page quiz to take
        #[arg(long)]
        discipline: Option<String>,

        /// Do not show explanations after each answer
        #[arg(long)]
        no_explanations: bool,

        /// Summary format printed when the quiz ends: text, json
        #[arg(long, default_value = "text")]
        format: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Classify a slider value and print its derived metrics
    Band {
        /// Domain id (see `civlab domains`)
        domain: String,

        /// Slider value
        #[arg(allow_negative_numbers = true)]
        value: f64,

        /// Output format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List banding domains with their slider ranges and bands
    Domains,

    /// List available question banks
    Banks {
        /// Filter to one discipline
        #[arg(long)]
        discipline: Option<String>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate question bank TOML files
    Validate {
        /// Path to a question bank file or directory
        #[arg(long)]
        bank: PathBuf,
    },

    /// Render the traffic flow animation as text frames
    Animate {
        /// Traffic volume (0-100)
        #[arg(long, default_value = "50")]
        volume: f64,

        /// Number of frames to render
        #[arg(long, default_value = "40")]
        frames: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create starter config and example question bank
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("civlab=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Quiz {
            bank_id,
            bank,
            discipline,
            no_explanations,
            format,
            config,
        } => commands::quiz::execute(bank_id, bank, discipline, no_explanations, format, config),
        Commands::Band {
            domain,
            value,
            format,
        } => commands::band::execute(domain, value, format),
        Commands::Domains => commands::domains::execute(),
        Commands::Banks { discipline, config } => commands::banks::execute(discipline, config),
        Commands::Validate { bank } => commands::validate::execute(bank),
        Commands::Animate {
            volume,
            frames,
            config,
        } => commands::animate::execute(volume, frames, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
