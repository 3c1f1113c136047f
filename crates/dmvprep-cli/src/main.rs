//! dmvprep CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "dmvprep", version, about = "AI-generated DMV practice exams")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a practice exam
    Play {
        /// Quiz difficulty: easy, medium, hard, mix
        #[arg(long, default_value = "mix")]
        difficulty: String,

        /// Question style: scenario, straightforward, mixed
        #[arg(long, default_value = "mixed")]
        style: String,

        /// Topic focus: mix, numeric, minors, dui, signs, fines
        #[arg(long, default_value = "mix")]
        focus: String,

        /// Number of questions to request
        #[arg(long, default_value = "10")]
        count: u32,

        /// Use the built-in demo quiz instead of the remote generator
        #[arg(long)]
        demo: bool,

        /// Generator model identifier
        #[arg(long)]
        model: Option<String>,

        /// Data directory override (defaults to ~/.local/share/dmvprep)
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Show or clear the seen-question history
    History {
        /// Forget all recorded questions
        #[arg(long)]
        clear: bool,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },

    /// Print the generation prompt for a configuration
    Prompt {
        /// Quiz difficulty: easy, medium, hard, mix
        #[arg(long, default_value = "mix")]
        difficulty: String,

        /// Question style: scenario, straightforward, mixed
        #[arg(long, default_value = "mixed")]
        style: String,

        /// Topic focus: mix, numeric, minors, dui, signs, fines
        #[arg(long, default_value = "mix")]
        focus: String,

        /// Number of questions to request
        #[arg(long, default_value = "10")]
        count: u32,

        /// Data directory override
        #[arg(long)]
        data_dir: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("dmvprep=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Play {
            difficulty,
            style,
            focus,
            count,
            demo,
            model,
            data_dir,
        } => commands::play::execute(difficulty, style, focus, count, demo, model, data_dir).await,
        Commands::History { clear, data_dir } => commands::history::execute(clear, data_dir),
        Commands::Prompt {
            difficulty,
            style,
            focus,
            count,
            data_dir,
        } => commands::prompt::execute(difficulty, style, focus, count, data_dir),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
