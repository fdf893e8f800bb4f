//! quizport CLI: take the portal's subject quizzes from a terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizport", version, about = "Terminal client for exam-prep portal quizzes")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the rules for a subject's quiz
    Instructions {
        /// Subject name as listed on the portal
        #[arg(long)]
        subject: String,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Take a timed quiz
    Take {
        /// Subject name as listed on the portal
        #[arg(long)]
        subject: String,

        /// Countdown length in seconds (default from config, 1800)
        #[arg(long)]
        duration: Option<u32>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List past attempts
    History {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Review one past attempt question by question
    Detail {
        /// Attempt id from `quizport history`
        #[arg(long)]
        id: String,

        /// Also write a self-contained HTML review to this path
        #[arg(long)]
        html: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List every student's score for a subject
    AdminResults {
        /// Subject name
        #[arg(long)]
        subject: String,

        /// Also export the listing as CSV to this path
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter quizport.toml
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("quizport=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Instructions { subject, config } => {
            commands::instructions::execute(subject, config).await
        }
        Commands::Take {
            subject,
            duration,
            config,
        } => commands::take::execute(subject, duration, config).await,
        Commands::History { json, config } => commands::history::execute(json, config).await,
        Commands::Detail { id, html, config } => commands::detail::execute(id, html, config).await,
        Commands::AdminResults {
            subject,
            csv,
            config,
        } => commands::admin_results::execute(subject, csv, config).await,
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
