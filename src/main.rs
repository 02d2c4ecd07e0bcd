//! # TDS Assistant CLI (`tds`)
//!
//! ## Usage
//!
//! ```bash
//! tds [--config ./tds.toml] <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `tds ask "<question>"` | Answer one question and print it (`--json` for the wire shape) |
//! | `tds sources` | Show whether each CSV file loads, with row counts and columns |
//! | `tds serve` | Start the HTTP server |
//!
//! Without `--config`, the forum and timetable files are read from
//! `discourse_data.csv` and `tds_timetable_2025.csv` in the working
//! directory and the server binds to `0.0.0.0:8000`.
//!
//! Logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) to adjust.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use tds_assistant::{ask, config, server, sources};

/// TDS Assistant: answers course questions from a forum archive and a
/// course timetable.
#[derive(Parser)]
#[command(
    name = "tds",
    about = "TDS Assistant: answers course questions from a forum archive and a timetable",
    version
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// When omitted, built-in defaults are used.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Answer a single question.
    ///
    /// Searches forum titles and excerpts first, then every timetable
    /// column, and prints the first match.
    Ask {
        /// The question text. Matching is case-insensitive substring search.
        question: String,

        /// Print the answer as JSON, exactly as the HTTP API returns it.
        #[arg(long)]
        json: bool,
    },

    /// Show the load status of each data source.
    Sources,

    /// Start the HTTP server.
    ///
    /// Binds to `[server].bind` and serves `POST /api/`.
    Serve,
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => config::Config::minimal(),
    };

    match cli.command {
        Commands::Ask { question, json } => {
            ask::run_ask(&cfg, &question, json)?;
        }
        Commands::Sources => {
            sources::list_sources(&cfg)?;
        }
        Commands::Serve => {
            server::run_server(&cfg).await?;
        }
    }

    Ok(())
}
