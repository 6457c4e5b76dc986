mod cli;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use dietmood::config::DietMoodConfig;

#[derive(Parser)]
#[command(name = "dietmood", version, about = "Diet and mood journal with insights")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Start the HTTP server
    Serve,
    /// Log a journal entry
    Log {
        /// Mood score, 1 (bad) to 5 (great)
        #[arg(long)]
        mood: Option<u8>,
        /// What you ate
        #[arg(long)]
        food: Option<String>,
        /// Energy level, 1 to 10
        #[arg(long, default_value_t = dietmood::journal::capture::DEFAULT_ENERGY)]
        energy: u8,
        /// Symptom tag; repeat for several
        #[arg(long = "symptom")]
        symptoms: Vec<String>,
        #[arg(long)]
        notes: Option<String>,
        /// Food photo to analyze and attach
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Show logged entries grouped by day
    History {
        /// Only show entries from this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Delete an entry by id
    Delete { id: i64 },
    /// Show statistics, patterns, and the weekly trend
    Insights {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export all entries as JSON
    Export {
        /// Write to this file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Run database diagnostics
    Doctor,
    /// Analyze a food photo without logging it
    Analyze { image: PathBuf },
    /// Probe a running server's health endpoint
    Healthcheck {
        #[arg(long)]
        url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = DietMoodConfig::load()?;

    // stdout is reserved for command output.
    let filter = EnvFilter::try_new(&config.server.log_level)
        .unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Serve => dietmood::server::serve(config).await?,
        Command::Log {
            mood,
            food,
            energy,
            symptoms,
            notes,
            photo,
        } => {
            let args = cli::log::LogArgs {
                mood,
                food,
                energy,
                symptoms,
                notes,
                photo,
            };
            cli::log::log(&config, args).await?;
        }
        Command::History { date } => cli::history::history(&config, date)?,
        Command::Delete { id } => cli::delete::delete(&config, id)?,
        Command::Insights { json } => cli::insights::insights(&config, json)?,
        Command::Export { output } => cli::export::export(&config, output.as_deref())?,
        Command::Doctor => cli::doctor::doctor(&config)?,
        Command::Analyze { image } => cli::analyze::analyze(&config, &image).await?,
        Command::Healthcheck { url } => {
            let url = url.unwrap_or_else(|| cli::healthcheck::default_url(&config));
            if !cli::healthcheck::healthcheck(&url).await {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
