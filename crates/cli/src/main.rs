//! Baby Weight Predictor CLI
//!
//! A command-line tool for scoring babyweight feature records against the
//! hosted prediction service, with a mock mode for offline use.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

/// Baby Weight Predictor CLI
#[derive(Parser)]
#[command(name = "bwp")]
#[command(author, version, about = "CLI for the Baby Weight Predictor", long_about = None)]
pub struct Cli {
    /// Cloud project hosting the model
    #[arg(long, env = "BWP_PROJECT")]
    pub project: Option<String>,

    /// Deployed model name
    #[arg(long, env = "BWP_MODEL")]
    pub model: Option<String>,

    /// Deployed model version
    #[arg(long, env = "BWP_VERSION")]
    pub model_version: Option<String>,

    /// Service base URL override (for testing against a local endpoint)
    #[arg(long, env = "BWP_API_BASE")]
    pub api_base: Option<String>,

    /// Bearer token for the prediction service
    #[arg(long, env = "GOOGLE_ML_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Use the mock client instead of the live service
    #[arg(long)]
    pub mock: bool,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    /// Enable verbose output
    #[arg(long, short)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Predict the weight for one CSV feature record
    Predict {
        /// Fixed-order CSV record:
        /// weight_pounds,is_male,mother_age,mother_race,plurality,
        /// gestation_weeks,mother_married,cigarette_use,alcohol_use,key
        record: String,

        /// Value reported when the service yields no prediction
        #[arg(long, default_value_t = -1.0, allow_hyphen_values = true)]
        default: f64,
    },

    /// Predict weights for every record in a CSV file
    Batch {
        /// Input file, one CSV record per line ('#' comments and blank
        /// lines are skipped)
        #[arg(long, short)]
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = config::Settings::resolve(&cli)?;

    match &cli.command {
        Commands::Predict { record, default } => {
            commands::predict_one(&cli, &settings, record, *default).await?;
        }
        Commands::Batch { input } => {
            commands::predict_file(&cli, &settings, input).await?;
        }
    }

    Ok(())
}
