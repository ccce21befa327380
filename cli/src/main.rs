//! Command-line entry point for running cleaning jobs.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;
use tracing::Level;

use sift_core::config::JobConfig;
use sift_core::job::run_with_config;

#[derive(Parser)]
#[command(
    name = "sift",
    version,
    about = "Batch null-row cleaning for cataloged tables"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a cleaning job to completion
    Run {
        /// Job name recorded in run bookkeeping
        job_name: String,
        /// Path to the job configuration file
        #[arg(long, default_value = "sift.json")]
        config: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = Level::from_str(&cli.log_level).unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    match cli.command {
        Commands::Run { job_name, config } => {
            let config = JobConfig::from_file(&config)?;
            let summary = run_with_config(&job_name, &config).await?;
            println!(
                "{} run {} committed: {} rows read, {} kept, {} dropped, {} bytes -> {}",
                summary.job_name,
                summary.run_id,
                summary.rows_read,
                summary.rows_kept,
                summary.rows_dropped,
                summary.bytes_written,
                summary.destination
            );
            Ok(())
        }
    }
}
