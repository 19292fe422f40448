//! Homework Notifier CLI
//!
//! Command-line interface for the homework review status poller.

use std::path::PathBuf;

use clap::Parser;
use homework_notifier::{load_config, logging, Config, Credentials};
use tracing::Level;

#[derive(Parser)]
#[command(name = "homework-notifier")]
#[command(about = "Polls the homework review API and forwards status changes to Telegram")]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seconds between polls (overrides config file)
    #[arg(long)]
    retry_period: Option<u64>,

    /// Log file path (overrides config file)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level
    #[arg(short, long, default_value = "info", value_parser = parse_log_level)]
    log_level: Level,
}

fn parse_log_level(s: &str) -> Result<Level, String> {
    s.parse().map_err(|_| {
        format!(
            "Invalid log level: {}. Use: trace, debug, info, warn, error",
            s
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let dotenv_path = dotenvy::dotenv().ok();

    let mut config = match &args.config {
        Some(config_path) => load_config(config_path)?,
        None => Config::default(),
    };

    if let Some(retry_period) = args.retry_period {
        config.polling.retry_period_seconds = retry_period;
    }
    if let Some(log_file) = args.log_file {
        config.logging.file = Some(log_file);
    }
    config.validate()?;

    let _log_guard = logging::init(
        args.log_level,
        config.logging.file.as_deref(),
        config.logging.max_files,
    )?;

    tracing::debug!(
        "Parsed command line arguments: config={:?}, retry_period={:?}, log_level={:?}, dotenv={:?}",
        args.config,
        args.retry_period,
        args.log_level,
        dotenv_path
    );

    let credentials = match Credentials::from_env() {
        Ok(credentials) => credentials,
        Err(e) => {
            tracing::error!("CRITICAL: {}. Exiting.", e);
            return Err(e.into());
        }
    };

    tracing::info!("Starting homework notifier");
    tracing::debug!(
        "Endpoint: {}, retry period: {}s",
        config.api.endpoint,
        config.polling.retry_period_seconds
    );

    homework_notifier::run(config, credentials).await?;

    Ok(())
}
