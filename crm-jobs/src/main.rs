use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

mod client;
mod config;
mod jobs;
mod scheduler;

use client::GraphQlClient;
use config::Config;
use scheduler::{run_job, JobKind, Scheduler};

#[derive(Parser)]
#[command(name = "crm-jobs")]
#[command(about = "Scheduled background jobs for the CRM backend")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the jobs configuration file
    #[arg(short, long, default_value = "jobs.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run all enabled jobs on their configured schedules
    Run,
    /// Run the heartbeat job once and exit
    Heartbeat,
    /// Run the low-stock update job once and exit
    LowStock,
    /// Run the report job once and exit
    Report,
    /// Run the order-reminders job once and exit
    OrderReminders,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    tracing_subscriber::fmt::init();

    // A missing config file means defaults across the board.
    let config = if cli.config.exists() {
        Config::load(&cli.config)?
    } else {
        info!(
            "Config file '{}' not found, using defaults",
            cli.config.display()
        );
        Config::default()
    };

    match cli.command {
        Commands::Run => {
            let scheduler = Scheduler::from_config(&config)?;
            println!(
                "⏰ Running {} scheduled jobs against {}",
                scheduler.jobs().len(),
                config.api.url
            );
            scheduler.run().await?;
        }
        Commands::Heartbeat => run_once(&config, JobKind::Heartbeat).await?,
        Commands::LowStock => run_once(&config, JobKind::LowStockUpdate).await?,
        Commands::Report => run_once(&config, JobKind::Report).await?,
        Commands::OrderReminders => run_once(&config, JobKind::OrderReminders).await?,
    }

    Ok(())
}

async fn run_once(config: &Config, kind: JobKind) -> Result<()> {
    let client = GraphQlClient::new(
        config.api.url.clone(),
        Duration::from_secs(config.api.timeout_secs),
    )?;
    run_job(
        kind,
        &client,
        &config.logs.dir,
        config.order_reminders.lookback_days,
    )
    .await
}
