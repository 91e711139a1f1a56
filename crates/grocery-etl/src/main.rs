// crates/grocery-etl/src/main.rs

use std::fs::OpenOptions;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use grocery_etl_bucket::{GcsBucketStore, GcsConfig};
use grocery_etl_core::config::{EnvVariables, PipelineConfig};
use grocery_etl_core::error::EtlError;
use grocery_etl_core::pipeline;
use tracing::{error, info};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LOG_FILE: &str = "grocery_etl.log";

/// Batch ETL for the grocery sales datasets: raw CSVs in, enriched
/// sales fact parquet out.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Run the raw-to-cleaned transform job.
    Run,
    /// Load and print the pipeline configuration snapshot.
    ShowConfig,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().context("failed to initialize logging")?;

    let cli = Cli::parse();
    match cli.command {
        Command::Run => run_job().await,
        Command::ShowConfig => show_config(),
    }
}

async fn run_job() -> Result<()> {
    let config =
        PipelineConfig::load(&EnvVariables).context("failed to load pipeline configuration")?;

    let store = GcsBucketStore::new(GcsConfig {
        bucket: config.bucket_name.clone(),
        service_account_path: Some(config.gcp_credentials_file_path.clone()),
    })
    .context("failed to configure GCS bucket store")?;

    info!("starting grocery sales ETL against bucket {}", config.bucket_name);

    match pipeline::run_transform_job(&store).await {
        Ok(report) => {
            info!(
                "transform job finished: {} rows -> {}",
                report.rows_written, report.output_key
            );
            Ok(())
        }
        Err(err @ EtlError::IncompleteLoad(_)) => {
            error!("{err}");
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

fn show_config() -> Result<()> {
    let config =
        PipelineConfig::load(&EnvVariables).context("failed to load pipeline configuration")?;
    println!("{config:#?}");
    Ok(())
}

fn init_tracing() -> Result<()> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(LOG_FILE)
        .with_context(|| format!("failed to open {LOG_FILE}"))?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer())
        .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
        .init();

    Ok(())
}
