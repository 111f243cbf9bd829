use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use adprep::config::Config;
use adprep::constants;
use adprep::error::{PrepError, Result};
use adprep::logging;
use adprep::pipeline::BatchProcessor;
use adprep::sources::build_sources;
use adprep::stats::write_stats_json;
use adprep::storage::CsvFileStore;

#[derive(Parser)]
#[command(name = "adprep")]
#[command(about = "Anomaly-detection benchmark dataset preparation")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, normalize and store the benchmark datasets
    Prepare {
        /// Specific datasets to prepare (comma-separated). Default: all five
        #[arg(long)]
        datasets: Option<String>,
    },
    /// List the supported dataset identifiers
    Datasets,
}

/// Resolve a comma-separated selection against the canonical processing
/// order; a subset is still prepared in that order.
fn parse_selection(datasets: Option<String>) -> Result<Vec<&'static str>> {
    let Some(list) = datasets else {
        return Ok(constants::supported_datasets());
    };

    let requested: Vec<String> = list.split(',').map(|s| s.trim().to_string()).collect();
    for name in &requested {
        if !constants::PROCESSING_ORDER.contains(&name.as_str()) {
            return Err(PrepError::UnknownDataset(name.clone()));
        }
    }

    Ok(constants::PROCESSING_ORDER
        .into_iter()
        .filter(|id| requested.iter().any(|name| name == id))
        .collect())
}

async fn run_prepare(datasets: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let selection = parse_selection(datasets)?;

    println!("🔄 Preparing {} datasets...", selection.len());
    let sources = build_sources(&selection, &config)?;
    let store = Arc::new(CsvFileStore::new(&config.storage.output_dir));
    let processor = BatchProcessor::new(sources, store);

    let outcome = processor.run().await?;

    let stats_path = write_stats_json(&outcome.stats, Path::new(&config.storage.output_dir))?;
    info!("Wrote stats artifact to {}", stats_path);
    println!("✅ Prepared {} datasets, stats at {}", outcome.stats.len(), stats_path);
    Ok(())
}

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare { datasets } => {
            if let Err(e) = run_prepare(datasets).await {
                error!("Preparation failed: {}", e);
                println!("❌ Preparation failed: {e}");
                return Err(e.into());
            }
        }
        Commands::Datasets => {
            println!("Supported datasets (in processing order):");
            for id in constants::supported_datasets() {
                println!("   {:<12} {}", id, constants::display_name(id));
            }
        }
    }
    Ok(())
}
