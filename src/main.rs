use clap::{Parser, Subcommand};
use std::time::Duration;
use tracing::{error, info, warn};

mod config;
mod constants;
mod error;
mod fetch;
mod histogram;
mod logging;
mod pipelines;
mod registry;
mod storage;

use crate::config::Config;
use crate::fetch::HttpFetcher;
use crate::registry::{default_sources, DatasetSource};
use crate::storage::DataStore;

#[derive(Parser)]
#[command(name = "dataset_digest")]
#[command(about = "Fetches remote datasets and writes descriptive reports")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and summarize datasets (default when no subcommand is given)
    Run {
        /// Specific datasets to run (comma-separated). See `list` for names.
        #[arg(long)]
        datasets: Option<String>,
    },
    /// List the configured datasets
    List,
}

fn select_sources(filter: Option<String>) -> Vec<DatasetSource> {
    let sources = default_sources();
    let Some(filter) = filter else {
        return sources;
    };

    let mut selected = Vec::new();
    for name in filter.split(',').map(str::trim) {
        match sources.iter().find(|s| s.name == name) {
            Some(source) => selected.push(source.clone()),
            None => {
                warn!("Unknown dataset specified");
                println!("⚠️  Unknown dataset: {}", name);
            }
        }
    }
    selected
}

async fn run_sources(sources: &[DatasetSource], fetcher: &HttpFetcher, store: &DataStore) {
    let mut succeeded = 0usize;
    let mut failed = 0usize;

    for source in sources {
        let span = tracing::info_span!("Running dataset", dataset = %source.name, format = %source.format);
        let _enter = span.enter();

        info!("Starting pipeline");
        match pipelines::run_dataset(fetcher, store, source).await {
            Ok(outcome) => {
                succeeded += 1;
                info!("Pipeline finished");
                println!("\n📊 {} ({})", outcome.dataset, source.format);
                println!("   Payload: {}", outcome.payload_file.display());
                for report in &outcome.reports {
                    println!("   Report:  {}", report.display());
                }
            }
            Err(e) => {
                failed += 1;
                error!("Pipeline failed: {}", e);
                println!("\n❌ {} ({}): {}", source.name, source.format, e);
            }
        }
    }

    println!("\n✅ Run complete: {} succeeded, {} failed", succeeded, failed);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    logging::init_logging();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Some(Commands::List) => {
            for source in default_sources() {
                println!("{:<20} {:<6} {}", source.name, source.format.to_string(), source.url);
            }
        }
        command => {
            let datasets = match command {
                Some(Commands::Run { datasets }) => datasets,
                _ => None,
            };
            let sources = select_sources(datasets);

            let store = DataStore::new(&config.data_dir);
            let timeout = config.request_timeout_seconds.map(Duration::from_secs);
            let fetcher = HttpFetcher::new(timeout)?;

            println!("🔄 Fetching {} datasets...", sources.len());
            // Per-dataset failures are logged and counted; the process still
            // exits 0
            run_sources(&sources, &fetcher, &store).await;
        }
    }
    Ok(())
}
