pub mod csv;
pub mod excel;
pub mod json;
pub mod tabular;
pub mod text;

use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::registry::{DatasetFormat, DatasetSource};
use crate::storage::DataStore;
use std::path::PathBuf;

/// What one successful pipeline run produced.
#[derive(Debug)]
pub struct PipelineOutcome {
    pub dataset: String,
    pub payload_file: PathBuf,
    pub reports: Vec<PathBuf>,
}

/// Dispatches a dataset to the pipeline matching its declared format.
/// Each pipeline is fetch → persist → summarize; a failure anywhere skips
/// the rest of that dataset and surfaces as the returned error.
pub async fn run_dataset(
    fetcher: &HttpFetcher,
    store: &DataStore,
    source: &DatasetSource,
) -> Result<PipelineOutcome> {
    match source.format {
        DatasetFormat::Text => text::process(fetcher, store, source).await,
        DatasetFormat::Csv => csv::process(fetcher, store, source).await,
        DatasetFormat::Excel => excel::process(fetcher, store, source).await,
        DatasetFormat::Json => json::process(fetcher, store, source).await,
    }
}
