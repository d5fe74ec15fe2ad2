use crate::constants::{CSV_ANALYSIS_FILE, HISTOGRAM_FILE};
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::histogram;
use crate::pipelines::{tabular, PipelineOutcome};
use crate::registry::DatasetSource;
use crate::storage::DataStore;
use tracing::{info, instrument, warn};

#[instrument(skip(fetcher, store))]
pub async fn process(
    fetcher: &HttpFetcher,
    store: &DataStore,
    source: &DatasetSource,
) -> Result<PipelineOutcome> {
    let dir = store.dataset_dir(source.format, &source.name)?;

    let bytes = fetcher.get_bytes(&source.url).await?;
    let payload_path = store.write_bytes(&dir, &source.payload_filename(), &bytes)?;

    let frame = tabular::Frame::from_csv_path(&payload_path)?;
    info!("Columns: {:?}", frame.headers);

    let report_path = store.write_text(&dir, CSV_ANALYSIS_FILE, &tabular::analysis_report(&frame))?;
    let mut reports = vec![report_path];

    match frame.histogram_column() {
        Some((column, values)) => {
            let plot_path = dir.join(HISTOGRAM_FILE);
            match histogram::render(&plot_path, &column, &values) {
                Ok(()) => reports.push(plot_path),
                Err(e) => warn!("Histogram rendering failed for {}: {}", source.name, e),
            }
        }
        None => info!("No numeric columns available for plotting in {}", source.name),
    }

    Ok(PipelineOutcome {
        dataset: source.name.clone(),
        payload_file: payload_path,
        reports,
    })
}
