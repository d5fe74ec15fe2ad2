use anyhow::Result;
use dataset_digest::error::DigestError;
use dataset_digest::fetch::HttpFetcher;
use dataset_digest::pipelines::run_dataset;
use dataset_digest::registry::{DatasetFormat, DatasetSource};
use dataset_digest::storage::DataStore;
use std::fs;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer, name: &str, format: DatasetFormat, route: &str) -> DatasetSource {
    DatasetSource::new(name, format, &format!("{}{}", server.uri(), route))
}

#[tokio::test]
async fn csv_pipeline_writes_payload_and_report() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/happiness.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("c1,label\n1,a\n2,b\n3,c\n"))
        .mount(&server)
        .await;

    let tmp = tempdir()?;
    let store = DataStore::new(tmp.path());
    let fetcher = HttpFetcher::new(None)?;
    let source = source_for(&server, "happiness", DatasetFormat::Csv, "/happiness.csv");

    let outcome = run_dataset(&fetcher, &store, &source).await?;

    let payload = fs::read_to_string(&outcome.payload_file)?;
    assert_eq!(payload, "c1,label\n1,a\n2,b\n3,c\n");
    assert!(outcome.payload_file.ends_with("csv/happiness/happiness.csv"));

    let report = fs::read_to_string(tmp.path().join("csv/happiness/csv_analysis.txt"))?;
    assert!(report.contains("c1, label"));
    assert!(report.contains("mean: 2"));
    assert!(report.contains("min: 1"));
    assert!(report.contains("max: 3"));
    assert!(report.contains("Missing Data:"));
    Ok(())
}

#[tokio::test]
async fn rerun_overwrites_existing_reports() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/data.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("c1\n1\n2\n3\n"))
        .mount(&server)
        .await;

    let tmp = tempdir()?;
    let store = DataStore::new(tmp.path());
    let fetcher = HttpFetcher::new(None)?;
    let source = source_for(&server, "repeat", DatasetFormat::Csv, "/data.csv");

    run_dataset(&fetcher, &store, &source).await?;
    // Second run over the populated folder must succeed and overwrite
    run_dataset(&fetcher, &store, &source).await?;

    let report = fs::read_to_string(tmp.path().join("csv/repeat/csv_analysis.txt"))?;
    assert!(report.contains("mean: 2"));
    Ok(())
}

#[tokio::test]
async fn failed_fetch_writes_no_payload_and_other_datasets_continue() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing.csv"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/present.csv"))
        .respond_with(ResponseTemplate::new(200).set_body_string("c1\n1\n"))
        .mount(&server)
        .await;

    let tmp = tempdir()?;
    let store = DataStore::new(tmp.path());
    let fetcher = HttpFetcher::new(None)?;

    let missing = source_for(&server, "missing", DatasetFormat::Csv, "/missing.csv");
    let result = run_dataset(&fetcher, &store, &missing).await;
    match result {
        Err(DigestError::Status { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected status error, got {:?}", other.map(|o| o.dataset)),
    }

    // Folder may exist, but nothing was written into it
    let dir = tmp.path().join("csv/missing");
    let entries: Vec<_> = fs::read_dir(&dir)?.collect();
    assert!(entries.is_empty());

    // The failure does not poison later datasets
    let present = source_for(&server, "present", DatasetFormat::Csv, "/present.csv");
    let outcome = run_dataset(&fetcher, &store, &present).await?;
    assert!(outcome.payload_file.exists());
    Ok(())
}

#[tokio::test]
async fn json_pipeline_normalizes_payload_and_simplifies() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/astros.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"people":[{"name":"A","craft":"ISS"},{"name":"B","craft":"ISS"}],"number":2}"#,
        ))
        .mount(&server)
        .await;

    let tmp = tempdir()?;
    let store = DataStore::new(tmp.path());
    let fetcher = HttpFetcher::new(None)?;
    let source = source_for(&server, "astros", DatasetFormat::Json, "/astros.json");

    let outcome = run_dataset(&fetcher, &store, &source).await?;

    // Rewritten in indented form, not a byte passthrough
    let payload = fs::read_to_string(&outcome.payload_file)?;
    assert!(payload.contains("\n    \"people\""));

    let report = fs::read_to_string(tmp.path().join("json/astros/simplified_data.txt"))?;
    assert!(report.contains("- A aboard ISS"));
    assert!(report.contains("- B aboard ISS"));
    assert!(report.contains("Total number of astronauts in space: 2"));
    Ok(())
}

#[tokio::test]
async fn text_pipeline_counts_words() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/play.txt"))
        .respond_with(ResponseTemplate::new(200).set_body_string("Two households, both alike in dignity, both fair."))
        .mount(&server)
        .await;

    let tmp = tempdir()?;
    let store = DataStore::new(tmp.path());
    let fetcher = HttpFetcher::new(None)?;
    let source = source_for(&server, "play", DatasetFormat::Text, "/play.txt");

    let outcome = run_dataset(&fetcher, &store, &source).await?;
    assert!(outcome.payload_file.ends_with("txt/play/play.txt"));

    let report = fs::read_to_string(tmp.path().join("txt/play/analysis_play.txt"))?;
    assert!(report.contains("Total Word Count: 8"));
    assert!(report.contains("Unique Words Count: 7"));
    assert!(report.contains("both: 2"));
    Ok(())
}

#[tokio::test]
async fn excel_parse_failure_is_reported_not_fatal() -> Result<()> {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/junk.xlsx"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"not a workbook".to_vec()))
        .mount(&server)
        .await;

    let tmp = tempdir()?;
    let store = DataStore::new(tmp.path());
    let fetcher = HttpFetcher::new(None)?;
    let source = source_for(&server, "junk", DatasetFormat::Excel, "/junk.xlsx");

    let result = run_dataset(&fetcher, &store, &source).await;
    assert!(result.is_err());

    // The raw payload was still persisted before parsing failed
    assert!(tmp.path().join("excel/junk/junk.xlsx").exists());
    Ok(())
}
