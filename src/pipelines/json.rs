use crate::constants::SIMPLIFIED_DATA_FILE;
use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::pipelines::PipelineOutcome;
use crate::registry::DatasetSource;
use crate::storage::DataStore;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

/// Serializes a JSON value with four-space indentation, the canonical form
/// the raw payload is rewritten in.
fn to_indented_json(value: &Value) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

/// Astronaut-roster report: one line per `people` entry plus a total.
/// Deliberately specific to the open-notify response shape.
pub fn simplify(value: &Value) -> String {
    let mut lines: Vec<String> = Vec::new();

    let people = value.get("people").and_then(Value::as_array);
    if let Some(people) = people {
        lines.push("Astronauts currently in space:".to_string());
        for person in people {
            let name = person.get("name").and_then(Value::as_str).unwrap_or("unknown");
            let craft = person.get("craft").and_then(Value::as_str).unwrap_or("unknown");
            lines.push(format!("- {} aboard {}", name, craft));
        }
    }

    let total = people.map(|p| p.len()).unwrap_or(0);
    lines.push(format!("\nTotal number of astronauts in space: {}", total));
    lines.join("\n")
}

#[instrument(skip(fetcher, store))]
pub async fn process(
    fetcher: &HttpFetcher,
    store: &DataStore,
    source: &DatasetSource,
) -> Result<PipelineOutcome> {
    let dir = store.dataset_dir(source.format, &source.name)?;

    let bytes = fetcher.get_bytes(&source.url).await?;
    let value: Value = serde_json::from_slice(&bytes)?;

    // Normalize-and-rewrite: the parsed structure goes to disk indented,
    // not the raw response bytes
    let payload_path =
        store.write_text(&dir, &source.payload_filename(), &to_indented_json(&value)?)?;

    let report_path = store.write_text(&dir, SIMPLIFIED_DATA_FILE, &simplify(&value))?;

    Ok(PipelineOutcome {
        dataset: source.name.clone(),
        payload_file: payload_path,
        reports: vec![report_path],
    })
}
