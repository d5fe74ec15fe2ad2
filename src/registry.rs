use crate::constants;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Payload formats the digester knows how to summarize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatasetFormat {
    Text,
    Csv,
    Excel,
    Json,
}

impl DatasetFormat {
    /// Folder label under the base data directory.
    pub fn dir_label(&self) -> &'static str {
        match self {
            DatasetFormat::Text => "txt",
            DatasetFormat::Csv => "csv",
            DatasetFormat::Excel => "excel",
            DatasetFormat::Json => "json",
        }
    }
}

impl fmt::Display for DatasetFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_label())
    }
}

/// Static descriptor for one remote dataset.
#[derive(Debug, Clone)]
pub struct DatasetSource {
    pub name: String,
    pub format: DatasetFormat,
    pub url: String,
}

impl DatasetSource {
    pub fn new(name: &str, format: DatasetFormat, url: &str) -> Self {
        Self {
            name: name.to_string(),
            format,
            url: url.to_string(),
        }
    }

    /// Filename the raw payload is persisted under. The extension selects
    /// the downstream parser, so Excel keeps the `.xls`/`.xlsx` suffix of
    /// its source URL.
    pub fn payload_filename(&self) -> String {
        format!("{}.{}", self.name, self.payload_extension())
    }

    fn payload_extension(&self) -> &'static str {
        match self.format {
            DatasetFormat::Text => "txt",
            DatasetFormat::Csv => "csv",
            DatasetFormat::Json => "json",
            DatasetFormat::Excel => {
                let path = self.url.split('?').next().unwrap_or(&self.url);
                if path.ends_with(".xls") {
                    "xls"
                } else {
                    "xlsx"
                }
            }
        }
    }
}

/// The ordered source table driving a full run.
pub fn default_sources() -> Vec<DatasetSource> {
    vec![
        DatasetSource::new(
            constants::ROMEO_AND_JULIET,
            DatasetFormat::Text,
            "https://www.gutenberg.org/cache/epub/1513/pg1513.txt",
        ),
        DatasetSource::new(
            constants::WORLD_HAPPINESS,
            DatasetFormat::Csv,
            "https://raw.githubusercontent.com/MainakRepositor/Datasets/master/World%20Happiness%20Data/2020.csv",
        ),
        DatasetSource::new(
            constants::CATTLE_WORKBOOK,
            DatasetFormat::Excel,
            "https://github.com/bharathirajatut/sample-excel-dataset/raw/master/cattle.xls",
        ),
        DatasetSource::new(
            constants::ASTRONAUTS,
            DatasetFormat::Json,
            "http://api.open-notify.org/astros.json",
        ),
        DatasetSource::new(
            constants::PRINCESS_BRIDE,
            DatasetFormat::Text,
            "https://www.evenmere.org/~bts/Random-Collected-Documents/princess_bride.html",
        ),
        DatasetSource::new(
            constants::COVID_COUNTRIES,
            DatasetFormat::Csv,
            "https://raw.githubusercontent.com/datasets/covid-19/main/data/countries-aggregated.csv",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_filename_tracks_format() {
        let source = DatasetSource::new("sample", DatasetFormat::Csv, "https://example.com/x.csv");
        assert_eq!(source.payload_filename(), "sample.csv");
    }

    #[test]
    fn excel_extension_follows_url() {
        let legacy =
            DatasetSource::new("old", DatasetFormat::Excel, "https://example.com/cattle.xls");
        assert_eq!(legacy.payload_filename(), "old.xls");

        let modern =
            DatasetSource::new("new", DatasetFormat::Excel, "https://example.com/report.xlsx");
        assert_eq!(modern.payload_filename(), "new.xlsx");

        let query = DatasetSource::new(
            "q",
            DatasetFormat::Excel,
            "https://example.com/cattle.xls?raw=true",
        );
        assert_eq!(query.payload_filename(), "q.xls");
    }

    #[test]
    fn default_table_covers_all_formats() {
        let sources = default_sources();
        assert_eq!(sources.len(), 6);
        for format in [
            DatasetFormat::Text,
            DatasetFormat::Csv,
            DatasetFormat::Excel,
            DatasetFormat::Json,
        ] {
            assert!(sources.iter().any(|s| s.format == format));
        }
    }
}
