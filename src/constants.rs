/// Dataset name constants to ensure consistency across the codebase
/// These names key the static source table and the on-disk folder layout

pub const ROMEO_AND_JULIET: &str = "romeo_and_juliet";
pub const WORLD_HAPPINESS: &str = "world_happiness";
pub const CATTLE_WORKBOOK: &str = "cattle";
pub const ASTRONAUTS: &str = "astronauts";
pub const PRINCESS_BRIDE: &str = "princess_bride";
pub const COVID_COUNTRIES: &str = "covid_countries";

/// Base directory for all fetched payloads and reports
pub const DEFAULT_DATA_DIR: &str = "data";

/// Column preferred for histogram rendering when present
pub const HISTOGRAM_COLUMN: &str = "c1";

/// Report filenames written next to the raw payload
pub const CSV_ANALYSIS_FILE: &str = "csv_analysis.txt";
pub const EXCEL_ANALYSIS_FILE: &str = "excel_analysis.txt";
pub const SIMPLIFIED_DATA_FILE: &str = "simplified_data.txt";
pub const HISTOGRAM_FILE: &str = "histogram.png";
