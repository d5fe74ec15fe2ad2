use crate::constants::HISTOGRAM_COLUMN;
use crate::error::Result;
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// One cell of a loaded table.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    fn from_csv_field(field: &str) -> Self {
        let trimmed = field.trim();
        if trimmed.is_empty() {
            return Cell::Empty;
        }
        match trimmed.parse::<f64>() {
            Ok(n) => Cell::Number(n),
            Err(_) => Cell::Text(trimmed.to_string()),
        }
    }

    fn from_excel(data: &Data) -> Self {
        match data {
            Data::Empty => Cell::Empty,
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            Data::String(s) if s.trim().is_empty() => Cell::Empty,
            Data::String(s) => Cell::Text(s.trim().to_string()),
            other => Cell::Text(other.to_string()),
        }
    }

    fn is_missing(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    fn render(&self) -> String {
        match self {
            Cell::Number(n) => fmt_number(*n),
            Cell::Text(s) => s.clone(),
            Cell::Empty => String::new(),
        }
    }
}

/// In-memory row/column table loaded from a persisted CSV or Excel file.
/// Exists only to compute the analysis report and histogram input.
#[derive(Debug)]
pub struct Frame {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl Frame {
    /// Loads a CSV file. Short rows are padded with missing cells so every
    /// row matches the header width.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record?;
            let mut row: Vec<Cell> = record.iter().map(Cell::from_csv_field).collect();
            row.resize(headers.len(), Cell::Empty);
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    /// Loads the first worksheet of an Excel workbook. The `.xls`/`.xlsx`
    /// extension of the persisted file selects the parsing engine.
    pub fn from_excel_path(path: &Path) -> Result<Self> {
        let mut workbook = open_workbook_auto(path)?;
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| calamine::Error::Msg("workbook has no sheets"))?;
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut row_iter = range.rows();
        let headers: Vec<String> = match row_iter.next() {
            Some(first) => first.iter().map(|c| c.to_string().trim().to_string()).collect(),
            None => Vec::new(),
        };

        let mut rows = Vec::new();
        for raw in row_iter {
            let mut row: Vec<Cell> = raw.iter().map(Cell::from_excel).collect();
            row.resize(headers.len(), Cell::Empty);
            rows.push(row);
        }
        Ok(Self { headers, rows })
    }

    /// A column is numeric when it has at least one value and every
    /// non-missing cell parses as a number.
    pub fn is_numeric_column(&self, index: usize) -> bool {
        let mut seen = false;
        for row in &self.rows {
            match &row[index] {
                Cell::Number(_) => seen = true,
                Cell::Empty => {}
                Cell::Text(_) => return false,
            }
        }
        seen
    }

    pub fn numeric_values(&self, index: usize) -> Vec<f64> {
        self.rows
            .iter()
            .filter_map(|row| match &row[index] {
                Cell::Number(n) => Some(*n),
                _ => None,
            })
            .collect()
    }

    pub fn missing_count(&self, index: usize) -> usize {
        self.rows.iter().filter(|row| row[index].is_missing()).count()
    }

    /// Column to plot: the designated column when present and numeric,
    /// else the first numeric column.
    pub fn histogram_column(&self) -> Option<(String, Vec<f64>)> {
        if let Some(index) = self.headers.iter().position(|h| h == HISTOGRAM_COLUMN) {
            if self.is_numeric_column(index) {
                return Some((self.headers[index].clone(), self.numeric_values(index)));
            }
        }
        (0..self.headers.len())
            .find(|&i| self.is_numeric_column(i))
            .map(|i| (self.headers[i].clone(), self.numeric_values(i)))
    }
}

/// Descriptive statistics for one numeric column, pandas-describe style.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryStats {
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; absent when fewer than two values.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

pub fn summarize(values: &[f64]) -> Option<SummaryStats> {
    if values.is_empty() {
        return None;
    }
    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;
    let std = if count > 1 {
        let variance =
            values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
        Some(variance.sqrt())
    } else {
        None
    };

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    Some(SummaryStats {
        count,
        mean,
        std,
        min: sorted[0],
        q25: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q75: quantile(&sorted, 0.75),
        max: sorted[count - 1],
    })
}

/// Linear-interpolation quantile over an already sorted slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let fraction = position - lower as f64;
    if lower + 1 < sorted.len() {
        sorted[lower] + fraction * (sorted[lower + 1] - sorted[lower])
    } else {
        sorted[lower]
    }
}

fn fmt_number(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        format!("{:.4}", value)
    }
}

const PREVIEW_ROWS: usize = 5;

/// Renders the full text analysis report: column names, a preview of the
/// first rows, per-numeric-column summary statistics, and per-column
/// missing-value counts.
pub fn analysis_report(frame: &Frame) -> String {
    let mut report = String::new();

    report.push_str("Column Names:\n");
    report.push_str(&frame.headers.join(", "));
    report.push('\n');

    report.push_str("\nData Preview:\n");
    report.push_str(&frame.headers.join(" | "));
    report.push('\n');
    for row in frame.rows.iter().take(PREVIEW_ROWS) {
        let fields: Vec<String> = row.iter().map(Cell::render).collect();
        report.push_str(&fields.join(" | "));
        report.push('\n');
    }

    report.push_str("\nSummary Statistics:\n");
    let mut any_numeric = false;
    for (index, name) in frame.headers.iter().enumerate() {
        if !frame.is_numeric_column(index) {
            continue;
        }
        if let Some(stats) = summarize(&frame.numeric_values(index)) {
            any_numeric = true;
            report.push_str(&format!("{}:\n", name));
            report.push_str(&format!("  count: {}\n", stats.count));
            report.push_str(&format!("  mean: {}\n", fmt_number(stats.mean)));
            match stats.std {
                Some(std) => report.push_str(&format!("  std: {}\n", fmt_number(std))),
                None => report.push_str("  std: n/a\n"),
            }
            report.push_str(&format!("  min: {}\n", fmt_number(stats.min)));
            report.push_str(&format!("  25%: {}\n", fmt_number(stats.q25)));
            report.push_str(&format!("  50%: {}\n", fmt_number(stats.median)));
            report.push_str(&format!("  75%: {}\n", fmt_number(stats.q75)));
            report.push_str(&format!("  max: {}\n", fmt_number(stats.max)));
        }
    }
    if !any_numeric {
        report.push_str("(no numeric columns)\n");
    }

    report.push_str("\nMissing Data:\n");
    for (index, name) in frame.headers.iter().enumerate() {
        report.push_str(&format!("{}: {}\n", name, frame.missing_count(index)));
    }

    report
}
