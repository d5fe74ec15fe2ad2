use crate::error::Result;
use crate::fetch::HttpFetcher;
use crate::pipelines::PipelineOutcome;
use crate::registry::DatasetSource;
use crate::storage::DataStore;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;
use tracing::{info, instrument};

static NON_ALPHABETIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^A-Za-z\s]").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

const TOP_WORDS: usize = 10;

/// Word-frequency analysis of one text payload.
#[derive(Debug)]
pub struct TextAnalysis {
    pub total_words: usize,
    pub unique_words: usize,
    /// Alphabetic characters counted on the original text, not the
    /// normalized form.
    pub letter_count: usize,
    /// (token, count) sorted by descending count; ties keep first-seen order.
    pub frequencies: Vec<(String, usize)>,
}

pub fn analyze(text: &str) -> TextAnalysis {
    // Hyphens and slashes split words rather than joining them
    let spaced = text.replace(['-', '/'], " ");
    let cleaned = NON_ALPHABETIC.replace_all(&spaced, "").to_lowercase();
    let collapsed = WHITESPACE_RUN.replace_all(&cleaned, " ");
    let collapsed = collapsed.trim();

    let mut first_seen: HashMap<&str, usize> = HashMap::new();
    let mut frequencies: Vec<(String, usize)> = Vec::new();
    let mut total_words = 0usize;
    for token in collapsed.split_whitespace() {
        total_words += 1;
        match first_seen.get(token) {
            Some(&slot) => frequencies[slot].1 += 1,
            None => {
                first_seen.insert(token, frequencies.len());
                frequencies.push((token.to_string(), 1));
            }
        }
    }
    let unique_words = frequencies.len();
    // Stable sort keeps first-appearance order among equal counts
    frequencies.sort_by(|a, b| b.1.cmp(&a.1));

    TextAnalysis {
        total_words,
        unique_words,
        letter_count: text.chars().filter(|c| c.is_alphabetic()).count(),
        frequencies,
    }
}

pub fn render_report(analysis: &TextAnalysis) -> String {
    let mut report = format!(
        "Total Word Count: {}\nUnique Words Count: {}\nTotal Letter Count: {}\n\nTop 10 Most Frequent Words:\n",
        analysis.total_words, analysis.unique_words, analysis.letter_count
    );
    for (word, count) in analysis.frequencies.iter().take(TOP_WORDS) {
        report.push_str(&format!("{}: {}\n", word, count));
    }
    report
}

#[instrument(skip(fetcher, store))]
pub async fn process(
    fetcher: &HttpFetcher,
    store: &DataStore,
    source: &DatasetSource,
) -> Result<PipelineOutcome> {
    let dir = store.dataset_dir(source.format, &source.name)?;

    let text = fetcher.get_text(&source.url).await?;
    let payload_filename = source.payload_filename();
    let payload_path = store.write_text(&dir, &payload_filename, &text)?;

    let analysis = analyze(&text);
    info!(
        "Analyzed {}: {} words, {} unique",
        source.name, analysis.total_words, analysis.unique_words
    );

    let report_path = store.write_text(
        &dir,
        &format!("analysis_{}", payload_filename),
        &render_report(&analysis),
    )?;

    Ok(PipelineOutcome {
        dataset: source.name.clone(),
        payload_file: payload_path,
        reports: vec![report_path],
    })
}
