use crate::error::Result;
use crate::registry::DatasetFormat;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Filesystem layout manager for fetched payloads and their reports.
///
/// Layout is `<base>/<format>/<dataset_name>/`, with the raw payload and all
/// derived report files sharing the dataset directory.
pub struct DataStore {
    base: PathBuf,
}

impl DataStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Returns the directory for a dataset, creating it (and any parents)
    /// if needed. Repeated calls are idempotent.
    pub fn dataset_dir(&self, format: DatasetFormat, name: &str) -> Result<PathBuf> {
        let dir = self.base.join(format.dir_label()).join(name);
        fs::create_dir_all(&dir)?;
        Ok(dir)
    }

    /// Writes UTF-8 text into a dataset directory, replacing prior content.
    pub fn write_text(&self, dir: &Path, filename: &str, contents: &str) -> Result<PathBuf> {
        let path = dir.join(filename);
        fs::write(&path, contents)?;
        info!("Text data saved to {}", path.display());
        Ok(path)
    }

    /// Writes raw bytes into a dataset directory, replacing prior content.
    pub fn write_bytes(&self, dir: &Path, filename: &str, contents: &[u8]) -> Result<PathBuf> {
        let path = dir.join(filename);
        fs::write(&path, contents)?;
        info!("Raw data saved to {}", path.display());
        Ok(path)
    }
}
