use crate::constants::DEFAULT_DATA_DIR;
use crate::error::{Result, DigestError};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: String,
    /// Optional request timeout. Absent means network calls block until the
    /// server responds.
    pub request_timeout_seconds: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            request_timeout_seconds: None,
        }
    }
}

impl Config {
    /// Loads `config.toml` from the working directory, falling back to
    /// defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = "config.toml";
        if !Path::new(config_path).exists() {
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            DigestError::Config(format!("Failed to read config file '{}': {}", config_path, e))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_unset() {
        let config = Config::default();
        assert_eq!(config.data_dir, "data");
        assert!(config.request_timeout_seconds.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("data_dir = \"elsewhere\"").unwrap();
        assert_eq!(config.data_dir, "elsewhere");
        assert!(config.request_timeout_seconds.is_none());
    }
}
