use crate::error::{PrepError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

const CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetch: FetchConfig,
    pub storage: StorageConfig,
    pub creditcard: CreditcardConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory where downloaded dataset archives are cached.
    pub cache_dir: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Directory where prepared tables and the stats artifact are written.
    pub output_dir: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CreditcardConfig {
    /// The credit-card set is distributed under a Kaggle license and cannot
    /// be fetched anonymously, so it is read from a local file.
    pub path: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            cache_dir: "data/raw".to_string(),
            timeout_seconds: 300,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_dir: "data/prepared".to_string(),
        }
    }
}

impl Default for CreditcardConfig {
    fn default() -> Self {
        Self {
            path: "data/creditcard.csv".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            storage: StorageConfig::default(),
            creditcard: CreditcardConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to the
    /// built-in defaults when the file does not exist.
    pub fn load() -> Result<Self> {
        if !Path::new(CONFIG_PATH).exists() {
            debug!("{} not found, using default configuration", CONFIG_PATH);
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(CONFIG_PATH).map_err(|e| {
            PrepError::Config(format!("Failed to read config file '{CONFIG_PATH}': {e}"))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.storage.output_dir, "data/prepared");
        assert_eq!(config.creditcard.path, "data/creditcard.csv");
        assert!(config.fetch.timeout_seconds > 0);
    }

    #[test]
    fn partial_config_fills_in_defaults() {
        let config: Config = toml::from_str("[storage]\noutput_dir = \"elsewhere\"\n").unwrap();
        assert_eq!(config.storage.output_dir, "elsewhere");
        assert_eq!(config.fetch.cache_dir, "data/raw");
    }
}
