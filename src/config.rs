//! Configuration management for the credit scoring session

use anyhow::{Context, Result};
use config::{Config, File};
use serde::Deserialize;
use std::path::Path;

/// Default location of the configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/config.toml";

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub data: DataConfig,
    pub training: TrainingConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

/// Dataset location configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Path to the training CSV
    pub dataset_path: String,
}

/// Training pipeline configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrainingConfig {
    /// Seed shared by the resampler, the shuffle/split and the ensemble
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Fraction of the oversampled set held out and never evaluated
    #[serde(default = "default_test_ratio")]
    pub test_ratio: f64,
    /// Number of bagged trees in the ensemble
    #[serde(default = "default_ensemble_size")]
    pub ensemble_size: usize,
    /// Fraction of the training rows drawn into each bootstrap sample
    #[serde(default = "default_bootstrap_proportion")]
    pub bootstrap_proportion: f64,
    /// Neighbours consulted per synthetic minority sample
    #[serde(default = "default_smote_neighbours")]
    pub smote_neighbours: usize,
}

fn default_seed() -> u64 {
    42
}

fn default_test_ratio() -> f64 {
    0.2
}

fn default_ensemble_size() -> usize {
    100
}

fn default_bootstrap_proportion() -> f64 {
    1.0
}

fn default_smote_neighbours() -> usize {
    5
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path the gauge chart PNG is written to
    pub gauge_path: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,
    /// Log format (json, pretty)
    pub format: String,
}

impl AppConfig {
    /// Load configuration from the default file location
    pub fn load() -> Result<Self> {
        Self::load_from_path(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific path
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Load the config file when present, falling back to defaults otherwise
    pub fn load_or_default() -> Result<Self> {
        if Path::new(DEFAULT_CONFIG_PATH).exists() {
            Self::load()
        } else {
            Ok(Self::default())
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data: DataConfig {
                dataset_path: "data/credit_data.csv".to_string(),
            },
            training: TrainingConfig::default(),
            output: OutputConfig {
                gauge_path: "credit_gauge.png".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
            test_ratio: default_test_ratio(),
            ensemble_size: default_ensemble_size(),
            bootstrap_proportion: default_bootstrap_proportion(),
            smote_neighbours: default_smote_neighbours(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.data.dataset_path, "data/credit_data.csv");
        assert_eq!(config.training.seed, 42);
        assert_eq!(config.training.ensemble_size, 100);
        assert!((config.training.test_ratio - 0.2).abs() < f64::EPSILON);
        assert_eq!(config.training.smote_neighbours, 5);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            concat!(
                "[data]\ndataset_path = \"other.csv\"\n",
                "[training]\nseed = 7\n",
                "[output]\ngauge_path = \"out.png\"\n",
                "[logging]\nlevel = \"debug\"\nformat = \"json\"\n",
            )
        )
        .unwrap();

        let config = AppConfig::load_from_path(&path).unwrap();
        assert_eq!(config.data.dataset_path, "other.csv");
        assert_eq!(config.training.seed, 7);
        // unspecified training keys fall back to their defaults
        assert_eq!(config.training.ensemble_size, 100);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_missing_config_file_is_an_error() {
        assert!(AppConfig::load_from_path("does/not/exist.toml").is_err());
    }
}
