//! Configuration loading for abtest-stats.
//!
//! Supports loading configuration from TOML files, with sensible defaults
//! for all settings.

use abtest_stats_core::{
    ConfigError, DifferenceType, FrequentistConfig, FrequentistTest, SequentialTwoSidedTTest,
    TwoSidedTTest,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration for abtest-stats.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Settings for the statistical test.
    pub analysis: AnalysisConfig,
    /// Settings for presenting results.
    pub output: OutputConfig,
}

/// Configuration for the statistical test.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AnalysisConfig {
    /// Significance level (e.g., 0.05 for 95% intervals).
    pub alpha: f64,
    /// Use the always-valid sequential test instead of the fixed-sample test.
    pub sequential: bool,
    /// Expected total sample size the sequential boundary is tuned for.
    pub sequential_tuning_parameter: f64,
    /// Report effects relative to the control mean or as raw differences.
    pub difference_type: DifferenceType,
    /// Effect size under the null hypothesis.
    pub test_value: f64,
}

/// How results are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Configuration for presenting results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Whether the table uses colors.
    pub color: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let defaults = FrequentistConfig::default();
        Self {
            alpha: defaults.alpha(),
            sequential: false,
            sequential_tuning_parameter: defaults.sequential_tuning_parameter(),
            difference_type: defaults.difference_type(),
            test_value: defaults.test_value(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Table,
            color: true,
        }
    }
}

impl AnalysisConfig {
    /// Validate these settings into a [`FrequentistConfig`].
    ///
    /// # Errors
    ///
    /// Returns an error if any option is out of range.
    pub fn frequentist_config(&self) -> Result<FrequentistConfig, ConfigError> {
        FrequentistConfig::builder()
            .alpha(self.alpha)
            .sequential_tuning_parameter(self.sequential_tuning_parameter)
            .difference_type(self.difference_type)
            .test_value(self.test_value)
            .build()
    }

    /// Build the configured test.
    ///
    /// # Errors
    ///
    /// Returns an error if any option is out of range.
    pub fn build_test(&self) -> Result<Box<dyn FrequentistTest>, ConfigError> {
        let config = self.frequentist_config()?;
        Ok(if self.sequential {
            Box::new(SequentialTwoSidedTTest::new(config))
        } else {
            Box::new(TwoSidedTTest::new(config))
        })
    }
}

/// Default configuration file name.
pub const DEFAULT_CONFIG_FILE: &str = ".abtest-stats.toml";

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML configuration file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Load configuration from `path` if it exists, otherwise use defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be parsed.
    pub fn load_or_default(path: &Path) -> Result<Config> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Config::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.analysis.alpha, 0.05);
        assert!(!config.analysis.sequential);
        assert_eq!(config.analysis.sequential_tuning_parameter, 5000.0);
        assert_eq!(config.analysis.difference_type, DifferenceType::Relative);
        assert_eq!(config.analysis.test_value, 0.0);
        assert_eq!(config.output.format, OutputFormat::Table);
        assert!(config.output.color);
    }

    #[test]
    fn test_load_partial_config() {
        let toml_content = r#"
[analysis]
alpha = 0.1
sequential = true
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();

        // Overridden values
        assert_eq!(config.analysis.alpha, 0.1);
        assert!(config.analysis.sequential);

        // Default values
        assert_eq!(config.analysis.sequential_tuning_parameter, 5000.0);
        assert_eq!(config.output.format, OutputFormat::Table);
    }

    #[test]
    fn test_load_full_config() {
        let toml_content = r#"
[analysis]
alpha = 0.01
sequential = true
sequential_tuning_parameter = 20000
difference_type = "absolute"
test_value = 0.5

[output]
format = "json"
color = false
"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(toml_content.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.analysis.alpha, 0.01);
        assert!(config.analysis.sequential);
        assert_eq!(config.analysis.sequential_tuning_parameter, 20000.0);
        assert_eq!(config.analysis.difference_type, DifferenceType::Absolute);
        assert_eq!(config.analysis.test_value, 0.5);
        assert_eq!(config.output.format, OutputFormat::Json);
        assert!(!config.output.color);
    }

    #[test]
    fn test_load_rejects_unknown_keys() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[analysis]\nconfidence = 0.9\n").unwrap();

        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load(Path::new("/nonexistent/path/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"this is not valid toml {{{{").unwrap();

        let result = Config::load(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/.abtest-stats.toml")).unwrap();
        assert_eq!(config.analysis.alpha, 0.05);
    }

    #[test]
    fn test_frequentist_config_validation() {
        let mut analysis = AnalysisConfig::default();
        assert!(analysis.frequentist_config().is_ok());

        analysis.alpha = 1.5;
        assert!(matches!(
            analysis.frequentist_config(),
            Err(ConfigError::InvalidAlpha(_))
        ));

        analysis.alpha = 0.05;
        analysis.sequential_tuning_parameter = 0.0;
        assert!(analysis.build_test().is_err());
    }

    #[test]
    fn test_build_test_carries_config() {
        let analysis = AnalysisConfig {
            alpha: 0.1,
            sequential: true,
            sequential_tuning_parameter: 1000.0,
            ..AnalysisConfig::default()
        };

        let test = analysis.build_test().unwrap();
        assert_eq!(test.config().alpha(), 0.1);
        assert_eq!(test.config().sequential_tuning_parameter(), 1000.0);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.analysis.alpha, parsed.analysis.alpha);
        assert_eq!(
            config.analysis.sequential_tuning_parameter,
            parsed.analysis.sequential_tuning_parameter
        );
        assert_eq!(config.output.format, parsed.output.format);
    }
}
