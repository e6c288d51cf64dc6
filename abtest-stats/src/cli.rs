//! Command-line interface for abtest-stats.

use crate::config::{Config, OutputFormat, DEFAULT_CONFIG_FILE};
use abtest_stats_core::DifferenceType;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "abtest-stats")]
#[command(about = "Frequentist and always-valid sequential tests for A/B experiment metrics")]
#[command(version)]
pub struct Cli {
    /// Experiment summary file (.json or .toml)
    pub input: PathBuf,

    /// Significance level (0.0-1.0)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Use the always-valid sequential test
    #[arg(long)]
    pub sequential: bool,

    /// Expected total sample size for the sequential test
    #[arg(long)]
    pub tuning_parameter: Option<f64>,

    /// Report absolute differences instead of relative uplift
    #[arg(long)]
    pub absolute: bool,

    /// Effect size under the null hypothesis
    #[arg(long, allow_hyphen_values = true)]
    pub test_value: Option<f64>,

    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Path to config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: String,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Apply CLI overrides to the configuration.
    ///
    /// CLI arguments take precedence over config file values.
    /// Only non-None optional values and set flags will override the config.
    pub fn apply_to_config(&self, config: &mut Config) {
        if let Some(alpha) = self.alpha {
            config.analysis.alpha = alpha;
        }

        if self.sequential {
            config.analysis.sequential = true;
        }

        if let Some(tuning_parameter) = self.tuning_parameter {
            config.analysis.sequential_tuning_parameter = tuning_parameter;
        }

        if self.absolute {
            config.analysis.difference_type = DifferenceType::Absolute;
        }

        if let Some(test_value) = self.test_value {
            config.analysis.test_value = test_value;
        }

        if let Some(format) = self.format {
            config.output.format = format;
        }

        if self.no_color {
            config.output.color = false;
        }
    }
}
