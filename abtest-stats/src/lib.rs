//! abtest-stats: frequentist analysis of pre-aggregated A/B experiment metrics
//!
//! This library wires the statistical engine from `abtest-stats-core` to a
//! command line: configuration files, experiment summary files and reporters.

pub mod cli;
pub mod config;
pub mod input;

// Re-export core types for convenience
pub use abtest_stats_core::report::{
    JsonReporter, MetricComparison, ReportError, Reporter, TerminalReporter,
};
pub use abtest_stats_core::{
    FrequentistConfig, FrequentistTest, SequentialTwoSidedTTest, Statistic, TestResult,
    TwoSidedTTest,
};

// Re-export main types from this crate
pub use cli::Cli;
pub use config::{AnalysisConfig, Config, OutputConfig, OutputFormat};
pub use input::{ExperimentInput, MetricInput};
