//! Core types and statistical tests for abtest-stats.
//!
//! Given pre-aggregated summary statistics for a control and a treatment
//! variation, this crate computes a point estimate, confidence interval,
//! p-value and uplift distribution, either for a single fixed look
//! ([`TwoSidedTTest`]) or as an always-valid confidence sequence that can be
//! monitored continuously ([`SequentialTwoSidedTTest`]).

pub mod config;
pub mod report;
pub mod result;
pub mod statistic;
pub mod stats;

// Re-export main types for convenience
pub use config::{ConfigError, DifferenceType, FrequentistConfig, FrequentistConfigBuilder};
pub use report::{JsonReporter, MetricComparison, ReportError, Reporter, TerminalReporter};
pub use result::{TestResult, Uplift, UpliftDistribution, Verdict};
pub use statistic::{ProportionStatistic, SampleMeanStatistic, Statistic};
pub use stats::{FrequentistTest, SequentialTwoSidedTTest, TwoSidedTTest};
