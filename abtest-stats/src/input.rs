//! Loading of pre-aggregated experiment summaries.

use abtest_stats_core::{FrequentistTest, MetricComparison, Statistic};
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Control and treatment summaries for a single metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetricInput {
    pub name: String,
    pub control: Statistic,
    pub treatment: Statistic,
}

/// All metrics of one experiment.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExperimentInput {
    pub metrics: Vec<MetricInput>,
}

impl ExperimentInput {
    /// Load an experiment from a `.json` or `.toml` file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unsupported
    /// extension, or cannot be parsed.
    pub fn load(path: &Path) -> Result<ExperimentInput> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read experiment file: {}", path.display()))?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let experiment: ExperimentInput = match extension.as_deref() {
            Some("json") => serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse experiment file: {}", path.display()))?,
            Some("toml") => toml::from_str(&content)
                .with_context(|| format!("Failed to parse experiment file: {}", path.display()))?,
            _ => bail!(
                "Unsupported experiment file type (expected .json or .toml): {}",
                path.display()
            ),
        };

        debug!(metrics = experiment.metrics.len(), "loaded experiment");
        Ok(experiment)
    }

    /// Run `test` on every metric, in input order.
    pub fn analyze(&self, test: &dyn FrequentistTest) -> Vec<MetricComparison> {
        self.metrics
            .iter()
            .map(|metric| {
                let result = test.compute_result(&metric.control, &metric.treatment);
                if result.is_default() {
                    debug!(metric = %metric.name, "not enough information to test");
                }
                MetricComparison {
                    name: metric.name.clone(),
                    control: metric.control,
                    treatment: metric.treatment,
                    result,
                }
            })
            .collect()
    }
}
