use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::result::TestResult;
use crate::statistic::Statistic;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// One metric's control/treatment summaries and the resulting test outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricComparison {
    pub name: String,
    pub control: Statistic,
    pub treatment: Statistic,
    pub result: TestResult,
}

pub trait Reporter: Send + Sync {
    fn report(&self, results: &[MetricComparison]) -> Result<(), ReportError>;
}

mod json;
mod terminal;
pub use json::JsonReporter;
pub use terminal::TerminalReporter;
