use serde::{Deserialize, Serialize};

/// Family of the approximate sampling distribution reported for the uplift.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpliftDistribution {
    #[default]
    Normal,
}

/// Approximate sampling distribution of the effect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Uplift {
    pub dist: UpliftDistribution,
    pub mean: f64,
    pub stddev: f64,
}

/// Outcome of comparing a treatment against a control.
///
/// The [`Default`] value is the sentinel for "not enough information to
/// test": every effect field is zero and `p_value` is exactly 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Point estimate of the effect (relative or absolute per configuration).
    pub expected: f64,
    /// `[lower, upper]` bounds at the configured confidence level.
    pub ci: [f64; 2],
    /// Normal approximation of the effect. For the fixed-sample test
    /// `stddev` is the standard error of `expected`. For the sequential test
    /// it is the interval half-width divided by `z_{1-alpha/2}`, so a normal
    /// with this spread reproduces `ci`; it grows quickly as `alpha`
    /// approaches 1.
    pub uplift: Uplift,
    pub p_value: f64,
}

impl Default for TestResult {
    fn default() -> Self {
        Self {
            expected: 0.0,
            ci: [0.0, 0.0],
            uplift: Uplift::default(),
            p_value: 1.0,
        }
    }
}

/// Direction of a result, judged by whether the interval excludes the null value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// The whole interval lies above the null value.
    Better,
    /// The whole interval lies below the null value.
    Worse,
    Inconclusive,
    /// The comparison resolved to the degenerate sentinel.
    InsufficientData,
}

impl TestResult {
    /// Whether this is the degenerate sentinel.
    pub fn is_default(&self) -> bool {
        *self == TestResult::default()
    }

    pub fn is_significant(&self, alpha: f64) -> bool {
        !self.is_default() && self.p_value < alpha
    }

    pub fn verdict(&self, test_value: f64) -> Verdict {
        if self.is_default() {
            Verdict::InsufficientData
        } else if self.ci[0] > test_value {
            Verdict::Better
        } else if self.ci[1] < test_value {
            Verdict::Worse
        } else {
            Verdict::Inconclusive
        }
    }
}
