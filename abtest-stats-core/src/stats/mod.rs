use statrs::distribution::{ContinuousCDF, Normal, StudentsT};
use tracing::{debug, trace};

use crate::config::{DifferenceType, FrequentistConfig};
use crate::result::{TestResult, Uplift, UpliftDistribution};
use crate::statistic::Statistic;

/// A two-sample test comparing a treatment variation against a control.
pub trait FrequentistTest: Send + Sync {
    /// Compare `treatment` (b) against `control` (a).
    ///
    /// Never fails: statistically degenerate input resolves to
    /// [`TestResult::default`].
    fn compute_result(&self, control: &Statistic, treatment: &Statistic) -> TestResult;

    fn config(&self) -> &FrequentistConfig;
}

/// Quantities shared by the fixed-sample and sequential tests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Estimate {
    /// Effect estimate on the configured scale.
    pub point_estimate: f64,
    /// Variance of `point_estimate`.
    pub variance: f64,
    /// Welch–Satterthwaite degrees of freedom.
    pub dof: f64,
    pub n_a: f64,
    pub n_b: f64,
}

impl Estimate {
    /// Derive the effect estimate, or `None` if the inputs cannot be tested.
    pub(crate) fn new(
        control: &Statistic,
        treatment: &Statistic,
        difference_type: DifferenceType,
    ) -> Option<Self> {
        if control.n() < 2 || treatment.n() < 2 {
            debug!(
                n_a = control.n(),
                n_b = treatment.n(),
                "insufficient sample size"
            );
            return None;
        }

        let (mean_a, var_a, n_a) = (control.mean(), control.variance(), control.n() as f64);
        let (mean_b, var_b, n_b) = (treatment.mean(), treatment.variance(), treatment.n() as f64);

        if difference_type == DifferenceType::Relative && mean_a == 0.0 {
            debug!("control mean is zero");
            return None;
        }
        if !(var_a > 0.0 && var_b > 0.0 && var_a.is_finite() && var_b.is_finite()) {
            debug!(var_a, var_b, "missing or zero variance");
            return None;
        }

        let (point_estimate, variance) = match difference_type {
            DifferenceType::Relative => (
                (mean_b - mean_a) / mean_a,
                relative_variance(mean_a, var_a, n_a, mean_b, var_b, n_b),
            ),
            DifferenceType::Absolute => (mean_b - mean_a, var_a / n_a + var_b / n_b),
        };
        let dof = welch_satterthwaite_df(var_a, n_a, var_b, n_b);

        if !(point_estimate.is_finite() && variance.is_finite() && variance > 0.0) {
            debug!(point_estimate, variance, "non-finite effect estimate");
            return None;
        }
        if dof.is_nan() || dof <= 0.0 {
            debug!(dof, "invalid degrees of freedom");
            return None;
        }

        trace!(point_estimate, variance, dof, "effect estimate");
        Some(Self {
            point_estimate,
            variance,
            dof,
            n_a,
            n_b,
        })
    }

    pub(crate) fn std_error(&self) -> f64 {
        self.variance.sqrt()
    }

    /// Assemble a result, falling back to the sentinel if anything is non-finite.
    pub(crate) fn into_result(self, ci: [f64; 2], stddev: f64, p_value: f64) -> TestResult {
        let all_finite = [self.point_estimate, ci[0], ci[1], stddev, p_value]
            .iter()
            .all(|v| v.is_finite());
        if !all_finite {
            debug!(?ci, stddev, p_value, "non-finite test output");
            return TestResult::default();
        }

        TestResult {
            expected: self.point_estimate,
            ci,
            uplift: Uplift {
                dist: UpliftDistribution::Normal,
                mean: self.point_estimate,
                stddev,
            },
            p_value: p_value.clamp(0.0, 1.0),
        }
    }
}

/// Delta-method variance of `(mean_b - mean_a) / mean_a`.
///
/// var = var_b / (mean_a² n_b) + var_a mean_b² / (mean_a⁴ n_a)
fn relative_variance(mean_a: f64, var_a: f64, n_a: f64, mean_b: f64, var_b: f64, n_b: f64) -> f64 {
    var_b / (mean_a.powi(2) * n_b) + var_a * mean_b.powi(2) / (mean_a.powi(4) * n_a)
}

/// Calculate degrees of freedom using the Welch-Satterthwaite equation.
///
/// df = (var1/n1 + var2/n2)^2 / ((var1/n1)^2/(n1-1) + (var2/n2)^2/(n2-1))
fn welch_satterthwaite_df(var1: f64, n1: f64, var2: f64, n2: f64) -> f64 {
    let s1 = var1 / n1;
    let s2 = var2 / n2;
    let numerator = (s1 + s2).powi(2);
    let denominator = s1.powi(2) / (n1 - 1.0) + s2.powi(2) / (n2 - 1.0);

    if denominator == 0.0 {
        // Fallback to minimum df when variances are zero
        return n1.min(n2) - 1.0;
    }

    numerator / denominator
}

/// Degrees of freedom above which Student's t is replaced by the standard
/// normal. The two quantiles agree to about 1e-5 here, and statrs' t
/// routines stop converging somewhere past 1e6.
const NORMAL_APPROX_DOF: f64 = 1e5;

/// Reference distribution of the test statistic: Student's t, or the standard
/// normal once the degrees of freedom are large.
#[derive(Debug, Clone)]
pub(crate) enum Reference {
    StudentsT(StudentsT),
    Normal(Normal),
}

impl Reference {
    pub(crate) fn new(dof: f64) -> Option<Self> {
        if dof > NORMAL_APPROX_DOF {
            return Reference::standard_normal();
        }
        StudentsT::new(0.0, 1.0, dof).ok().map(Reference::StudentsT)
    }

    pub(crate) fn standard_normal() -> Option<Self> {
        Normal::new(0.0, 1.0).ok().map(Reference::Normal)
    }

    pub(crate) fn cdf(&self, x: f64) -> f64 {
        match self {
            Reference::StudentsT(d) => d.cdf(x),
            Reference::Normal(d) => d.cdf(x),
        }
    }

    pub(crate) fn inverse_cdf(&self, p: f64) -> f64 {
        match self {
            Reference::StudentsT(d) => d.inverse_cdf(p),
            Reference::Normal(d) => d.inverse_cdf(p),
        }
    }

    /// Two-sided p-value `2 * P(T > |t|)`.
    pub(crate) fn two_sided_p_value(&self, t: f64) -> f64 {
        2.0 * (1.0 - self.cdf(t.abs()))
    }

    /// Quantile bounding a two-sided interval at level `1 - alpha`.
    pub(crate) fn critical_value(&self, alpha: f64) -> f64 {
        self.inverse_cdf(1.0 - alpha / 2.0)
    }
}

mod sequential;
mod ttest;
pub use sequential::SequentialTwoSidedTTest;
pub use ttest::TwoSidedTTest;
