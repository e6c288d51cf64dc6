use tracing::{debug, trace};

use super::{Estimate, FrequentistTest, Reference};
use crate::config::FrequentistConfig;
use crate::result::TestResult;
use crate::statistic::Statistic;

/// Two-sided test whose intervals form an always-valid confidence sequence.
///
/// The interval is the normal-mixture boundary of an asymptotic confidence
/// sequence. The mixing variance is tuned so the boundary is tightest around
/// `sequential_tuning_parameter` total observations. The chance that any
/// interval in the sequence ever excludes the true effect stays below
/// `alpha`, however often results are looked at.
#[derive(Debug, Clone, Default)]
pub struct SequentialTwoSidedTTest {
    config: FrequentistConfig,
}

/// Quantities of the mixture boundary at the current sample size.
#[derive(Debug, Clone, Copy)]
struct MixtureBoundary {
    /// `N² ρ²`
    scale: f64,
    /// `N ρ² σ² + 1`
    shrinkage: f64,
}

impl MixtureBoundary {
    fn new(estimate: &Estimate, alpha: f64, tuning_parameter: f64) -> Self {
        let n = estimate.n_a + estimate.n_b;
        let rho2 = mixing_variance(alpha, tuning_parameter);
        // Per-observation variance of the effect at the combined sample size.
        let sigma2 = estimate.variance * n;

        Self {
            scale: n.powi(2) * rho2,
            shrinkage: n * rho2 * sigma2 + 1.0,
        }
    }

    /// Half-width of the interval at level `1 - alpha`.
    fn radius(&self, alpha: f64) -> f64 {
        (2.0 * self.shrinkage / self.scale * (self.shrinkage.sqrt() / alpha).ln()).sqrt()
    }

    /// Smallest level at which an interval of this boundary excludes a point
    /// `distance` away from the estimate.
    fn p_value(&self, distance: f64) -> f64 {
        self.shrinkage.sqrt() * (-self.scale * distance.powi(2) / (2.0 * self.shrinkage)).exp()
    }
}

/// Mixing variance `ρ²` that minimizes the boundary width at `tuning_parameter`
/// total observations.
fn mixing_variance(alpha: f64, tuning_parameter: f64) -> f64 {
    let log_alpha = -2.0 * alpha.ln();
    (log_alpha + (log_alpha + 1.0).ln()) / tuning_parameter
}

impl SequentialTwoSidedTTest {
    pub fn new(config: FrequentistConfig) -> Self {
        Self { config }
    }
}

impl FrequentistTest for SequentialTwoSidedTTest {
    fn compute_result(&self, control: &Statistic, treatment: &Statistic) -> TestResult {
        let Some(estimate) = Estimate::new(control, treatment, self.config.difference_type())
        else {
            return TestResult::default();
        };
        let Some(normal) = Reference::standard_normal() else {
            debug!("standard normal unavailable");
            return TestResult::default();
        };

        let alpha = self.config.alpha();
        let boundary =
            MixtureBoundary::new(&estimate, alpha, self.config.sequential_tuning_parameter());
        let radius = boundary.radius(alpha);
        trace!(radius, ?boundary, "confidence sequence boundary");

        let ci = [
            estimate.point_estimate - radius,
            estimate.point_estimate + radius,
        ];

        let distance = estimate.point_estimate - self.config.test_value();
        let p_value = if distance.abs() <= radius {
            1.0
        } else {
            boundary.p_value(distance)
        };

        let stddev = radius / normal.critical_value(alpha);
        estimate.into_result(ci, stddev, p_value)
    }

    fn config(&self) -> &FrequentistConfig {
        &self.config
    }
}
