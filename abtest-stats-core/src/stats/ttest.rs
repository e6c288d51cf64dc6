use tracing::debug;

use super::{Estimate, FrequentistTest, Reference};
use crate::config::FrequentistConfig;
use crate::result::TestResult;
use crate::statistic::Statistic;

/// Classical fixed-sample two-sided test using Welch's unequal-variance t-test.
///
/// The interval and p-value are valid for a single look at the data. Use
/// [`SequentialTwoSidedTTest`](super::SequentialTwoSidedTTest) when results
/// are monitored repeatedly.
#[derive(Debug, Clone, Default)]
pub struct TwoSidedTTest {
    config: FrequentistConfig,
}

impl TwoSidedTTest {
    pub fn new(config: FrequentistConfig) -> Self {
        Self { config }
    }
}

impl FrequentistTest for TwoSidedTTest {
    fn compute_result(&self, control: &Statistic, treatment: &Statistic) -> TestResult {
        let Some(estimate) = Estimate::new(control, treatment, self.config.difference_type())
        else {
            return TestResult::default();
        };
        let Some(reference) = Reference::new(estimate.dof) else {
            debug!(dof = estimate.dof, "no t distribution for degrees of freedom");
            return TestResult::default();
        };

        let std_error = estimate.std_error();
        let t_statistic = (estimate.point_estimate - self.config.test_value()) / std_error;
        let p_value = reference.two_sided_p_value(t_statistic);

        let width = reference.critical_value(self.config.alpha()) * std_error;
        let ci = [
            estimate.point_estimate - width,
            estimate.point_estimate + width,
        ];

        estimate.into_result(ci, std_error, p_value)
    }

    fn config(&self) -> &FrequentistConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DifferenceType;

    fn absolute() -> TwoSidedTTest {
        TwoSidedTTest::new(
            FrequentistConfig::builder()
                .difference_type(DifferenceType::Absolute)
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn test_identical_variations() {
        let test = TwoSidedTTest::default();
        let stat = Statistic::proportion(40, 100);

        let result = test.compute_result(&stat, &stat);

        assert_eq!(result.expected, 0.0);
        assert!((result.p_value - 1.0).abs() < 1e-12);
        assert!(result.ci[0] < 0.0 && result.ci[1] > 0.0);
        assert!(!result.is_default());
    }

    #[test]
    fn test_clearly_different_variations() {
        let test = TwoSidedTTest::default();
        let control = Statistic::proportion(1000, 10_000);
        let treatment = Statistic::proportion(1500, 10_000);

        let result = test.compute_result(&control, &treatment);

        assert!((result.expected - 0.5).abs() < 1e-12);
        assert!(result.p_value < 1e-6);
        assert!(result.ci[0] > 0.0);
        assert!(result.is_significant(0.05));
    }

    #[test]
    fn test_treatment_worse() {
        let test = TwoSidedTTest::default();
        let control = Statistic::proportion(1500, 10_000);
        let treatment = Statistic::proportion(1000, 10_000);

        let result = test.compute_result(&control, &treatment);

        assert!(result.expected < 0.0);
        assert!(result.ci[1] < 0.0);
        assert!(result.p_value < 1e-6);
    }

    #[test]
    fn test_interval_contains_estimate() {
        let test = TwoSidedTTest::default();
        let cases = [
            (Statistic::proportion(3, 10), Statistic::proportion(7, 12)),
            (
                Statistic::sample_mean(52.0, 300.0, 12),
                Statistic::sample_mean(61.0, 410.0, 15),
            ),
            (
                Statistic::sample_mean(-40.0, 220.0, 20),
                Statistic::sample_mean(-10.0, 90.0, 20),
            ),
        ];

        for (control, treatment) in cases {
            let result = test.compute_result(&control, &treatment);
            assert!(!result.is_default());
            assert!(result.ci[0] <= result.expected && result.expected <= result.ci[1]);
            assert!((0.0..=1.0).contains(&result.p_value));
            assert_eq!(result.uplift.mean, result.expected);
        }
    }

    #[test]
    fn test_insufficient_samples() {
        let test = TwoSidedTTest::default();
        let control = Statistic::sample_mean(100.0, 10_000.0, 1);
        let treatment = Statistic::sample_mean(200.0, 5000.0, 10);

        let result = test.compute_result(&control, &treatment);

        assert_eq!(result, TestResult::default());
        assert_eq!(result.p_value, 1.0);
    }

    #[test]
    fn test_zero_control_mean() {
        let test = TwoSidedTTest::default();
        let control = Statistic::sample_mean(0.0, 50.0, 10);
        let treatment = Statistic::sample_mean(10.0, 50.0, 10);

        assert!(test.compute_result(&control, &treatment).is_default());
    }

    #[test]
    fn test_zero_variance() {
        let test = TwoSidedTTest::default();
        let control = Statistic::sample_mean(20.0, 40.0, 10);
        let treatment = Statistic::sample_mean(30.0, 90.0, 10);

        let result = test.compute_result(&control, &treatment);

        assert!(result.is_default());
        assert!(result.p_value.is_finite());
    }

    #[test]
    fn test_absolute_mirror_symmetry() {
        let test = absolute();
        let control = Statistic::proportion(500, 1000);
        let more = Statistic::proportion(560, 1000);
        let fewer = Statistic::proportion(440, 1000);

        let up = test.compute_result(&control, &more);
        let down = test.compute_result(&control, &fewer);

        assert!((up.expected + down.expected).abs() < 1e-12);
        assert!((up.ci[0] + down.ci[1]).abs() < 1e-12);
        assert!((up.ci[1] + down.ci[0]).abs() < 1e-12);
        assert!((up.p_value - down.p_value).abs() < 1e-12);
        assert!((up.uplift.stddev - down.uplift.stddev).abs() < 1e-12);
    }

    #[test]
    fn test_relative_mirror_flips_estimate() {
        let test = TwoSidedTTest::default();
        let control = Statistic::proportion(500, 1000);
        let more = Statistic::proportion(560, 1000);
        let fewer = Statistic::proportion(440, 1000);

        let up = test.compute_result(&control, &more);
        let down = test.compute_result(&control, &fewer);

        assert!((up.expected + down.expected).abs() < 1e-12);
        assert!(up.ci[0] > 0.0 && down.ci[1] < 0.0);
    }

    #[test]
    fn test_test_value_shifts_p_value() {
        let control = Statistic::proportion(1000, 10_000);
        let treatment = Statistic::proportion(1200, 10_000);

        let null_zero = TwoSidedTTest::default().compute_result(&control, &treatment);
        let null_at_estimate = TwoSidedTTest::new(
            FrequentistConfig::builder().test_value(0.2).build().unwrap(),
        )
        .compute_result(&control, &treatment);

        assert!(null_zero.p_value < 0.05);
        assert!((null_at_estimate.p_value - 1.0).abs() < 1e-9);
        assert_eq!(null_zero.ci, null_at_estimate.ci);
    }

    #[test]
    fn test_smaller_alpha_widens_interval() {
        let control = Statistic::proportion(100, 1000);
        let treatment = Statistic::proportion(120, 1000);

        let wide = TwoSidedTTest::new(FrequentistConfig::builder().alpha(0.01).build().unwrap())
            .compute_result(&control, &treatment);
        let narrow = TwoSidedTTest::default().compute_result(&control, &treatment);

        assert!(wide.ci[0] < narrow.ci[0]);
        assert!(wide.ci[1] > narrow.ci[1]);
        assert_eq!(wide.p_value, narrow.p_value);
    }
}
