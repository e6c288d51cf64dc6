//! Summary statistics describing one variation of an experiment.
//!
//! These are produced by an external aggregation layer. The engine only reads
//! them; they are never mutated after construction.

use serde::{Deserialize, Serialize};

/// Summary of a continuous metric: running sum, sum of squares and count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SampleMeanStatistic {
    /// Sum of the observed values (Σx).
    pub sum: f64,
    /// Sum of the squared observed values (Σx²).
    pub sum_squares: f64,
    /// Number of observations.
    pub n: u64,
}

impl SampleMeanStatistic {
    pub fn new(sum: f64, sum_squares: f64, n: u64) -> Self {
        Self {
            sum,
            sum_squares,
            n,
        }
    }

    pub fn mean(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        self.sum / self.n as f64
    }

    /// Sample variance with Bessel's correction (n-1 denominator).
    ///
    /// Returns 0 when fewer than two observations are available. Inconsistent
    /// sums can make this negative; callers treat non-positive variance as
    /// missing.
    pub fn variance(&self) -> f64 {
        if self.n < 2 {
            return 0.0;
        }
        let n = self.n as f64;
        (self.sum_squares - self.sum.powi(2) / n) / (n - 1.0)
    }
}

/// Summary of a binary metric: number of successes out of `n` trials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProportionStatistic {
    /// Number of successes.
    pub sum: u64,
    /// Number of trials.
    pub n: u64,
}

impl ProportionStatistic {
    pub fn new(sum: u64, n: u64) -> Self {
        Self { sum, n }
    }

    pub fn mean(&self) -> f64 {
        if self.n == 0 {
            return 0.0;
        }
        self.sum as f64 / self.n as f64
    }

    /// Bernoulli variance `p(1-p)`.
    pub fn variance(&self) -> f64 {
        let p = self.mean();
        p * (1.0 - p)
    }
}

/// A variation's summary data, tagged by the kind of metric it describes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Statistic {
    SampleMean(SampleMeanStatistic),
    Proportion(ProportionStatistic),
}

impl Statistic {
    /// Shorthand for a [`SampleMeanStatistic`].
    pub fn sample_mean(sum: f64, sum_squares: f64, n: u64) -> Self {
        Statistic::SampleMean(SampleMeanStatistic::new(sum, sum_squares, n))
    }

    /// Shorthand for a [`ProportionStatistic`].
    pub fn proportion(sum: u64, n: u64) -> Self {
        Statistic::Proportion(ProportionStatistic::new(sum, n))
    }

    pub fn mean(&self) -> f64 {
        match self {
            Statistic::SampleMean(s) => s.mean(),
            Statistic::Proportion(s) => s.mean(),
        }
    }

    pub fn variance(&self) -> f64 {
        match self {
            Statistic::SampleMean(s) => s.variance(),
            Statistic::Proportion(s) => s.variance(),
        }
    }

    pub fn n(&self) -> u64 {
        match self {
            Statistic::SampleMean(s) => s.n,
            Statistic::Proportion(s) => s.n,
        }
    }

    /// Standard deviation of a single observation (0 when variance is not positive).
    pub fn stddev(&self) -> f64 {
        self.variance().max(0.0).sqrt()
    }
}

impl From<SampleMeanStatistic> for Statistic {
    fn from(stat: SampleMeanStatistic) -> Self {
        Statistic::SampleMean(stat)
    }
}

impl From<ProportionStatistic> for Statistic {
    fn from(stat: ProportionStatistic) -> Self {
        Statistic::Proportion(stat)
    }
}
