//! Options controlling how a frequentist test is computed.
//!
//! A [`FrequentistConfig`] can only be obtained through its builder or through
//! deserialization, both of which validate every option, so the engine never
//! sees an out-of-range significance level or tuning parameter.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default significance level.
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Default a-priori guess of the total sample size for sequential tests.
pub const DEFAULT_SEQUENTIAL_TUNING_PARAMETER: f64 = 5000.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("alpha must be strictly between 0 and 1, got {0}")]
    InvalidAlpha(f64),
    #[error("sequential_tuning_parameter must be a positive finite number, got {0}")]
    InvalidTuningParameter(f64),
    #[error("test_value must be finite, got {0}")]
    InvalidTestValue(f64),
}

/// Whether effects are reported relative to the control mean or as raw differences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceType {
    /// `(mean_b - mean_a) / mean_a`
    #[default]
    Relative,
    /// `mean_b - mean_a`
    Absolute,
}

/// Validated test configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFrequentistConfig", into = "RawFrequentistConfig")]
pub struct FrequentistConfig {
    alpha: f64,
    sequential_tuning_parameter: f64,
    test_value: f64,
    difference_type: DifferenceType,
}

impl Default for FrequentistConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            sequential_tuning_parameter: DEFAULT_SEQUENTIAL_TUNING_PARAMETER,
            test_value: 0.0,
            difference_type: DifferenceType::Relative,
        }
    }
}

impl FrequentistConfig {
    pub fn builder() -> FrequentistConfigBuilder {
        FrequentistConfigBuilder::default()
    }

    /// Significance level; intervals are reported at `1 - alpha` confidence.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Expected total sample size used to calibrate the sequential mixture.
    pub fn sequential_tuning_parameter(&self) -> f64 {
        self.sequential_tuning_parameter
    }

    /// Effect size under the null hypothesis.
    pub fn test_value(&self) -> f64 {
        self.test_value
    }

    pub fn difference_type(&self) -> DifferenceType {
        self.difference_type
    }
}

/// Builder for [`FrequentistConfig`]. Unset options take their defaults.
#[derive(Debug, Clone, Default)]
pub struct FrequentistConfigBuilder {
    alpha: Option<f64>,
    sequential_tuning_parameter: Option<f64>,
    test_value: Option<f64>,
    difference_type: Option<DifferenceType>,
}

impl FrequentistConfigBuilder {
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    pub fn sequential_tuning_parameter(mut self, tuning_parameter: f64) -> Self {
        self.sequential_tuning_parameter = Some(tuning_parameter);
        self
    }

    pub fn test_value(mut self, test_value: f64) -> Self {
        self.test_value = Some(test_value);
        self
    }

    pub fn difference_type(mut self, difference_type: DifferenceType) -> Self {
        self.difference_type = Some(difference_type);
        self
    }

    /// Resolve defaults and validate.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first option that is out of range.
    pub fn build(self) -> Result<FrequentistConfig, ConfigError> {
        let alpha = self.alpha.unwrap_or(DEFAULT_ALPHA);
        if !(alpha > 0.0 && alpha < 1.0) {
            return Err(ConfigError::InvalidAlpha(alpha));
        }

        let sequential_tuning_parameter = self
            .sequential_tuning_parameter
            .unwrap_or(DEFAULT_SEQUENTIAL_TUNING_PARAMETER);
        if !(sequential_tuning_parameter.is_finite() && sequential_tuning_parameter > 0.0) {
            return Err(ConfigError::InvalidTuningParameter(
                sequential_tuning_parameter,
            ));
        }

        let test_value = self.test_value.unwrap_or(0.0);
        if !test_value.is_finite() {
            return Err(ConfigError::InvalidTestValue(test_value));
        }

        Ok(FrequentistConfig {
            alpha,
            sequential_tuning_parameter,
            test_value,
            difference_type: self.difference_type.unwrap_or_default(),
        })
    }
}

/// Wire shape of [`FrequentistConfig`]; every option is optional and unknown
/// option names are rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawFrequentistConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    alpha: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sequential_tuning_parameter: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    test_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    difference_type: Option<DifferenceType>,
}

impl TryFrom<RawFrequentistConfig> for FrequentistConfig {
    type Error = ConfigError;

    fn try_from(raw: RawFrequentistConfig) -> Result<Self, Self::Error> {
        FrequentistConfigBuilder {
            alpha: raw.alpha,
            sequential_tuning_parameter: raw.sequential_tuning_parameter,
            test_value: raw.test_value,
            difference_type: raw.difference_type,
        }
        .build()
    }
}

impl From<FrequentistConfig> for RawFrequentistConfig {
    fn from(config: FrequentistConfig) -> Self {
        Self {
            alpha: Some(config.alpha),
            sequential_tuning_parameter: Some(config.sequential_tuning_parameter),
            test_value: Some(config.test_value),
            difference_type: Some(config.difference_type),
        }
    }
}
