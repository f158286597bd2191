//! Descriptive statistics over small score collections.
//!
//! Standard deviation is the population form (divide by N): the portfolio is
//! the whole set of teams being described, not a sample of a larger one.
//! Every function returns 0 for empty input rather than NaN.

use serde::{Deserialize, Serialize};

use crate::core::score::{round0, round1};

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Weighted mean; falls back to 0 when the total weight is not positive.
pub fn weighted_mean(values: &[(f64, f64)]) -> f64 {
    let total_weight: f64 = values.iter().map(|(_, w)| w).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    values.iter().map(|(v, w)| v * w).sum::<f64>() / total_weight
}

pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Population variance.
pub fn variance(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64
}

/// Population standard deviation.
pub fn standard_deviation(values: &[f64]) -> f64 {
    variance(values).sqrt()
}

/// Standard error of the mean, `σ / √n`.
pub fn standard_error(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    standard_deviation(values) / (values.len() as f64).sqrt()
}

/// Summary statistics for one set of scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoreStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
    pub std_dev: f64,
}

impl ScoreStats {
    /// Unrounded statistics.
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        Self {
            count: values.len(),
            mean: mean(values),
            median: median(values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            std_dev: standard_deviation(values),
        }
    }

    /// Display form: whole-number scores, standard deviation to one decimal.
    pub fn rounded(&self) -> Self {
        Self {
            count: self.count,
            mean: round0(self.mean),
            median: round0(self.median),
            min: round0(self.min),
            max: round0(self.max),
            std_dev: round1(self.std_dev),
        }
    }

    pub fn spread(&self) -> f64 {
        self.max - self.min
    }
}
