//! Type-safe 0-100 score scale.
//!
//! Health scores, benchmark percentiles and portfolio statistics all live on
//! the same 0-100 scale. `HealthScore` encodes that scale in the type so a
//! value that escaped the range upstream is clamped once, at construction,
//! instead of being re-checked by every consumer.
//!
//! # Examples
//!
//! ```rust
//! use jira_health::core::score::HealthScore;
//!
//! let score = HealthScore::new(72.4);
//! assert_eq!(score.value(), 72.4);
//! assert_eq!(score.rounded(), 72);
//!
//! // Out-of-bounds values are clamped
//! assert_eq!(HealthScore::new(140.0).value(), 100.0);
//! assert_eq!(HealthScore::new(-3.0).value(), 0.0);
//! ```

use crate::errors::{HealthError, Result};
use serde::{Deserialize, Serialize};

/// Score on the 0-100 scale, clamped at construction.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct HealthScore(f64);

impl HealthScore {
    /// Create a new score, clamping to [0.0, 100.0].
    ///
    /// NaN is not a score; use [`HealthScore::try_new`] when the input may be
    /// non-finite. A NaN passed here becomes 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 100.0))
    }

    /// Create a score, rejecting NaN and infinities.
    pub fn try_new(field: &str, value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(HealthError::non_finite(field, value));
        }
        if !(0.0..=100.0).contains(&value) {
            log::warn!("{field} value {value} outside 0-100, clamping");
        }
        Ok(Self::new(value))
    }

    /// Get the raw score value.
    pub fn value(self) -> f64 {
        self.0
    }

    /// Nearest whole score, the form every display surface uses.
    pub fn rounded(self) -> u32 {
        self.0.round() as u32
    }
}

impl std::fmt::Display for HealthScore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.rounded())
    }
}

/// Round to the nearest whole number.
pub fn round0(value: f64) -> f64 {
    value.round()
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// `part / whole` as a whole percentage; 0 when `whole` is 0.
pub fn percentage(part: usize, whole: usize) -> u32 {
    if whole > 0 {
        ((part as f64 / whole as f64) * 100.0).round() as u32
    } else {
        0
    }
}

/// `part / whole` as a fraction in [0, 1]; 0 when `whole` is 0.
pub fn fraction(part: usize, whole: usize) -> f64 {
    if whole > 0 {
        part as f64 / whole as f64
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_score_clamps_upper_bound() {
        assert_eq!(HealthScore::new(150.0).value(), 100.0);
    }

    #[test]
    fn health_score_clamps_lower_bound() {
        assert_eq!(HealthScore::new(-10.0).value(), 0.0);
    }

    #[test]
    fn health_score_nan_is_zero() {
        assert_eq!(HealthScore::new(f64::NAN).value(), 0.0);
    }

    #[test]
    fn try_new_rejects_infinity() {
        let err = HealthScore::try_new("healthScore", f64::INFINITY).unwrap_err();
        assert!(matches!(err, HealthError::NonFiniteScore { .. }));
    }

    #[test]
    fn try_new_clamps_finite_out_of_range() {
        assert_eq!(HealthScore::try_new("x", 104.0).unwrap().value(), 100.0);
    }

    #[test]
    fn rounded_uses_half_away_from_zero() {
        assert_eq!(HealthScore::new(44.5).rounded(), 45);
        assert_eq!(HealthScore::new(44.49).rounded(), 44);
    }

    #[test]
    fn percentage_handles_zero_denominator() {
        assert_eq!(percentage(3, 0), 0);
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
    }

    #[test]
    fn fraction_handles_zero_denominator() {
        assert_eq!(fraction(5, 0), 0.0);
        assert_eq!(fraction(1, 4), 0.25);
    }

    #[test]
    fn round1_keeps_one_decimal() {
        assert_eq!(round1(12.345), 12.3);
        assert_eq!(round1(12.36), 12.4);
    }
}
