//! Confidence-interval precision indicator.
//!
//! Converts the width of a confidence interval into a qualitative precision
//! tier. Precision describes how reliable an estimate is, independent of
//! whether the estimate itself is good or bad: a score of 20 can be highly
//! precise and a score of 80 can rest on too little data.
//!
//! # Example
//!
//! ```rust
//! use jira_health::precision::{calculate_precision, PrecisionTier};
//!
//! let result = calculate_precision(45.0, 55.0, 0.0, 100.0).unwrap();
//! assert_eq!(result.tier, PrecisionTier::High);
//! assert_eq!(result.margin, 5);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{HealthError, Result};

/// Relative precision at or above which an estimate is `High`.
pub const HIGH_PRECISION_THRESHOLD: f64 = 85.0;
/// Relative precision at or above which an estimate is `Moderate`.
pub const MODERATE_PRECISION_THRESHOLD: f64 = 75.0;
/// Relative precision at or above which an estimate is `Low`.
pub const LOW_PRECISION_THRESHOLD: f64 = 50.0;

/// Center used when deriving an interval from a standard error.
const SE_INTERVAL_CENTER: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrecisionTier {
    Insufficient,
    Low,
    Moderate,
    High,
}

impl PrecisionTier {
    /// Tier for a relative precision in [0, 100].
    pub fn from_relative_precision(relative: f64) -> Self {
        if relative >= HIGH_PRECISION_THRESHOLD {
            PrecisionTier::High
        } else if relative >= MODERATE_PRECISION_THRESHOLD {
            PrecisionTier::Moderate
        } else if relative >= LOW_PRECISION_THRESHOLD {
            PrecisionTier::Low
        } else {
            PrecisionTier::Insufficient
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PrecisionTier::High => "High Precision",
            PrecisionTier::Moderate => "Moderate Precision",
            PrecisionTier::Low => "Low Precision",
            PrecisionTier::Insufficient => "Insufficient Data",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            PrecisionTier::High => {
                "The estimate is tightly bounded; small changes in this score are meaningful."
            }
            PrecisionTier::Moderate => {
                "The estimate is reasonably bounded; treat small differences with some caution."
            }
            PrecisionTier::Low => {
                "The estimate spans a wide range; only large differences are meaningful."
            }
            PrecisionTier::Insufficient => {
                "There is not enough data to estimate this score reliably."
            }
        }
    }

    /// Foreground and background display colors.
    pub fn colors(&self) -> (&'static str, &'static str) {
        match self {
            PrecisionTier::High => ("#00875A", "#E3FCEF"),
            PrecisionTier::Moderate => ("#0052CC", "#DEEBFF"),
            PrecisionTier::Low => ("#FF8B00", "#FFF4E5"),
            PrecisionTier::Insufficient => ("#6B778C", "#F4F5F7"),
        }
    }
}

impl std::fmt::Display for PrecisionTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative precision derived from a confidence interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecisionResult {
    pub tier: PrecisionTier,
    pub label: String,
    pub explanation: String,
    pub color: String,
    pub background_color: String,
    /// `(1 - width / range) * 100`, clamped to [0, 100] and truncated to one
    /// decimal; the tier is read from this same value
    pub relative_precision: f64,
    pub ci_width: f64,
    /// Half the interval width, rounded
    pub margin: u32,
}

/// Precision tier for the interval `[ci_lower, ci_upper]` on `[scale_min, scale_max]`.
pub fn calculate_precision(
    ci_lower: f64,
    ci_upper: f64,
    scale_min: f64,
    scale_max: f64,
) -> Result<PrecisionResult> {
    if !scale_min.is_finite() || !scale_max.is_finite() || scale_max <= scale_min {
        return Err(HealthError::InvalidScale {
            min: scale_min,
            max: scale_max,
        });
    }
    if !ci_lower.is_finite() || !ci_upper.is_finite() || ci_upper < ci_lower {
        return Err(HealthError::InvalidInterval {
            lower: ci_lower,
            upper: ci_upper,
        });
    }

    let ci_width = ci_upper - ci_lower;
    let scale_range = scale_max - scale_min;
    let relative_precision =
        truncate_to_tenth(((1.0 - ci_width / scale_range) * 100.0).clamp(0.0, 100.0));
    let tier = PrecisionTier::from_relative_precision(relative_precision);
    let (color, background_color) = tier.colors();

    Ok(PrecisionResult {
        tier,
        label: tier.label().to_string(),
        explanation: tier.explanation().to_string(),
        color: color.to_string(),
        background_color: background_color.to_string(),
        relative_precision,
        ci_width,
        margin: (ci_width / 2.0).round() as u32,
    })
}

// Truncating (never rounding up) keeps 84.96 below the 85 line it misses.
// The nudge absorbs float noise such as 89.99999999999999.
fn truncate_to_tenth(value: f64) -> f64 {
    ((value + 1e-9) * 10.0).floor() / 10.0
}

/// Precision on the default 0-100 scale.
pub fn calculate_precision_default(ci_lower: f64, ci_upper: f64) -> Result<PrecisionResult> {
    calculate_precision(ci_lower, ci_upper, 0.0, 100.0)
}

/// Two-sided z-score for a supported confidence level.
pub fn z_score(confidence_level: f64) -> Result<f64> {
    const LEVELS: [(f64, f64); 3] = [(0.90, 1.645), (0.95, 1.96), (0.99, 2.576)];
    LEVELS
        .iter()
        .find(|(level, _)| (level - confidence_level).abs() < 1e-9)
        .map(|(_, z)| *z)
        .ok_or(HealthError::UnsupportedConfidenceLevel(confidence_level))
}

/// Precision implied by a standard error.
///
/// The interval is centered at 50 with half-width `z * standard_error`, then
/// classified on `[0, scale_max]`.
pub fn calculate_precision_from_se(
    standard_error: f64,
    confidence_level: f64,
    scale_max: f64,
) -> Result<PrecisionResult> {
    if !standard_error.is_finite() || standard_error < 0.0 {
        return Err(HealthError::InvalidInterval {
            lower: -standard_error,
            upper: standard_error,
        });
    }
    let half_width = z_score(confidence_level)? * standard_error;
    calculate_precision(
        SE_INTERVAL_CENTER - half_width,
        SE_INTERVAL_CENTER + half_width,
        0.0,
        scale_max,
    )
}
