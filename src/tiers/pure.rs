/// Pure indicator tier classification.
///
/// Classification compares against each tier's upper bound in ascending
/// order, so fractional percentiles between integer bands (25.5) land in the
/// higher band and the five tiers cover [0, 100] without gaps.
use serde::{Deserialize, Serialize};

use super::{IndicatorTier, INDICATOR_TIERS};
use crate::core::{DimensionResult, HealthScore};
use crate::core::score::percentage;

/// Classify a percentile into its tier.
///
/// Out-of-range input is clamped to [0, 100]. NaN is treated as the lowest
/// tier so an unreadable measurement is surfaced as a risk, not hidden.
pub fn indicator_tier(percentile: f64) -> &'static IndicatorTier {
    if percentile.is_nan() {
        log::warn!("NaN percentile classified as {}", INDICATOR_TIERS[0].name);
        return &INDICATOR_TIERS[0];
    }
    let p = HealthScore::new(percentile).value();
    INDICATOR_TIERS
        .iter()
        .find(|tier| p <= f64::from(tier.max))
        .unwrap_or(&INDICATOR_TIERS[4])
}

/// Count of a dimension's indicators in each tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TierBreakdown {
    /// Index 0 is tier 1 (Needs Attention)
    pub counts: [usize; 5],
    pub total: usize,
    pub at_risk: usize,
    pub at_risk_percentage: u32,
}

impl TierBreakdown {
    pub fn count_for_level(&self, level: u8) -> usize {
        match level {
            1..=5 => self.counts[usize::from(level - 1)],
            _ => 0,
        }
    }

    /// Merge another breakdown into this one.
    pub fn absorb(&mut self, other: &TierBreakdown) {
        for (mine, theirs) in self.counts.iter_mut().zip(other.counts.iter()) {
            *mine += theirs;
        }
        self.total += other.total;
        self.at_risk += other.at_risk;
        self.at_risk_percentage = percentage(self.at_risk, self.total);
    }
}

/// Classify every indicator of a dimension by benchmark percentile.
pub fn tier_breakdown(dimension: &DimensionResult) -> TierBreakdown {
    let mut breakdown = TierBreakdown::default();
    for indicator in dimension.indicators() {
        let tier = indicator_tier(indicator.benchmark_percentile);
        breakdown.counts[usize::from(tier.level - 1)] += 1;
        breakdown.total += 1;
        if tier.is_risk {
            breakdown.at_risk += 1;
        }
    }
    breakdown.at_risk_percentage = percentage(breakdown.at_risk, breakdown.total);
    breakdown
}
