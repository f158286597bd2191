//! Five-band health distribution.

use serde::Serialize;

use super::types::HealthDistribution;
use crate::core::score::percentage;
use crate::core::HealthBand;

impl HealthDistribution {
    pub fn from_scores(scores: &[f64]) -> Self {
        let mut distribution = Self::default();
        for &score in scores {
            distribution.record(score);
        }
        distribution
    }

    pub fn record(&mut self, score: f64) {
        match HealthBand::from_score(score) {
            HealthBand::Excellent => self.excellent += 1,
            HealthBand::Good => self.good += 1,
            HealthBand::Average => self.average += 1,
            HealthBand::BelowAverage => self.below_average += 1,
            HealthBand::NeedsAttention => self.needs_attention += 1,
        }
    }

    pub fn count(&self, band: HealthBand) -> usize {
        match band {
            HealthBand::Excellent => self.excellent,
            HealthBand::Good => self.good,
            HealthBand::Average => self.average,
            HealthBand::BelowAverage => self.below_average,
            HealthBand::NeedsAttention => self.needs_attention,
        }
    }

    pub fn total(&self) -> usize {
        self.excellent + self.good + self.average + self.below_average + self.needs_attention
    }

    /// Whole-number share of each band; all zero for an empty distribution.
    pub fn percentages(&self) -> DistributionPercentages {
        let total = self.total();
        DistributionPercentages {
            excellent: percentage(self.excellent, total),
            good: percentage(self.good, total),
            average: percentage(self.average, total),
            below_average: percentage(self.below_average, total),
            needs_attention: percentage(self.needs_attention, total),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DistributionPercentages {
    pub excellent: u32,
    pub good: u32,
    pub average: u32,
    pub below_average: u32,
    pub needs_attention: u32,
}
