//! Qualitative health bands over the 0-100 health score.
//!
//! The same five bands label a single dimension in reason strings and bucket
//! teams in the portfolio distribution, so they live here rather than in
//! either consumer.

use serde::{Deserialize, Serialize};

/// Upper bounds (exclusive) of the lower four bands.
pub const NEEDS_ATTENTION_BELOW: f64 = 30.0;
pub const BELOW_AVERAGE_BELOW: f64 = 45.0;
pub const AVERAGE_BELOW: f64 = 55.0;
pub const GOOD_BELOW: f64 = 70.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HealthBand {
    NeedsAttention,
    BelowAverage,
    Average,
    Good,
    Excellent,
}

impl HealthBand {
    pub fn from_score(score: f64) -> Self {
        if score < NEEDS_ATTENTION_BELOW {
            HealthBand::NeedsAttention
        } else if score < BELOW_AVERAGE_BELOW {
            HealthBand::BelowAverage
        } else if score < AVERAGE_BELOW {
            HealthBand::Average
        } else if score < GOOD_BELOW {
            HealthBand::Good
        } else {
            HealthBand::Excellent
        }
    }

    /// Lower-case descriptor used inside sentences.
    pub fn descriptor(&self) -> &'static str {
        match self {
            HealthBand::NeedsAttention => "needs attention",
            HealthBand::BelowAverage => "below average",
            HealthBand::Average => "average",
            HealthBand::Good => "good",
            HealthBand::Excellent => "excellent",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HealthBand::NeedsAttention => "Needs Attention",
            HealthBand::BelowAverage => "Below Average",
            HealthBand::Average => "Average",
            HealthBand::Good => "Good",
            HealthBand::Excellent => "Excellent",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_edges() {
        assert_eq!(HealthBand::from_score(29.9), HealthBand::NeedsAttention);
        assert_eq!(HealthBand::from_score(30.0), HealthBand::BelowAverage);
        assert_eq!(HealthBand::from_score(44.0), HealthBand::BelowAverage);
        assert_eq!(HealthBand::from_score(45.0), HealthBand::Average);
        assert_eq!(HealthBand::from_score(54.0), HealthBand::Average);
        assert_eq!(HealthBand::from_score(55.0), HealthBand::Good);
        assert_eq!(HealthBand::from_score(69.0), HealthBand::Good);
        assert_eq!(HealthBand::from_score(70.0), HealthBand::Excellent);
    }

    #[test]
    fn test_descriptor_text() {
        assert_eq!(HealthBand::from_score(10.0).descriptor(), "needs attention");
        assert_eq!(HealthBand::from_score(90.0).label(), "Excellent");
    }
}
