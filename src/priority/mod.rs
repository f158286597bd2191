/// NOW / NEXT / LATER prioritization of dimensions.
///
/// Partitions a team's dimensions into three actionability tiers from health
/// score and trend, and orders each tier by urgency.
///
/// ## Architecture
///
/// - **predicates.rs**: single-purpose score/trend predicates
/// - **pure.rs**: tier classification and prioritization (composes predicates)
/// - **reasons.rs**: human-readable explanation per prioritized dimension
/// - **mod.rs**: public types and threshold configuration
use serde::{Deserialize, Serialize};

use crate::core::DimensionResult;

pub mod predicates;
pub mod pure;
pub mod reasons;

pub use pure::{
    classify_priority, dimension_priority_tier, prioritize_dimension, prioritize_dimensions,
    prioritize_dimensions_for_outcome, prioritize_dimensions_with, priority_counts,
    priority_score, top_priority,
};

/// Actionability tier for a dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityTier {
    /// Act now: poor score, or below-good score that is declining
    Now,
    /// Plan next: average and steady, or good but declining
    Next,
    /// Maintain: good or better and not declining
    Later,
}

impl PriorityTier {
    /// Get tier label for display
    pub fn label(&self) -> &'static str {
        match self {
            PriorityTier::Now => "NOW",
            PriorityTier::Next => "NEXT",
            PriorityTier::Later => "LATER",
        }
    }

    /// Get tier heading for grouped output
    pub fn heading(&self) -> &'static str {
        match self {
            PriorityTier::Now => "Focus now",
            PriorityTier::Next => "Up next",
            PriorityTier::Later => "Maintain",
        }
    }
}

impl std::fmt::Display for PriorityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Score thresholds that drive tier assignment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriorityThresholds {
    /// Scores below this are NOW regardless of trend
    #[serde(default = "default_now_below")]
    pub now_below: f64,

    /// Declining scores below this are NOW; scores at or above it that are
    /// not declining are LATER
    #[serde(default = "default_watch_below")]
    pub watch_below: f64,
}

fn default_now_below() -> f64 {
    45.0
}

fn default_watch_below() -> f64 {
    55.0
}

impl Default for PriorityThresholds {
    fn default() -> Self {
        Self {
            now_below: default_now_below(),
            watch_below: default_watch_below(),
        }
    }
}

impl PriorityThresholds {
    /// Create strict thresholds (more dimensions land in NOW)
    pub fn strict() -> Self {
        Self {
            now_below: 50.0,
            watch_below: 60.0,
        }
    }

    /// Create balanced thresholds (default)
    pub fn balanced() -> Self {
        Self::default()
    }

    /// Create lenient thresholds
    pub fn lenient() -> Self {
        Self {
            now_below: 40.0,
            watch_below: 50.0,
        }
    }

    /// Check the thresholds form a usable partition.
    pub fn validate(&self) -> Result<(), String> {
        let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);
        if !in_range(self.now_below) || !in_range(self.watch_below) {
            return Err(format!(
                "priority thresholds must lie within 0-100 (now_below={}, watch_below={})",
                self.now_below, self.watch_below
            ));
        }
        if self.now_below > self.watch_below {
            return Err(format!(
                "now_below ({}) must not exceed watch_below ({})",
                self.now_below, self.watch_below
            ));
        }
        Ok(())
    }
}

/// A dimension annotated with its priority tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedDimension {
    #[serde(flatten)]
    pub dimension: DimensionResult,
    /// Score the tier was decided on (`healthScore`, else `overallPercentile`, clamped)
    pub resolved_score: f64,
    pub tier: PriorityTier,
    /// Lower is more urgent
    pub priority_score: f64,
    pub reason: String,
}

/// Dimensions partitioned into tiers, each sorted by ascending priority score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PrioritizedDimensions {
    pub now: Vec<PrioritizedDimension>,
    pub next: Vec<PrioritizedDimension>,
    pub later: Vec<PrioritizedDimension>,
}

impl PrioritizedDimensions {
    /// Most urgent dimension overall, if any is in NOW.
    pub fn top(&self) -> Option<&PrioritizedDimension> {
        self.now.first()
    }

    pub fn counts(&self) -> PriorityCounts {
        PriorityCounts {
            now: self.now.len(),
            next: self.next.len(),
            later: self.later.len(),
            total: self.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.now.len() + self.next.len() + self.later.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn tier(&self, tier: PriorityTier) -> &[PrioritizedDimension] {
        match tier {
            PriorityTier::Now => &self.now,
            PriorityTier::Next => &self.next,
            PriorityTier::Later => &self.later,
        }
    }

    /// All dimensions in tier order, NOW first.
    pub fn iter(&self) -> impl Iterator<Item = &PrioritizedDimension> {
        self.now.iter().chain(self.next.iter()).chain(self.later.iter())
    }
}

/// Size of each tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PriorityCounts {
    pub now: usize,
    pub next: usize,
    pub later: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds_validate() {
        assert!(PriorityThresholds::default().validate().is_ok());
        assert!(PriorityThresholds::strict().validate().is_ok());
        assert!(PriorityThresholds::lenient().validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let t = PriorityThresholds {
            now_below: 60.0,
            watch_below: 50.0,
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_out_of_range_thresholds_rejected() {
        let t = PriorityThresholds {
            now_below: -1.0,
            watch_below: 50.0,
        };
        assert!(t.validate().is_err());
        let t = PriorityThresholds {
            now_below: 40.0,
            watch_below: f64::NAN,
        };
        assert!(t.validate().is_err());
    }

    #[test]
    fn test_tier_ordering_is_urgency() {
        assert!(PriorityTier::Now < PriorityTier::Next);
        assert!(PriorityTier::Next < PriorityTier::Later);
        assert_eq!(PriorityTier::Later.to_string(), "LATER");
    }

    #[test]
    fn test_thresholds_deserialize_with_defaults() {
        let t: PriorityThresholds = toml::from_str("now_below = 42.0").unwrap();
        assert_eq!(t.now_below, 42.0);
        assert_eq!(t.watch_below, 55.0);
    }
}
