use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::score::HealthScore;
use crate::errors::{HealthError, Result};

/// Direction a score has been moving over the assessment window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Improving,
    #[default]
    Stable,
    Declining,
}

impl Trend {
    /// Sort weight used by prioritization: declining sorts first.
    pub fn weight(self) -> f64 {
        match self {
            Trend::Declining => 0.0,
            Trend::Stable => 1.0,
            Trend::Improving => 2.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Trend::Improving => "improving",
            Trend::Stable => "stable",
            Trend::Declining => "declining",
        }
    }
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One point of a dimension's score history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    pub period: String,
    pub date: NaiveDate,
    pub value: f64,
}

/// A single raw measurement within a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorResult {
    pub id: String,
    pub name: String,
    /// True peer percentile, not a health score.
    pub benchmark_percentile: f64,
    #[serde(default)]
    pub trend: Trend,
}

/// Named group of indicators inside a dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorCategory {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub indicators: Vec<IndicatorResult>,
}

/// A named, scored capability area for one team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionResult {
    pub dimension_key: String,
    pub dimension_name: String,
    /// Authoritative score when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_score: Option<f64>,
    /// Legacy score, used only when `health_score` is absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_percentile: Option<f64>,
    #[serde(default)]
    pub trend: Trend,
    #[serde(default)]
    pub trend_data: Vec<TrendPoint>,
    #[serde(default)]
    pub categories: Vec<IndicatorCategory>,
}

impl DimensionResult {
    /// Minimal dimension with a health score and trend.
    pub fn new(
        key: impl Into<String>,
        name: impl Into<String>,
        health_score: f64,
        trend: Trend,
    ) -> Self {
        Self {
            dimension_key: key.into(),
            dimension_name: name.into(),
            health_score: Some(health_score),
            overall_percentile: None,
            trend,
            trend_data: Vec::new(),
            categories: Vec::new(),
        }
    }

    /// Resolve the score this dimension is judged by.
    ///
    /// `health_score` wins over `overall_percentile`; having neither is an
    /// input error rather than an implicit zero.
    pub fn effective_score(&self) -> Result<HealthScore> {
        match (self.health_score, self.overall_percentile) {
            (Some(score), _) => HealthScore::try_new("healthScore", score),
            (None, Some(percentile)) => HealthScore::try_new("overallPercentile", percentile),
            (None, None) => Err(HealthError::missing_score(&self.dimension_key)),
        }
    }

    /// All indicators across every category, in declaration order.
    pub fn indicators(&self) -> impl Iterator<Item = &IndicatorResult> {
        self.categories.iter().flat_map(|c| c.indicators.iter())
    }
}

/// Assessment output for a single team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentResult {
    pub team_id: String,
    pub team_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_health_score: Option<f64>,
    #[serde(default)]
    pub dimensions: Vec<DimensionResult>,
}

impl AssessmentResult {
    /// Team's headline score.
    ///
    /// Uses the reported overall score when present, else the mean of the
    /// dimension scores. A team with no dimensions scores 0.
    pub fn overall_score(&self) -> Result<HealthScore> {
        if let Some(score) = self.overall_health_score {
            return HealthScore::try_new("overallHealthScore", score);
        }
        if self.dimensions.is_empty() {
            log::warn!("Team '{}' has no dimensions, scoring 0", self.team_id);
            return Ok(HealthScore::default());
        }
        let sum = self
            .dimensions
            .iter()
            .map(|d| d.effective_score().map(HealthScore::value))
            .sum::<Result<f64>>()?;
        Ok(HealthScore::new(sum / self.dimensions.len() as f64))
    }

    /// Look up one of this team's dimensions by key.
    pub fn dimension(&self, key: &str) -> Option<&DimensionResult> {
        self.dimensions.iter().find(|d| d.dimension_key == key)
    }

    /// Weight for size-weighted aggregation; teams without a size count once.
    pub fn weight(&self) -> f64 {
        f64::from(self.team_size.unwrap_or(1).max(1))
    }
}

/// An outcome groups the dimensions that together drive it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeDefinition {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub dimension_keys: Vec<String>,
}
