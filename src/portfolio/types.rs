use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::statistics::ScoreStats;
use crate::core::{AssessmentResult, HealthBand, OutcomeDefinition, Trend};
use crate::errors::{HealthError, Result};
use crate::precision::PrecisionResult;
use crate::priority::PriorityCounts;
use crate::tiers::TierBreakdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ScopeKind {
    Team,
    TeamOfTeams,
    #[default]
    Portfolio,
}

/// Which slice of the organisation a multi-team assessment covers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioScope {
    #[serde(default)]
    pub kind: ScopeKind,
    #[serde(default)]
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn validate(&self) -> Result<()> {
        if self.end < self.start {
            return Err(HealthError::InvalidDateRange {
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }

    /// Inclusive length in days.
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }
}

/// How the portfolio headline score is derived from team scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AggregationMode {
    #[default]
    Mean,
    Median,
    /// Mean weighted by team size
    Weighted,
}

/// Settings carried over from the configuration wizard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct WizardDefaults {
    #[serde(default)]
    pub outcomes: Vec<OutcomeDefinition>,
    /// Overrides the configured gap threshold when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_threshold: Option<f64>,
}

/// Input to a multi-team assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRequest {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub scope: PortfolioScope,
    #[serde(default)]
    pub teams: Vec<AssessmentResult>,
    pub date_range: DateRange,
    #[serde(default)]
    pub aggregation_mode: AggregationMode,
    #[serde(default)]
    pub wizard_defaults: WizardDefaults,
}

/// Number of scores in each health band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HealthDistribution {
    pub excellent: usize,
    pub good: usize,
    pub average: usize,
    pub below_average: usize,
    pub needs_attention: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TrendCounts {
    pub improving: usize,
    pub stable: usize,
    pub declining: usize,
}

impl TrendCounts {
    pub fn record(&mut self, trend: Trend) {
        match trend {
            Trend::Improving => self.improving += 1,
            Trend::Stable => self.stable += 1,
            Trend::Declining => self.declining += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.improving + self.stable + self.declining
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierDirection {
    Above,
    Below,
}

/// One team's score in one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamScore {
    pub team_id: String,
    pub team_name: String,
    pub score: f64,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamOutlier {
    pub team_id: String,
    pub team_name: String,
    pub score: f64,
    pub direction: OutlierDirection,
}

/// Cross-team statistics for one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionAggregate {
    pub dimension_key: String,
    pub dimension_name: String,
    /// Teams that reported this dimension
    pub team_count: usize,
    #[serde(flatten)]
    pub stats: ScoreStats,
    pub min_team: Option<String>,
    pub max_team: Option<String>,
    pub band: HealthBand,
    pub distribution: HealthDistribution,
    pub trends: TrendCounts,
    pub teams_needing_attention: usize,
    pub team_scores: Vec<TeamScore>,
    pub outlier_teams: Vec<TeamOutlier>,
    /// Precision of the mean; absent with fewer than two teams
    pub precision: Option<PrecisionResult>,
    pub indicator_tiers: TierBreakdown,
}

/// Reference to a dimension with the score it was picked by.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionRef {
    pub dimension_key: String,
    pub dimension_name: String,
    pub score: f64,
}

/// One team's position within the portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamRollup {
    pub team_id: String,
    pub team_name: String,
    pub team_size: Option<u32>,
    pub overall_health_score: f64,
    /// 1 is the healthiest team
    pub rank: usize,
    pub deviation_from_mean: f64,
    pub is_outlier: bool,
    pub outlier_direction: Option<OutlierDirection>,
    pub strongest_dimension: Option<DimensionRef>,
    pub weakest_dimension: Option<DimensionRef>,
    pub priority_counts: PriorityCounts,
    pub indicator_tiers: TierBreakdown,
}

/// Portfolio headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub team_count: usize,
    pub dimension_count: usize,
    /// Headline score under the requested aggregation mode
    pub overall_health_score: f64,
    pub aggregation_mode: AggregationMode,
    pub team_score_stats: ScoreStats,
    pub distribution: HealthDistribution,
    pub teams_needing_attention: usize,
    pub outlier_count: usize,
    pub systemic_issue_count: usize,
    pub improving_dimension_count: usize,
    pub declining_dimension_count: usize,
}

/// A dimension that falls below the gap threshold in many teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonGap {
    pub dimension_key: String,
    pub dimension_name: String,
    pub affected_team_count: usize,
    pub affected_teams: Vec<String>,
    pub affected_percentage: u32,
    pub average_score: f64,
    pub is_systemic_issue: bool,
}

/// A dimension moving the same way in most teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingDimension {
    pub dimension_key: String,
    pub dimension_name: String,
    pub direction: Trend,
    pub team_count: usize,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPriority {
    pub rank: usize,
    pub dimension_key: String,
    pub dimension_name: String,
    pub impact_score: f64,
    pub average_score: f64,
    pub teams_affected: usize,
    pub rationale: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InsightKind {
    SystemicGap,
    Inconsistency,
    OutlierTeam,
    DecliningTrend,
    ImprovingTrend,
    Strength,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipInsight {
    pub kind: InsightKind,
    pub severity: InsightSeverity,
    pub title: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
}

/// Cross-team statistics for one outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeAggregate {
    pub outcome_key: String,
    pub outcome_name: String,
    pub dimension_keys: Vec<String>,
    /// Teams with at least one of the outcome's dimensions
    pub team_count: usize,
    #[serde(flatten)]
    pub stats: ScoreStats,
    pub distribution: HealthDistribution,
    pub weakest_dimension: Option<DimensionRef>,
}

/// Complete multi-team assessment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTeamAssessmentResult {
    pub id: String,
    pub name: String,
    pub scope: PortfolioScope,
    pub date_range: DateRange,
    pub summary: PortfolioSummary,
    /// Ordered by rank
    pub teams: Vec<TeamRollup>,
    pub dimensions: Vec<DimensionAggregate>,
    pub outcomes: Vec<OutcomeAggregate>,
    pub common_gaps: Vec<CommonGap>,
    pub trending_dimensions: Vec<TrendingDimension>,
    pub investment_priorities: Vec<InvestmentPriority>,
    pub leadership_insights: Vec<LeadershipInsight>,
}
