//! Cross-team portfolio aggregation.
//!
//! Takes one [`AssessmentResult`](crate::core::AssessmentResult) per team and
//! produces the statistics behind a portfolio dashboard: per-dimension
//! aggregates, team rollups, common gaps, trending dimensions, investment
//! priorities, leadership insights and outcome rollups.
//!
//! ## Architecture
//!
//! - **statistics.rs**: mean, median, population standard deviation
//! - **distribution.rs**: five-band health distribution
//! - **outliers.rs**: σ-multiple outlier detection
//! - **rollup.rs**: per-dimension aggregates and per-team rollups
//! - **gaps.rs**: common gaps and trending dimensions
//! - **insights.rs**: investment priorities and leadership insights
//! - **outcomes.rs**: outcome-level aggregates
//!
//! Every step degrades to zeros and empty collections when there are no
//! teams.

use serde::{Deserialize, Serialize};

use crate::errors::{HealthError, Result};
use crate::priority::PriorityThresholds;

pub mod distribution;
pub mod gaps;
pub mod insights;
pub mod outcomes;
pub mod outliers;
pub mod rollup;
pub mod statistics;
pub mod types;

pub use distribution::DistributionPercentages;
pub use gaps::{find_common_gaps, find_trending_dimensions};
pub use insights::{investment_impact, investment_priorities, leadership_insights, InsightContext};
pub use outliers::{detect_outliers, outlier_direction};
pub use statistics::ScoreStats;
pub use types::{
    AggregationMode, CommonGap, DateRange, DimensionAggregate, DimensionRef, HealthDistribution,
    InsightKind, InsightSeverity, InvestmentPriority, LeadershipInsight,
    MultiTeamAssessmentResult, OutcomeAggregate, OutlierDirection, PortfolioRequest,
    PortfolioScope, PortfolioSummary, ScopeKind, TeamOutlier, TeamRollup, TeamScore,
    TrendCounts, TrendingDimension, WizardDefaults,
};

use crate::core::score::round0;
use crate::core::Trend;
use rollup::{build_dimension_aggregates, build_team_rollups, score_teams, ScoredTeam};
use statistics::{mean, median, weighted_mean};

/// Statistical parameters for portfolio aggregation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioConfig {
    /// Teams further than this many standard deviations from the mean are outliers
    #[serde(default = "default_outlier_std_dev_multiplier")]
    pub outlier_std_dev_multiplier: f64,

    /// Dimension scores below this count as a gap for the team
    #[serde(default = "default_gap_threshold")]
    pub gap_threshold: f64,

    /// Share of teams a gap must reach before it is reported (0.0-1.0)
    #[serde(default = "default_common_gap_min_fraction")]
    pub common_gap_min_fraction: f64,

    /// Gaps affecting more than this share of teams are systemic (0.0-1.0)
    #[serde(default = "default_systemic_issue_fraction")]
    pub systemic_issue_fraction: f64,

    /// Share of teams a trend direction must reach to be reported (0.0-1.0)
    #[serde(default = "default_trending_min_fraction")]
    pub trending_min_fraction: f64,

    /// Dimension standard deviation at which scores count as inconsistent
    #[serde(default = "default_high_variance_std_dev")]
    pub high_variance_std_dev: f64,

    #[serde(default = "default_max_investment_priorities")]
    pub max_investment_priorities: usize,

    /// Confidence level for per-dimension precision (0.90, 0.95 or 0.99)
    #[serde(default = "default_precision_confidence_level")]
    pub precision_confidence_level: f64,
}

fn default_outlier_std_dev_multiplier() -> f64 {
    1.5
}

fn default_gap_threshold() -> f64 {
    45.0
}

fn default_common_gap_min_fraction() -> f64 {
    0.25
}

fn default_systemic_issue_fraction() -> f64 {
    0.5
}

fn default_trending_min_fraction() -> f64 {
    0.5
}

fn default_high_variance_std_dev() -> f64 {
    15.0
}

fn default_max_investment_priorities() -> usize {
    5
}

fn default_precision_confidence_level() -> f64 {
    0.90
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            outlier_std_dev_multiplier: default_outlier_std_dev_multiplier(),
            gap_threshold: default_gap_threshold(),
            common_gap_min_fraction: default_common_gap_min_fraction(),
            systemic_issue_fraction: default_systemic_issue_fraction(),
            trending_min_fraction: default_trending_min_fraction(),
            high_variance_std_dev: default_high_variance_std_dev(),
            max_investment_priorities: default_max_investment_priorities(),
            precision_confidence_level: default_precision_confidence_level(),
        }
    }
}

impl PortfolioConfig {
    fn is_fraction(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }

    /// Check every parameter is usable.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !(self.outlier_std_dev_multiplier.is_finite() && self.outlier_std_dev_multiplier > 0.0) {
            return Err(format!(
                "outlier_std_dev_multiplier must be positive, got {}",
                self.outlier_std_dev_multiplier
            ));
        }
        if !(0.0..=100.0).contains(&self.gap_threshold) {
            return Err(format!(
                "gap_threshold must lie within 0-100, got {}",
                self.gap_threshold
            ));
        }
        for (name, value) in [
            ("common_gap_min_fraction", self.common_gap_min_fraction),
            ("systemic_issue_fraction", self.systemic_issue_fraction),
            ("trending_min_fraction", self.trending_min_fraction),
        ] {
            if !Self::is_fraction(value) {
                return Err(format!("{name} must lie within 0.0-1.0, got {value}"));
            }
        }
        if !(self.high_variance_std_dev.is_finite() && self.high_variance_std_dev >= 0.0) {
            return Err(format!(
                "high_variance_std_dev must not be negative, got {}",
                self.high_variance_std_dev
            ));
        }
        crate::precision::z_score(self.precision_confidence_level)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

fn headline_score(teams: &[ScoredTeam<'_>], overall: &[f64], mode: AggregationMode) -> f64 {
    match mode {
        AggregationMode::Mean => mean(overall),
        AggregationMode::Median => median(overall),
        AggregationMode::Weighted => {
            let weighted: Vec<(f64, f64)> = teams
                .iter()
                .map(|t| (t.overall, t.team.weight()))
                .collect();
            weighted_mean(&weighted)
        }
    }
}

/// Build the full multi-team assessment for a portfolio request.
///
/// Fails on unusable parameters (config, thresholds or the wizard gap
/// threshold) and on malformed input: an inverted date range or a dimension
/// with no usable score. An empty team list yields a zero-filled result.
pub fn generate_multi_team_assessment(
    request: &PortfolioRequest,
    config: &PortfolioConfig,
    thresholds: &PriorityThresholds,
) -> Result<MultiTeamAssessmentResult> {
    config.validate().map_err(HealthError::config)?;
    thresholds.validate().map_err(HealthError::config)?;
    if let Some(threshold) = request.wizard_defaults.gap_threshold {
        if !(0.0..=100.0).contains(&threshold) {
            return Err(HealthError::config(format!(
                "wizard gap threshold must lie within 0-100, got {threshold}"
            )));
        }
    }
    request.date_range.validate()?;

    let scored = score_teams(&request.teams)?;
    let overall: Vec<f64> = scored.iter().map(|t| t.overall).collect();
    let team_stats = ScoreStats::from_values(&overall);
    let total_teams = scored.len();
    let gap_threshold = request
        .wizard_defaults
        .gap_threshold
        .unwrap_or(config.gap_threshold);

    let teams = build_team_rollups(&scored, team_stats.mean, team_stats.std_dev, config, thresholds)?;
    let dimensions = build_dimension_aggregates(&scored, config, thresholds)?;
    let common_gaps = find_common_gaps(&dimensions, total_teams, gap_threshold, config);
    let trending_dimensions = find_trending_dimensions(&dimensions, total_teams, config);
    let investment_priorities = investment_priorities(&dimensions, config);
    let leadership_insights = leadership_insights(
        &InsightContext {
            aggregates: &dimensions,
            gaps: &common_gaps,
            trending: &trending_dimensions,
            teams: &teams,
            portfolio_mean: team_stats.mean,
            gap_threshold,
            total_teams,
        },
        config,
    );
    let outcomes =
        outcomes::outcome_aggregates(&request.wizard_defaults.outcomes, &scored, &dimensions);

    let summary = PortfolioSummary {
        team_count: total_teams,
        dimension_count: dimensions.len(),
        overall_health_score: round0(headline_score(
            &scored,
            &overall,
            request.aggregation_mode,
        )),
        aggregation_mode: request.aggregation_mode,
        team_score_stats: team_stats.rounded(),
        distribution: HealthDistribution::from_scores(&overall),
        teams_needing_attention: overall
            .iter()
            .filter(|&&s| s < thresholds.now_below)
            .count(),
        outlier_count: teams.iter().filter(|t| t.is_outlier).count(),
        systemic_issue_count: common_gaps.iter().filter(|g| g.is_systemic_issue).count(),
        improving_dimension_count: trending_dimensions
            .iter()
            .filter(|t| t.direction == Trend::Improving)
            .count(),
        declining_dimension_count: trending_dimensions
            .iter()
            .filter(|t| t.direction == Trend::Declining)
            .count(),
    };

    log::debug!(
        "Portfolio {}: {} teams, {} dimensions, headline {} ({:?}), {} gaps, {} insights",
        request.id,
        summary.team_count,
        summary.dimension_count,
        summary.overall_health_score,
        summary.aggregation_mode,
        common_gaps.len(),
        leadership_insights.len()
    );

    Ok(MultiTeamAssessmentResult {
        id: request.id.clone(),
        name: request.name.clone(),
        scope: request.scope.clone(),
        date_range: request.date_range,
        summary,
        teams,
        dimensions,
        outcomes,
        common_gaps,
        trending_dimensions,
        investment_priorities,
        leadership_insights,
    })
}
