//! Per-dimension aggregates and per-team rollups.

use super::outliers::{detect_outliers, outlier_direction};
use super::statistics::{standard_error, ScoreStats};
use super::types::{
    DimensionAggregate, DimensionRef, HealthDistribution, TeamOutlier, TeamRollup, TeamScore,
    TrendCounts,
};
use super::PortfolioConfig;
use crate::core::score::{round0, round1};
use crate::core::{AssessmentResult, DimensionResult, HealthBand};
use crate::errors::Result;
use crate::precision::calculate_precision_from_se;
use crate::priority::{prioritize_dimensions_with, PriorityThresholds};
use crate::tiers::{tier_breakdown, TierBreakdown};

/// A team with every score resolved once up front.
#[derive(Debug, Clone)]
pub(crate) struct ScoredTeam<'a> {
    pub team: &'a AssessmentResult,
    pub overall: f64,
    pub dimensions: Vec<ScoredDimension<'a>>,
}

#[derive(Debug, Clone)]
pub(crate) struct ScoredDimension<'a> {
    pub dimension: &'a DimensionResult,
    pub score: f64,
}

impl<'a> ScoredTeam<'a> {
    pub fn dimension(&self, key: &str) -> Option<&ScoredDimension<'a>> {
        self.dimensions
            .iter()
            .find(|d| d.dimension.dimension_key == key)
    }
}

/// Resolve overall and dimension scores for every team.
pub(crate) fn score_teams(teams: &[AssessmentResult]) -> Result<Vec<ScoredTeam<'_>>> {
    teams
        .iter()
        .map(|team| {
            let dimensions = team
                .dimensions
                .iter()
                .map(|dimension| {
                    Ok(ScoredDimension {
                        dimension,
                        score: dimension.effective_score()?.value(),
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(ScoredTeam {
                team,
                overall: team.overall_score()?.value(),
                dimensions,
            })
        })
        .collect()
}

/// Dimension keys in first-seen order across teams, with the first name seen.
pub(crate) fn dimension_catalog<'a>(teams: &[ScoredTeam<'a>]) -> Vec<(&'a str, &'a str)> {
    let mut catalog: Vec<(&str, &str)> = Vec::new();
    for scored in teams {
        for d in &scored.dimensions {
            let key = d.dimension.dimension_key.as_str();
            if !catalog.iter().any(|(k, _)| *k == key) {
                catalog.push((key, d.dimension.dimension_name.as_str()));
            }
        }
    }
    catalog
}

fn extreme_team(entries: &[(&ScoredTeam<'_>, f64)], pick_max: bool) -> Option<String> {
    let mut best: Option<(&ScoredTeam<'_>, f64)> = None;
    for &(team, score) in entries {
        let better = match best {
            None => true,
            Some((_, current)) if pick_max => score > current,
            Some((_, current)) => score < current,
        };
        if better {
            best = Some((team, score));
        }
    }
    best.map(|(team, _)| team.team.team_name.clone())
}

/// Cross-team statistics for every dimension, in first-seen order.
pub(crate) fn build_dimension_aggregates(
    teams: &[ScoredTeam<'_>],
    config: &PortfolioConfig,
    thresholds: &PriorityThresholds,
) -> Result<Vec<DimensionAggregate>> {
    dimension_catalog(teams)
        .into_iter()
        .map(|(key, name)| build_dimension_aggregate(key, name, teams, config, thresholds))
        .collect()
}

fn build_dimension_aggregate(
    key: &str,
    name: &str,
    teams: &[ScoredTeam<'_>],
    config: &PortfolioConfig,
    thresholds: &PriorityThresholds,
) -> Result<DimensionAggregate> {
    let entries: Vec<(&ScoredTeam, &ScoredDimension)> = teams
        .iter()
        .filter_map(|t| t.dimension(key).map(|d| (t, d)))
        .collect();
    let scores: Vec<f64> = entries.iter().map(|(_, d)| d.score).collect();
    let raw = ScoreStats::from_values(&scores);

    let mut trends = TrendCounts::default();
    let mut indicator_tiers = TierBreakdown::default();
    let mut team_scores = Vec::with_capacity(entries.len());
    let mut outlier_teams = Vec::new();
    let flags = detect_outliers(&scores, config.outlier_std_dev_multiplier);
    for ((team, dim), flag) in entries.iter().zip(flags) {
        trends.record(dim.dimension.trend);
        indicator_tiers.absorb(&tier_breakdown(dim.dimension));
        team_scores.push(TeamScore {
            team_id: team.team.team_id.clone(),
            team_name: team.team.team_name.clone(),
            score: round0(dim.score),
            trend: dim.dimension.trend,
        });
        if let Some(direction) = flag {
            outlier_teams.push(TeamOutlier {
                team_id: team.team.team_id.clone(),
                team_name: team.team.team_name.clone(),
                score: round0(dim.score),
                direction,
            });
        }
    }

    let precision = if scores.len() >= 2 {
        Some(calculate_precision_from_se(
            standard_error(&scores),
            config.precision_confidence_level,
            100.0,
        )?)
    } else {
        None
    };

    let scored: Vec<(&ScoredTeam, f64)> = entries.iter().map(|(t, d)| (*t, d.score)).collect();

    Ok(DimensionAggregate {
        dimension_key: key.to_string(),
        dimension_name: name.to_string(),
        team_count: entries.len(),
        stats: raw.rounded(),
        min_team: extreme_team(&scored, false),
        max_team: extreme_team(&scored, true),
        band: HealthBand::from_score(raw.mean),
        distribution: HealthDistribution::from_scores(&scores),
        trends,
        teams_needing_attention: scores.iter().filter(|&&s| s < thresholds.now_below).count(),
        team_scores,
        outlier_teams,
        precision,
        indicator_tiers,
    })
}

fn dimension_ref(d: &ScoredDimension<'_>) -> DimensionRef {
    DimensionRef {
        dimension_key: d.dimension.dimension_key.clone(),
        dimension_name: d.dimension.dimension_name.clone(),
        score: round0(d.score),
    }
}

/// Strongest and weakest dimension; the first one wins ties.
fn dimension_extremes(
    team: &ScoredTeam<'_>,
) -> (Option<DimensionRef>, Option<DimensionRef>) {
    let mut strongest: Option<&ScoredDimension> = None;
    let mut weakest: Option<&ScoredDimension> = None;
    for d in &team.dimensions {
        if strongest.map_or(true, |s| d.score > s.score) {
            strongest = Some(d);
        }
        if weakest.map_or(true, |w| d.score < w.score) {
            weakest = Some(d);
        }
    }
    (strongest.map(dimension_ref), weakest.map(dimension_ref))
}

/// One rollup per team, ordered by rank (healthiest first).
///
/// `mean` and `std_dev` are the unrounded portfolio statistics of team
/// overall scores.
pub(crate) fn build_team_rollups(
    teams: &[ScoredTeam<'_>],
    mean: f64,
    std_dev: f64,
    config: &PortfolioConfig,
    thresholds: &PriorityThresholds,
) -> Result<Vec<TeamRollup>> {
    let mut rollups = teams
        .iter()
        .map(|scored| {
            let direction = outlier_direction(
                scored.overall,
                mean,
                std_dev,
                config.outlier_std_dev_multiplier,
            );
            let (strongest, weakest) = dimension_extremes(scored);
            let mut indicator_tiers = TierBreakdown::default();
            for d in &scored.team.dimensions {
                indicator_tiers.absorb(&tier_breakdown(d));
            }
            Ok(TeamRollup {
                team_id: scored.team.team_id.clone(),
                team_name: scored.team.team_name.clone(),
                team_size: scored.team.team_size,
                overall_health_score: scored.overall.round(),
                rank: 0,
                deviation_from_mean: round1(scored.overall - mean),
                is_outlier: direction.is_some(),
                outlier_direction: direction,
                strongest_dimension: strongest,
                weakest_dimension: weakest,
                priority_counts: prioritize_dimensions_with(&scored.team.dimensions, thresholds)?
                    .counts(),
                indicator_tiers,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    // Unrounded scores decide rank; stable sort keeps input order on ties.
    let mut order: Vec<usize> = (0..rollups.len()).collect();
    order.sort_by(|&a, &b| teams[b].overall.total_cmp(&teams[a].overall));
    for (rank, &idx) in order.iter().enumerate() {
        rollups[idx].rank = rank + 1;
    }
    rollups.sort_by_key(|r| r.rank);
    Ok(rollups)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{IndicatorCategory, IndicatorResult, Trend};

    fn team(id: &str, dims: &[(&str, f64, Trend)]) -> AssessmentResult {
        AssessmentResult {
            team_id: id.into(),
            team_name: format!("Team {id}"),
            team_size: None,
            overall_health_score: None,
            dimensions: dims
                .iter()
                .map(|(k, s, t)| DimensionResult::new(*k, k.to_uppercase(), *s, *t))
                .collect(),
        }
    }

    #[test]
    fn test_catalog_first_seen_order() {
        let teams = vec![
            team("a", &[("flow", 50.0, Trend::Stable)]),
            team("b", &[("quality", 40.0, Trend::Stable), ("flow", 60.0, Trend::Stable)]),
        ];
        let scored = score_teams(&teams).unwrap();
        let keys: Vec<&str> = dimension_catalog(&scored).iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["flow", "quality"]);
    }

    #[test]
    fn test_dimension_aggregate_only_counts_reporting_teams() {
        let teams = vec![
            team("a", &[("flow", 40.0, Trend::Declining)]),
            team("b", &[("flow", 60.0, Trend::Improving), ("quality", 80.0, Trend::Stable)]),
            team("c", &[("flow", 80.0, Trend::Improving)]),
        ];
        let scored = score_teams(&teams).unwrap();
        let aggs = build_dimension_aggregates(
            &scored,
            &PortfolioConfig::default(),
            &PriorityThresholds::default(),
        )
        .unwrap();

        let flow = &aggs[0];
        assert_eq!(flow.team_count, 3);
        assert_eq!(flow.stats.mean, 60.0);
        assert_eq!(flow.stats.median, 60.0);
        assert_eq!(flow.stats.std_dev, 16.3);
        assert_eq!(flow.min_team.as_deref(), Some("Team a"));
        assert_eq!(flow.max_team.as_deref(), Some("Team c"));
        assert_eq!(flow.trends.improving, 2);
        assert_eq!(flow.trends.declining, 1);
        assert_eq!(flow.teams_needing_attention, 1);
        assert!(flow.precision.is_some());

        let quality = &aggs[1];
        assert_eq!(quality.team_count, 1);
        assert_eq!(quality.stats.std_dev, 0.0);
        assert!(quality.precision.is_none());
        assert_eq!(quality.band, HealthBand::Excellent);
    }

    #[test]
    fn test_reported_team_scores_are_whole_numbers() {
        let teams = vec![
            team("a", &[("flow", 40.4, Trend::Stable), ("quality", 70.6, Trend::Stable)]),
            team("b", &[("flow", 61.0, Trend::Stable)]),
            team("c", &[("flow", 62.0, Trend::Stable)]),
            team("d", &[("flow", 63.0, Trend::Stable)]),
            team("e", &[("flow", 64.0, Trend::Stable)]),
        ];
        let scored = score_teams(&teams).unwrap();
        let aggs = build_dimension_aggregates(
            &scored,
            &PortfolioConfig::default(),
            &PriorityThresholds::default(),
        )
        .unwrap();
        let flow = &aggs[0];
        assert_eq!(flow.team_scores[0].score, 40.0);
        assert_eq!(flow.outlier_teams.len(), 1);
        assert_eq!(flow.outlier_teams[0].score, 40.0);

        let rollups = build_team_rollups(
            &scored,
            60.0,
            10.0,
            &PortfolioConfig::default(),
            &PriorityThresholds::default(),
        )
        .unwrap();
        let a = rollups.iter().find(|r| r.team_id == "a").unwrap();
        assert_eq!(a.strongest_dimension.as_ref().unwrap().score, 71.0);
        assert_eq!(a.weakest_dimension.as_ref().unwrap().score, 40.0);
    }

    #[test]
    fn test_aggregate_sums_indicator_tiers() {
        let mut t = team("a", &[("flow", 40.0, Trend::Stable)]);
        t.dimensions[0].categories = vec![IndicatorCategory {
            id: "c".into(),
            name: "C".into(),
            indicators: vec![
                IndicatorResult {
                    id: "i1".into(),
                    name: "I1".into(),
                    benchmark_percentile: 5.0,
                    trend: Trend::Stable,
                },
                IndicatorResult {
                    id: "i2".into(),
                    name: "I2".into(),
                    benchmark_percentile: 77.0,
                    trend: Trend::Stable,
                },
            ],
        }];
        let teams = vec![t.clone(), t];
        let scored = score_teams(&teams).unwrap();
        let aggs = build_dimension_aggregates(
            &scored,
            &PortfolioConfig::default(),
            &PriorityThresholds::default(),
        )
        .unwrap();
        assert_eq!(aggs[0].indicator_tiers.total, 4);
        assert_eq!(aggs[0].indicator_tiers.at_risk, 2);
        assert_eq!(aggs[0].indicator_tiers.counts[3], 2);
    }

    #[test]
    fn test_team_rollups_ranked_and_extremes() {
        let teams = vec![
            team("a", &[("flow", 40.0, Trend::Stable), ("quality", 60.0, Trend::Stable)]),
            team("b", &[("flow", 90.0, Trend::Stable), ("quality", 70.0, Trend::Stable)]),
        ];
        let scored = score_teams(&teams).unwrap();
        let rollups = build_team_rollups(
            &scored,
            65.0,
            15.0,
            &PortfolioConfig::default(),
            &PriorityThresholds::default(),
        )
        .unwrap();
        assert_eq!(rollups[0].team_id, "b");
        assert_eq!(rollups[0].rank, 1);
        assert_eq!(rollups[0].overall_health_score, 80.0);
        assert_eq!(rollups[0].deviation_from_mean, 15.0);
        assert_eq!(rollups[1].team_id, "a");
        assert_eq!(rollups[1].rank, 2);
        assert_eq!(
            rollups[1].weakest_dimension.as_ref().map(|d| d.dimension_key.as_str()),
            Some("flow")
        );
        assert_eq!(
            rollups[1].strongest_dimension.as_ref().map(|d| d.dimension_key.as_str()),
            Some("quality")
        );
        assert_eq!(rollups[1].priority_counts.now, 1);
        assert_eq!(rollups[1].priority_counts.later, 1);
        assert!(!rollups[0].is_outlier);
    }

    #[test]
    fn test_rank_ties_keep_input_order() {
        let teams = vec![
            team("first", &[("flow", 50.0, Trend::Stable)]),
            team("second", &[("flow", 50.0, Trend::Stable)]),
        ];
        let scored = score_teams(&teams).unwrap();
        let rollups = build_team_rollups(
            &scored,
            50.0,
            0.0,
            &PortfolioConfig::default(),
            &PriorityThresholds::default(),
        )
        .unwrap();
        assert_eq!(rollups[0].team_id, "first");
        assert_eq!(rollups[1].team_id, "second");
    }
}
