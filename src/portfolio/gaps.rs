//! Common gaps and trending dimensions across teams.
//!
//! Both fractions are taken over every team in the portfolio, not only the
//! teams that reported the dimension: a gap in two of ten teams is not
//! systemic just because the other eight never measured it.

use super::types::{CommonGap, DimensionAggregate, TrendingDimension};
use super::PortfolioConfig;
use crate::core::score::{fraction, percentage};
use crate::core::Trend;

/// Dimensions below `gap_threshold` in a large enough share of teams.
///
/// Membership is read from the reported whole-number team scores, so a team
/// shown at 45 is never listed as below a threshold of 45.
///
/// Sorted by affected team count (descending), then by average score
/// (ascending).
pub fn find_common_gaps(
    aggregates: &[DimensionAggregate],
    total_teams: usize,
    gap_threshold: f64,
    config: &PortfolioConfig,
) -> Vec<CommonGap> {
    let mut gaps: Vec<CommonGap> = aggregates
        .iter()
        .filter_map(|agg| {
            let affected: Vec<String> = agg
                .team_scores
                .iter()
                .filter(|ts| ts.score < gap_threshold)
                .map(|ts| ts.team_name.clone())
                .collect();
            let share = fraction(affected.len(), total_teams);
            if affected.is_empty() || share < config.common_gap_min_fraction {
                return None;
            }
            Some(CommonGap {
                dimension_key: agg.dimension_key.clone(),
                dimension_name: agg.dimension_name.clone(),
                affected_team_count: affected.len(),
                affected_percentage: percentage(affected.len(), total_teams),
                affected_teams: affected,
                average_score: agg.stats.mean,
                is_systemic_issue: share > config.systemic_issue_fraction,
            })
        })
        .collect();
    gaps.sort_by(|a, b| {
        b.affected_team_count
            .cmp(&a.affected_team_count)
            .then(a.average_score.total_cmp(&b.average_score))
    });
    gaps
}

/// Dimensions whose majority trend direction covers enough teams.
///
/// Stable majorities are not trends. An exact tie between improving and
/// declining has no direction and is skipped.
pub fn find_trending_dimensions(
    aggregates: &[DimensionAggregate],
    total_teams: usize,
    config: &PortfolioConfig,
) -> Vec<TrendingDimension> {
    let mut trending: Vec<TrendingDimension> = aggregates
        .iter()
        .filter_map(|agg| {
            let (direction, count) = match agg.trends.improving.cmp(&agg.trends.declining) {
                std::cmp::Ordering::Greater => (Trend::Improving, agg.trends.improving),
                std::cmp::Ordering::Less => (Trend::Declining, agg.trends.declining),
                std::cmp::Ordering::Equal => return None,
            };
            if count < agg.trends.stable
                || fraction(count, total_teams) < config.trending_min_fraction
            {
                return None;
            }
            Some(TrendingDimension {
                dimension_key: agg.dimension_key.clone(),
                dimension_name: agg.dimension_name.clone(),
                direction,
                team_count: count,
                percentage: percentage(count, total_teams),
            })
        })
        .collect();
    trending.sort_by(|a, b| b.team_count.cmp(&a.team_count));
    trending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::HealthBand;
    use crate::portfolio::statistics::ScoreStats;
    use crate::portfolio::types::{HealthDistribution, TeamScore, TrendCounts};
    use crate::tiers::TierBreakdown;

    fn aggregate(key: &str, scores: &[(f64, Trend)]) -> DimensionAggregate {
        let values: Vec<f64> = scores.iter().map(|(s, _)| *s).collect();
        let mut trends = TrendCounts::default();
        for (_, t) in scores {
            trends.record(*t);
        }
        DimensionAggregate {
            dimension_key: key.into(),
            dimension_name: key.to_uppercase(),
            team_count: scores.len(),
            stats: ScoreStats::from_values(&values).rounded(),
            min_team: None,
            max_team: None,
            band: HealthBand::Average,
            distribution: HealthDistribution::from_scores(&values),
            trends,
            teams_needing_attention: 0,
            team_scores: scores
                .iter()
                .enumerate()
                .map(|(i, (s, t))| TeamScore {
                    team_id: format!("t{i}"),
                    team_name: format!("Team {i}"),
                    score: *s,
                    trend: *t,
                })
                .collect(),
            outlier_teams: vec![],
            precision: None,
            indicator_tiers: TierBreakdown::default(),
        }
    }

    #[test]
    fn test_majority_gap_is_systemic() {
        let aggs = vec![aggregate(
            "flow",
            &[
                (30.0, Trend::Stable),
                (40.0, Trend::Stable),
                (20.0, Trend::Stable),
                (70.0, Trend::Stable),
            ],
        )];
        let gaps = find_common_gaps(&aggs, 4, 45.0, &PortfolioConfig::default());
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].affected_team_count, 3);
        assert_eq!(gaps[0].affected_percentage, 75);
        assert!(gaps[0].is_systemic_issue);
        assert_eq!(gaps[0].affected_teams, vec!["Team 0", "Team 1", "Team 2"]);
    }

    #[test]
    fn test_exactly_half_is_not_systemic() {
        let aggs = vec![aggregate(
            "flow",
            &[(30.0, Trend::Stable), (80.0, Trend::Stable)],
        )];
        let gaps = find_common_gaps(&aggs, 2, 45.0, &PortfolioConfig::default());
        assert_eq!(gaps.len(), 1);
        assert!(!gaps[0].is_systemic_issue);
    }

    #[test]
    fn test_rare_gap_not_reported() {
        let aggs = vec![aggregate("flow", &[(30.0, Trend::Stable)])];
        // 1 of 10 teams is below the 25% floor
        assert!(find_common_gaps(&aggs, 10, 45.0, &PortfolioConfig::default()).is_empty());
    }

    #[test]
    fn test_gaps_sorted_by_reach_then_score() {
        let aggs = vec![
            aggregate("a", &[(40.0, Trend::Stable), (80.0, Trend::Stable)]),
            aggregate("b", &[(10.0, Trend::Stable), (20.0, Trend::Stable)]),
            aggregate("c", &[(30.0, Trend::Stable), (90.0, Trend::Stable)]),
        ];
        let gaps = find_common_gaps(&aggs, 2, 45.0, &PortfolioConfig::default());
        let keys: Vec<&str> = gaps.iter().map(|g| g.dimension_key.as_str()).collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_declining_majority_trending() {
        let aggs = vec![aggregate(
            "flow",
            &[
                (50.0, Trend::Declining),
                (50.0, Trend::Declining),
                (50.0, Trend::Stable),
            ],
        )];
        let trending = find_trending_dimensions(&aggs, 3, &PortfolioConfig::default());
        assert_eq!(trending.len(), 1);
        assert_eq!(trending[0].direction, Trend::Declining);
        assert_eq!(trending[0].percentage, 67);
    }

    #[test]
    fn test_tie_between_directions_skipped() {
        let aggs = vec![aggregate(
            "flow",
            &[(50.0, Trend::Declining), (50.0, Trend::Improving)],
        )];
        assert!(find_trending_dimensions(&aggs, 2, &PortfolioConfig::default()).is_empty());
    }

    #[test]
    fn test_stable_majority_not_trending() {
        let aggs = vec![aggregate(
            "flow",
            &[
                (50.0, Trend::Improving),
                (50.0, Trend::Stable),
                (50.0, Trend::Stable),
            ],
        )];
        assert!(find_trending_dimensions(&aggs, 3, &PortfolioConfig::default()).is_empty());
    }

    #[test]
    fn test_empty_portfolio_has_no_gaps_or_trends() {
        assert!(find_common_gaps(&[], 0, 45.0, &PortfolioConfig::default()).is_empty());
        assert!(find_trending_dimensions(&[], 0, &PortfolioConfig::default()).is_empty());
    }
}
