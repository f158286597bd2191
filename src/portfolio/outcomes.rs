//! Outcome-level rollups.
//!
//! An outcome groups several dimensions. A team's outcome score is the mean
//! of whichever of those dimensions it reported; teams with none are left
//! out of the outcome entirely.

use super::rollup::ScoredTeam;
use super::statistics::{mean, ScoreStats};
use super::types::{DimensionAggregate, DimensionRef, HealthDistribution, OutcomeAggregate};
use crate::core::OutcomeDefinition;

fn team_outcome_score(team: &ScoredTeam<'_>, outcome: &OutcomeDefinition) -> Option<f64> {
    let scores: Vec<f64> = outcome
        .dimension_keys
        .iter()
        .filter_map(|key| team.dimension(key).map(|d| d.score))
        .collect();
    (!scores.is_empty()).then(|| mean(&scores))
}

fn weakest_dimension(
    outcome: &OutcomeDefinition,
    aggregates: &[DimensionAggregate],
) -> Option<DimensionRef> {
    outcome
        .dimension_keys
        .iter()
        .filter_map(|key| aggregates.iter().find(|a| &a.dimension_key == key))
        .fold(None::<&DimensionAggregate>, |weakest, agg| match weakest {
            Some(w) if w.stats.mean <= agg.stats.mean => Some(w),
            _ => Some(agg),
        })
        .map(|agg| DimensionRef {
            dimension_key: agg.dimension_key.clone(),
            dimension_name: agg.dimension_name.clone(),
            score: agg.stats.mean,
        })
}

/// One aggregate per outcome, in the order the outcomes were defined.
pub(crate) fn outcome_aggregates(
    outcomes: &[OutcomeDefinition],
    teams: &[ScoredTeam<'_>],
    aggregates: &[DimensionAggregate],
) -> Vec<OutcomeAggregate> {
    outcomes
        .iter()
        .map(|outcome| {
            let scores: Vec<f64> = teams
                .iter()
                .filter_map(|team| team_outcome_score(team, outcome))
                .collect();
            log::trace!(
                "Outcome {} scored for {} of {} teams",
                outcome.key,
                scores.len(),
                teams.len()
            );
            OutcomeAggregate {
                outcome_key: outcome.key.clone(),
                outcome_name: outcome.name.clone(),
                dimension_keys: outcome.dimension_keys.clone(),
                team_count: scores.len(),
                stats: ScoreStats::from_values(&scores).rounded(),
                distribution: HealthDistribution::from_scores(&scores),
                weakest_dimension: weakest_dimension(outcome, aggregates),
            }
        })
        .collect()
}
