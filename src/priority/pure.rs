/// Pure prioritization logic using composed predicates.
///
/// Every function here is deterministic: the same dimensions in the same
/// order always produce the same tiers in the same order.
use super::predicates::{can_wait, needs_action_now};
use super::reasons::priority_reason;
use super::{
    PrioritizedDimension, PrioritizedDimensions, PriorityCounts, PriorityThresholds,
    PriorityTier,
};
use crate::core::{DimensionResult, Trend};
use crate::errors::Result;

/// Tier for a resolved score and trend.
pub fn classify_priority(score: f64, trend: Trend, thresholds: &PriorityThresholds) -> PriorityTier {
    if needs_action_now(score, trend, thresholds) {
        PriorityTier::Now
    } else if can_wait(score, trend, thresholds) {
        PriorityTier::Later
    } else {
        PriorityTier::Next
    }
}

/// Sort key within a tier: `score + trend_weight * 100`.
///
/// Lower is more urgent. The trend weight (declining 0, stable 1,
/// improving 2) shifts whole trend groups, so within a tier declining
/// dimensions come before stable ones, which come before improving ones.
pub fn priority_score(score: f64, trend: Trend) -> f64 {
    score + trend.weight() * 100.0
}

/// Annotate one dimension with tier, sort key and reason.
pub fn prioritize_dimension(
    dimension: &DimensionResult,
    thresholds: &PriorityThresholds,
) -> Result<PrioritizedDimension> {
    let score = dimension.effective_score()?.value();
    let trend = dimension.trend;
    let tier = classify_priority(score, trend, thresholds);
    Ok(PrioritizedDimension {
        dimension: dimension.clone(),
        resolved_score: score,
        tier,
        priority_score: priority_score(score, trend),
        reason: priority_reason(tier, score, trend, thresholds),
    })
}

/// Partition dimensions into NOW / NEXT / LATER with default thresholds.
pub fn prioritize_dimensions(dimensions: &[DimensionResult]) -> Result<PrioritizedDimensions> {
    prioritize_dimensions_with(dimensions, &PriorityThresholds::default())
}

/// Partition dimensions into NOW / NEXT / LATER.
///
/// Every input dimension appears in exactly one tier. Each tier is sorted by
/// ascending priority score; the sort is stable, so equal scores keep input
/// order.
pub fn prioritize_dimensions_with(
    dimensions: &[DimensionResult],
    thresholds: &PriorityThresholds,
) -> Result<PrioritizedDimensions> {
    let mut result = PrioritizedDimensions::default();
    for dimension in dimensions {
        let prioritized = prioritize_dimension(dimension, thresholds)?;
        match prioritized.tier {
            PriorityTier::Now => result.now.push(prioritized),
            PriorityTier::Next => result.next.push(prioritized),
            PriorityTier::Later => result.later.push(prioritized),
        }
    }
    for tier in [&mut result.now, &mut result.next, &mut result.later] {
        tier.sort_by(|a, b| a.priority_score.total_cmp(&b.priority_score));
    }
    log::debug!(
        "Prioritized {} dimensions: {} now, {} next, {} later",
        dimensions.len(),
        result.now.len(),
        result.next.len(),
        result.later.len()
    );
    Ok(result)
}

/// Prioritize only the dimensions that belong to one outcome.
pub fn prioritize_dimensions_for_outcome<S: AsRef<str>>(
    dimensions: &[DimensionResult],
    outcome_dimension_keys: &[S],
    thresholds: &PriorityThresholds,
) -> Result<PrioritizedDimensions> {
    let selected: Vec<DimensionResult> = dimensions
        .iter()
        .filter(|d| {
            outcome_dimension_keys
                .iter()
                .any(|k| k.as_ref() == d.dimension_key)
        })
        .cloned()
        .collect();
    prioritize_dimensions_with(&selected, thresholds)
}

/// Most urgent dimension, or `None` when nothing is in NOW.
pub fn top_priority(
    dimensions: &[DimensionResult],
    thresholds: &PriorityThresholds,
) -> Result<Option<PrioritizedDimension>> {
    let mut prioritized = prioritize_dimensions_with(dimensions, thresholds)?;
    if prioritized.now.is_empty() {
        Ok(None)
    } else {
        Ok(Some(prioritized.now.remove(0)))
    }
}

/// Tier sizes and total.
pub fn priority_counts(
    dimensions: &[DimensionResult],
    thresholds: &PriorityThresholds,
) -> Result<PriorityCounts> {
    Ok(prioritize_dimensions_with(dimensions, thresholds)?.counts())
}

/// Tier for a single dimension.
pub fn dimension_priority_tier(
    dimension: &DimensionResult,
    thresholds: &PriorityThresholds,
) -> Result<PriorityTier> {
    let score = dimension.effective_score()?.value();
    Ok(classify_priority(score, dimension.trend, thresholds))
}
