/// Reason strings explaining why a dimension landed in its tier.
use super::{PriorityThresholds, PriorityTier};
use crate::core::{HealthBand, Trend};

fn trend_phrase(trend: Trend) -> &'static str {
    match trend {
        Trend::Improving => "improving",
        Trend::Stable => "holding steady",
        Trend::Declining => "declining",
    }
}

fn score_phrase(score: f64) -> &'static str {
    match HealthBand::from_score(score) {
        HealthBand::NeedsAttention => "in need of attention",
        band => band.descriptor(),
    }
}

/// Explanation for a dimension's tier placement.
pub fn priority_reason(
    tier: PriorityTier,
    score: f64,
    trend: Trend,
    thresholds: &PriorityThresholds,
) -> String {
    let descriptor = score_phrase(score);
    let shown = score.round();
    match tier {
        PriorityTier::Now if score < thresholds.now_below => format!(
            "Health is {descriptor} ({shown}) and {}. Address this first.",
            trend_phrase(trend)
        ),
        PriorityTier::Now => format!(
            "Health is {descriptor} ({shown}) and declining. Act before it slips further."
        ),
        PriorityTier::Next if trend == Trend::Declining => format!(
            "Health is {descriptor} ({shown}) but declining. Watch closely to protect current performance."
        ),
        PriorityTier::Next => format!(
            "Health is {descriptor} ({shown}) and {}. Improve once NOW items are in hand.",
            trend_phrase(trend)
        ),
        PriorityTier::Later => format!(
            "Health is {descriptor} ({shown}) and {}. Maintain current practices.",
            trend_phrase(trend)
        ),
    }
}
