/// Small score/trend predicates composed by the tier classifier.
use super::PriorityThresholds;
use crate::core::Trend;

/// Score is poor enough to act on regardless of trend.
#[inline]
pub fn is_critical_score(score: f64, thresholds: &PriorityThresholds) -> bool {
    score < thresholds.now_below
}

/// Score has not reached the "good" line.
#[inline]
pub fn is_below_watch(score: f64, thresholds: &PriorityThresholds) -> bool {
    score < thresholds.watch_below
}

#[inline]
pub fn is_declining(trend: Trend) -> bool {
    trend == Trend::Declining
}

/// Poor score, or a sub-good score that is also getting worse.
pub fn needs_action_now(score: f64, trend: Trend, thresholds: &PriorityThresholds) -> bool {
    is_critical_score(score, thresholds)
        || (is_below_watch(score, thresholds) && is_declining(trend))
}

/// Good or better and holding or improving.
pub fn can_wait(score: f64, trend: Trend, thresholds: &PriorityThresholds) -> bool {
    !is_below_watch(score, thresholds) && !is_declining(trend)
}
