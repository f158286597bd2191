//! Investment priorities and leadership insights.
//!
//! Both are scored sorts over the aggregates, rendered into short sentences
//! for a leadership audience.

use super::types::{
    CommonGap, DimensionAggregate, InsightKind, InsightSeverity, InvestmentPriority,
    LeadershipInsight, OutlierDirection, TeamRollup, TrendingDimension,
};
use super::PortfolioConfig;
use crate::core::band::GOOD_BELOW;
use crate::core::score::{percentage, round1};
use crate::core::{HealthBand, Trend};

const HEADROOM_WEIGHT: f64 = 0.5;
const ATTENTION_WEIGHT: f64 = 0.3;
const DECLINING_WEIGHT: f64 = 0.2;

/// `0.5 * (100 - mean) + 0.3 * attention% + 0.2 * declining%`, one decimal.
pub fn investment_impact(aggregate: &DimensionAggregate) -> f64 {
    let attention = f64::from(percentage(
        aggregate.teams_needing_attention,
        aggregate.team_count,
    ));
    let declining = f64::from(percentage(aggregate.trends.declining, aggregate.team_count));
    round1(
        HEADROOM_WEIGHT * (100.0 - aggregate.stats.mean)
            + ATTENTION_WEIGHT * attention
            + DECLINING_WEIGHT * declining,
    )
}

fn is_investment_candidate(aggregate: &DimensionAggregate) -> bool {
    aggregate.stats.mean < GOOD_BELOW
        || aggregate.teams_needing_attention > 0
        || aggregate.trends.declining > 0
}

fn investment_rationale(aggregate: &DimensionAggregate) -> String {
    let mut rationale = format!(
        "Average health {} ({}) across {} teams",
        aggregate.stats.mean,
        HealthBand::from_score(aggregate.stats.mean).descriptor(),
        aggregate.team_count
    );
    if aggregate.teams_needing_attention > 0 {
        rationale.push_str(&format!(
            "; {} need immediate attention",
            aggregate.teams_needing_attention
        ));
    }
    if aggregate.trends.declining > 0 {
        rationale.push_str(&format!("; {} declining", aggregate.trends.declining));
    }
    rationale.push('.');
    rationale
}

/// Dimensions ranked by expected impact of investment, highest first.
pub fn investment_priorities(
    aggregates: &[DimensionAggregate],
    config: &PortfolioConfig,
) -> Vec<InvestmentPriority> {
    let mut candidates: Vec<(&DimensionAggregate, f64)> = aggregates
        .iter()
        .filter(|agg| agg.team_count > 0 && is_investment_candidate(agg))
        .map(|agg| (agg, investment_impact(agg)))
        .filter(|(_, impact)| *impact > 0.0)
        .collect();
    candidates.sort_by(|a, b| b.1.total_cmp(&a.1));
    candidates
        .into_iter()
        .take(config.max_investment_priorities)
        .enumerate()
        .map(|(i, (agg, impact))| InvestmentPriority {
            rank: i + 1,
            dimension_key: agg.dimension_key.clone(),
            dimension_name: agg.dimension_name.clone(),
            impact_score: impact,
            average_score: agg.stats.mean,
            teams_affected: agg.teams_needing_attention,
            rationale: investment_rationale(agg),
        })
        .collect()
}

/// Inputs the insight generator reads.
pub struct InsightContext<'a> {
    pub aggregates: &'a [DimensionAggregate],
    pub gaps: &'a [CommonGap],
    pub trending: &'a [TrendingDimension],
    pub teams: &'a [TeamRollup],
    pub portfolio_mean: f64,
    pub gap_threshold: f64,
    pub total_teams: usize,
}

fn insight(
    kind: InsightKind,
    severity: InsightSeverity,
    title: String,
    detail: String,
) -> LeadershipInsight {
    LeadershipInsight {
        kind,
        severity,
        title,
        detail,
        dimension_key: None,
        team_id: None,
    }
}

fn systemic_gap_insights<'a>(
    ctx: &'a InsightContext<'a>,
) -> impl Iterator<Item = LeadershipInsight> + 'a {
    ctx.gaps.iter().filter(|g| g.is_systemic_issue).map(move |gap| LeadershipInsight {
        dimension_key: Some(gap.dimension_key.clone()),
        ..insight(
            InsightKind::SystemicGap,
            InsightSeverity::Critical,
            format!("Systemic gap in {}", gap.dimension_name),
            format!(
                "{} of {} teams ({}%) score below {} in {}. This needs an organisation-level response rather than team-by-team fixes.",
                gap.affected_team_count,
                ctx.total_teams,
                gap.affected_percentage,
                ctx.gap_threshold,
                gap.dimension_name
            ),
        )
    })
}

fn inconsistency_insights<'a>(
    ctx: &'a InsightContext<'_>,
    config: &'a PortfolioConfig,
) -> impl Iterator<Item = LeadershipInsight> + 'a {
    ctx.aggregates
        .iter()
        .filter(move |agg| agg.team_count >= 2 && agg.stats.std_dev >= config.high_variance_std_dev)
        .map(|agg| LeadershipInsight {
            dimension_key: Some(agg.dimension_key.clone()),
            ..insight(
                InsightKind::Inconsistency,
                InsightSeverity::Warning,
                format!("Inconsistent {} across teams", agg.dimension_name),
                format!(
                    "Scores range from {} ({}) to {} ({}) with a standard deviation of {}. Pair the strongest and weakest teams to spread what works.",
                    agg.stats.min,
                    agg.min_team.as_deref().unwrap_or("unknown"),
                    agg.stats.max,
                    agg.max_team.as_deref().unwrap_or("unknown"),
                    agg.stats.std_dev
                ),
            )
        })
}

fn outlier_insights<'a>(
    ctx: &'a InsightContext<'a>,
) -> impl Iterator<Item = LeadershipInsight> + 'a {
    let mean = ctx.portfolio_mean.round();
    ctx.teams.iter().filter_map(move |team| {
        let direction = team.outlier_direction?;
        let (severity, title, relation) = match direction {
            OutlierDirection::Below => (
                InsightSeverity::Warning,
                format!("{} trails the portfolio", team.team_name),
                "below",
            ),
            OutlierDirection::Above => (
                InsightSeverity::Info,
                format!("{} leads the portfolio", team.team_name),
                "above",
            ),
        };
        Some(LeadershipInsight {
            team_id: Some(team.team_id.clone()),
            ..insight(
                InsightKind::OutlierTeam,
                severity,
                title,
                format!(
                    "Overall health {} is {} points {} the portfolio mean of {}.",
                    team.overall_health_score,
                    team.deviation_from_mean.abs(),
                    relation,
                    mean
                ),
            )
        })
    })
}

fn trend_insights<'a>(
    ctx: &'a InsightContext<'a>,
) -> impl Iterator<Item = LeadershipInsight> + 'a {
    ctx.trending.iter().map(|t| {
        let (kind, severity, verb) = match t.direction {
            Trend::Declining => (InsightKind::DecliningTrend, InsightSeverity::Warning, "declining"),
            _ => (InsightKind::ImprovingTrend, InsightSeverity::Info, "improving"),
        };
        LeadershipInsight {
            dimension_key: Some(t.dimension_key.clone()),
            ..insight(
                kind,
                severity,
                format!("{} is {} across the portfolio", t.dimension_name, verb),
                format!(
                    "{} is {} in {} teams ({}% of the portfolio).",
                    t.dimension_name, verb, t.team_count, t.percentage
                ),
            )
        }
    })
}

fn strength_insight(ctx: &InsightContext<'_>) -> Option<LeadershipInsight> {
    let best = ctx
        .aggregates
        .iter()
        .filter(|agg| agg.team_count > 0)
        .fold(None::<&DimensionAggregate>, |best, agg| match best {
            Some(b) if b.stats.mean >= agg.stats.mean => Some(b),
            _ => Some(agg),
        })?;
    if HealthBand::from_score(best.stats.mean) != HealthBand::Excellent {
        return None;
    }
    Some(LeadershipInsight {
        dimension_key: Some(best.dimension_key.clone()),
        ..insight(
            InsightKind::Strength,
            InsightSeverity::Info,
            format!("Portfolio strength: {}", best.dimension_name),
            format!(
                "{} averages {} across {} teams, the strongest dimension in the portfolio.",
                best.dimension_name, best.stats.mean, best.team_count
            ),
        )
    })
}

/// Leadership insights, most severe first.
pub fn leadership_insights(
    ctx: &InsightContext<'_>,
    config: &PortfolioConfig,
) -> Vec<LeadershipInsight> {
    let mut insights: Vec<LeadershipInsight> = systemic_gap_insights(ctx)
        .chain(inconsistency_insights(ctx, config))
        .chain(outlier_insights(ctx))
        .chain(trend_insights(ctx))
        .chain(strength_insight(ctx))
        .collect();
    insights.sort_by_key(|i| i.severity);
    insights
}
