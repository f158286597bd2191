mod common;

use common::{data_path, dim, load_portfolio, team};
use jira_health::core::Trend;
use jira_health::portfolio::{
    generate_multi_team_assessment, AggregationMode, DateRange, HealthDistribution, InsightKind,
    InsightSeverity, OutlierDirection, PortfolioConfig, PortfolioRequest, PortfolioScope,
    WizardDefaults,
};
use jira_health::priority::PriorityThresholds;
use jira_health::MultiTeamAssessmentResult;
use pretty_assertions::assert_eq;

fn run(request: &PortfolioRequest) -> MultiTeamAssessmentResult {
    generate_multi_team_assessment(
        request,
        &PortfolioConfig::default(),
        &PriorityThresholds::default(),
    )
    .unwrap()
}

#[test]
fn test_fixture_summary() {
    let result = run(&load_portfolio("portfolio.json"));
    let summary = &result.summary;
    assert_eq!(summary.team_count, 4);
    assert_eq!(summary.dimension_count, 3);
    assert_eq!(summary.overall_health_score, 61.0);
    assert_eq!(
        summary.distribution,
        HealthDistribution {
            excellent: 1,
            good: 1,
            average: 2,
            below_average: 0,
            needs_attention: 0,
        }
    );
    assert_eq!(summary.teams_needing_attention, 0);
    assert_eq!(summary.outlier_count, 1);
    assert_eq!(summary.systemic_issue_count, 1);
    assert_eq!(summary.improving_dimension_count, 1);
    assert_eq!(summary.declining_dimension_count, 1);
}

#[test]
fn test_fixture_team_rollups() {
    let result = run(&load_portfolio("portfolio.json"));
    let order: Vec<&str> = result.teams.iter().map(|t| t.team_id.as_str()).collect();
    assert_eq!(order, vec!["delta", "charlie", "bravo", "alpha"]);

    let delta = &result.teams[0];
    assert_eq!(delta.rank, 1);
    assert_eq!(delta.overall_health_score, 78.0);
    assert_eq!(delta.deviation_from_mean, 17.5);
    assert_eq!(delta.outlier_direction, Some(OutlierDirection::Above));

    let alpha = &result.teams[3];
    assert_eq!(alpha.overall_health_score, 50.0);
    assert_eq!(alpha.deviation_from_mean, -10.8);
    assert!(!alpha.is_outlier);
    assert_eq!(
        alpha.weakest_dimension.as_ref().map(|d| d.dimension_key.as_str()),
        Some("flow")
    );
}

#[test]
fn test_fixture_dimension_aggregates() {
    let result = run(&load_portfolio("portfolio.json"));
    let keys: Vec<&str> = result
        .dimensions
        .iter()
        .map(|d| d.dimension_key.as_str())
        .collect();
    assert_eq!(keys, vec!["flow", "estimation", "quality"]);

    let flow = &result.dimensions[0];
    assert_eq!(flow.stats.mean, 45.0);
    assert_eq!(flow.stats.median, 38.0);
    assert_eq!(flow.stats.min, 30.0);
    assert_eq!(flow.stats.max, 75.0);
    assert_eq!(flow.stats.std_dev, 17.7);
    assert_eq!(flow.teams_needing_attention, 3);
    assert_eq!(flow.trends.declining, 3);
    assert_eq!(flow.min_team.as_deref(), Some("Team Alpha"));
    assert_eq!(flow.max_team.as_deref(), Some("Team Delta"));
    assert_eq!(flow.outlier_teams.len(), 1);
    assert_eq!(flow.outlier_teams[0].team_id, "delta");
    assert!(flow.precision.is_some());

    let quality = &result.dimensions[2];
    assert_eq!(quality.stats.mean, 83.0);
    assert_eq!(quality.trends.improving, 3);
}

#[test]
fn test_fixture_gaps_trends_and_investments() {
    let result = run(&load_portfolio("portfolio.json"));

    let gaps: Vec<(&str, usize, bool)> = result
        .common_gaps
        .iter()
        .map(|g| (g.dimension_key.as_str(), g.affected_team_count, g.is_systemic_issue))
        .collect();
    assert_eq!(gaps, vec![("flow", 3, true), ("estimation", 1, false)]);

    let trending: Vec<(&str, Trend, u32)> = result
        .trending_dimensions
        .iter()
        .map(|t| (t.dimension_key.as_str(), t.direction, t.percentage))
        .collect();
    assert_eq!(
        trending,
        vec![("flow", Trend::Declining, 75), ("quality", Trend::Improving, 75)]
    );

    let investments: Vec<(usize, &str, f64)> = result
        .investment_priorities
        .iter()
        .map(|p| (p.rank, p.dimension_key.as_str(), p.impact_score))
        .collect();
    assert_eq!(investments, vec![(1, "flow", 65.0), (2, "estimation", 30.0)]);
}

#[test]
fn test_fixture_leadership_insights() {
    let result = run(&load_portfolio("portfolio.json"));
    let kinds: Vec<(InsightKind, InsightSeverity)> = result
        .leadership_insights
        .iter()
        .map(|i| (i.kind, i.severity))
        .collect();
    assert_eq!(
        kinds,
        vec![
            (InsightKind::SystemicGap, InsightSeverity::Critical),
            (InsightKind::Inconsistency, InsightSeverity::Warning),
            (InsightKind::DecliningTrend, InsightSeverity::Warning),
            (InsightKind::OutlierTeam, InsightSeverity::Info),
            (InsightKind::ImprovingTrend, InsightSeverity::Info),
            (InsightKind::Strength, InsightSeverity::Info),
        ]
    );
    assert_eq!(result.leadership_insights[0].title, "Systemic gap in Flow Efficiency");
    assert_eq!(
        result.leadership_insights[1].title,
        "Inconsistent Flow Efficiency across teams"
    );
}

#[test]
fn test_fixture_outcomes() {
    let result = run(&load_portfolio("portfolio.json"));
    assert_eq!(result.outcomes.len(), 1);
    let outcome = &result.outcomes[0];
    assert_eq!(outcome.outcome_key, "predictability");
    assert_eq!(outcome.team_count, 4);
    assert_eq!(outcome.stats.mean, 50.0);
    assert_eq!(
        outcome.weakest_dimension.as_ref().map(|d| d.dimension_key.as_str()),
        Some("flow")
    );
}

#[test]
fn test_aggregation_mode_changes_headline_only() {
    let mut request = load_portfolio("portfolio.json");
    request.aggregation_mode = AggregationMode::Weighted;
    let weighted = run(&request);
    assert_eq!(weighted.summary.overall_health_score, 59.0);

    request.aggregation_mode = AggregationMode::Median;
    let median = run(&request);
    assert_eq!(median.summary.overall_health_score, 58.0);
    assert_eq!(median.teams, weighted.teams);
}

#[test]
fn test_empty_portfolio_degenerates_to_zero() {
    let request = PortfolioRequest {
        id: "empty".into(),
        name: "Empty".into(),
        scope: PortfolioScope::default(),
        teams: vec![],
        date_range: DateRange {
            start: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
        },
        aggregation_mode: AggregationMode::Weighted,
        wizard_defaults: WizardDefaults::default(),
    };
    let result = run(&request);
    assert_eq!(result.summary.overall_health_score, 0.0);
    assert_eq!(result.summary.team_score_stats.std_dev, 0.0);
    assert_eq!(result.summary.distribution, HealthDistribution::default());
    assert!(result.common_gaps.is_empty());
    assert!(result.investment_priorities.is_empty());

    assert!(result.summary.team_score_stats.mean.is_finite());
    assert!(result.outcomes.iter().all(|o| o.team_count == 0 && o.stats.mean == 0.0));
}

#[test]
fn test_identical_teams_have_no_outliers() {
    let teams = (0..5)
        .map(|i| team(&i.to_string(), vec![dim("flow", 50.0, Trend::Stable)]))
        .collect();
    let mut request = load_portfolio("portfolio.json");
    request.teams = teams;
    let result = run(&request);
    assert_eq!(result.summary.outlier_count, 0);
    assert!(result.teams.iter().all(|t| !t.is_outlier));
    assert_eq!(result.dimensions[0].stats.std_dev, 0.0);
}

#[test]
fn test_fixture_round_trips_through_json() {
    let result = run(&load_portfolio("portfolio.json"));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["summary"]["teamCount"], 4);
    assert_eq!(json["dimensions"][0]["dimensionKey"], "flow");
    assert_eq!(json["leadershipInsights"][0]["kind"], "systemicGap");
    assert!(data_path("portfolio.json").exists());
}
