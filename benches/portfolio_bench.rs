use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use jira_health::core::{AssessmentResult, DimensionResult, Trend};
use jira_health::portfolio::{
    generate_multi_team_assessment, AggregationMode, DateRange, PortfolioConfig,
    PortfolioRequest, PortfolioScope, WizardDefaults,
};
use jira_health::priority::{prioritize_dimensions, PriorityThresholds};
use std::hint::black_box;

const DIMENSIONS: [&str; 8] = [
    "flow",
    "quality",
    "estimation",
    "planning",
    "predictability",
    "collaboration",
    "backlog",
    "hygiene",
];

fn synthetic_team(i: usize) -> AssessmentResult {
    let trends = [Trend::Improving, Trend::Stable, Trend::Declining];
    AssessmentResult {
        team_id: format!("team-{i}"),
        team_name: format!("Team {i}"),
        team_size: Some((i % 9 + 3) as u32),
        overall_health_score: None,
        dimensions: DIMENSIONS
            .iter()
            .enumerate()
            .map(|(j, key)| {
                let score = ((i * 37 + j * 11) % 100) as f64;
                DimensionResult::new(*key, key.to_uppercase(), score, trends[(i + j) % 3])
            })
            .collect(),
    }
}

fn synthetic_request(teams: usize) -> PortfolioRequest {
    PortfolioRequest {
        id: "bench".into(),
        name: "Bench".into(),
        scope: PortfolioScope::default(),
        teams: (0..teams).map(synthetic_team).collect(),
        date_range: DateRange {
            start: chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end: chrono::NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
        },
        aggregation_mode: AggregationMode::Mean,
        wizard_defaults: WizardDefaults::default(),
    }
}

fn bench_portfolio(c: &mut Criterion) {
    let config = PortfolioConfig::default();
    let thresholds = PriorityThresholds::default();
    let mut group = c.benchmark_group("portfolio_aggregation");
    for teams in [10, 50, 200] {
        let request = synthetic_request(teams);
        group.bench_with_input(BenchmarkId::from_parameter(teams), &request, |b, request| {
            b.iter(|| {
                generate_multi_team_assessment(black_box(request), &config, &thresholds).unwrap()
            })
        });
    }
    group.finish();
}

fn bench_prioritize(c: &mut Criterion) {
    let team = synthetic_team(7);
    c.bench_function("prioritize_dimensions", |b| {
        b.iter(|| prioritize_dimensions(black_box(&team.dimensions)).unwrap())
    });
}

criterion_group!(benches, bench_portfolio, bench_prioritize);
criterion_main!(benches);
