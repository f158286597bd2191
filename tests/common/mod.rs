// Shared fixtures for jira-health integration tests
#![allow(dead_code)]

use jira_health::core::{AssessmentResult, DimensionResult, Trend};
use jira_health::portfolio::PortfolioRequest;
use std::path::PathBuf;

pub fn data_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/data")
        .join(name)
}

pub fn load_team(name: &str) -> AssessmentResult {
    let contents = std::fs::read_to_string(data_path(name)).unwrap();
    serde_json::from_str(&contents).unwrap()
}

pub fn load_portfolio(name: &str) -> PortfolioRequest {
    let contents = std::fs::read_to_string(data_path(name)).unwrap();
    serde_json::from_str(&contents).unwrap()
}

pub fn dim(key: &str, score: f64, trend: Trend) -> DimensionResult {
    DimensionResult::new(key, key.to_uppercase(), score, trend)
}

pub fn team(id: &str, dims: Vec<DimensionResult>) -> AssessmentResult {
    AssessmentResult {
        team_id: id.to_string(),
        team_name: format!("Team {id}"),
        team_size: None,
        overall_health_score: None,
        dimensions: dims,
    }
}

pub fn keys(dims: &[jira_health::PrioritizedDimension]) -> Vec<&str> {
    dims.iter()
        .map(|d| d.dimension.dimension_key.as_str())
        .collect()
}
