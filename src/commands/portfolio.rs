use anyhow::{Context, Result};
use std::path::PathBuf;

use crate::config::{JiraHealthConfig, PresetLevel};
use crate::io::{self, OutputFormat};
use crate::portfolio::{generate_multi_team_assessment, AggregationMode, PortfolioRequest};

#[derive(Debug, Clone)]
pub struct PortfolioArgs {
    pub file: PathBuf,
    pub aggregation: Option<AggregationMode>,
    pub preset: Option<PresetLevel>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

pub fn handle_portfolio(args: PortfolioArgs, config: &JiraHealthConfig) -> Result<()> {
    let contents = io::read_file(&args.file)?;
    let mut request: PortfolioRequest = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse portfolio request {}", args.file.display()))?;
    if let Some(mode) = args.aggregation {
        request.aggregation_mode = mode;
    }

    let (thresholds, portfolio_config) = match args.preset {
        Some(preset) => (config.priority_thresholds_for(preset), preset.portfolio()),
        None => (config.priority_thresholds(), config.portfolio_config()),
    };
    let result = generate_multi_team_assessment(&request, &portfolio_config, &thresholds)
        .with_context(|| format!("Failed to aggregate portfolio {}", request.id))?;
    log::info!(
        "Aggregated {} teams across {} dimensions",
        result.summary.team_count,
        result.summary.dimension_count
    );

    let format = args.format.unwrap_or_else(|| config.default_format());
    super::open_writer(format, args.output.as_deref())?.write_portfolio(&result)
}
