use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

use crate::config::{JiraHealthConfig, PresetLevel};
use crate::core::{AssessmentResult, DimensionResult};
use crate::io::{self, OutputFormat};
use crate::priority::{prioritize_dimensions_for_outcome, prioritize_dimensions_with};

/// A single team's assessment, or just its dimensions.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PrioritizeInput {
    Team(AssessmentResult),
    Dimensions(Vec<DimensionResult>),
}

impl PrioritizeInput {
    fn title(&self) -> &str {
        match self {
            PrioritizeInput::Team(team) => &team.team_name,
            PrioritizeInput::Dimensions(_) => "dimensions",
        }
    }

    fn dimensions(&self) -> &[DimensionResult] {
        match self {
            PrioritizeInput::Team(team) => &team.dimensions,
            PrioritizeInput::Dimensions(dims) => dims,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PrioritizeArgs {
    pub file: PathBuf,
    pub outcome: Option<Vec<String>>,
    pub preset: Option<PresetLevel>,
    pub format: Option<OutputFormat>,
    pub output: Option<PathBuf>,
}

pub fn handle_prioritize(args: PrioritizeArgs, config: &JiraHealthConfig) -> Result<()> {
    let contents = io::read_file(&args.file)?;
    let input: PrioritizeInput = serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse assessment {}", args.file.display()))?;

    let thresholds = match args.preset {
        Some(preset) => config.priority_thresholds_for(preset),
        None => config.priority_thresholds(),
    };
    let prioritized = match &args.outcome {
        Some(keys) => {
            prioritize_dimensions_for_outcome(input.dimensions(), keys.as_slice(), &thresholds)?
        }
        None => prioritize_dimensions_with(input.dimensions(), &thresholds)?,
    };
    log::info!(
        "Prioritized {} dimensions for {}",
        prioritized.len(),
        input.title()
    );

    let format = args.format.unwrap_or_else(|| config.default_format());
    super::open_writer(format, args.output.as_deref())?
        .write_prioritization(input.title(), &prioritized)
}
