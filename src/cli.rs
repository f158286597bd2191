use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::config::PresetLevel;
use crate::portfolio::AggregationMode;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ThresholdPreset {
    /// More dimensions land in NOW
    Strict,
    /// Standard 45 / 55 thresholds (default)
    Balanced,
    /// Only clearly poor dimensions land in NOW
    Lenient,
}

impl From<ThresholdPreset> for PresetLevel {
    fn from(p: ThresholdPreset) -> Self {
        match p {
            ThresholdPreset::Strict => PresetLevel::Strict,
            ThresholdPreset::Balanced => PresetLevel::Balanced,
            ThresholdPreset::Lenient => PresetLevel::Lenient,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    Terminal,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
            OutputFormat::Markdown => crate::io::output::OutputFormat::Markdown,
            OutputFormat::Terminal => crate::io::output::OutputFormat::Terminal,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Aggregation {
    Mean,
    Median,
    /// Mean weighted by team size
    Weighted,
}

impl From<Aggregation> for AggregationMode {
    fn from(a: Aggregation) -> Self {
        match a {
            Aggregation::Mean => AggregationMode::Mean,
            Aggregation::Median => AggregationMode::Median,
            Aggregation::Weighted => AggregationMode::Weighted,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "jira-health")]
#[command(about = "Health scoring, prioritization and portfolio rollups for Jira teams", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// Configuration file (defaults to the nearest .jira-health.toml)
    #[arg(long, global = true, env = "JIRA_HEALTH_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Classify a benchmark percentile into its indicator tier
    Tier {
        /// Benchmark percentile (0-100)
        percentile: f64,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Describe the precision of a confidence interval
    Precision {
        /// Lower bound of the confidence interval
        #[arg(long, allow_hyphen_values = true, requires = "upper")]
        lower: Option<f64>,

        /// Upper bound of the confidence interval
        #[arg(long, requires = "lower")]
        upper: Option<f64>,

        #[arg(long, default_value = "0")]
        scale_min: f64,

        #[arg(long, default_value = "100")]
        scale_max: f64,

        /// Derive the interval from a standard error instead
        #[arg(long = "standard-error", visible_alias = "se", conflicts_with_all = ["lower", "upper"])]
        standard_error: Option<f64>,

        /// Confidence level for --standard-error (0.90, 0.95 or 0.99)
        #[arg(long, default_value = "0.90")]
        confidence: f64,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Sort a team's dimensions into NOW / NEXT / LATER
    Prioritize {
        /// Team assessment JSON (an assessment or a list of dimensions)
        file: PathBuf,

        /// Only dimensions in these keys (comma-separated)
        #[arg(long, value_delimiter = ',')]
        outcome: Option<Vec<String>>,

        /// Threshold preset (overrides the config file)
        #[arg(long, value_enum)]
        preset: Option<ThresholdPreset>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Aggregate several team assessments into a portfolio view
    Portfolio {
        /// Portfolio request JSON
        file: PathBuf,

        /// Override the request's aggregation mode
        #[arg(long, value_enum)]
        aggregation: Option<Aggregation>,

        /// Threshold preset (overrides the config file)
        #[arg(long, value_enum)]
        preset: Option<ThresholdPreset>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Initialize a jira-health configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_prioritize_with_outcome() {
        let cli = Cli::try_parse_from([
            "jira-health",
            "-vv",
            "prioritize",
            "team.json",
            "--outcome",
            "flow,quality",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.verbosity, 2);
        match cli.command {
            Commands::Prioritize {
                outcome, format, ..
            } => {
                assert_eq!(outcome, Some(vec!["flow".to_string(), "quality".to_string()]));
                assert_eq!(format, Some(OutputFormat::Json));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_precision_interval_and_se_conflict() {
        let result = Cli::try_parse_from([
            "jira-health",
            "precision",
            "--lower",
            "40",
            "--upper",
            "60",
            "--standard-error",
            "3",
        ]);
        assert!(result.is_err());
    }
}
