use anyhow::Result;
use clap::Parser;
use jira_health::cli::{Cli, Commands};
use jira_health::commands::{self, PortfolioArgs, PrecisionArgs, PrioritizeArgs};
use log::LevelFilter;

fn log_level(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

// RUST_LOG, when set, takes precedence over -v
fn init_logging(verbosity: u8) {
    env_logger::Builder::new()
        .filter_level(log_level(verbosity))
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbosity);

    match cli.command {
        Commands::Init { force } => commands::init_config(force),
        Commands::Tier { percentile, format } => {
            let config = commands::resolve_config(cli.config.as_deref())?;
            let format = format.map_or_else(|| config.default_format(), Into::into);
            commands::handle_tier(percentile, format)
        }
        Commands::Precision {
            lower,
            upper,
            scale_min,
            scale_max,
            standard_error,
            confidence,
            format,
        } => {
            let config = commands::resolve_config(cli.config.as_deref())?;
            commands::handle_precision(PrecisionArgs {
                lower,
                upper,
                scale_min,
                scale_max,
                standard_error,
                confidence,
                format: format.map_or_else(|| config.default_format(), Into::into),
            })
        }
        Commands::Prioritize {
            file,
            outcome,
            preset,
            format,
            output,
        } => {
            let config = commands::resolve_config(cli.config.as_deref())?;
            commands::handle_prioritize(
                PrioritizeArgs {
                    file,
                    outcome,
                    preset: preset.map(Into::into),
                    format: format.map(Into::into),
                    output,
                },
                &config,
            )
        }
        Commands::Portfolio {
            file,
            aggregation,
            preset,
            format,
            output,
        } => {
            let config = commands::resolve_config(cli.config.as_deref())?;
            commands::handle_portfolio(
                PortfolioArgs {
                    file,
                    aggregation: aggregation.map(Into::into),
                    preset: preset.map(Into::into),
                    format: format.map(Into::into),
                    output,
                },
                &config,
            )
        }
    }
}
