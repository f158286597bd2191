use anyhow::Result;

use crate::io::OutputFormat;
use crate::precision::{calculate_precision, calculate_precision_from_se};
use crate::tiers::indicator_tier;

pub fn handle_tier(percentile: f64, format: OutputFormat) -> Result<()> {
    let tier = indicator_tier(percentile);
    log::debug!("Percentile {} classified as tier {}", percentile, tier.level);
    super::open_writer(format, None)?.write_tier(percentile, tier)
}

#[derive(Debug, Clone)]
pub struct PrecisionArgs {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
    pub scale_min: f64,
    pub scale_max: f64,
    pub standard_error: Option<f64>,
    pub confidence: f64,
    pub format: OutputFormat,
}

pub fn handle_precision(args: PrecisionArgs) -> Result<()> {
    let precision = match (args.standard_error, args.lower, args.upper) {
        (Some(se), _, _) => calculate_precision_from_se(se, args.confidence, args.scale_max)?,
        (None, Some(lower), Some(upper)) => {
            calculate_precision(lower, upper, args.scale_min, args.scale_max)?
        }
        _ => anyhow::bail!("Provide --lower and --upper, or --standard-error"),
    };
    super::open_writer(args.format, None)?.write_precision(&precision)
}
