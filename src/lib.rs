// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod config;
pub mod core;
pub mod errors;
pub mod io;
pub mod portfolio;
pub mod precision;
pub mod priority;
pub mod tiers;

// Re-export commonly used types
pub use crate::core::{
    AssessmentResult, DimensionResult, HealthBand, HealthScore, IndicatorCategory,
    IndicatorResult, OutcomeDefinition, Trend, TrendPoint,
};

pub use crate::errors::{HealthError, Result};

pub use crate::tiers::{
    all_indicator_tiers, indicator_tier, indicator_tier_by_level, tier_breakdown, IndicatorTier,
    TierBreakdown,
};

pub use crate::precision::{
    calculate_precision, calculate_precision_default, calculate_precision_from_se,
    PrecisionResult, PrecisionTier,
};

pub use crate::priority::{
    dimension_priority_tier, prioritize_dimensions, prioritize_dimensions_for_outcome,
    prioritize_dimensions_with, priority_counts, top_priority, PrioritizedDimension,
    PrioritizedDimensions, PriorityCounts, PriorityThresholds, PriorityTier,
};

pub use crate::portfolio::{
    generate_multi_team_assessment, MultiTeamAssessmentResult, PortfolioConfig,
    PortfolioRequest,
};

pub use crate::config::{load_config, JiraHealthConfig};

pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
