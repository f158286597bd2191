//! Assessment data model shared by every scoring module.
//!
//! All entities are plain values: produced by the data layer, read by the
//! scoring functions, never mutated in place.

pub mod band;
pub mod score;
pub mod types;

pub use band::HealthBand;
pub use score::HealthScore;
pub use types::{
    AssessmentResult, DimensionResult, IndicatorCategory, IndicatorResult, OutcomeDefinition,
    Trend, TrendPoint,
};
