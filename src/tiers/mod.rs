/// Indicator tier classification for peer-comparison coloring and labels.
///
/// Maps a benchmark percentile onto one of five fixed bands. The bands are
/// static data; nothing here is created or destroyed at runtime.
///
/// ## Architecture
///
/// - **mod.rs**: tier table and lookups
/// - **pure.rs**: classification and per-dimension breakdown
use serde::Serialize;

pub mod pure;

pub use pure::{indicator_tier, tier_breakdown, TierBreakdown};

/// One of the five fixed percentile bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorTier {
    /// 1 (Needs Attention) through 5 (Excellent)
    pub level: u8,
    pub name: &'static str,
    /// Inclusive lower bound
    pub min: u8,
    /// Inclusive upper bound
    pub max: u8,
    pub color: &'static str,
    pub bg_color: &'static str,
    pub border_color: &'static str,
    /// Only tier 1 flags risk
    pub is_risk: bool,
    pub description: &'static str,
}

/// The five tiers in ascending order.
pub static INDICATOR_TIERS: [IndicatorTier; 5] = [
    IndicatorTier {
        level: 1,
        name: "Needs Attention",
        min: 0,
        max: 25,
        color: "#DE350B",
        bg_color: "#FFEBE6",
        border_color: "#FF8F73",
        is_risk: true,
        description: "Bottom quarter of peer teams. Investigate before it affects delivery.",
    },
    IndicatorTier {
        level: 2,
        name: "Below Average",
        min: 26,
        max: 50,
        color: "#FF8B00",
        bg_color: "#FFF4E5",
        border_color: "#FFC400",
        is_risk: false,
        description: "Trailing most peer teams. Worth a closer look.",
    },
    IndicatorTier {
        level: 3,
        name: "Average",
        min: 51,
        max: 75,
        color: "#6B778C",
        bg_color: "#F4F5F7",
        border_color: "#C1C7D0",
        is_risk: false,
        description: "In line with the middle of peer teams.",
    },
    IndicatorTier {
        level: 4,
        name: "Good",
        min: 76,
        max: 90,
        color: "#00875A",
        bg_color: "#E3FCEF",
        border_color: "#79F2C0",
        is_risk: false,
        description: "Ahead of most peer teams.",
    },
    IndicatorTier {
        level: 5,
        name: "Excellent",
        min: 91,
        max: 100,
        color: "#0052CC",
        bg_color: "#DEEBFF",
        border_color: "#4C9AFF",
        is_risk: false,
        description: "Top tenth of peer teams. A practice others can learn from.",
    },
];

impl IndicatorTier {
    /// Short label used in compact displays ("T1".."T5").
    pub fn short_label(&self) -> String {
        format!("T{}", self.level)
    }
}

/// All tiers in ascending order.
pub fn all_indicator_tiers() -> &'static [IndicatorTier; 5] {
    &INDICATOR_TIERS
}

/// Tier for a level in 1..=5.
pub fn indicator_tier_by_level(level: u8) -> Option<&'static IndicatorTier> {
    INDICATOR_TIERS.iter().find(|t| t.level == level)
}
