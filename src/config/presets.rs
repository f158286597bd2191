//! Threshold presets.
//!
//! - **Strict**: more dimensions land in NOW
//! - **Balanced**: the standard 45 / 55 split
//! - **Lenient**: only clearly poor dimensions land in NOW

use serde::{Deserialize, Serialize};

use super::core::{JiraHealthConfig, PriorityConfig};
use crate::portfolio::PortfolioConfig;
use crate::priority::PriorityThresholds;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PresetLevel {
    Strict,
    #[default]
    Balanced,
    Lenient,
}

impl PresetLevel {
    pub fn thresholds(self) -> PriorityThresholds {
        match self {
            PresetLevel::Strict => PriorityThresholds::strict(),
            PresetLevel::Balanced => PriorityThresholds::balanced(),
            PresetLevel::Lenient => PriorityThresholds::lenient(),
        }
    }

    /// Portfolio parameters matching the preset's tolerance.
    pub fn portfolio(self) -> PortfolioConfig {
        match self {
            PresetLevel::Strict => PortfolioConfig {
                outlier_std_dev_multiplier: 1.25,
                gap_threshold: 50.0,
                common_gap_min_fraction: 0.2,
                high_variance_std_dev: 12.0,
                ..PortfolioConfig::default()
            },
            PresetLevel::Balanced => PortfolioConfig::default(),
            PresetLevel::Lenient => PortfolioConfig {
                outlier_std_dev_multiplier: 2.0,
                gap_threshold: 40.0,
                common_gap_min_fraction: 0.33,
                high_variance_std_dev: 20.0,
                ..PortfolioConfig::default()
            },
        }
    }

    pub fn to_config(self) -> JiraHealthConfig {
        JiraHealthConfig {
            priority: Some(PriorityConfig {
                preset: Some(self),
                ..Default::default()
            }),
            portfolio: Some(self.portfolio()),
            output: None,
        }
    }
}
