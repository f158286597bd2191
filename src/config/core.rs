use serde::{Deserialize, Serialize};

use super::presets::PresetLevel;
use crate::io::output::OutputFormat;
use crate::portfolio::PortfolioConfig;
use crate::priority::PriorityThresholds;

/// Root configuration structure for jira-health
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct JiraHealthConfig {
    /// NOW / NEXT / LATER thresholds
    #[serde(default)]
    pub priority: Option<PriorityConfig>,

    /// Portfolio statistical parameters
    #[serde(default)]
    pub portfolio: Option<PortfolioConfig>,

    /// Output configuration
    #[serde(default)]
    pub output: Option<OutputConfig>,
}

/// Priority thresholds: a preset, optionally overridden field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PriorityConfig {
    #[serde(default)]
    pub preset: Option<PresetLevel>,

    #[serde(default)]
    pub now_below: Option<f64>,

    #[serde(default)]
    pub watch_below: Option<f64>,
}

impl PriorityConfig {
    /// Preset thresholds (balanced when unset) with explicit values applied.
    pub fn resolve(&self) -> PriorityThresholds {
        let base = self.preset.unwrap_or(PresetLevel::Balanced).thresholds();
        PriorityThresholds {
            now_below: self.now_below.unwrap_or(base.now_below),
            watch_below: self.watch_below.unwrap_or(base.watch_below),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}

impl JiraHealthConfig {
    pub fn priority_thresholds(&self) -> PriorityThresholds {
        self.priority
            .as_ref()
            .map(PriorityConfig::resolve)
            .unwrap_or_default()
    }

    /// Thresholds for an explicit preset, keeping any per-field overrides.
    ///
    /// Overrides that do not fit the preset (for example a `now_below`
    /// above the preset's `watch_below`) are dropped with a warning and the
    /// plain preset is used.
    pub fn priority_thresholds_for(&self, preset: PresetLevel) -> PriorityThresholds {
        let merged = PriorityConfig {
            preset: Some(preset),
            ..self.priority.clone().unwrap_or_default()
        }
        .resolve();
        match merged.validate() {
            Ok(()) => merged,
            Err(e) => {
                log::warn!(
                    "Ignoring priority overrides for the {:?} preset: {}",
                    preset,
                    e
                );
                preset.thresholds()
            }
        }
    }

    pub fn portfolio_config(&self) -> PortfolioConfig {
        self.portfolio.clone().unwrap_or_default()
    }

    pub fn default_format(&self) -> OutputFormat {
        self.output
            .as_ref()
            .and_then(|o| o.default_format)
            .unwrap_or(OutputFormat::Terminal)
    }
}
