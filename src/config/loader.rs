use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::JiraHealthConfig;
use crate::errors::{HealthError, Result};
use crate::portfolio::PortfolioConfig;
use crate::priority::PriorityThresholds;

pub const CONFIG_FILE_NAME: &str = ".jira-health.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

fn read_config_file(path: &Path) -> std::io::Result<String> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse TOML and replace invalid sections with their defaults.
///
/// Only a syntax or type error fails; out-of-range values are logged and
/// fall back so that one bad number does not discard the whole file.
pub fn parse_and_validate_config(contents: &str) -> std::result::Result<JiraHealthConfig, String> {
    let mut config = toml::from_str::<JiraHealthConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;

    if config.priority.is_some() {
        if let Err(e) = config.priority_thresholds().validate() {
            log::warn!("Invalid priority thresholds: {}. Using defaults.", e);
            config.priority = None;
        }
    }

    if let Some(ref portfolio) = config.portfolio {
        if let Err(e) = portfolio.validate() {
            log::warn!("Invalid portfolio settings: {}. Using defaults.", e);
            config.portfolio = Some(PortfolioConfig::default());
        }
    }

    Ok(config)
}

fn try_load_config_from_path(config_path: &Path) -> Option<JiraHealthConfig> {
    let contents = match read_config_file(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_and_validate_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(config)
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // A missing file just means keep searching
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// `start` followed by its ancestors, at most `max_depth` entries.
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Load the nearest `.jira-health.toml` at or above `start`, or defaults.
pub fn load_config_from_dir(start: &Path) -> JiraHealthConfig {
    directory_ancestors(start.to_path_buf(), MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            JiraHealthConfig::default()
        })
}

/// Load configuration discovered from the current directory.
pub fn load_config() -> JiraHealthConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from_dir(&dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            JiraHealthConfig::default()
        }
    }
}

/// Load an explicitly named config file. Unlike discovery, a missing or
/// unparseable file is an error.
pub fn load_config_from_path(path: &Path) -> Result<JiraHealthConfig> {
    let contents = read_config_file(path)
        .map_err(|e| HealthError::config_at(format!("cannot read config: {e}"), path))?;
    parse_and_validate_config(&contents).map_err(|message| HealthError::config_at(message, path))
}

/// Commented default configuration written by `jira-health init`.
pub fn default_config_toml() -> String {
    let thresholds = PriorityThresholds::default();
    let portfolio = PortfolioConfig::default();
    format!(
        r#"# jira-health configuration

[priority]
# strict, balanced or lenient
preset = "balanced"
# Scores below this are NOW regardless of trend
now_below = {now_below:.1}
# Declining scores below this are NOW; steady scores at or above it are LATER
watch_below = {watch_below:.1}

[portfolio]
outlier_std_dev_multiplier = {outlier:.1}
gap_threshold = {gap:.1}
common_gap_min_fraction = {gap_fraction:.2}
systemic_issue_fraction = {systemic:.2}
trending_min_fraction = {trending:.2}
high_variance_std_dev = {variance:.1}
max_investment_priorities = {max_investments}
# 0.90, 0.95 or 0.99
precision_confidence_level = {confidence:.2}

[output]
# terminal, json or markdown
default_format = "terminal"
"#,
        now_below = thresholds.now_below,
        watch_below = thresholds.watch_below,
        outlier = portfolio.outlier_std_dev_multiplier,
        gap = portfolio.gap_threshold,
        gap_fraction = portfolio.common_gap_min_fraction,
        systemic = portfolio.systemic_issue_fraction,
        trending = portfolio.trending_min_fraction,
        variance = portfolio.high_variance_std_dev,
        max_investments = portfolio.max_investment_priorities,
        confidence = portfolio.precision_confidence_level,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PresetLevel;
    use crate::io::output::OutputFormat;
    use indoc::indoc;

    #[test]
    fn test_parse_full_config() {
        let config = parse_and_validate_config(indoc! {r#"
            [priority]
            preset = "strict"
            now_below = 48.0

            [portfolio]
            outlier_std_dev_multiplier = 2.0
            systemic_issue_fraction = 0.6

            [output]
            default_format = "json"
        "#})
        .unwrap();
        let thresholds = config.priority_thresholds();
        assert_eq!(thresholds.now_below, 48.0);
        assert_eq!(thresholds.watch_below, 60.0);
        let portfolio = config.portfolio_config();
        assert_eq!(portfolio.outlier_std_dev_multiplier, 2.0);
        assert_eq!(portfolio.systemic_issue_fraction, 0.6);
        assert_eq!(portfolio.gap_threshold, 45.0);
        assert_eq!(config.default_format(), OutputFormat::Json);
        assert_eq!(
            config.priority.as_ref().and_then(|p| p.preset),
            Some(PresetLevel::Strict)
        );
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = parse_and_validate_config(indoc! {r#"
            [priority]
            now_below = 70.0
            watch_below = 50.0

            [portfolio]
            common_gap_min_fraction = 3.0
        "#})
        .unwrap();
        assert_eq!(config.priority_thresholds(), PriorityThresholds::default());
        assert_eq!(config.portfolio_config(), PortfolioConfig::default());
    }

    #[test]
    fn test_syntax_error_is_reported() {
        let err = parse_and_validate_config("[priority\nnow_below = ").unwrap_err();
        assert!(err.contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_default_template_parses_to_defaults() {
        let config = parse_and_validate_config(&default_config_toml()).unwrap();
        assert_eq!(config.priority_thresholds(), PriorityThresholds::default());
        assert_eq!(config.portfolio_config(), PortfolioConfig::default());
        assert_eq!(config.default_format(), OutputFormat::Terminal);
    }

    #[test]
    fn test_directory_ancestors_bounded() {
        let dirs: Vec<PathBuf> =
            directory_ancestors(PathBuf::from("/a/b/c/d"), 3).collect();
        assert_eq!(
            dirs,
            vec![
                PathBuf::from("/a/b/c/d"),
                PathBuf::from("/a/b/c"),
                PathBuf::from("/a/b"),
            ]
        );
    }

    #[test]
    fn test_discovery_walks_up() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("team").join("q1");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            root.path().join(CONFIG_FILE_NAME),
            "[priority]\npreset = \"lenient\"\n",
        )
        .unwrap();
        let config = load_config_from_dir(&nested);
        assert_eq!(config.priority_thresholds(), PriorityThresholds::lenient());
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config_from_path(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, HealthError::Config { .. }));
    }
}
