//! Configuration for jira-health.
//!
//! Settings come from `.jira-health.toml`, discovered by walking up from the
//! current directory, or from an explicit path. Every section is optional and
//! every field has a serde default, so a partial file only overrides what it
//! names.
//!
//! ```toml
//! [priority]
//! preset = "strict"
//! now_below = 48.0
//!
//! [portfolio]
//! outlier_std_dev_multiplier = 2.0
//!
//! [output]
//! default_format = "markdown"
//! ```

mod core;
mod loader;
pub mod presets;

pub use self::core::{JiraHealthConfig, OutputConfig, PriorityConfig};
pub use loader::{
    default_config_toml, directory_ancestors, load_config, load_config_from_dir,
    load_config_from_path, parse_and_validate_config, CONFIG_FILE_NAME,
};
pub use presets::PresetLevel;
