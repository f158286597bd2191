//! CLI command implementations.
//!
//! - **inspect**: `tier` and `precision`, single-value lookups
//! - **prioritize**: NOW / NEXT / LATER for one team
//! - **portfolio**: multi-team aggregation
//! - **init**: write a default `.jira-health.toml`
//!
//! Commands only load input, call into the library and hand the result to
//! an [`OutputWriter`](crate::io::OutputWriter).

pub mod init;
pub mod inspect;
pub mod portfolio;
pub mod prioritize;

pub use init::init_config;
pub use inspect::{handle_precision, handle_tier, PrecisionArgs};
pub use portfolio::{handle_portfolio, PortfolioArgs};
pub use prioritize::{handle_prioritize, PrioritizeArgs};

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::config::{load_config, load_config_from_path, JiraHealthConfig};
use crate::io::{create_writer, create_writer_to, OutputFormat, OutputWriter};

/// Explicit config path if given, otherwise discovery from the current directory.
pub fn resolve_config(path: Option<&Path>) -> Result<JiraHealthConfig> {
    match path {
        Some(path) => load_config_from_path(path)
            .with_context(|| format!("Failed to load config from {}", path.display())),
        None => Ok(load_config()),
    }
}

/// Writer for `format`, to `output` if given or stdout.
pub fn open_writer(format: OutputFormat, output: Option<&Path>) -> Result<Box<dyn OutputWriter>> {
    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(create_writer_to(format, Box::new(BufWriter::new(file))))
        }
        None => Ok(create_writer(format)),
    }
}
