//! Error types for jira-health scoring operations.
//!
//! Every scoring function in this crate is total over well-formed input.
//! `HealthError` is returned only when the input itself is malformed: a
//! dimension with no score at all, a non-finite number, an inverted interval,
//! or a configuration value that cannot be used. Rejecting at the boundary
//! keeps a bad record from surfacing later as a silently wrong score.
//!
//! # Example
//!
//! ```rust
//! use jira_health::errors::HealthError;
//!
//! let err = HealthError::missing_score("cycle-time");
//! assert!(err.is_input_error());
//! assert_eq!(err.to_string(), "Dimension 'cycle-time' has neither healthScore nor overallPercentile");
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for jira-health operations
#[derive(Debug, Error)]
pub enum HealthError {
    /// Dimension carries neither `healthScore` nor `overallPercentile`
    #[error("Dimension '{dimension_key}' has neither healthScore nor overallPercentile")]
    MissingScore { dimension_key: String },

    /// NaN or infinite value where a score was expected
    #[error("Non-finite value {value} for {field}")]
    NonFiniteScore { field: String, value: f64 },

    /// Confidence interval bounds are inverted or not finite
    #[error("Invalid confidence interval [{lower}, {upper}]")]
    InvalidInterval { lower: f64, upper: f64 },

    /// Scale range is empty or inverted
    #[error("Invalid scale range [{min}, {max}]")]
    InvalidScale { min: f64, max: f64 },

    /// No z-score is defined for this confidence level
    #[error("Unsupported confidence level {0} (expected 0.90, 0.95 or 0.99)")]
    UnsupportedConfidenceLevel(f64),

    /// Date range end precedes its start
    #[error("Invalid date range: {start} is after {end}")]
    InvalidDateRange { start: String, end: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },
}

impl HealthError {
    /// Create a missing-score error for a dimension key
    pub fn missing_score(dimension_key: impl Into<String>) -> Self {
        Self::MissingScore {
            dimension_key: dimension_key.into(),
        }
    }

    /// Create a non-finite value error for a named field
    pub fn non_finite(field: impl Into<String>, value: f64) -> Self {
        Self::NonFiniteScore {
            field: field.into(),
            value,
        }
    }

    /// Create a configuration error without path context
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error tied to a config file
    pub fn config_at(message: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path.into()),
        }
    }

    /// True when the caller supplied malformed data (as opposed to an
    /// unusable configuration).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::MissingScore { .. }
                | Self::NonFiniteScore { .. }
                | Self::InvalidInterval { .. }
                | Self::InvalidScale { .. }
                | Self::UnsupportedConfidenceLevel(_)
                | Self::InvalidDateRange { .. }
        )
    }
}

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, HealthError>;
