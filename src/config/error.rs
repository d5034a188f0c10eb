//! Configuration error types.

use crate::config::rules::ConfigViolation;
use thiserror::Error;

/// Errors raised while loading or checking a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The document is not valid JSON for this configuration
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    /// The configuration parsed but broke one or more rules
    #[error("Invalid configuration: {}", join_violations(.0))]
    Invalid(Vec<ConfigViolation>),
}

pub(crate) fn join_violations(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
