//! Error types for the seeker crate.
//!
//! Matching itself never fails. These errors cover the edges where a caller
//! asks for something explicitly: loading configuration, building a wildcard
//! pattern directly, or a host formatter reporting a bad cell.

use thiserror::Error;

/// Errors returned by seeker operations.
#[derive(Debug, Error)]
pub enum SeekerError {
    /// Configuration text was not valid JSON for [`SeekerConfig`](crate::SeekerConfig).
    #[error("invalid JSON configuration: {0}")]
    InvalidJsonConfig(#[from] serde_json::Error),

    /// Configuration text was not valid YAML for [`SeekerConfig`](crate::SeekerConfig).
    #[error("invalid YAML configuration: {0}")]
    InvalidYamlConfig(#[from] serde_yaml::Error),

    /// A wildcard filter could not be turned into a pattern.
    #[error("invalid wildcard pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// A host formatter failed to render a cell.
///
/// The matcher treats this as "the column does not match" for that row.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot format column '{column_id}': {message}")]
pub struct FormatError {
    pub column_id: String,
    pub message: String,
}

impl FormatError {
    pub fn new(column_id: impl Into<String>, message: impl Into<String>) -> Self {
        FormatError {
            column_id: column_id.into(),
            message: message.into(),
        }
    }
}

/// Result type for seeker operations.
pub type Result<T> = std::result::Result<T, SeekerError>;
