//! Tunables for filtering and suggestions.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default cap on the number of autocomplete suggestions.
pub const DEFAULT_RETURN_COUNT: usize = 15;

/// Viewer-level filter settings.
///
/// Every key is optional when deserializing; missing keys take the default.
///
/// ```
/// use votv_seeker::SeekerConfig;
///
/// let config = SeekerConfig::from_yaml_str("return_count: 5\nwildcards: false\n").unwrap();
/// assert_eq!(config.return_count, 5);
/// assert!(!config.wildcards);
/// assert!(config.negation);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeekerConfig {
    /// Maximum number of distinct suggestions returned.
    pub return_count: usize,
    /// Inputs with fewer trimmed characters than this get no suggestions.
    pub min_input_len: usize,
    /// Whether a leading `!` negates the rest of the filter.
    pub negation: bool,
    /// Whether `*` in a plain filter acts as a wildcard.
    pub wildcards: bool,
}

impl Default for SeekerConfig {
    fn default() -> Self {
        SeekerConfig {
            return_count: DEFAULT_RETURN_COUNT,
            min_input_len: 1,
            negation: true,
            wildcards: true,
        }
    }
}

impl SeekerConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn with_return_count(mut self, return_count: usize) -> Self {
        self.return_count = return_count;
        self
    }
}
