//! Table-level INFO entries.

use serde::{Deserialize, Serialize};

/// A name/value pair attached to a result table, such as `QUERY_STATUS`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    pub name: String,
    pub value: String,
}

impl Info {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Info {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this entry reports a service error.
    pub fn is_error(&self) -> bool {
        self.name == "ERROR"
    }
}
