//! A simple row type keyed by column id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One table row: an identifier plus raw cell text per column id.
///
/// Hosts are free to use their own row types; this one covers the common
/// case of string cells straight out of a table reader.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    pub id: String,
    #[serde(default)]
    pub cells: BTreeMap<String, String>,
}

impl Row {
    pub fn new(id: impl Into<String>) -> Self {
        Row {
            id: id.into(),
            cells: BTreeMap::new(),
        }
    }

    pub fn with_cell(mut self, column_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.cells.insert(column_id.into(), value.into());
        self
    }

    /// The raw value of a cell, if the row has one for this column.
    pub fn cell_value(&self, column_id: &str) -> Option<&str> {
        self.cells.get(column_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
