//! Column datatypes.
//!
//! A [`Datatype`] wraps the raw type token found in a table header or schema
//! document (`"double"`, `"adql:VARCHAR"`, `"INTEGER"`, ...) and derives the
//! [`Category`] used to pick numeric or lexical comparison.
//!
//! Recognition is a case-insensitive substring test against known token
//! lists, so `"adql:DOUBLE"` and `"double"` land in the same category.
//! Unknown tokens never fail: they degrade to [`Category::Text`].

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raw name used when a column declares no datatype.
pub const DEFAULT_DATATYPE: &str = "varchar";

const TEXT_TOKENS: &[&str] = &[
    "char", "clob", "region", "polygon", "point", "circle", "interval", "uri",
];
const TIMESTAMP_TOKENS: &[&str] = &["timestamp", "date"];
const BOOLEAN_TOKENS: &[&str] = &["boolean", "bit"];
const INTEGER_TOKENS: &[&str] = &["int", "long", "short", "byte"];
const FLOATING_POINT_TOKENS: &[&str] = &["float", "double", "real"];

/// Comparison family of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Integer or floating point values, compared as numbers.
    Numeric,
    /// Character data, compared lexically.
    Text,
    /// `true` / `false` values.
    Boolean,
    /// Dates and timestamps. Compared lexically, which orders ISO-8601 text.
    Timestamp,
    /// No datatype token at all.
    Unresolved,
}

impl Category {
    /// Returns `true` if values of this category compare as numbers.
    pub fn is_numeric(self) -> bool {
        matches!(self, Category::Numeric)
    }

    /// Returns the display name of this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Numeric => "numeric",
            Category::Text => "text",
            Category::Boolean => "boolean",
            Category::Timestamp => "timestamp",
            Category::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The scalar kind of a column.
///
/// # Example
///
/// ```
/// use votv_table::{Category, Datatype};
///
/// assert_eq!(Datatype::new("adql:DOUBLE").category(), Category::Numeric);
/// assert_eq!(Datatype::new("adql:VARCHAR").category(), Category::Text);
/// assert_eq!(Datatype::new("mystery").category(), Category::Text);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Datatype {
    raw_name: String,
    category: Category,
}

impl Datatype {
    /// Creates a datatype from its raw type token.
    pub fn new(raw_name: impl Into<String>) -> Self {
        let raw_name = raw_name.into();
        let category = categorize(&raw_name);
        Datatype { raw_name, category }
    }

    /// The source type token, as given.
    pub fn raw_name(&self) -> &str {
        &self.raw_name
    }

    /// The derived comparison category.
    pub fn category(&self) -> Category {
        self.category
    }

    pub fn is_numeric(&self) -> bool {
        self.category == Category::Numeric
    }

    pub fn is_text(&self) -> bool {
        self.category == Category::Text
    }

    pub fn is_boolean(&self) -> bool {
        self.category == Category::Boolean
    }

    pub fn is_timestamp(&self) -> bool {
        self.category == Category::Timestamp
    }

    /// Returns `true` for integer tokens (`int`, `long`, `short`, ...).
    pub fn is_integer_numeric(&self) -> bool {
        self.is_numeric() && contains_any(&self.raw_name, INTEGER_TOKENS)
    }

    /// Returns `true` for floating point tokens (`float`, `double`, `real`).
    pub fn is_floating_point_numeric(&self) -> bool {
        self.is_numeric() && contains_any(&self.raw_name, FLOATING_POINT_TOKENS)
    }
}

impl Default for Datatype {
    fn default() -> Self {
        Datatype::new(DEFAULT_DATATYPE)
    }
}

impl From<String> for Datatype {
    fn from(raw_name: String) -> Self {
        Datatype::new(raw_name)
    }
}

impl From<&str> for Datatype {
    fn from(raw_name: &str) -> Self {
        Datatype::new(raw_name)
    }
}

impl From<Datatype> for String {
    fn from(datatype: Datatype) -> Self {
        datatype.raw_name
    }
}

impl fmt::Display for Datatype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw_name)
    }
}

fn categorize(raw_name: &str) -> Category {
    if raw_name.trim().is_empty() {
        return Category::Unresolved;
    }

    // Order matters: "adql:POINT" contains "int", "bigint" does not contain "char".
    if contains_any(raw_name, TEXT_TOKENS) {
        Category::Text
    } else if contains_any(raw_name, TIMESTAMP_TOKENS) {
        Category::Timestamp
    } else if contains_any(raw_name, BOOLEAN_TOKENS) {
        Category::Boolean
    } else if contains_any(raw_name, INTEGER_TOKENS) || contains_any(raw_name, FLOATING_POINT_TOKENS)
    {
        Category::Numeric
    } else {
        Category::Text
    }
}

fn contains_any(raw_name: &str, tokens: &[&str]) -> bool {
    let lowered = raw_name.to_ascii_lowercase();
    tokens.iter().any(|token| lowered.contains(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_tokens() {
        for raw in ["int", "long", "short", "INTEGER", "adql:INTEGER", "bigint", "smallint"] {
            let dt = Datatype::new(raw);
            assert_eq!(dt.category(), Category::Numeric, "{raw}");
            assert!(dt.is_integer_numeric(), "{raw}");
            assert!(!dt.is_floating_point_numeric(), "{raw}");
        }

        for raw in ["float", "double", "adql:DOUBLE", "adql:REAL", "DOUBLE"] {
            let dt = Datatype::new(raw);
            assert_eq!(dt.category(), Category::Numeric, "{raw}");
            assert!(dt.is_floating_point_numeric(), "{raw}");
        }
    }

    #[test]
    fn text_tokens_win_over_numeric_substrings() {
        // "point" contains "int"
        assert_eq!(Datatype::new("adql:POINT").category(), Category::Text);
        assert_eq!(Datatype::new("adql:REGION").category(), Category::Text);
        assert_eq!(Datatype::new("char").category(), Category::Text);
        assert_eq!(Datatype::new("VARCHAR").category(), Category::Text);
        assert_eq!(Datatype::new("interval").category(), Category::Text);
    }

    #[test]
    fn other_categories() {
        assert_eq!(Datatype::new("boolean").category(), Category::Boolean);
        assert_eq!(
            Datatype::new("adql:TIMESTAMP").category(),
            Category::Timestamp
        );
        assert_eq!(Datatype::new("").category(), Category::Unresolved);
        assert_eq!(Datatype::new("   ").category(), Category::Unresolved);
    }

    #[test]
    fn unknown_tokens_are_text() {
        assert_eq!(Datatype::new("hologram").category(), Category::Text);
        assert!(Datatype::new("hologram").is_text());
    }

    #[test]
    fn default_is_varchar() {
        let dt = Datatype::default();
        assert_eq!(dt.raw_name(), "varchar");
        assert!(dt.is_text());
    }

    #[test]
    fn category_display() {
        assert_eq!(Category::Numeric.to_string(), "numeric");
        assert_eq!(Category::Unresolved.to_string(), "unresolved");
        assert!(Category::Numeric.is_numeric());
        assert!(!Category::Text.is_numeric());
    }
}
