//! Parsing and evaluating one column's filter text.
//!
//! A user types free text into a column's filter box. [`FilterExpression::classify`]
//! turns that text into one of a fixed set of expression kinds, and
//! [`FilterExpression::evaluate`] tests a formatted cell against it.
//!
//! # Syntax
//!
//! | Input | Meaning |
//! |-------|---------|
//! | *(blank)* | no filter |
//! | `>3`, `>= 3`, `<x`, `<=x` | comparator, numeric on numeric columns |
//! | `=3` | equality (case-insensitive on text columns) |
//! | `2..4`, `2..`, `..4` | inclusive range, open on an empty side |
//! | `value ` *(one or more trailing spaces)* | exact, case-sensitive match |
//! | `a*c` | wildcard, `*` matches any run of characters |
//! | `al` | case-insensitive substring |
//! | `!expr` | negation of any of the above |
//!
//! On interval columns, ranges and comparators test the cell's interval for
//! overlap instead of comparing a single point.

use std::fmt;

use regex::Regex;
use votv_table::{Datatype, Field};

use crate::config::SeekerConfig;
use crate::error::{Result, SeekerError};
use crate::op::Op;
use crate::value::{compare_lexical, parse_number, Interval};

/// Right-hand side of a comparator or one bound of a range.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    /// Parsed number, produced for numeric columns.
    Number(f64),
    /// Text as typed. On a numeric column this is a malformed number and
    /// never matches.
    Text(String),
}

impl Operand {
    /// Classifies operand text for the given datatype.
    pub fn parse(text: &str, datatype: &Datatype) -> Operand {
        let text = text.trim();
        match parse_number(text) {
            Some(n) if datatype.is_numeric() => Operand::Number(n),
            _ => Operand::Text(text.to_string()),
        }
    }

    fn parse_bound(text: &str, datatype: &Datatype) -> Option<Operand> {
        if text.trim().is_empty() {
            None
        } else {
            Some(Operand::parse(text, datatype))
        }
    }

    /// The number, only if this operand was classified as one.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Operand::Number(n) => Some(*n),
            Operand::Text(_) => None,
        }
    }

    /// The number, parsing text operands if needed.
    pub fn to_number(&self) -> Option<f64> {
        match self {
            Operand::Number(n) => Some(*n),
            Operand::Text(text) => parse_number(text),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Number(n) => write!(f, "{n}"),
            Operand::Text(text) => f.write_str(text),
        }
    }
}

/// A case-insensitive glob where `*` matches any run of characters.
#[derive(Debug, Clone)]
pub struct WildcardPattern {
    source: String,
    regex: Regex,
}

impl WildcardPattern {
    pub fn new(source: &str) -> Result<Self> {
        let body = source
            .split('*')
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join(".*");

        let regex = Regex::new(&format!("(?i)^{body}$")).map_err(|e| {
            SeekerError::InvalidPattern {
                pattern: source.to_string(),
                source: e,
            }
        })?;

        Ok(WildcardPattern {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }
}

impl PartialEq for WildcardPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

/// How a column is compared, derived from its [`Field`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnKind {
    pub numeric: bool,
    pub interval: bool,
}

impl ColumnKind {
    /// Unknown columns compare lexically.
    pub fn of(field: Option<&Field>) -> Self {
        field.map_or_else(ColumnKind::default, |field| ColumnKind {
            numeric: field.datatype().is_numeric(),
            interval: field.contains_interval(),
        })
    }
}

/// One column's classified filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// Blank input; the column is not filtered.
    NoFilter,
    /// Input ending in one or more spaces: the trimmed cell must equal this text.
    Exact(String),
    /// Leading operator and operand.
    Comparator { op: Op, operand: Operand },
    /// Inclusive range; `None` leaves that side open.
    Range {
        low: Option<Operand>,
        high: Option<Operand>,
    },
    /// Case-insensitive containment.
    Substring(String),
    /// Anchored glob.
    Wildcard(WildcardPattern),
    /// Leading `!`.
    Not(Box<FilterExpression>),
}

impl FilterExpression {
    /// Classifies raw filter input with the default configuration.
    ///
    /// ```
    /// use votv_seeker::{FilterExpression, Op, Operand};
    /// use votv_table::Datatype;
    ///
    /// let numeric = Datatype::new("int");
    /// assert_eq!(
    ///     FilterExpression::classify(">3", &numeric),
    ///     FilterExpression::Comparator { op: Op::Gt, operand: Operand::Number(3.0) },
    /// );
    /// assert_eq!(FilterExpression::classify("   ", &numeric), FilterExpression::NoFilter);
    /// ```
    pub fn classify(raw: &str, datatype: &Datatype) -> FilterExpression {
        FilterExpression::classify_with(raw, datatype, &SeekerConfig::default())
    }

    /// Classifies raw filter input for a column looked up in the metadata.
    ///
    /// A missing field classifies with the default (text) datatype.
    pub fn for_field(raw: &str, field: Option<&Field>, config: &SeekerConfig) -> FilterExpression {
        match field {
            Some(field) => FilterExpression::classify_with(raw, field.datatype(), config),
            None => FilterExpression::classify_with(raw, &Datatype::default(), config),
        }
    }

    /// Classifies raw filter input.
    pub fn classify_with(raw: &str, datatype: &Datatype, config: &SeekerConfig) -> FilterExpression {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return FilterExpression::NoFilter;
        }

        if config.negation {
            // Keep trailing whitespace on the remainder; it still selects exact mode.
            if let Some(rest) = raw.trim_start().strip_prefix('!') {
                return match FilterExpression::classify_with(rest, datatype, config) {
                    FilterExpression::NoFilter => FilterExpression::NoFilter,
                    inner => FilterExpression::Not(Box::new(inner)),
                };
            }
        }

        if let Some((op, rest)) = Op::split_prefix(trimmed) {
            let value = rest.trim();
            if value.is_empty() {
                return FilterExpression::NoFilter;
            }
            return FilterExpression::Comparator {
                op,
                operand: Operand::parse(value, datatype),
            };
        }

        if let Some((low, high)) = trimmed.split_once("..") {
            let low = Operand::parse_bound(low, datatype);
            let high = Operand::parse_bound(high, datatype);
            if low.is_none() && high.is_none() {
                return FilterExpression::NoFilter;
            }
            return FilterExpression::Range { low, high };
        }

        if raw.ends_with(' ') {
            return FilterExpression::Exact(trimmed.to_string());
        }

        if config.wildcards && trimmed.contains('*') {
            match WildcardPattern::new(trimmed) {
                Ok(pattern) => return FilterExpression::Wildcard(pattern),
                Err(err) => tracing::trace!(%err, "wildcard rejected, matching as substring"),
            }
        }

        FilterExpression::Substring(trimmed.to_string())
    }

    /// Builds a wildcard expression directly, reporting a bad pattern.
    pub fn try_wildcard(pattern: &str) -> Result<FilterExpression> {
        WildcardPattern::new(pattern.trim()).map(FilterExpression::Wildcard)
    }

    /// Returns `true` for [`FilterExpression::NoFilter`].
    pub fn is_empty(&self) -> bool {
        matches!(self, FilterExpression::NoFilter)
    }

    /// Tests a formatted cell value against this expression.
    ///
    /// Malformed numbers, on either side, never match.
    pub fn evaluate(&self, cell: &str, field: Option<&Field>) -> bool {
        self.evaluate_as(cell, ColumnKind::of(field))
    }

    pub fn evaluate_as(&self, cell: &str, column: ColumnKind) -> bool {
        match self {
            FilterExpression::NoFilter => true,
            FilterExpression::Exact(value) => cell.trim() == value,
            FilterExpression::Substring(needle) => {
                cell.to_lowercase().contains(&needle.to_lowercase())
            }
            FilterExpression::Wildcard(pattern) => pattern.is_match(cell.trim()),
            FilterExpression::Not(inner) => !inner.evaluate_as(cell, column),
            FilterExpression::Comparator { op, operand } => {
                if column.interval {
                    compare_interval(*op, operand, cell)
                } else if column.numeric {
                    compare_number(*op, operand, cell)
                } else {
                    op.eval_ordering(compare_lexical(cell.trim(), &operand.to_string()))
                }
            }
            FilterExpression::Range { low, high } => {
                if column.interval {
                    range_overlaps(low.as_ref(), high.as_ref(), cell)
                } else if column.numeric {
                    range_contains_number(low.as_ref(), high.as_ref(), cell)
                } else {
                    range_contains_text(low.as_ref(), high.as_ref(), cell.trim())
                }
            }
        }
    }
}

impl fmt::Display for FilterExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterExpression::NoFilter => Ok(()),
            FilterExpression::Exact(value) => write!(f, "{value} "),
            FilterExpression::Comparator { op, operand } => write!(f, "{op}{operand}"),
            FilterExpression::Range { low, high } => {
                if let Some(low) = low {
                    write!(f, "{low}")?;
                }
                f.write_str("..")?;
                if let Some(high) = high {
                    write!(f, "{high}")?;
                }
                Ok(())
            }
            FilterExpression::Substring(needle) => f.write_str(needle),
            FilterExpression::Wildcard(pattern) => f.write_str(pattern.as_str()),
            FilterExpression::Not(inner) => write!(f, "!{inner}"),
        }
    }
}

fn compare_number(op: Op, operand: &Operand, cell: &str) -> bool {
    match (parse_number(cell), operand.as_number()) {
        (Some(value), Some(target)) => value
            .partial_cmp(&target)
            .is_some_and(|ordering| op.eval_ordering(ordering)),
        _ => false,
    }
}

fn compare_interval(op: Op, operand: &Operand, cell: &str) -> bool {
    let (Some(interval), Some(target)) = (Interval::parse(cell), operand.to_number()) else {
        return false;
    };

    match op {
        Op::Eq => interval.contains(target),
        Op::Gt => interval.upper > target,
        Op::Gte => interval.upper >= target,
        Op::Lt => interval.lower < target,
        Op::Lte => interval.lower <= target,
    }
}

/// Resolves optional bounds to numbers; a present but unparseable bound is `Err`.
fn numeric_bounds(
    low: Option<&Operand>,
    high: Option<&Operand>,
    to_number: impl Fn(&Operand) -> Option<f64>,
) -> std::result::Result<(Option<f64>, Option<f64>), ()> {
    let resolve = |bound: Option<&Operand>| match bound {
        None => Ok(None),
        Some(operand) => to_number(operand).map(Some).ok_or(()),
    };
    Ok((resolve(low)?, resolve(high)?))
}

fn range_contains_number(low: Option<&Operand>, high: Option<&Operand>, cell: &str) -> bool {
    let Ok((low, high)) = numeric_bounds(low, high, Operand::as_number) else {
        return false;
    };
    let Some(value) = parse_number(cell) else {
        return false;
    };

    low.map_or(true, |low| value >= low) && high.map_or(true, |high| value <= high)
}

fn range_overlaps(low: Option<&Operand>, high: Option<&Operand>, cell: &str) -> bool {
    let Ok((low, high)) = numeric_bounds(low, high, Operand::to_number) else {
        return false;
    };

    Interval::parse(cell).is_some_and(|interval| interval.overlaps(low, high))
}

fn range_contains_text(low: Option<&Operand>, high: Option<&Operand>, cell: &str) -> bool {
    use std::cmp::Ordering;

    low.map_or(true, |low| {
        compare_lexical(cell, &low.to_string()) != Ordering::Less
    }) && high.map_or(true, |high| {
        compare_lexical(cell, &high.to_string()) != Ordering::Greater
    })
}
