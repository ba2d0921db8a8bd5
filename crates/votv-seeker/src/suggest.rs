//! Autocomplete suggestions for a column filter box.
//!
//! While the user types into one column's filter, the engine scans candidate
//! rows, keeps those whose cell matches the in-progress input, and returns
//! the distinct display values in first-seen order.
//!
//! Which rows are candidates depends on the other filters:
//!
//! - no active filter, or only the column being typed in: scan **all** rows,
//!   since the new input replaces the only constraint;
//! - otherwise: scan the **filtered** rows, so no suggestion leads to an
//!   empty result under the other columns' filters.
//!
//! Negated input (`!expr`) yields no suggestions.

use std::collections::HashSet;

use votv_table::{Field, Metadata};

use crate::config::SeekerConfig;
use crate::expression::FilterExpression;
use crate::filter_set::FilterSet;
use crate::host::{CellFormatter, RowSource};

/// Which rows the engine scanned.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CandidateSource {
    /// The full, unfiltered data set.
    #[default]
    All,
    /// Only rows passing the current filters.
    Filtered,
}

/// Picks the candidate rows for suggestions on `column_id`.
pub fn candidate_source(column_id: &str, filters: &FilterSet) -> CandidateSource {
    match filters.active_filter_count() {
        0 => CandidateSource::All,
        1 if filters.is_active(column_id) => CandidateSource::All,
        _ => CandidateSource::Filtered,
    }
}

/// The outcome of one suggestion scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Suggestions {
    /// Distinct display values, in first-seen order.
    pub values: Vec<String>,
    /// Set when exactly one value was found; the caller may apply it as the
    /// column's filter right away.
    pub auto_apply: bool,
    /// The rows that were scanned.
    pub source: CandidateSource,
}

impl Suggestions {
    fn new(values: Vec<String>, source: CandidateSource) -> Self {
        Suggestions {
            auto_apply: values.len() == 1,
            values,
            source,
        }
    }

    /// The single suggestion when [`auto_apply`](Suggestions::auto_apply) is set.
    pub fn single(&self) -> Option<&str> {
        if self.auto_apply {
            self.values.first().map(String::as_str)
        } else {
            None
        }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Suggests values for `column_id` given the user's in-progress `input`.
///
/// At most `return_count` values are returned; the scan stops as soon as
/// that many distinct values are found.
pub fn suggest<R, S, F>(
    column_id: &str,
    input: &str,
    filters: &FilterSet,
    metadata: &Metadata,
    rows: &S,
    formatter: &F,
    return_count: usize,
) -> Suggestions
where
    S: RowSource<R> + ?Sized,
    F: CellFormatter<R> + ?Sized,
{
    let config = SeekerConfig::default().with_return_count(return_count);
    Suggester::new(config).suggest(column_id, input, filters, metadata, rows, formatter)
}

/// Suggestion engine bound to a configuration.
///
/// ```
/// use votv_seeker::{DataView, FilterSet, RawCellFormatter, SeekerConfig, Suggester};
/// use votv_table::{Field, Metadata, Row};
///
/// let metadata = Metadata::with_fields([Field::new("target")]);
/// let view = DataView::new(
///     ["M31", "M33", "M31", "NGC 253"]
///         .iter()
///         .enumerate()
///         .map(|(i, t)| Row::new(i.to_string()).with_cell("target", *t))
///         .collect(),
/// );
///
/// let suggester = Suggester::new(SeekerConfig::default());
/// let found = suggester.suggest("target", "m3", &FilterSet::new(), &metadata, &view, &RawCellFormatter);
/// assert_eq!(found.values, vec!["M31", "M33"]);
/// assert!(!found.auto_apply);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Suggester {
    config: SeekerConfig,
}

impl Suggester {
    pub fn new(config: SeekerConfig) -> Self {
        Suggester { config }
    }

    pub fn config(&self) -> &SeekerConfig {
        &self.config
    }

    /// Suggests values for `column_id` given the user's in-progress `input`.
    pub fn suggest<R, S, F>(
        &self,
        column_id: &str,
        input: &str,
        filters: &FilterSet,
        metadata: &Metadata,
        rows: &S,
        formatter: &F,
    ) -> Suggestions
    where
        S: RowSource<R> + ?Sized,
        F: CellFormatter<R> + ?Sized,
    {
        let source = candidate_source(column_id, filters);

        if self.config.return_count == 0 || input.trim().chars().count() < self.config.min_input_len
        {
            return Suggestions::new(Vec::new(), source);
        }

        let field = metadata.get_field(column_id);
        let expression = FilterExpression::for_field(input, field, &self.config);
        if expression.is_empty() || matches!(expression, FilterExpression::Not(_)) {
            return Suggestions::new(Vec::new(), source);
        }

        let scan = Scan {
            column_id,
            expression: &expression,
            field,
            limit: self.config.return_count,
        };
        let values = match source {
            CandidateSource::All => scan.run(rows.all_rows(), formatter),
            CandidateSource::Filtered => scan.run(rows.filtered_rows(), formatter),
        };

        tracing::trace!(
            column = column_id,
            input,
            ?source,
            found = values.len(),
            "suggestions computed"
        );
        Suggestions::new(values, source)
    }
}

struct Scan<'s> {
    column_id: &'s str,
    expression: &'s FilterExpression,
    field: Option<&'s Field>,
    limit: usize,
}

impl Scan<'_> {
    fn run<'r, R, F>(&self, rows: impl Iterator<Item = &'r R>, formatter: &F) -> Vec<String>
    where
        R: 'r,
        F: CellFormatter<R> + ?Sized,
    {
        let mut seen = HashSet::new();
        let mut values = Vec::new();

        for row in rows {
            let cell = match formatter.format_cell(row, self.column_id) {
                Ok(cell) => cell,
                Err(err) => {
                    tracing::warn!(column = self.column_id, %err, "cell formatting failed, row skipped");
                    continue;
                }
            };

            if self.expression.evaluate(&cell, self.field) && seen.insert(cell.clone()) {
                values.push(cell);
                if values.len() >= self.limit {
                    break;
                }
            }
        }

        values
    }
}
