//! Row inclusion under the active column filters.
//!
//! A [`RowFilter`] is a [`FilterSet`] compiled against a [`Metadata`]: each
//! active column's text is classified once, then every row is tested by
//! formatting the column's cell and evaluating the expression.
//!
//! The overall match logic is a plain conjunction:
//!
//! ```text
//! match = every active column's expression matches that column's cell
//! ```
//!
//! A cell the host fails to format does not match. One bad row never aborts
//! the scan.

use votv_table::{Field, Metadata};

use crate::config::SeekerConfig;
use crate::expression::FilterExpression;
use crate::filter_set::FilterSet;
use crate::host::CellFormatter;

/// One compiled column filter.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnFilter {
    pub column_id: String,
    pub field: Option<Field>,
    pub expression: FilterExpression,
}

impl ColumnFilter {
    /// Classifies `raw` for the column, looking its field up in `metadata`.
    pub fn new(column_id: &str, raw: &str, metadata: &Metadata, config: &SeekerConfig) -> Self {
        let field = metadata.get_field(column_id).cloned();
        let expression = FilterExpression::for_field(raw, field.as_ref(), config);
        tracing::trace!(column = column_id, raw, expression = %expression, "filter classified");

        ColumnFilter {
            column_id: column_id.to_string(),
            field,
            expression,
        }
    }

    /// Tests one row.
    pub fn matches<R, F>(&self, row: &R, formatter: &F) -> bool
    where
        R: ?Sized,
        F: CellFormatter<R> + ?Sized,
    {
        matches_column(
            row,
            &self.column_id,
            &self.expression,
            self.field.as_ref(),
            formatter,
        )
    }
}

/// The conjunction of every active column filter.
///
/// # Example
///
/// ```
/// use votv_seeker::{FilterSet, RawCellFormatter, RowFilter};
/// use votv_table::{Datatype, Field, Metadata, Row};
///
/// let metadata = Metadata::with_fields([Field::new("v").with_datatype(Datatype::new("int"))]);
/// let rows: Vec<Row> = (1..=5)
///     .map(|v| Row::new(v.to_string()).with_cell("v", v.to_string()))
///     .collect();
///
/// let filters = FilterSet::from_iter([("v", "2..4")]);
/// let filter = RowFilter::compile(&filters, &metadata);
///
/// let ids: Vec<_> = filter
///     .filter(&rows, &RawCellFormatter)
///     .iter()
///     .map(|row| row.id.as_str())
///     .collect();
/// assert_eq!(ids, vec!["2", "3", "4"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowFilter {
    columns: Vec<ColumnFilter>,
}

impl RowFilter {
    /// Compiles the active filters with the default configuration.
    pub fn compile(filters: &FilterSet, metadata: &Metadata) -> Self {
        RowFilter::compile_with(filters, metadata, &SeekerConfig::default())
    }

    pub fn compile_with(filters: &FilterSet, metadata: &Metadata, config: &SeekerConfig) -> Self {
        let columns = filters
            .active_filters()
            .map(|(column_id, raw)| ColumnFilter::new(column_id, raw, metadata, config))
            .filter(|column| !column.expression.is_empty())
            .collect();

        RowFilter { columns }
    }

    /// The compiled column filters, in column id order.
    pub fn columns(&self) -> &[ColumnFilter] {
        &self.columns
    }

    /// Returns `true` if no column constrains the rows.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    // ========================================================================
    // Execution
    // ========================================================================

    /// Tests if a single row passes every column filter.
    pub fn matches<R, F>(&self, row: &R, formatter: &F) -> bool
    where
        R: ?Sized,
        F: CellFormatter<R> + ?Sized,
    {
        self.columns
            .iter()
            .all(|column| column.matches(row, formatter))
    }

    /// Returns references to the matching rows, in input order.
    pub fn filter<'a, R, F>(&self, rows: &'a [R], formatter: &F) -> Vec<&'a R>
    where
        F: CellFormatter<R> + ?Sized,
    {
        rows.iter()
            .filter(|row| self.matches(*row, formatter))
            .collect()
    }

    /// Counts the matching rows.
    pub fn count<R, F>(&self, rows: &[R], formatter: &F) -> usize
    where
        F: CellFormatter<R> + ?Sized,
    {
        rows.iter()
            .filter(|row| self.matches(*row, formatter))
            .count()
    }

    /// Returns `true` if any row matches.
    pub fn any<R, F>(&self, rows: &[R], formatter: &F) -> bool
    where
        F: CellFormatter<R> + ?Sized,
    {
        rows.iter().any(|row| self.matches(row, formatter))
    }

    /// Index of the first matching row.
    pub fn position<R, F>(&self, rows: &[R], formatter: &F) -> Option<usize>
    where
        F: CellFormatter<R> + ?Sized,
    {
        rows.iter().position(|row| self.matches(row, formatter))
    }
}

/// Decides whether a row passes the active filters.
///
/// Compiles the filter set on every call; prefer [`RowFilter`] when testing
/// many rows.
pub fn matches<R, F>(row: &R, filters: &FilterSet, metadata: &Metadata, formatter: &F) -> bool
where
    R: ?Sized,
    F: CellFormatter<R> + ?Sized,
{
    RowFilter::compile(filters, metadata).matches(row, formatter)
}

/// Like [`matches`], classifying filters under `config`.
pub fn matches_with<R, F>(
    row: &R,
    filters: &FilterSet,
    metadata: &Metadata,
    config: &SeekerConfig,
    formatter: &F,
) -> bool
where
    R: ?Sized,
    F: CellFormatter<R> + ?Sized,
{
    RowFilter::compile_with(filters, metadata, config).matches(row, formatter)
}

/// Evaluates one column's expression against one row.
///
/// A formatter failure is logged and counts as no match.
pub fn matches_column<R, F>(
    row: &R,
    column_id: &str,
    expression: &FilterExpression,
    field: Option<&Field>,
    formatter: &F,
) -> bool
where
    R: ?Sized,
    F: CellFormatter<R> + ?Sized,
{
    if expression.is_empty() {
        return true;
    }

    match formatter.format_cell(row, column_id) {
        Ok(cell) => expression.evaluate(&cell, field),
        Err(err) => {
            tracing::warn!(column = column_id, %err, "cell formatting failed, row excluded");
            false
        }
    }
}
