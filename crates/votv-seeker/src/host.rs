//! Capabilities supplied by the grid host.
//!
//! The engine never renders or stores rows itself. It asks the host to turn a
//! cell into display text ([`CellFormatter`]) and to enumerate rows
//! ([`RowSource`]). Both are traits so tests can run without a real grid.

use std::fmt;

use votv_table::{Metadata, Row};

use crate::config::SeekerConfig;
use crate::error::FormatError;
use crate::filter_set::FilterSet;
use crate::matcher::RowFilter;

/// Renders one cell of a row as the display text filters compare against.
///
/// Implemented for closures returning `Result<String, E>` with a displayable
/// error:
///
/// ```
/// use votv_seeker::CellFormatter;
/// use votv_table::Row;
///
/// fn with_unit(row: &Row, column_id: &str) -> Result<String, String> {
///     row.cell_value(column_id)
///         .map(|v| format!("{v} s"))
///         .ok_or_else(|| format!("no cell for {column_id}"))
/// }
///
/// let row = Row::new("1").with_cell("exptime", "30");
/// assert_eq!(with_unit.format_cell(&row, "exptime").unwrap(), "30 s");
/// assert!(with_unit.format_cell(&row, "ra").is_err());
/// ```
pub trait CellFormatter<R: ?Sized> {
    fn format_cell(&self, row: &R, column_id: &str) -> Result<String, FormatError>;
}

impl<R, F, E> CellFormatter<R> for F
where
    R: ?Sized,
    F: Fn(&R, &str) -> Result<String, E>,
    E: fmt::Display,
{
    fn format_cell(&self, row: &R, column_id: &str) -> Result<String, FormatError> {
        self(row, column_id).map_err(|err| FormatError::new(column_id, err.to_string()))
    }
}

/// Formats a [`Row`] by returning its raw cell text unchanged.
///
/// A missing cell formats as the empty string.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawCellFormatter;

impl CellFormatter<Row> for RawCellFormatter {
    fn format_cell(&self, row: &Row, column_id: &str) -> Result<String, FormatError> {
        Ok(row.cell_value(column_id).unwrap_or_default().to_string())
    }
}

/// Enumerates rows for the suggestion engine.
///
/// `all_rows` is the full data set; `filtered_rows` is what the grid
/// currently shows under the active filters.
pub trait RowSource<R> {
    fn all_rows<'a>(&'a self) -> impl Iterator<Item = &'a R>
    where
        R: 'a;

    fn filtered_rows<'a>(&'a self) -> impl Iterator<Item = &'a R>
    where
        R: 'a;
}

/// In-memory host: all rows plus the indices passing the current filters.
///
/// [`DataView::refresh`] re-applies the matcher; call it whenever the
/// [`FilterSet`] reports a change.
#[derive(Debug, Clone, Default)]
pub struct DataView<R> {
    rows: Vec<R>,
    visible: Vec<usize>,
}

impl<R> DataView<R> {
    /// Creates a view showing every row.
    pub fn new(rows: Vec<R>) -> Self {
        let visible = (0..rows.len()).collect();
        DataView { rows, visible }
    }

    /// Re-applies the filters and returns the number of visible rows.
    pub fn refresh<F>(&mut self, filters: &FilterSet, metadata: &Metadata, formatter: &F) -> usize
    where
        F: CellFormatter<R>,
    {
        self.refresh_with(filters, metadata, &SeekerConfig::default(), formatter)
    }

    /// Like [`refresh`](DataView::refresh), classifying filters under `config`.
    ///
    /// Pass the same config the [`Suggester`](crate::Suggester) uses so the
    /// grid and the autocomplete read filter text the same way.
    pub fn refresh_with<F>(
        &mut self,
        filters: &FilterSet,
        metadata: &Metadata,
        config: &SeekerConfig,
        formatter: &F,
    ) -> usize
    where
        F: CellFormatter<R>,
    {
        let filter = RowFilter::compile_with(filters, metadata, config);
        self.apply(&filter, formatter)
    }

    /// Re-applies an already compiled filter.
    pub fn apply<F>(&mut self, filter: &RowFilter, formatter: &F) -> usize
    where
        F: CellFormatter<R>,
    {
        self.visible = self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| filter.matches(*row, formatter))
            .map(|(index, _)| index)
            .collect();

        tracing::debug!(
            total = self.rows.len(),
            visible = self.visible.len(),
            "data view refreshed"
        );
        self.visible.len()
    }

    /// Appends a row. It stays hidden until the next refresh.
    pub fn push(&mut self, row: R) {
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The visible row at a display position.
    pub fn visible_row(&self, position: usize) -> Option<&R> {
        self.visible.get(position).and_then(|&i| self.rows.get(i))
    }

    pub fn rows(&self) -> &[R] {
        &self.rows
    }
}

impl<R> RowSource<R> for DataView<R> {
    fn all_rows<'a>(&'a self) -> impl Iterator<Item = &'a R>
    where
        R: 'a,
    {
        self.rows.iter()
    }

    fn filtered_rows<'a>(&'a self) -> impl Iterator<Item = &'a R>
    where
        R: 'a,
    {
        self.visible.iter().filter_map(|&i| self.rows.get(i))
    }
}
