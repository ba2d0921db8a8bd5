//! Seeker - per-column filtering and autocomplete for tabular result viewers.
//!
//! A grid host shows the rows of a loaded table and a filter box above each
//! column. This crate is everything between those boxes and the grid:
//!
//! - [`FilterExpression`]: classifies the text typed for one column
//! - [`RowFilter`] / [`matches`]: decides whether a row passes every active filter
//! - [`FilterSet`]: the current text per column, with change notification
//! - [`Suggester`] / [`suggest`]: distinct candidate values for autocomplete
//!
//! The host supplies two capabilities: a [`CellFormatter`] that renders a
//! cell as display text, and a [`RowSource`] that enumerates all rows and the
//! currently filtered ones. [`DataView`] is a ready-made in-memory host.
//!
//! # Quick Start
//!
//! ```rust
//! use votv_seeker::{DataView, FilterSet, RawCellFormatter, Suggester, SeekerConfig};
//! use votv_table::{Datatype, Field, Metadata, Row};
//!
//! let metadata = Metadata::with_fields([
//!     Field::new("target"),
//!     Field::new("mag").with_datatype(Datatype::new("double")),
//! ]);
//!
//! let rows = vec![
//!     Row::new("1").with_cell("target", "M31").with_cell("mag", "3.4"),
//!     Row::new("2").with_cell("target", "M33").with_cell("mag", "5.7"),
//!     Row::new("3").with_cell("target", "M81").with_cell("mag", "6.9"),
//! ];
//! let mut view = DataView::new(rows);
//!
//! let mut filters = FilterSet::new();
//! filters.set_filter("mag", ">5");
//! assert_eq!(view.refresh(&filters, &metadata, &RawCellFormatter), 2);
//!
//! // Another column is filtered, so only visible rows are suggested.
//! let suggester = Suggester::new(SeekerConfig::default());
//! let found = suggester.suggest("target", "m", &filters, &metadata, &view, &RawCellFormatter);
//! assert_eq!(found.values, vec!["M33", "M81"]);
//! ```
//!
//! # Filter Syntax
//!
//! | Input | Meaning |
//! |-------|---------|
//! | `>3`, `>=3`, `<3`, `<=3`, `=3` | comparator; numeric on numeric columns, case-insensitive otherwise |
//! | `2..4`, `2..`, `..4` | inclusive range; overlap test on interval columns |
//! | `value ` | exact match (one or more trailing spaces) |
//! | `a*b` | wildcard |
//! | `al` | case-insensitive substring |
//! | `!expr` | negation |
//!
//! Malformed input never fails: it simply matches nothing.

mod config;
mod error;
mod expression;
mod filter_set;
mod host;
mod matcher;
mod op;
mod suggest;
mod value;

// Re-export public API
pub use config::{SeekerConfig, DEFAULT_RETURN_COUNT};
pub use error::{FormatError, Result, SeekerError};
pub use expression::{ColumnKind, FilterExpression, Operand, WildcardPattern};
pub use filter_set::FilterSet;
pub use host::{CellFormatter, DataView, RawCellFormatter, RowSource};
pub use matcher::{matches, matches_column, matches_with, ColumnFilter, RowFilter};
pub use op::Op;
pub use suggest::{candidate_source, suggest, CandidateSource, Suggester, Suggestions};
pub use value::{compare_lexical, parse_number, Interval};
