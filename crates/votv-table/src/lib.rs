//! Column metadata model for VOTable-style result sets.
//!
//! This crate describes the shape of a loaded table:
//!
//! - [`Datatype`]: a column's raw type token and its comparison [`Category`]
//! - [`Field`]: one column's descriptor (id, name, unit, UCD, xtype, ...)
//! - [`Metadata`]: the ordered, possibly sparse registry of fields
//! - [`Info`]: table-level name/value entries
//! - [`Row`]: a plain row of raw cell strings keyed by column id
//!
//! Nothing here fails. Unknown datatype tokens degrade to text, unknown ids
//! and unset positions read as `None`.
//!
//! # Quick Start
//!
//! ```rust
//! use votv_table::{Datatype, Field, Metadata};
//!
//! let mut metadata = Metadata::new();
//! metadata.add_field(Field::new("obs_id").with_datatype(Datatype::new("char")));
//! metadata.add_field(
//!     Field::new("time_bounds")
//!         .with_datatype(Datatype::new("double"))
//!         .with_xtype("interval")
//!         .with_arraysize("2"),
//! );
//!
//! let bounds = metadata.get_field("time_bounds").unwrap();
//! assert!(bounds.contains_interval());
//! assert!(bounds.is_array());
//! assert!(metadata.get_field("nope").is_none());
//! ```

mod datatype;
mod field;
mod info;
mod metadata;
mod row;

pub use datatype::{Category, Datatype, DEFAULT_DATATYPE};
pub use field::{Field, INTERVAL_XTYPE_KEYWORD};
pub use info::Info;
pub use metadata::{Metadata, MAX_FIELD_POSITION};
pub use row::Row;
