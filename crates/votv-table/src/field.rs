//! Column descriptors.
//!
//! A [`Field`] carries one column's metadata as discovered from a table
//! header or schema document. Fields are built once, with a consuming
//! builder, and are not mutated after they are placed in a
//! [`Metadata`](crate::Metadata).

use serde::{Deserialize, Serialize};

use crate::datatype::Datatype;

/// Marker searched for (case-insensitively) in a field's xtype to flag an
/// interval column.
pub const INTERVAL_XTYPE_KEYWORD: &str = "INTERVAL";

/// One column's metadata.
///
/// # Example
///
/// ```
/// use votv_table::{Datatype, Field};
///
/// let field = Field::new("t_exptime")
///     .with_name("Exposure Time")
///     .with_unit("s")
///     .with_datatype(Datatype::new("double"));
///
/// assert_eq!(field.id(), "t_exptime");
/// assert!(field.datatype().is_numeric());
/// assert!(!field.contains_interval());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ucd: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    utype: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    xtype: Option<String>,
    #[serde(default)]
    datatype: Datatype,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    arraysize: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
}

impl Field {
    /// Creates a field with the given identifier and a `varchar` datatype.
    pub fn new(id: impl Into<String>) -> Self {
        Field {
            id: id.into(),
            name: None,
            ucd: None,
            utype: None,
            unit: None,
            xtype: None,
            datatype: Datatype::default(),
            arraysize: None,
            description: None,
            label: None,
        }
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_ucd(mut self, ucd: impl Into<String>) -> Self {
        self.ucd = Some(ucd.into());
        self
    }

    pub fn with_utype(mut self, utype: impl Into<String>) -> Self {
        self.utype = Some(utype.into());
        self
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_xtype(mut self, xtype: impl Into<String>) -> Self {
        self.xtype = Some(xtype.into());
        self
    }

    pub fn with_datatype(mut self, datatype: impl Into<Datatype>) -> Self {
        self.datatype = datatype.into();
        self
    }

    pub fn with_arraysize(mut self, arraysize: impl Into<String>) -> Self {
        self.arraysize = Some(arraysize.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// The column identifier, unique within one [`Metadata`](crate::Metadata).
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn ucd(&self) -> Option<&str> {
        self.ucd.as_deref()
    }

    pub fn utype(&self) -> Option<&str> {
        self.utype.as_deref()
    }

    pub fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    pub fn xtype(&self) -> Option<&str> {
        self.xtype.as_deref()
    }

    pub fn datatype(&self) -> &Datatype {
        &self.datatype
    }

    pub fn arraysize(&self) -> Option<&str> {
        self.arraysize.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label to show in a column header: the label, then the name, then the id.
    pub fn display_name(&self) -> &str {
        self.label
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or(&self.id)
    }

    // ========================================================================
    // Derived flags
    // ========================================================================

    /// Returns `true` if this column holds intervals.
    ///
    /// The xtype is checked case-insensitively for [`INTERVAL_XTYPE_KEYWORD`].
    /// A datatype token naming an interval counts as well, since some
    /// services put the marker there instead of in the xtype.
    pub fn contains_interval(&self) -> bool {
        let keyword = INTERVAL_XTYPE_KEYWORD.to_ascii_lowercase();
        let marks = |s: &str| s.to_ascii_lowercase().contains(&keyword);

        self.xtype.as_deref().is_some_and(marks) || marks(self.datatype.raw_name())
    }

    /// Alias of [`contains_interval`](Field::contains_interval).
    pub fn is_interval(&self) -> bool {
        self.contains_interval()
    }

    /// Returns `true` if each cell holds more than one scalar value.
    ///
    /// Character columns are treated as scalar strings whatever their
    /// arraysize.
    pub fn is_array(&self) -> bool {
        if self.datatype.is_text() {
            return false;
        }

        match self.arraysize.as_deref().map(str::trim) {
            None | Some("") => false,
            Some(size) if size.ends_with('*') => true,
            Some(size) => size
                .split('x')
                .map(|dim| dim.trim().parse::<u64>().unwrap_or(1))
                .product::<u64>()
                > 1,
        }
    }
}
