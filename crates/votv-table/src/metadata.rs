//! The field registry of one table.
//!
//! [`Metadata`] keeps fields in an ordered sequence of optional slots.
//! Positions need not be contiguous: [`Metadata::insert_field`] past the end
//! grows the sequence and leaves holes, and reading a hole (or any position
//! past the end) yields `None` rather than an error.

use serde::{Deserialize, Serialize};

use crate::field::Field;
use crate::info::Info;

/// Highest position [`Metadata::insert_field`] accepts.
///
/// Slots are stored densely, so a position bounds the allocation.
pub const MAX_FIELD_POSITION: usize = 1 << 20;

/// Ordered, sparse collection of [`Field`]s plus table-level information.
///
/// # Example
///
/// ```
/// use votv_table::{Field, Metadata};
///
/// let mut metadata = Metadata::new();
/// metadata.add_field(Field::new("obs_id"));
/// metadata.insert_field(3, Field::new("ra"));
///
/// assert_eq!(metadata.len(), 4);
/// assert!(metadata.field_at(1).is_none());
/// assert_eq!(metadata.get_field("ra").map(|f| f.id()), Some("ra"));
/// assert!(metadata.get_field("dec").is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    #[serde(default)]
    fields: Vec<Option<Field>>,
    #[serde(default)]
    infos: Vec<Info>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl Metadata {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Metadata::default()
    }

    /// Creates a registry from fields, placed at positions `0..n`.
    pub fn with_fields<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        let mut metadata = Metadata::new();
        metadata.set_fields(fields);
        metadata
    }

    pub fn with_infos(mut self, infos: Vec<Info>) -> Self {
        self.infos = infos;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Appends a field after the last position (holes included).
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(Some(field));
    }

    /// Places a field at `position`.
    ///
    /// Positions past the end extend the sequence with holes. An occupied
    /// position is overwritten.
    ///
    /// Returns `false`, leaving the registry unchanged, when `position` is
    /// above [`MAX_FIELD_POSITION`].
    pub fn insert_field(&mut self, position: usize, field: Field) -> bool {
        if position > MAX_FIELD_POSITION {
            tracing::warn!(position, id = field.id(), "field position out of range, ignored");
            return false;
        }

        let len = position + 1;
        if len > self.fields.len() {
            self.fields.resize(len, None);
        }
        self.fields[position] = Some(field);
        true
    }

    /// Replaces every field; positions follow iteration order from 0.
    pub fn set_fields<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = Field>,
    {
        self.fields = fields.into_iter().map(Some).collect();
    }

    // ========================================================================
    // Lookup
    // ========================================================================

    /// Finds a field by identifier.
    ///
    /// Holes are skipped. When ids are duplicated the lowest position wins.
    pub fn get_field(&self, id: &str) -> Option<&Field> {
        self.fields().find(|field| field.id() == id)
    }

    pub fn has_field(&self, id: &str) -> bool {
        self.get_field(id).is_some()
    }

    /// Reads one position. Holes and out-of-range positions are `None`.
    pub fn field_at(&self, position: usize) -> Option<&Field> {
        self.fields.get(position).and_then(Option::as_ref)
    }

    /// The ordered slots, holes included.
    pub fn get_fields(&self) -> &[Option<Field>] {
        &self.fields
    }

    /// Iterates over present fields in position order.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().flatten()
    }

    /// Logical length, holes included.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of occupied positions.
    pub fn field_count(&self) -> usize {
        self.fields().count()
    }

    pub fn infos(&self) -> &[Info] {
        &self.infos
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
