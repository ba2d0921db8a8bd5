//! The active column filters of one viewer.
//!
//! [`FilterSet`] maps column ids to the raw text typed into each column's
//! filter box. All mutation goes through its methods, and every mutation
//! notifies the registered listeners so the host can re-apply the matcher
//! and re-render.

use std::collections::BTreeMap;
use std::fmt;

type Listener = Box<dyn FnMut(&FilterSet)>;

/// Column id → raw filter text, plus change listeners.
///
/// Clearing a column keeps its key with an empty value; only non-blank
/// values count as active.
///
/// ```
/// use std::cell::Cell;
/// use std::rc::Rc;
/// use votv_seeker::FilterSet;
///
/// let changes = Rc::new(Cell::new(0));
/// let seen = Rc::clone(&changes);
///
/// let mut filters = FilterSet::new();
/// filters.on_change(move |_| seen.set(seen.get() + 1));
///
/// filters.set_filter("mag", "<20");
/// filters.set_filter("target", "M31");
/// filters.clear_filter("target");
///
/// assert_eq!(filters.active_filter_count(), 1);
/// assert_eq!(changes.get(), 3);
/// ```
#[derive(Default)]
pub struct FilterSet {
    filters: BTreeMap<String, String>,
    listeners: Vec<Listener>,
}

impl FilterSet {
    pub fn new() -> Self {
        FilterSet::default()
    }

    /// Registers a listener called after every mutation.
    pub fn on_change(&mut self, listener: impl FnMut(&FilterSet) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ========================================================================
    // Mutation
    // ========================================================================

    /// Sets the raw filter text of one column, replacing any previous text.
    pub fn set_filter(&mut self, column_id: impl Into<String>, raw: impl Into<String>) {
        let column_id = column_id.into();
        let raw = raw.into();
        tracing::debug!(column = %column_id, filter = %raw, "column filter set");
        self.filters.insert(column_id, raw);
        self.notify();
    }

    /// Clears one column's filter, leaving its key with empty text.
    pub fn clear_filter(&mut self, column_id: &str) {
        tracing::debug!(column = %column_id, "column filter cleared");
        self.filters.insert(column_id.to_string(), String::new());
        self.notify();
    }

    /// Removes every filter.
    pub fn clear_all(&mut self) {
        tracing::debug!(count = self.filters.len(), "all column filters cleared");
        self.filters.clear();
        self.notify();
    }

    fn notify(&mut self) {
        let mut listeners = std::mem::take(&mut self.listeners);
        for listener in listeners.iter_mut() {
            listener(&*self);
        }
        // Keep listeners registered while notifying.
        listeners.append(&mut self.listeners);
        self.listeners = listeners;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// The raw text for a column, blank or not.
    pub fn get(&self, column_id: &str) -> Option<&str> {
        self.filters.get(column_id).map(String::as_str)
    }

    /// Returns `true` if the column has non-blank filter text.
    pub fn is_active(&self, column_id: &str) -> bool {
        self.get(column_id).is_some_and(is_active)
    }

    /// Number of columns with non-blank filter text.
    pub fn active_filter_count(&self) -> usize {
        self.active_filters().count()
    }

    /// Returns `true` when no column is filtered.
    pub fn is_empty(&self) -> bool {
        self.active_filter_count() == 0
    }

    /// Returns `true` if `column_id` is the one and only active column.
    pub fn is_only_active(&self, column_id: &str) -> bool {
        self.active_filter_count() == 1 && self.is_active(column_id)
    }

    /// Iterates over `(column id, raw text)` for non-blank filters, in column id order.
    pub fn active_filters(&self) -> impl Iterator<Item = (&str, &str)> {
        self.filters
            .iter()
            .map(|(id, raw)| (id.as_str(), raw.as_str()))
            .filter(|(_, raw)| is_active(raw))
    }

    /// Every stored entry, including cleared ones.
    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.filters
    }
}

fn is_active(raw: &str) -> bool {
    !raw.trim().is_empty()
}

impl Clone for FilterSet {
    /// Clones the filters only; listeners stay with the original.
    fn clone(&self) -> Self {
        FilterSet {
            filters: self.filters.clone(),
            listeners: Vec::new(),
        }
    }
}

impl PartialEq for FilterSet {
    fn eq(&self, other: &Self) -> bool {
        self.filters == other.filters
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterSet")
            .field("filters", &self.filters)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for FilterSet
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        FilterSet {
            filters: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            listeners: Vec::new(),
        }
    }
}
