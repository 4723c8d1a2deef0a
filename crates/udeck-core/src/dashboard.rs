#![forbid(unsafe_code)]

//! The dashboard state container.
//!
//! Owns the record set, the active filter selection, and the reveal map.
//! Option sets and filtered views are derived on every call — nothing is
//! cached, so there is no stale state to invalidate when the selection or
//! the record set changes.

use tracing::debug;

use crate::filter::apply_filter;
use crate::options::derive_options;
use crate::record::{Record, RecordId};
use crate::reveal::RevealMap;

/// The active (field path, value) pair; empty strings mean "not chosen".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    field: String,
    value: String,
}

impl FilterSelection {
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The chosen value. An empty field path forces this to empty,
    /// regardless of what was stored.
    #[must_use]
    pub fn value(&self) -> &str {
        if self.field.is_empty() { "" } else { &self.value }
    }

    /// Whether both halves are chosen and the filter narrows the set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.field.is_empty() && !self.value().is_empty()
    }
}

/// Records plus the session's interaction state.
#[derive(Debug, Default)]
pub struct Dashboard {
    records: Vec<Record>,
    selection: FilterSelection,
    reveal: RevealMap,
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install the record set fetched at startup.
    pub fn load_records(&mut self, records: Vec<Record>) {
        debug!(count = records.len(), "record set loaded");
        self.records = records;
    }

    #[must_use]
    pub fn records(&self) -> &[Record] {
        &self.records
    }

    #[must_use]
    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    /// Choose the filter field.
    ///
    /// Changing the field resets the chosen value, since previously chosen
    /// values may no longer be valid options. Re-choosing the current field
    /// is a no-op, so an already-chosen value survives.
    pub fn set_field(&mut self, path: &str) {
        if self.selection.field == path {
            return;
        }
        self.selection.field = path.to_string();
        self.selection.value.clear();
    }

    /// Choose the filter value. Ignored while no field is chosen.
    pub fn set_value(&mut self, value: &str) {
        if self.selection.field.is_empty() {
            return;
        }
        self.selection.value = value.to_string();
    }

    /// "Show all": clear both halves of the selection.
    pub fn clear_filter(&mut self) {
        self.selection = FilterSelection::default();
    }

    /// Distinct, sorted value options for the currently chosen field.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        derive_options(&self.records, self.selection.field())
    }

    /// The records matching the current selection, in source order.
    #[must_use]
    pub fn filtered(&self) -> Vec<&Record> {
        apply_filter(&self.records, self.selection.field(), self.selection.value())
    }

    pub fn toggle_reveal(&mut self, id: RecordId) {
        self.reveal.toggle(id);
    }

    #[must_use]
    pub fn is_revealed(&self, id: RecordId) -> bool {
        self.reveal.is_revealed(id)
    }
}
