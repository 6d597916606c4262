//! Append-only audit trail of dynamic field changes.
//!
//! A [`ChangeLog`] belongs to exactly one case record. Only the record can append to it, and
//! nothing can remove or edit an entry once written, so the log is the authoritative history
//! of every update since the case was built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::fields::DynamicField;

/// One recorded update.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    pub timestamp: DateTime<Utc>,
    pub field: DynamicField,
    /// The replaced value. `None` for appends to `physical_exam`.
    pub old_value: Option<Value>,
    pub new_value: Value,
}

/// Ordered list of [`ChangeLogEntry`] in the order updates were applied.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ChangeLog {
    entries: Vec<ChangeLogEntry>,
}

impl ChangeLog {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: ChangeLogEntry) {
        self.entries.push(entry);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&ChangeLogEntry> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[ChangeLogEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ChangeLogEntry> {
        self.entries.iter()
    }

    /// Entries for a single field, oldest first.
    pub fn entries_for(&self, field: DynamicField) -> impl Iterator<Item = &ChangeLogEntry> {
        self.entries.iter().filter(move |entry| entry.field == field)
    }
}

impl<'a> IntoIterator for &'a ChangeLog {
    type Item = &'a ChangeLogEntry;
    type IntoIter = std::slice::Iter<'a, ChangeLogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
