// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::LineBuffer;
use std::collections::HashMap;

/// Every line that has been submitted, oldest first. Entries are only ever appended.
/// There is no size cap, and consecutive duplicates are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HistoryStore {
    entries: Vec<String>,
}

impl HistoryStore {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    pub fn append(&mut self, line: String) { self.entries.push(line); }

    #[must_use]
    pub fn len(&self) -> usize { self.entries.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn entries(&self) -> &[String] { &self.entries }
}

impl<T: Into<String>> FromIterator<T> for HistoryStore {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Editable copies of lines, keyed by history slot. Slot `history.len()` is the new
/// line being typed.
///
/// A draft for a committed entry is created the first time that slot is visited, by
/// copying the entry. After that, edits land in the copy and the [HistoryStore] is left
/// alone. All drafts are discarded on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftMap {
    drafts: HashMap<usize, LineBuffer>,
}

impl DraftMap {
    /// A map holding a single empty draft at `slot`.
    #[must_use]
    pub fn new_with_empty_slot(slot: usize) -> Self {
        let mut it = Self::default();
        it.drafts.insert(slot, LineBuffer::new());
        it
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&LineBuffer> { self.drafts.get(&slot) }

    #[must_use]
    pub fn contains(&self, slot: usize) -> bool { self.drafts.contains_key(&slot) }

    #[must_use]
    pub fn len(&self) -> usize { self.drafts.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.drafts.is_empty() }

    /// Returns the draft for `slot`, creating it first if needed. A new draft is a copy
    /// of the committed entry, or empty for the new line slot.
    pub fn get_or_copy(&mut self, slot: usize, history: &HistoryStore) -> &mut LineBuffer {
        self.drafts
            .entry(slot)
            .or_insert_with(|| history.get(slot).map(LineBuffer::from).unwrap_or_default())
    }

    /// Throw every draft away and start over with one empty draft at `slot`.
    pub fn reset(&mut self, slot: usize) {
        self.drafts.clear();
        self.drafts.insert(slot, LineBuffer::new());
    }
}
