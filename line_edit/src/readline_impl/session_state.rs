// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{DraftMap, HistoryStore, LineBuffer};
use crate::CursorPosition;
use tokio::sync::oneshot;

/// Where the line starts on screen: the cursor position right after the prompt was
/// written. All row arithmetic is relative to this column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineOrigin {
    pub col: u16,
    pub row: u16,
}

impl From<CursorPosition> for LineOrigin {
    fn from(it: CursorPosition) -> Self {
        Self {
            col: it.col,
            row: it.row,
        }
    }
}

/// The outstanding read. There is never more than one.
#[derive(Debug)]
pub struct PendingRead {
    pub prompt: String,
    pub sender: oneshot::Sender<String>,
}

/// Everything the editor knows about the line being edited. This struct only does
/// state transitions, it never touches the terminal. Each transition reports whether it
/// did anything, so that the caller knows whether to redraw.
///
/// Slots `0..history.len()` are committed lines, and slot `history.len()` is the new
/// line.
#[derive(Debug)]
pub struct SessionState {
    active_slot: usize,
    cursor: usize,
    drafts: DraftMap,
    history: HistoryStore,
    pub pending_read: Option<PendingRead>,
    pub origin: LineOrigin,
}

impl Default for SessionState {
    fn default() -> Self { Self::new(HistoryStore::new()) }
}

impl SessionState {
    /// Start on the new line slot, with an empty draft, after any `history` that was
    /// carried over from an earlier session.
    #[must_use]
    pub fn new(history: HistoryStore) -> Self {
        let active_slot = history.len();
        Self {
            active_slot,
            cursor: 0,
            drafts: DraftMap::new_with_empty_slot(active_slot),
            history,
            pending_read: None,
            origin: LineOrigin::default(),
        }
    }

    #[must_use]
    pub fn active_slot(&self) -> usize { self.active_slot }

    #[must_use]
    pub fn cursor(&self) -> usize { self.cursor }

    #[must_use]
    pub fn history(&self) -> &HistoryStore { &self.history }

    #[must_use]
    pub fn drafts(&self) -> &DraftMap { &self.drafts }

    #[must_use]
    pub fn is_read_pending(&self) -> bool { self.pending_read.is_some() }

    /// The draft being edited. It always exists, since it is created on entry to its
    /// slot.
    pub fn active_draft(&mut self) -> &mut LineBuffer {
        self.drafts.get_or_copy(self.active_slot, &self.history)
    }

    fn active(&self) -> Option<&LineBuffer> { self.drafts.get(self.active_slot) }

    /// The active draft as text.
    #[must_use]
    pub fn line(&self) -> String {
        self.active().map(ToString::to_string).unwrap_or_default()
    }

    /// Length of the active draft, in code points.
    #[must_use]
    pub fn line_len(&self) -> usize { self.active().map_or(0, LineBuffer::len) }

    /// Everything after the cursor.
    #[must_use]
    pub fn tail(&self) -> String {
        self.active()
            .map(|it| it.tail_from(self.cursor))
            .unwrap_or_default()
    }

    /// Splice `text` in at the cursor and move past it. Returns the number of code
    /// points inserted.
    pub fn insert_text(&mut self, text: &str) -> usize {
        let cursor = self.cursor;
        let inserted = self.active_draft().insert_str(cursor, text);
        self.cursor += inserted;
        inserted
    }

    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        let at = self.cursor - 1;
        if self.active_draft().remove(at).is_none() {
            return false;
        }
        self.cursor = at;
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.cursor >= self.line_len() {
            return false;
        }
        self.cursor += 1;
        true
    }

    /// Switch to the previous (older) slot. The cursor goes to the end of its draft.
    pub fn history_up(&mut self) -> bool {
        if self.active_slot == 0 {
            return false;
        }
        self.switch_to_slot(self.active_slot - 1);
        true
    }

    /// Switch to the next (newer) slot. The cursor goes to the end of its draft.
    pub fn history_down(&mut self) -> bool {
        if self.active_slot >= self.history.len() {
            return false;
        }
        self.switch_to_slot(self.active_slot + 1);
        true
    }

    fn switch_to_slot(&mut self, slot: usize) {
        self.active_slot = slot;
        self.cursor = self.active_draft().len();
    }

    /// Finish the line: commit it to history unless it is blank, drop every draft, and
    /// start a fresh new line. Returns the finished line.
    pub fn commit(&mut self) -> String {
        let draft = self.active_draft().clone();
        let line = draft.to_string();
        if !draft.is_blank() {
            self.history.append(line.clone());
        }
        self.active_slot = self.history.len();
        self.cursor = 0;
        self.drafts.reset(self.active_slot);
        line
    }
}
