// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Line editing state machine.
//!
//! | Module           | Responsibility                                           |
//! |------------------|----------------------------------------------------------|
//! | `line_buffer`    | [`LineBuffer`], the code points of one line              |
//! | `history`        | [`HistoryStore`] of committed lines, [`DraftMap`] overlay |
//! | `session_state`  | [`SessionState`], cursor, active slot, pending read     |
//! | `key_classifier` | [`EditorEvent`] to [`EditCommand`], caret notation       |
//! | `crossterm_input`| [`crossterm`] events to both input channels              |
//! | `redraw`         | Escape output computed from terminal geometry            |
//! | `edit_ops`       | State transition plus redraw, one per command            |
//! | `line_editor`    | [`LineEditor`] facade and [`ReadHandle`]                 |

// Attach.
pub mod crossterm_input;
pub mod edit_ops;
pub mod history;
pub mod key_classifier;
pub mod line_buffer;
pub mod line_editor;
pub mod redraw;
pub mod session_state;

// Re-export.
pub use crossterm_input::*;
pub use history::*;
pub use key_classifier::*;
pub use line_buffer::*;
pub use line_editor::*;
pub use session_state::*;
