// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! One function per [EditCommand]. Each one applies the state transition to
//! [SessionState], asks the surface for a fresh [Geometry], and writes the redraw.
//! Edits that run into a boundary do nothing and write nothing.

use super::{EditCommand, SessionState, redraw::{self, Geometry}};
use crate::{ReadlineError, TerminalSurface, early_return_if, ok};
use std::io;

/// Asked right before every redraw. Never cached, since the cursor may have been moved
/// by output the editor did not write.
///
/// # Errors
///
/// Returns an error if the surface can't answer either query.
pub fn query_geometry(surface: &mut impl TerminalSurface) -> io::Result<Geometry> {
    let size = surface.size()?;
    let cursor = surface.cursor_position()?;
    ok!(Geometry { cursor, size })
}

/// # Errors
///
/// Returns an error if the surface can't be queried or written to.
pub fn apply(
    command: EditCommand,
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
) -> Result<(), ReadlineError> {
    match command {
        EditCommand::Submit => handle_submit(state, surface),
        EditCommand::DeleteBackward => handle_delete_backward(state, surface),
        EditCommand::HistoryUp => handle_history_up(state, surface),
        EditCommand::HistoryDown => handle_history_down(state, surface),
        EditCommand::CursorLeft => handle_cursor_left(state, surface),
        EditCommand::CursorRight => handle_cursor_right(state, surface),
        EditCommand::InsertLiteral(text) | EditCommand::InsertText(text) => {
            handle_insert(state, surface, &text)
        }
    }
}

/// `text` must already be display-safe (see [super::escape_control_chars]).
///
/// # Errors
///
/// Returns an error if the surface can't be queried or written to.
pub fn handle_insert(
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
    text: &str,
) -> Result<(), ReadlineError> {
    early_return_if!(text.is_empty(), "insert of empty text");

    let geometry = query_geometry(surface)?;
    let inserted = state.insert_text(text);
    let tail = state.tail();
    surface.write_str(&redraw::insert(&geometry, text, inserted, &tail))?;

    ok!()
}

/// # Errors
///
/// Returns an error if the surface can't be queried or written to.
pub fn handle_delete_backward(
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
) -> Result<(), ReadlineError> {
    early_return_if!(state.cursor() == 0, "delete_backward at start of line");

    let geometry = query_geometry(surface)?;
    state.delete_backward();
    let tail = state.tail();
    surface.write_str(&redraw::delete_backward(&geometry, &tail))?;

    ok!()
}

/// # Errors
///
/// Returns an error if the surface can't be queried or written to.
pub fn handle_cursor_left(
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
) -> Result<(), ReadlineError> {
    early_return_if!(state.cursor() == 0, "cursor_left at start of line");

    let geometry = query_geometry(surface)?;
    state.move_left();
    surface.write_str(&redraw::cursor_left(&geometry))?;

    ok!()
}

/// # Errors
///
/// Returns an error if the surface can't be queried or written to.
pub fn handle_cursor_right(
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
) -> Result<(), ReadlineError> {
    let at_end = state.cursor() >= state.line_len();
    early_return_if!(at_end, "cursor_right at end of line");

    let geometry = query_geometry(surface)?;
    state.move_right();
    surface.write_str(&redraw::cursor_right(&geometry))?;

    ok!()
}

/// # Errors
///
/// Returns an error if the surface can't be queried or written to.
pub fn handle_history_up(
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
) -> Result<(), ReadlineError> {
    early_return_if!(state.active_slot() == 0, "history_up at oldest entry");
    switch_history(state, surface, SessionState::history_up)
}

/// # Errors
///
/// Returns an error if the surface can't be queried or written to.
pub fn handle_history_down(
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
) -> Result<(), ReadlineError> {
    let at_newest = state.active_slot() >= state.history().len();
    early_return_if!(at_newest, "history_down at new line");
    switch_history(state, surface, SessionState::history_down)
}

fn switch_history(
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
    switch: fn(&mut SessionState) -> bool,
) -> Result<(), ReadlineError> {
    let geometry = query_geometry(surface)?;
    let old_cursor = state.cursor();
    switch(state);

    let text = state.line();
    let text_len = state.cursor();
    tracing::debug!(
        message = "history navigation",
        slot = state.active_slot(),
        history_len = state.history().len(),
        draft = %text
    );

    surface.write_str(&redraw::replace_line(
        &geometry,
        state.origin.col,
        old_cursor,
        &text,
        text_len,
    ))?;

    ok!()
}

/// Finish the line and hand it to whoever is waiting on the pending read. Without a
/// pending read there is nobody to hand it to, so Enter does nothing.
///
/// # Errors
///
/// Returns an error if the surface can't be queried or written to.
pub fn handle_submit(
    state: &mut SessionState,
    surface: &mut impl TerminalSurface,
) -> Result<(), ReadlineError> {
    early_return_if!(!state.is_read_pending(), "submit without a pending read");

    // Draw first, so that a failed write leaves the line and the pending read intact.
    let geometry = query_geometry(surface)?;
    surface.write_str(&redraw::submit(
        &geometry,
        state.origin.col,
        state.cursor(),
        state.line_len(),
    ))?;

    let line = state.commit();

    if let Some(pending_read) = state.pending_read.take() {
        tracing::debug!(
            message = "line submitted",
            prompt = %pending_read.prompt,
            line = %line,
            history_len = state.history().len()
        );
        if pending_read.sender.send(line).is_err() {
            tracing::warn!(message = "read handle was dropped before the line arrived");
        }
    }

    ok!()
}
