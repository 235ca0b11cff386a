// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Escape output for each edit, computed from where the terminal says its cursor is.
//!
//! These are pure functions. The caller queries the [crate::TerminalSurface] for a
//! fresh [Geometry] right before each edit, and writes the returned string.
//!
//! All of them rely on one invariant: the cursor is never left in the terminal's
//! "pending wrap" state. When text ends exactly on the right margin, the redraw moves
//! the cursor to column 0 of the next row (scrolling with `"\r\n"` when that row does
//! not exist yet). This means that code point offset `k` from the start of the line
//! (counting the prompt) is always at row `k / columns`, column `k % columns`.

use crate::{CsiSequence, CursorPosition, ED_ERASE_TO_END, SCROLL_FORCING_NEWLINE,
            TermSize};

/// Snapshot of the terminal taken right before a redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Geometry {
    pub cursor: CursorPosition,
    pub size: TermSize,
}

impl Geometry {
    fn columns(&self) -> usize { usize::from(self.size.columns.max(1)) }

    fn last_row(&self) -> usize { usize::from(self.size.rows.max(1)) - 1 }

    fn col(&self) -> usize { usize::from(self.cursor.col) }

    fn row(&self) -> usize { usize::from(self.cursor.row) }
}

fn count(n: usize) -> u16 { u16::try_from(n).unwrap_or(u16::MAX) }

fn push(acc: &mut String, seq: CsiSequence) { acc.push_str(&seq.to_string()); }

/// Text was just written that ends exactly on the right margin, and its last cell is
/// on `landing_row`. Step off the margin onto the next row.
fn push_leave_right_margin(acc: &mut String, landing_row: usize, geometry: &Geometry) {
    if landing_row >= geometry.last_row() {
        acc.push_str(SCROLL_FORCING_NEWLINE);
    } else {
        push(acc, CsiSequence::CursorNextLine(1));
    }
}

/// Move one cell left, wrapping up to the last column of the previous row.
fn push_step_left(acc: &mut String, geometry: &Geometry) {
    if geometry.col() == 0 {
        push(acc, CsiSequence::CursorUp(1));
        push(acc, CsiSequence::CursorHorizontalAbsolute(count(geometry.columns())));
    } else {
        push(acc, CsiSequence::CursorBackward(1));
    }
}

/// Write `tail` without moving the cursor.
fn push_tail_in_place(acc: &mut String, tail: &str, erase_first: bool) {
    push(acc, CsiSequence::SaveCursor);
    if erase_first {
        push(acc, CsiSequence::EraseDisplay(ED_ERASE_TO_END));
    }
    acc.push_str(tail);
    push(acc, CsiSequence::RestoreCursor);
}

/// `inserted` (which is `inserted_len` code points long) was spliced in at the cursor,
/// and `tail` is what now follows it.
#[must_use]
pub fn insert(geometry: &Geometry, inserted: &str, inserted_len: usize, tail: &str) -> String {
    let mut acc = String::new();
    push_text_at_cursor(&mut acc, geometry, inserted, inserted_len);
    push_tail_in_place(&mut acc, tail, false);
    acc
}

/// Write the prompt (which occupies `prompt_len` columns) at the cursor. The line
/// origin is wherever the cursor ends up, so a prompt that ends on the right margin
/// must not leave the cursor there.
#[must_use]
pub fn prompt(geometry: &Geometry, prompt: &str, prompt_len: usize) -> String {
    let mut acc = String::new();
    push_text_at_cursor(&mut acc, geometry, prompt, prompt_len);
    acc
}

/// Write `text`, which starts at the cursor and is `text_len` columns wide, stepping
/// off the right margin if that is where it ends.
fn push_text_at_cursor(acc: &mut String, geometry: &Geometry, text: &str, text_len: usize) {
    acc.push_str(text);
    let end = geometry.col() + text_len;
    if text_len > 0 && end.is_multiple_of(geometry.columns()) {
        let landing_row =
            (geometry.row() + end / geometry.columns() - 1).min(geometry.last_row());
        push_leave_right_margin(acc, landing_row, geometry);
    }
}

/// The code point before the cursor was removed, and `tail` is what follows the new
/// cursor position.
#[must_use]
pub fn delete_backward(geometry: &Geometry, tail: &str) -> String {
    let mut acc = String::new();
    push_step_left(&mut acc, geometry);
    push_tail_in_place(&mut acc, tail, true);
    acc
}

#[must_use]
pub fn cursor_left(geometry: &Geometry) -> String {
    let mut acc = String::new();
    push_step_left(&mut acc, geometry);
    acc
}

#[must_use]
pub fn cursor_right(geometry: &Geometry) -> String {
    if geometry.col() + 1 >= geometry.columns() {
        CsiSequence::CursorNextLine(1).to_string()
    } else {
        CsiSequence::CursorForward(1).to_string()
    }
}

/// Replace the displayed line with `text` (which is `text_len` code points long) and
/// leave the cursor after it.
///
/// - `origin_col`: the column where the line starts, right after the prompt.
/// - `old_cursor`: the cursor, in code points, before the switch.
#[must_use]
pub fn replace_line(
    geometry: &Geometry,
    origin_col: u16,
    old_cursor: usize,
    text: &str,
    text_len: usize,
) -> String {
    let columns = geometry.columns();
    let origin_col = usize::from(origin_col);
    let mut acc = String::new();

    // Back to the start of the line.
    let rows_up = (origin_col + old_cursor) / columns;
    if rows_up > 0 {
        push(&mut acc, CsiSequence::CursorUp(count(rows_up)));
    }
    push(
        &mut acc,
        CsiSequence::CursorHorizontalAbsolute(count(origin_col + 1)),
    );
    push(&mut acc, CsiSequence::EraseDisplay(ED_ERASE_TO_END));
    acc.push_str(text);

    let end = origin_col + text_len;
    if end > 0 && end.is_multiple_of(columns) {
        let start_row = geometry.row().saturating_sub(rows_up);
        let landing_row = (start_row + end / columns - 1).min(geometry.last_row());
        push_leave_right_margin(&mut acc, landing_row, geometry);
    }
    acc
}

/// Move from the cursor to column 0 of the row just below the line, which is
/// `line_len` code points long. Rows that don't exist yet are made by scrolling.
#[must_use]
pub fn submit(geometry: &Geometry, origin_col: u16, cursor: usize, line_len: usize) -> String {
    let columns = geometry.columns();
    let origin_col = usize::from(origin_col);
    let end = origin_col + line_len;
    let cursor_offset = origin_col + cursor.min(line_len);

    let line_last_row = if end > 0 && end.is_multiple_of(columns) {
        end / columns - 1
    } else {
        end / columns
    };
    let down = (line_last_row + 1).saturating_sub(cursor_offset / columns);

    let mut acc = String::new();
    if down == 0 {
        // Already at column 0 just below a line that ends on the right margin.
        return acc;
    }

    let available = geometry.last_row().saturating_sub(geometry.row());
    let next_line = down.min(available);
    if next_line > 0 {
        push(&mut acc, CsiSequence::CursorNextLine(count(next_line)));
    }
    for _ in next_line..down {
        acc.push_str(SCROLL_FORCING_NEWLINE);
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn geometry(col: u16, row: u16) -> Geometry {
        Geometry {
            cursor: CursorPosition { col, row },
            size: TermSize {
                columns: 10,
                rows: 5,
            },
        }
    }

    #[test]
    fn test_insert_mid_row() {
        assert_eq!(insert(&geometry(2, 0), "a", 1, "bc"), "a\x1b[sbc\x1b[u");
    }

    #[test]
    fn test_insert_on_right_margin() {
        assert_eq!(insert(&geometry(9, 0), "a", 1, ""), "a\x1b[1E\x1b[s\x1b[u");
    }

    #[test]
    fn test_insert_on_right_margin_of_last_row_scrolls() {
        assert_eq!(insert(&geometry(9, 4), "a", 1, ""), "a\r\n\x1b[s\x1b[u");
    }

    #[test]
    fn test_insert_multi_row_paste_landing_on_last_row() {
        // 18 code points from column 2 of row 3 fill rows 3 and 4 exactly.
        let text = "x".repeat(18);
        assert_eq!(
            insert(&geometry(2, 3), &text, 18, ""),
            format!("{text}\r\n\x1b[s\x1b[u")
        );
    }

    #[test]
    fn test_prompt_mid_row_is_written_as_is() {
        assert_eq!(prompt(&geometry(0, 0), "> ", 2), "> ");
    }

    #[test]
    fn test_prompt_ending_on_right_margin_steps_off_it() {
        assert_eq!(prompt(&geometry(0, 0), "0123456789", 10), "0123456789\x1b[1E");
        assert_eq!(prompt(&geometry(0, 4), "0123456789", 10), "0123456789\r\n");
    }

    #[test]
    fn test_delete_backward() {
        assert_eq!(
            delete_backward(&geometry(4, 0), "z"),
            "\x1b[1D\x1b[s\x1b[0Jz\x1b[u"
        );
        assert_eq!(
            delete_backward(&geometry(0, 1), ""),
            "\x1b[1A\x1b[10G\x1b[s\x1b[0J\x1b[u"
        );
    }

    #[test]
    fn test_cursor_moves() {
        assert_eq!(cursor_left(&geometry(3, 0)), "\x1b[1D");
        assert_eq!(cursor_left(&geometry(0, 2)), "\x1b[1A\x1b[10G");
        assert_eq!(cursor_right(&geometry(3, 0)), "\x1b[1C");
        assert_eq!(cursor_right(&geometry(9, 0)), "\x1b[1E");
    }

    #[test]
    fn test_replace_line_single_row() {
        assert_eq!(
            replace_line(&geometry(4, 0), 2, 2, "bb", 2),
            "\x1b[3G\x1b[0Jbb"
        );
    }

    #[test]
    fn test_replace_line_from_second_row() {
        // Cursor at offset 2 + 9 = 11 is on row 1.
        assert_eq!(
            replace_line(&geometry(1, 1), 2, 9, "a", 1),
            "\x1b[1A\x1b[3G\x1b[0Ja"
        );
    }

    #[test]
    fn test_replace_line_ending_on_margin() {
        assert_eq!(
            replace_line(&geometry(2, 0), 2, 0, "12345678", 8),
            "\x1b[3G\x1b[0J12345678\x1b[1E"
        );
        assert_eq!(
            replace_line(&geometry(2, 4), 2, 0, "12345678", 8),
            "\x1b[3G\x1b[0J12345678\r\n"
        );
    }

    #[test]
    fn test_submit_single_row() {
        assert_eq!(submit(&geometry(5, 0), 2, 3, 3), "\x1b[1E");
    }

    #[test]
    fn test_submit_from_middle_of_wrapped_line() {
        // Line covers offsets 0..25 (rows 0, 1, 2), cursor at offset 5 on row 0.
        assert_eq!(submit(&geometry(5, 0), 2, 3, 23), "\x1b[3E");
    }

    #[test]
    fn test_submit_scrolls_at_bottom() {
        assert_eq!(submit(&geometry(5, 4), 2, 3, 3), "\r\n");
        // Two rows to go, one available.
        assert_eq!(submit(&geometry(5, 3), 2, 3, 13), "\x1b[1E\r\n");
    }

    #[test]
    fn test_submit_after_margin_wrap_is_noop() {
        // Cursor already sits at column 0 below the line.
        assert_eq!(submit(&geometry(0, 1), 2, 8, 8), "");
    }

    #[test]
    fn test_submit_empty_line_without_prompt() {
        assert_eq!(submit(&geometry(0, 0), 0, 0, 0), "\x1b[1E");
    }
}
