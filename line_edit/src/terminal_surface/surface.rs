// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::io::{self, IsTerminal};

/// Terminal geometry, in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TermSize {
    pub columns: u16,
    pub rows: u16,
}

/// Cursor position reported by the terminal. Both values are 0-based, so the top left
/// cell is `{ col: 0, row: 0 }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CursorPosition {
    pub col: u16,
    pub row: u16,
}

/// The only thing the line editor talks to. It accepts text (including escape
/// sequences), and it can be asked how big it is and where its cursor is.
///
/// The editor never caches the answers. Something else (eg: the evaluator printing a
/// result) may have moved the cursor since the last redraw, so every redraw starts by
/// asking again.
pub trait TerminalSurface {
    /// Write text and escape sequences. Implementations must make the text visible
    /// (flushed) before the next [TerminalSurface::cursor_position] query is answered.
    fn write_str(&mut self, text: &str) -> io::Result<()>;

    fn size(&mut self) -> io::Result<TermSize>;

    fn cursor_position(&mut self) -> io::Result<CursorPosition>;
}

impl<T: TerminalSurface + ?Sized> TerminalSurface for Box<T> {
    fn write_str(&mut self, text: &str) -> io::Result<()> { (**self).write_str(text) }

    fn size(&mut self) -> io::Result<TermSize> { (**self).size() }

    fn cursor_position(&mut self) -> io::Result<CursorPosition> {
        (**self).cursor_position()
    }
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TTYResult {
    IsInteractive,
    IsNotInteractive,
}

/// The editor needs both ends of the terminal: keystrokes come in on stdin, and the
/// cursor position report comes back on stdin in response to a query on stdout. If
/// either one is redirected the editor can't work.
#[must_use]
pub fn is_fully_interactive_terminal() -> TTYResult {
    if io::stdin().is_terminal() && io::stdout().is_terminal() {
        TTYResult::IsInteractive
    } else {
        TTYResult::IsNotInteractive
    }
}
