// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use super::{CursorPosition, TermSize, TerminalSurface};
use crate::ok;
use std::io::{self, Stdout, Write};

/// [TerminalSurface] backed by a real terminal. Output goes to `W` (normally
/// [std::io::stdout]), and geometry queries go through [crossterm].
///
/// [crossterm::cursor::position] writes a cursor position report request to stdout
/// and reads the answer from stdin, so raw mode has to be enabled for it to work. The
/// [crate::ReadlineAsync] driver takes care of that.
#[derive(Debug)]
pub struct CrosstermSurface<W: Write> {
    pub output: W,
}

impl CrosstermSurface<Stdout> {
    pub fn stdout() -> Self {
        Self {
            output: io::stdout(),
        }
    }
}

impl<W: Write> CrosstermSurface<W> {
    pub fn new(output: W) -> Self { Self { output } }
}

impl<W: Write> TerminalSurface for CrosstermSurface<W> {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        ok!()
    }

    fn size(&mut self) -> io::Result<TermSize> {
        let (columns, rows) = crossterm::terminal::size()?;
        ok!(TermSize { columns, rows })
    }

    fn cursor_position(&mut self) -> io::Result<CursorPosition> {
        // Anything still buffered would be drawn after the position report.
        self.output.flush()?;
        let (col, row) = crossterm::cursor::position()?;
        ok!(CursorPosition { col, row })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_write_str_goes_to_output() {
        let mut surface = CrosstermSurface::new(Vec::<u8>::new());
        surface.write_str("> ").unwrap();
        surface.write_str("\x1b[s").unwrap();
        assert_eq!(surface.output, b"> \x1b[s".to_vec());
    }
}
