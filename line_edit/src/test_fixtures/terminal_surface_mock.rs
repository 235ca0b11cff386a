// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! In-memory [TerminalSurface] that behaves enough like a VT100 for the line editor's
//! redraws to be checked against what ends up on screen.

use crate::{CHA_CURSOR_COLUMN, CNL_CURSOR_NEXT_LINE, CUB_CURSOR_BACKWARD,
            CUD_CURSOR_DOWN, CUF_CURSOR_FORWARD, CUU_CURSOR_UP, CursorPosition,
            ED_ERASE_DISPLAY, RCP_RESTORE_CURSOR, SCP_SAVE_CURSOR, TermSize,
            TerminalSurface, ok};
use std::io;
use vte::{Params, Perform};

/// CSI H: Cursor Position (CUP). Not emitted by the editor, but handy in tests to put
/// the cursor somewhere, the way other program output would.
const CUP_CURSOR_POSITION: char = 'H';

/// The main constructor is [TerminalSurfaceMock::new].
///
/// - Everything written is kept verbatim, see
///   [TerminalSurfaceMock::get_output_as_string].
/// - It is also run through a [vte::Parser] to maintain a character grid and a cursor.
///   Printing into the last column leaves the cursor there with a pending wrap, the
///   next printable character wraps first. A line feed on the last row scrolls.
#[derive(Debug, Clone)]
pub struct TerminalSurfaceMock {
    output: String,
    screen: Screen,
    fail_io: bool,
    fail_writes: bool,
}

#[derive(Debug, Clone)]
struct Screen {
    size: TermSize,
    grid: Vec<Vec<char>>,
    cursor: CursorPosition,
    pending_wrap: bool,
    saved_cursor: Option<CursorPosition>,
    scrolled_line_count: usize,
}

impl TerminalSurfaceMock {
    /// # Panics
    ///
    /// If either dimension is 0.
    #[must_use]
    pub fn new(columns: u16, rows: u16) -> Self {
        assert!(columns > 0 && rows > 0, "terminal must have at least one cell");
        Self {
            output: String::new(),
            screen: Screen {
                size: TermSize { columns, rows },
                grid: vec![vec![' '; usize::from(columns)]; usize::from(rows)],
                cursor: CursorPosition::default(),
                pending_wrap: false,
                saved_cursor: None,
                scrolled_line_count: 0,
            },
            fail_io: false,
            fail_writes: false,
        }
    }

    /// Make every subsequent [TerminalSurface] call fail.
    pub fn set_fail_io(&mut self, fail_io: bool) { self.fail_io = fail_io; }

    /// Make every subsequent [TerminalSurface::write_str] fail, while geometry queries
    /// keep working.
    pub fn set_fail_writes(&mut self, fail_writes: bool) { self.fail_writes = fail_writes; }

    /// Move the cursor without writing anything to the output.
    pub fn set_cursor(&mut self, col: u16, row: u16) {
        self.screen.cursor = CursorPosition {
            col: col.min(self.screen.size.columns - 1),
            row: row.min(self.screen.size.rows - 1),
        };
        self.screen.pending_wrap = false;
    }

    #[must_use]
    pub fn cursor(&self) -> CursorPosition { self.screen.cursor }

    #[must_use]
    pub fn is_pending_wrap(&self) -> bool { self.screen.pending_wrap }

    /// How many times the screen scrolled up by one row.
    #[must_use]
    pub fn scrolled_line_count(&self) -> usize { self.screen.scrolled_line_count }

    #[must_use]
    pub fn get_output_as_string(&self) -> String { self.output.clone() }

    #[must_use]
    pub fn get_output_as_string_strip_ansi(&self) -> String {
        strip_ansi_escapes::strip_str(&self.output)
    }

    pub fn clear_output(&mut self) { self.output.clear(); }

    /// Text on `row`, without trailing blanks.
    #[must_use]
    pub fn row_text(&self, row: u16) -> String {
        self.screen
            .grid
            .get(usize::from(row))
            .map(|it| it.iter().collect::<String>().trim_end().to_string())
            .unwrap_or_default()
    }

    /// Every row of the screen, without trailing blanks.
    #[must_use]
    pub fn screen_lines(&self) -> Vec<String> {
        (0..self.screen.size.rows).map(|row| self.row_text(row)).collect()
    }

    fn check_io(&self) -> io::Result<()> {
        if self.fail_io {
            return Err(io::Error::other("terminal surface mock set to fail"));
        }
        ok!()
    }
}

impl TerminalSurface for TerminalSurfaceMock {
    fn write_str(&mut self, text: &str) -> io::Result<()> {
        self.check_io()?;
        if self.fail_writes {
            return Err(io::Error::other("terminal surface mock set to fail writes"));
        }
        self.output.push_str(text);
        vte::Parser::new().advance(&mut self.screen, text.as_bytes());
        ok!()
    }

    fn size(&mut self) -> io::Result<TermSize> {
        self.check_io()?;
        ok!(self.screen.size)
    }

    fn cursor_position(&mut self) -> io::Result<CursorPosition> {
        self.check_io()?;
        ok!(self.screen.cursor)
    }
}

impl Screen {
    fn last_col(&self) -> u16 { self.size.columns - 1 }

    fn last_row(&self) -> u16 { self.size.rows - 1 }

    fn line_feed(&mut self) {
        if self.cursor.row >= self.last_row() {
            self.grid.remove(0);
            self.grid.push(vec![' '; usize::from(self.size.columns)]);
            self.scrolled_line_count += 1;
        } else {
            self.cursor.row += 1;
        }
    }

    fn erase_from(&mut self, col: u16, row: u16) {
        let (col, row) = (usize::from(col), usize::from(row));
        for (row_index, line) in self.grid.iter_mut().enumerate().skip(row) {
            let start = if row_index == row { col } else { 0 };
            for cell in line.iter_mut().skip(start) {
                *cell = ' ';
            }
        }
    }
}

/// First parameter of a CSI sequence, or `default` when absent.
fn first_param(params: &Params, default: u16) -> u16 {
    params
        .iter()
        .next()
        .and_then(|it| it.first())
        .copied()
        .unwrap_or(default)
}

/// Movement counts treat 0 as 1.
fn count_param(params: &Params) -> u16 { first_param(params, 1).max(1) }

impl Perform for Screen {
    fn print(&mut self, ch: char) {
        if self.pending_wrap {
            self.pending_wrap = false;
            self.cursor.col = 0;
            self.line_feed();
        }
        self.grid[usize::from(self.cursor.row)][usize::from(self.cursor.col)] = ch;
        if self.cursor.col >= self.last_col() {
            self.pending_wrap = true;
        } else {
            self.cursor.col += 1;
        }
    }

    fn execute(&mut self, byte: u8) {
        match byte {
            // Backspace.
            0x08 => self.cursor.col = self.cursor.col.saturating_sub(1),
            // Line feed.
            0x0A => self.line_feed(),
            // Carriage return.
            0x0D => self.cursor.col = 0,
            _ => return,
        }
        self.pending_wrap = false;
    }

    fn csi_dispatch(
        &mut self,
        params: &Params,
        _intermediates: &[u8],
        _ignore: bool,
        dispatch_char: char,
    ) {
        match dispatch_char {
            CUU_CURSOR_UP => {
                self.cursor.row = self.cursor.row.saturating_sub(count_param(params));
            }
            CUD_CURSOR_DOWN => {
                self.cursor.row =
                    (self.cursor.row.saturating_add(count_param(params))).min(self.last_row());
            }
            CUF_CURSOR_FORWARD => {
                self.cursor.col =
                    (self.cursor.col.saturating_add(count_param(params))).min(self.last_col());
            }
            CUB_CURSOR_BACKWARD => {
                self.cursor.col = self.cursor.col.saturating_sub(count_param(params));
            }
            CNL_CURSOR_NEXT_LINE => {
                self.cursor.row =
                    (self.cursor.row.saturating_add(count_param(params))).min(self.last_row());
                self.cursor.col = 0;
            }
            CHA_CURSOR_COLUMN => {
                self.cursor.col = (count_param(params) - 1).min(self.last_col());
            }
            CUP_CURSOR_POSITION => {
                let mut it = params.iter().map(|it| it.first().copied().unwrap_or(1));
                let row = it.next().unwrap_or(1).max(1) - 1;
                let col = it.next().unwrap_or(1).max(1) - 1;
                self.cursor = CursorPosition {
                    col: col.min(self.last_col()),
                    row: row.min(self.last_row()),
                };
            }
            ED_ERASE_DISPLAY => match first_param(params, 0) {
                0 => self.erase_from(self.cursor.col, self.cursor.row),
                2 => self.erase_from(0, 0),
                _ => {}
            },
            SCP_SAVE_CURSOR => self.saved_cursor = Some(self.cursor),
            RCP_RESTORE_CURSOR => {
                if let Some(saved) = self.saved_cursor {
                    self.cursor = saved;
                }
            }
            _ => return,
        }
        self.pending_wrap = false;
    }
}
