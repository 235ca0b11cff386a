// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The (small) subset of VT100 / ANSI CSI sequences that the line editor emits, and that
//! the [`crate::test_fixtures::TerminalSurfaceMock`] understands.
//!
//! All redraws are built out of these plus a literal `"\r\n"` (used to force a scroll
//! when the cursor is on the last row, since `CSI E` never scrolls).

use std::fmt::{Display, Formatter, Result};

// CSI sequence components.

/// CSI sequence start: ESC [
pub const CSI_START: &str = "\x1b[";

/// CSI A: Cursor Up (CUU)
/// Moves cursor up by n lines (default 1)
pub const CUU_CURSOR_UP: char = 'A';

/// CSI B: Cursor Down (CUD)
/// Moves cursor down by n lines (default 1)
pub const CUD_CURSOR_DOWN: char = 'B';

/// CSI C: Cursor Forward (CUF)
/// Moves cursor right by n columns (default 1)
pub const CUF_CURSOR_FORWARD: char = 'C';

/// CSI D: Cursor Backward (CUB)
/// Moves cursor left by n columns (default 1)
pub const CUB_CURSOR_BACKWARD: char = 'D';

/// CSI E: Cursor Next Line (CNL)
/// Moves cursor to beginning of line n lines down (default 1)
pub const CNL_CURSOR_NEXT_LINE: char = 'E';

/// CSI G: Cursor Horizontal Absolute (CHA)
/// Moves cursor to column n, 1-based (default 1)
pub const CHA_CURSOR_COLUMN: char = 'G';

/// CSI J: Erase Display (ED)
pub const ED_ERASE_DISPLAY: char = 'J';

/// CSI s: Save Cursor Position (SCP)
/// Alternative to ESC 7
pub const SCP_SAVE_CURSOR: char = 's';

/// CSI u: Restore Cursor Position (RCP)
/// Alternative to ESC 8
pub const RCP_RESTORE_CURSOR: char = 'u';

/// Parameter for [`ED_ERASE_DISPLAY`]: from cursor to end of display.
pub const ED_ERASE_TO_END: u16 = 0;

/// Builder for the CSI (Control Sequence Introducer) sequences used by the redraw
/// engine. Render it with [`Display`], eg: `CsiSequence::CursorUp(2).to_string()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CsiSequence {
    /// Cursor Up (CUU) - ESC [ n A
    CursorUp(u16),
    /// Cursor Forward (CUF) - ESC [ n C
    CursorForward(u16),
    /// Cursor Backward (CUB) - ESC [ n D
    CursorBackward(u16),
    /// Cursor Next Line (CNL) - ESC [ n E
    CursorNextLine(u16),
    /// Cursor Horizontal Absolute (CHA) - ESC [ n G. The column is 1-based.
    CursorHorizontalAbsolute(u16),
    /// Erase Display (ED) - ESC [ n J
    EraseDisplay(u16),
    /// Save Cursor (SCP) - ESC [ s
    SaveCursor,
    /// Restore Cursor (RCP) - ESC [ u
    RestoreCursor,
}

impl Display for CsiSequence {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        f.write_str(CSI_START)?;
        match self {
            CsiSequence::CursorUp(n) => write!(f, "{n}{CUU_CURSOR_UP}"),
            CsiSequence::CursorForward(n) => write!(f, "{n}{CUF_CURSOR_FORWARD}"),
            CsiSequence::CursorBackward(n) => write!(f, "{n}{CUB_CURSOR_BACKWARD}"),
            CsiSequence::CursorNextLine(n) => write!(f, "{n}{CNL_CURSOR_NEXT_LINE}"),
            CsiSequence::CursorHorizontalAbsolute(n) => {
                write!(f, "{n}{CHA_CURSOR_COLUMN}")
            }
            CsiSequence::EraseDisplay(n) => write!(f, "{n}{ED_ERASE_DISPLAY}"),
            CsiSequence::SaveCursor => write!(f, "{SCP_SAVE_CURSOR}"),
            CsiSequence::RestoreCursor => write!(f, "{RCP_RESTORE_CURSOR}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(CsiSequence::CursorUp(3), "\x1b[3A" ; "cursor up")]
    #[test_case(CsiSequence::CursorForward(1), "\x1b[1C" ; "cursor forward")]
    #[test_case(CsiSequence::CursorBackward(1), "\x1b[1D" ; "cursor backward")]
    #[test_case(CsiSequence::CursorNextLine(2), "\x1b[2E" ; "cursor next line")]
    #[test_case(CsiSequence::CursorHorizontalAbsolute(80), "\x1b[80G" ; "cha")]
    #[test_case(CsiSequence::EraseDisplay(ED_ERASE_TO_END), "\x1b[0J" ; "erase to end")]
    #[test_case(CsiSequence::SaveCursor, "\x1b[s" ; "save")]
    #[test_case(CsiSequence::RestoreCursor, "\x1b[u" ; "restore")]
    fn test_csi_sequence_display(seq: CsiSequence, expected: &str) {
        pretty_assertions::assert_eq!(seq.to_string(), expected);
    }
}
