// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Turns input into edit commands.
//!
//! Terminals deliver each keystroke twice: once as a named key, and once as the data
//! the key produces (`'\r'` for Enter, `'\x7f'` for Backspace, the character itself
//! for printable keys). Both arrive here as an [EditorEvent]. A named key that maps to
//! an [EditCommand] is intercepted, which suppresses its data. Anything else passes
//! through, and its data is inserted as text.

use crate::{C0_CONTROL_END, CARET, CARET_XOR_MASK, DEFAULT_LITERAL_GLYPH,
            DEFAULT_LITERAL_KEY, DEL_CODE_POINT};

/// Keys that the editor may want to intercept, before the terminal turns them into
/// data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedKey {
    Enter,
    Backspace,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// A key that produces a single character without modifiers (shift aside).
    Character(char),
    /// Function keys, modifier combinations, and so on.
    Other,
}

/// One unit of input for [crate::LineEditor::handle_event].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    NamedKey(NamedKey),
    /// Data produced by the terminal, eg: a typed character or a paste.
    RawText(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditCommand {
    Submit,
    DeleteBackward,
    HistoryUp,
    HistoryDown,
    CursorLeft,
    CursorRight,
    /// Insert the glyph configured in [LiteralSubstitution].
    InsertLiteral(String),
    /// Insert text that has already been made display-safe.
    InsertText(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classified {
    Command(EditCommand),
    Passthrough,
}

/// Returned by [crate::LineEditor::handle_event]. For a [EditorEvent::NamedKey] this
/// tells the caller whether to go ahead and deliver the key's default data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Suppress,
    Passthrough,
}

/// A key that inserts a fixed glyph instead of itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralSubstitution {
    pub key: char,
    pub glyph: String,
}

impl Default for LiteralSubstitution {
    fn default() -> Self {
        Self {
            key: DEFAULT_LITERAL_KEY,
            glyph: DEFAULT_LITERAL_GLYPH.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// [None] turns substitution off, so the key is typed as itself.
    pub literal_substitution: Option<LiteralSubstitution>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            literal_substitution: Some(LiteralSubstitution::default()),
        }
    }
}

impl EditorConfig {
    #[must_use]
    pub fn without_literal_substitution() -> Self {
        Self {
            literal_substitution: None,
        }
    }
}

#[must_use]
pub fn classify_named_key(key: NamedKey, config: &EditorConfig) -> Classified {
    let command = match key {
        NamedKey::Enter => EditCommand::Submit,
        NamedKey::Backspace => EditCommand::DeleteBackward,
        NamedKey::ArrowUp => EditCommand::HistoryUp,
        NamedKey::ArrowDown => EditCommand::HistoryDown,
        NamedKey::ArrowLeft => EditCommand::CursorLeft,
        NamedKey::ArrowRight => EditCommand::CursorRight,
        NamedKey::Character(ch) => match &config.literal_substitution {
            Some(sub) if sub.key == ch => EditCommand::InsertLiteral(sub.glyph.clone()),
            _ => return Classified::Passthrough,
        },
        NamedKey::Other => return Classified::Passthrough,
    };
    Classified::Command(command)
}

/// Raw data is always inserted, after making control bytes visible. Empty data does
/// nothing.
#[must_use]
pub fn classify_raw_text(text: &str) -> Option<EditCommand> {
    if text.is_empty() {
        None
    } else {
        Some(EditCommand::InsertText(escape_control_chars(text)))
    }
}

/// Caret notation: every C0 control and DEL is shown as `^` followed by the code point
/// XOR `0x40`. So `"\x01"` becomes `"^A"`, `"\r"` becomes `"^M"`, and `"\x7f"` becomes
/// `"^?"`. Everything else is unchanged.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn escape_control_chars(text: &str) -> String {
    let mut acc = String::with_capacity(text.len());
    for ch in text.chars() {
        let code_point = u32::from(ch);
        if code_point < C0_CONTROL_END || code_point == DEL_CODE_POINT {
            acc.push(CARET);
            // Fits in a byte since `code_point <= 0x7F`.
            acc.push(char::from((code_point ^ CARET_XOR_MASK) as u8));
        } else {
            acc.push(ch);
        }
    }
    acc
}
