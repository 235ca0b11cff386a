// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Splits a [crossterm] event into the two input channels the editor understands. A
//! key press becomes a [NamedKey], plus the data a terminal would have produced for
//! it. The data is only delivered if the named key is not intercepted.

use super::NamedKey;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What one [crossterm::event::Event] turns into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrosstermInput {
    /// A key press, and the data it produces if it isn't intercepted.
    Key {
        named_key: NamedKey,
        default_data: Option<String>,
    },
    /// Bracketed paste. Goes straight to the data channel.
    Paste(String),
}

impl CrosstermInput {
    /// Returns [None] for events the editor does not care about: key releases and
    /// repeats reported by the kitty protocol, mouse, focus, and resize events.
    #[must_use]
    pub fn from_event(event: &crossterm::event::Event) -> Option<Self> {
        match event {
            crossterm::event::Event::Key(key_event) => Self::from_key_event(key_event),
            crossterm::event::Event::Paste(text) => Some(Self::Paste(text.clone())),
            _ => None,
        }
    }

    #[must_use]
    pub fn from_key_event(key_event: &KeyEvent) -> Option<Self> {
        if key_event.kind != KeyEventKind::Press {
            return None;
        }
        Some(Self::Key {
            named_key: named_key(key_event),
            default_data: default_data(key_event),
        })
    }
}

fn has_ctrl_or_alt(modifiers: KeyModifiers) -> bool {
    modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
}

fn named_key(key_event: &KeyEvent) -> NamedKey {
    match key_event.code {
        KeyCode::Enter => NamedKey::Enter,
        KeyCode::Backspace => NamedKey::Backspace,
        KeyCode::Up => NamedKey::ArrowUp,
        KeyCode::Down => NamedKey::ArrowDown,
        KeyCode::Left => NamedKey::ArrowLeft,
        KeyCode::Right => NamedKey::ArrowRight,
        KeyCode::Char(ch) if !has_ctrl_or_alt(key_event.modifiers) => {
            NamedKey::Character(ch)
        }
        _ => NamedKey::Other,
    }
}

/// The bytes a VT100 style terminal sends for this key, for the keys that send
/// something printable or a single control byte. Escape sequences for function keys
/// are not reproduced.
fn default_data(key_event: &KeyEvent) -> Option<String> {
    match key_event.code {
        KeyCode::Enter => Some("\r".into()),
        KeyCode::Backspace => Some("\x7f".into()),
        KeyCode::Tab => Some("\t".into()),
        KeyCode::Esc => Some("\x1b".into()),
        KeyCode::Char(ch) if key_event.modifiers.contains(KeyModifiers::CONTROL) => {
            control_byte(ch).map(String::from)
        }
        KeyCode::Char(_) if key_event.modifiers.contains(KeyModifiers::ALT) => None,
        KeyCode::Char(ch) => Some(ch.to_string()),
        _ => None,
    }
}

/// `Ctrl+A` is `0x01`, ..., `Ctrl+Z` is `0x1A`, and `Ctrl+@` through `Ctrl+_` cover the
/// rest of the C0 range.
#[allow(clippy::cast_possible_truncation)]
fn control_byte(ch: char) -> Option<char> {
    let upper = ch.to_ascii_uppercase();
    if ('@'..='_').contains(&upper) {
        Some(char::from(upper as u8 & 0x1f))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::Event;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test_case(KeyCode::Enter, NamedKey::Enter, Some("\r"))]
    #[test_case(KeyCode::Backspace, NamedKey::Backspace, Some("\x7f"))]
    #[test_case(KeyCode::Up, NamedKey::ArrowUp, None)]
    #[test_case(KeyCode::Left, NamedKey::ArrowLeft, None)]
    #[test_case(KeyCode::Tab, NamedKey::Other, Some("\t"))]
    #[test_case(KeyCode::Char('x'), NamedKey::Character('x'), Some("x"))]
    #[test_case(KeyCode::F(1), NamedKey::Other, None)]
    fn test_plain_keys(code: KeyCode, named_key: NamedKey, default_data: Option<&str>) {
        assert_eq!(
            CrosstermInput::from_event(&press(code, KeyModifiers::NONE)),
            Some(CrosstermInput::Key {
                named_key,
                default_data: default_data.map(String::from),
            })
        );
    }

    #[test]
    fn test_ctrl_letter_produces_control_byte() {
        assert_eq!(
            CrosstermInput::from_event(&press(KeyCode::Char('a'), KeyModifiers::CONTROL)),
            Some(CrosstermInput::Key {
                named_key: NamedKey::Other,
                default_data: Some("\x01".into()),
            })
        );
    }

    #[test]
    fn test_release_is_ignored() {
        let mut key_event = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        key_event.kind = KeyEventKind::Release;
        assert_eq!(CrosstermInput::from_event(&Event::Key(key_event)), None);
    }

    #[test]
    fn test_paste_and_resize() {
        assert_eq!(
            CrosstermInput::from_event(&Event::Paste("a\rb".into())),
            Some(CrosstermInput::Paste("a\rb".into()))
        );
        assert_eq!(CrosstermInput::from_event(&Event::Resize(80, 24)), None);
    }
}
