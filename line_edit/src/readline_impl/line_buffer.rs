// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use smallvec::SmallVec;
use std::fmt::{Display, Formatter, Result};

/// Most lines typed at a REPL fit in this many code points without touching the heap.
pub const LINE_BUFFER_INLINE_CAPACITY: usize = 64;

pub type InlineChars = SmallVec<[char; LINE_BUFFER_INLINE_CAPACITY]>;

/// The text of one line, as an index-addressable sequence of Unicode code points. All
/// cursor arithmetic in the editor is done in code points, and every code point is
/// assumed to occupy exactly one terminal column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    chars: InlineChars,
}

impl LineBuffer {
    #[must_use]
    pub fn new() -> Self { Self::default() }

    #[must_use]
    pub fn len(&self) -> usize { self.chars.len() }

    #[must_use]
    pub fn is_empty(&self) -> bool { self.chars.is_empty() }

    /// `true` if the line is empty or only contains whitespace. Such lines are never
    /// committed to history.
    #[must_use]
    pub fn is_blank(&self) -> bool { self.chars.iter().all(|it| it.is_whitespace()) }

    /// Splice `text` in at code point index `at` (clamped to the end of the line).
    /// Returns how many code points were inserted.
    pub fn insert_str(&mut self, at: usize, text: &str) -> usize {
        let at = at.min(self.len());
        let before = self.len();
        self.chars.insert_many(at, text.chars());
        self.len() - before
    }

    /// Removes the code point at index `at`. Returns [None] if `at` is out of bounds.
    pub fn remove(&mut self, at: usize) -> Option<char> {
        if at < self.len() {
            Some(self.chars.remove(at))
        } else {
            None
        }
    }

    /// Everything from code point index `from` to the end of the line.
    #[must_use]
    pub fn tail_from(&self, from: usize) -> String {
        self.chars.iter().skip(from).collect()
    }
}

impl From<&str> for LineBuffer {
    fn from(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }
}

impl Display for LineBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        for it in &self.chars {
            write!(f, "{it}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    #[test]
    fn test_insert_and_remove() {
        let mut line = LineBuffer::new();
        assert_eq!(line.insert_str(0, "ac"), 2);
        assert_eq!(line.insert_str(1, "b"), 1);
        assert_eq!(line.to_string(), "abc");

        assert_eq!(line.remove(1), Some('b'));
        assert_eq!(line.remove(5), None);
        assert_eq!(line.to_string(), "ac");
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn test_insert_past_end_appends() {
        let mut line = LineBuffer::from("ab");
        line.insert_str(99, "c");
        assert_eq!(line.to_string(), "abc");
    }

    #[test]
    fn test_code_points_not_bytes() {
        let mut line = LineBuffer::from("λx");
        assert_eq!(line.len(), 2);
        line.insert_str(1, "é");
        assert_eq!(line.tail_from(1), "éx");
    }

    #[test_case("", true)]
    #[test_case("  \t ", true)]
    #[test_case(" x ", false)]
    fn test_is_blank(input: &str, expected: bool) {
        assert_eq!(LineBuffer::from(input).is_blank(), expected);
    }

    #[test]
    fn test_spills_to_heap_past_inline_capacity() {
        let long = "x".repeat(LINE_BUFFER_INLINE_CAPACITY * 2);
        let line = LineBuffer::from(long.as_str());
        assert_eq!(line.len(), LINE_BUFFER_INLINE_CAPACITY * 2);
        assert_eq!(line.to_string(), long);
    }
}
