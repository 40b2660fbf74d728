//! Text ranges and reversible modifications.
//!
//! A [`TextRange`] is a half-open span of the buffer-as-one-string model. A
//! [`TextModification`] pairs a range with the content written into it and the
//! content it displaced. Inversion swaps the two contents and recomputes the
//! range so it covers exactly what was written; the previous end position is
//! meaningless once the new content is in place.

use crate::Position;
use std::fmt;

/// Half-open `[start, end)` span. Equality is structural.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub start: Position,
    pub end: Position,
}

impl TextRange {
    pub fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start: Position::new(start_line, start_col),
            end: Position::new(end_line, end_col),
        }
    }

    /// Zero-width range at a single position.
    pub fn point(line: usize, col: usize) -> Self {
        Self::new(line, col, line, col)
    }

    pub fn from_positions(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}:{}",
            self.start.line, self.start.col, self.end.line, self.end.col
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextModification {
    pub range: TextRange,
    pub new_content: String,
    pub replaced_content: String,
}

impl TextModification {
    pub fn new(
        range: TextRange,
        new_content: impl Into<String>,
        replaced_content: impl Into<String>,
    ) -> Self {
        Self {
            range,
            new_content: new_content.into(),
            replaced_content: replaced_content.into(),
        }
    }

    /// Pure insertion of `text` at `at`.
    pub fn insertion(at: Position, text: impl Into<String>) -> Self {
        Self::new(TextRange::from_positions(at, at), text, "")
    }

    /// Pure deletion of `range`, which currently holds `replaced`.
    pub fn deletion(range: TextRange, replaced: impl Into<String>) -> Self {
        Self::new(range, "", replaced)
    }

    /// A single `\n` written at a zero-width range.
    pub fn is_newline_insertion(&self) -> bool {
        self.new_content == "\n" && self.range.is_empty()
    }

    /// The modification that undoes `self` once `self` has been applied.
    pub fn inverse(&self) -> TextModification {
        let start = self.range.start;
        let end = if self.is_newline_insertion() {
            Position::new(start.line + 1, 0)
        } else {
            start.advanced_over(&self.new_content)
        };
        TextModification {
            range: TextRange::from_positions(start, end),
            new_content: self.replaced_content.clone(),
            replaced_content: self.new_content.clone(),
        }
    }
}
