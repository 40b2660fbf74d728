//! Line-oriented text buffer with reversible edits.
//!
//! Storage is a vector of lines; edits are expressed against the buffer as one
//! string (lines joined by `\n`) so that every primitive produces a
//! [`TextModification`] that can be inverted and replayed by the undo engine.
//! Columns are byte offsets. Text is treated as single-byte code units; the
//! buffer only guarantees that it never splits a multi-byte character when
//! mutating, not that columns line up with what a terminal displays.

pub mod buffer;
pub mod diff;
pub mod motion;
pub mod search;
pub mod undo;

pub use buffer::{BufferError, MAX_PADDING, TAB, TextBuffer};
pub use diff::{TextModification, TextRange};
pub use motion::Bracket;
pub use undo::{UNDO_HISTORY_MAX, UndoEngine};

/// A position inside a buffer expressed as (line index, byte column within that line).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
    pub fn origin() -> Self {
        Self { line: 0, col: 0 }
    }

    /// The position reached after writing `text` starting here.
    pub fn advanced_over(self, text: &str) -> Self {
        match text.rfind('\n') {
            Some(last_nl) => Self {
                line: self.line + text.matches('\n').count(),
                col: text.len() - last_nl - 1,
            },
            None => Self {
                line: self.line,
                col: self.col + text.len(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_within_line() {
        assert_eq!(Position::new(2, 3).advanced_over("abc"), Position::new(2, 6));
    }

    #[test]
    fn advance_across_lines_resets_column() {
        assert_eq!(Position::new(2, 3).advanced_over("ab\ncd\nxyz"), Position::new(4, 3));
        assert_eq!(Position::new(0, 7).advanced_over("\n"), Position::new(1, 0));
    }

    #[test]
    fn positions_order_line_first() {
        assert!(Position::new(1, 0) > Position::new(0, 99));
        assert!(Position::new(1, 2) < Position::new(1, 3));
    }
}
