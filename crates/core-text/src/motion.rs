//! In-line motion queries.
//!
//! Pure lookups on a single line; none of them cross line boundaries. Words are
//! runs of ASCII alphanumerics. Character and word queries return the starting
//! column unchanged when there is nothing to move to. Bracket lookups return
//! `None` instead, since callers pair them up and need to know about a miss.

use crate::TextBuffer;

/// Bracket family used by bracket-pair lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bracket {
    /// `(` / `)`
    Paren,
    /// `{` / `}`
    Brace,
}

impl Bracket {
    pub fn open(self) -> u8 {
        match self {
            Bracket::Paren => b'(',
            Bracket::Brace => b'{',
        }
    }
    pub fn close(self) -> u8 {
        match self {
            Bracket::Paren => b')',
            Bracket::Brace => b'}',
        }
    }
}

fn is_word(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

impl TextBuffer {
    /// Start of the next word: skip the rest of the current word, then the gap.
    /// Stops at the line end when no word follows.
    pub fn find_forward_by_word_index(&self, line: usize, col: usize) -> usize {
        let bytes = self.get_line(line).as_bytes();
        if col >= bytes.len() {
            return col;
        }
        let mut i = col;
        while i < bytes.len() && is_word(bytes[i]) {
            i += 1;
        }
        while i < bytes.len() && !is_word(bytes[i]) {
            i += 1;
        }
        i
    }

    /// Last character of the word under the cursor, or of the next word when
    /// the cursor already sits on a word end.
    pub fn find_forward_to_end_of_word(&self, line: usize, col: usize) -> usize {
        let bytes = self.get_line(line).as_bytes();
        let mut i = col + 1;
        while i < bytes.len() && !is_word(bytes[i]) {
            i += 1;
        }
        if i >= bytes.len() {
            return col;
        }
        while i + 1 < bytes.len() && is_word(bytes[i + 1]) {
            i += 1;
        }
        i
    }

    /// Jump back over one word and the gap before it, landing just after the
    /// preceding word.
    pub fn find_backward_by_word_index(&self, line: usize, col: usize) -> usize {
        let bytes = self.get_line(line).as_bytes();
        let from = col.min(bytes.len());
        let mut i = from;
        while i > 0 && is_word(bytes[i - 1]) {
            i -= 1;
        }
        while i > 0 && !is_word(bytes[i - 1]) {
            i -= 1;
        }
        if i == from { col } else { i }
    }

    /// Start of the word containing the cursor, or of the previous word when
    /// the cursor is already on a word start.
    pub fn find_backward_to_start_of_word(&self, line: usize, col: usize) -> usize {
        let bytes = self.get_line(line).as_bytes();
        let from = col.min(bytes.len());
        let mut i = from;
        while i > 0 && !is_word(bytes[i - 1]) {
            i -= 1;
        }
        while i > 0 && is_word(bytes[i - 1]) {
            i -= 1;
        }
        if i == from { col } else { i }
    }

    /// Next occurrence of `ch` strictly right of `col` (vim `f`).
    pub fn find_rightward_index(&self, line: usize, col: usize, ch: char) -> usize {
        self.scan_right(line, col + 1, ch).unwrap_or(col)
    }

    /// Column just before the next `ch` right of `col` (vim `t`).
    pub fn find_rightward_index_before(&self, line: usize, col: usize, ch: char) -> usize {
        self.scan_right(line, col + 1, ch)
            .map(|i| i - 1)
            .unwrap_or(col)
    }

    /// Previous occurrence of `ch` strictly left of `col` (vim `F`).
    pub fn find_leftward_index(&self, line: usize, col: usize, ch: char) -> usize {
        match col.checked_sub(1) {
            Some(from) => self.scan_left(line, from, ch).unwrap_or(col),
            None => col,
        }
    }

    /// Column just after the previous `ch` left of `col` (vim `T`).
    pub fn find_leftward_index_before(&self, line: usize, col: usize, ch: char) -> usize {
        match col.checked_sub(1) {
            Some(from) => self.scan_left(line, from, ch).map(|i| i + 1).unwrap_or(col),
            None => col,
        }
    }

    /// First opening bracket at or right of `col`.
    pub fn find_column_index_of_next_left_bracket(
        &self,
        line: usize,
        col: usize,
        bracket: Bracket,
    ) -> Option<usize> {
        self.scan_right(line, col, bracket.open() as char)
    }

    /// First closing bracket at or right of `col`.
    pub fn find_column_index_of_next_right_bracket(
        &self,
        line: usize,
        col: usize,
        bracket: Bracket,
    ) -> Option<usize> {
        self.scan_right(line, col, bracket.close() as char)
    }

    /// Nearest opening bracket at or left of `col`.
    pub fn find_column_index_of_previous_left_bracket(
        &self,
        line: usize,
        col: usize,
        bracket: Bracket,
    ) -> Option<usize> {
        self.scan_left(line, col, bracket.open() as char)
    }

    /// Nearest closing bracket at or left of `col`.
    pub fn find_column_index_of_previous_right_bracket(
        &self,
        line: usize,
        col: usize,
        bracket: Bracket,
    ) -> Option<usize> {
        self.scan_left(line, col, bracket.close() as char)
    }

    /// Index of the first non-blank character; the line length for blank lines.
    pub fn find_col_idx_of_first_non_whitespace_character_in_line(&self, line: usize) -> usize {
        let bytes = self.get_line(line).as_bytes();
        bytes
            .iter()
            .position(|b| !b.is_ascii_whitespace())
            .unwrap_or(bytes.len())
    }

    fn scan_right(&self, line: usize, from: usize, ch: char) -> Option<usize> {
        let text = self.get_line(line);
        if from >= text.len() || !ch.is_ascii() {
            return None;
        }
        text.as_bytes()[from..]
            .iter()
            .position(|&b| b == ch as u8)
            .map(|i| from + i)
    }

    fn scan_left(&self, line: usize, from: usize, ch: char) -> Option<usize> {
        let bytes = self.get_line(line).as_bytes();
        if bytes.is_empty() || !ch.is_ascii() {
            return None;
        }
        let from = from.min(bytes.len() - 1);
        bytes[..=from].iter().rposition(|&b| b == ch as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn b(s: &str) -> TextBuffer {
        TextBuffer::from_text(s)
    }

    #[test]
    fn forward_word_skips_word_then_gap() {
        let t = b("foo  bar.baz");
        assert_eq!(t.find_forward_by_word_index(0, 0), 5);
        assert_eq!(t.find_forward_by_word_index(0, 5), 9);
        assert_eq!(t.find_forward_by_word_index(0, 9), 12, "last word runs to line end");
        assert_eq!(t.find_forward_by_word_index(0, 40), 40);
    }

    #[test]
    fn end_of_word_advances_past_current_end() {
        let t = b("foo bar");
        assert_eq!(t.find_forward_to_end_of_word(0, 0), 2);
        assert_eq!(t.find_forward_to_end_of_word(0, 2), 6);
        assert_eq!(t.find_forward_to_end_of_word(0, 6), 6, "no further word");
    }

    #[test]
    fn backward_to_start_of_word() {
        let t = b("foo bar");
        assert_eq!(t.find_backward_to_start_of_word(0, 5), 4);
        assert_eq!(t.find_backward_to_start_of_word(0, 4), 0);
        assert_eq!(t.find_backward_to_start_of_word(0, 0), 0);
    }

    #[test]
    fn backward_by_word_lands_after_previous_word() {
        let t = b("foo bar");
        assert_eq!(t.find_backward_by_word_index(0, 6), 3);
        assert_eq!(t.find_backward_by_word_index(0, 2), 0);
    }

    #[test]
    fn character_finds_do_not_match_under_cursor() {
        let t = b("a(b)c)d");
        assert_eq!(t.find_rightward_index(0, 0, ')'), 3);
        assert_eq!(t.find_rightward_index(0, 3, ')'), 5);
        assert_eq!(t.find_rightward_index_before(0, 0, ')'), 2);
        assert_eq!(t.find_rightward_index(0, 0, 'z'), 0, "miss leaves column unchanged");
        assert_eq!(t.find_leftward_index(0, 6, '('), 1);
        assert_eq!(t.find_leftward_index_before(0, 6, '('), 2);
        assert_eq!(t.find_leftward_index(0, 0, 'a'), 0);
    }

    #[test]
    fn bracket_lookups_include_cursor_column() {
        let t = b("f(x, {y})");
        assert_eq!(t.find_column_index_of_previous_left_bracket(0, 3, Bracket::Paren), Some(1));
        assert_eq!(t.find_column_index_of_next_right_bracket(0, 3, Bracket::Paren), Some(8));
        assert_eq!(t.find_column_index_of_next_right_bracket(0, 8, Bracket::Paren), Some(8));
        assert_eq!(t.find_column_index_of_previous_left_bracket(0, 6, Bracket::Brace), Some(5));
        assert_eq!(t.find_column_index_of_next_left_bracket(0, 6, Bracket::Brace), None);
        assert_eq!(t.find_column_index_of_previous_right_bracket(0, 7, Bracket::Brace), Some(7));
    }

    #[test]
    fn first_non_whitespace() {
        assert_eq!(b("    x").find_col_idx_of_first_non_whitespace_character_in_line(0), 4);
        assert_eq!(b("   ").find_col_idx_of_first_non_whitespace_character_in_line(0), 3);
    }
}
