//! Editor state shared by the viewport and the dispatcher: mode, navigation
//! history, command-bar input and search results.

use core_text::TextRange;

pub mod history;
pub use history::{HierarchicalHistory, HistoryEntry};

/// Current editor mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Keys accumulate into a pending command matched against the rule table.
    #[default]
    MoveAndEdit,
    /// Glyphs are inserted at the cursor.
    Insert,
    /// Rectangular selection between an anchor and the cursor.
    VisualSelect,
    /// Command-bar entry (`:` commands and `/` searches).
    Command,
}

impl Mode {
    pub fn label(self) -> &'static str {
        match self {
            Mode::MoveAndEdit => "MOVE",
            Mode::Insert => "INSERT",
            Mode::VisualSelect => "VISUAL",
            Mode::Command => "COMMAND",
        }
    }
}

bitflags::bitflags! {
    /// Set of modes a command rule is active in.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ModeSet: u8 {
        const MOVE_AND_EDIT = 0b0001;
        const INSERT        = 0b0010;
        const VISUAL_SELECT = 0b0100;
        const COMMAND       = 0b1000;
        /// Modes that accumulate a pending command.
        const NAVIGATION = Self::MOVE_AND_EDIT.bits() | Self::VISUAL_SELECT.bits();
    }
}

impl ModeSet {
    pub fn contains_mode(self, mode: Mode) -> bool {
        self.contains(ModeSet::from(mode))
    }
}

impl From<Mode> for ModeSet {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::MoveAndEdit => ModeSet::MOVE_AND_EDIT,
            Mode::Insert => ModeSet::INSERT,
            Mode::VisualSelect => ModeSet::VISUAL_SELECT,
            Mode::Command => ModeSet::COMMAND,
        }
    }
}

/// Command-bar input. The leading `:` or `/` is part of the buffer.
#[derive(Debug, Default, Clone)]
pub struct CommandLine {
    buf: String,
}

impl CommandLine {
    pub fn is_active(&self) -> bool {
        !self.buf.is_empty()
    }
    pub fn buffer(&self) -> &str {
        &self.buf
    }
    pub fn clear(&mut self) {
        self.buf.clear();
    }
    /// Start a new entry with `prefix` (`:` or `/`).
    pub fn begin(&mut self, prefix: char) {
        self.buf.clear();
        self.buf.push(prefix);
    }
    pub fn push_char(&mut self, ch: char) {
        self.buf.push(ch);
    }
    /// Remove the last character. Returns false once the bar is empty.
    pub fn backspace(&mut self) -> bool {
        self.buf.pop();
        !self.buf.is_empty()
    }
}

/// Results of the last `/` search and the one currently selected.
#[derive(Debug, Default, Clone)]
pub struct SearchState {
    results: Vec<TextRange>,
    index: usize,
}

impl SearchState {
    pub fn set_results(&mut self, results: Vec<TextRange>) {
        self.results = results;
        self.index = 0;
    }
    pub fn results(&self) -> &[TextRange] {
        &self.results
    }
    pub fn current(&self) -> Option<TextRange> {
        self.results.get(self.index).copied()
    }
    /// Select the following result, wrapping to the first.
    pub fn next(&mut self) -> Option<TextRange> {
        if self.results.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.results.len();
        self.current()
    }
    /// Select the preceding result, wrapping to the last.
    pub fn previous(&mut self) -> Option<TextRange> {
        if self.results.is_empty() {
            return None;
        }
        self.index = self.index.checked_sub(1).unwrap_or(self.results.len() - 1);
        self.current()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_set_membership() {
        assert!(ModeSet::NAVIGATION.contains_mode(Mode::MoveAndEdit));
        assert!(ModeSet::NAVIGATION.contains_mode(Mode::VisualSelect));
        assert!(!ModeSet::NAVIGATION.contains_mode(Mode::Insert));
        assert!(!ModeSet::MOVE_AND_EDIT.contains_mode(Mode::Command));
    }

    #[test]
    fn command_line_backspace_reports_empty() {
        let mut c = CommandLine::default();
        c.begin(':');
        c.push_char('w');
        assert_eq!(c.buffer(), ":w");
        assert!(c.backspace());
        assert!(!c.backspace(), "removing the prefix empties the bar");
        assert!(!c.is_active());
    }

    #[test]
    fn search_navigation_wraps_both_ways() {
        let mut s = SearchState::default();
        assert!(s.next().is_none());
        s.set_results(vec![TextRange::point(0, 0), TextRange::point(1, 0), TextRange::point(2, 0)]);
        assert_eq!(s.current(), Some(TextRange::point(0, 0)));
        assert_eq!(s.previous(), Some(TextRange::point(2, 0)));
        assert_eq!(s.next(), Some(TextRange::point(0, 0)));
        assert_eq!(s.next(), Some(TextRange::point(1, 0)));
    }
}
