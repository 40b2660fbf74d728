//! Viewport: cursor, open buffers and the visible cell grid.
//!
//! The cursor sits at a fixed cell `(cursor_line_offset, cursor_col_offset)`
//! of the grid and the text scrolls underneath it. [`Viewport::get_symbol_at`]
//! is the single place where grid coordinates become buffer coordinates;
//! everything else works in buffer coordinates. Columns left of the buffer
//! (negative buffer columns) form the line-number gutter.
//!
//! Open buffers live in an arena (`buffers`) and the active one is an index
//! into it, so switching never aliases or clones a buffer. The last cursor
//! position of every named buffer is remembered across switches.
//!
//! Dirty-cell contract: call [`Viewport::save_previous_viewport_screen`] (or
//! [`Viewport::tick`]) before a tick's mutations and query
//! [`Viewport::get_changed_cells_since_last_tick`] after them.

use crate::screen::ScreenSnapshot;
use core_state::HierarchicalHistory;
use core_text::{Position, TAB, TextBuffer, TextModification};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

#[derive(Debug)]
pub struct Viewport {
    buffers: Vec<TextBuffer>,
    active: usize,
    last_positions: HashMap<PathBuf, Position>,
    history: HierarchicalHistory,
    cursor: Position,
    num_lines: usize,
    num_cols: usize,
    cursor_line_offset: usize,
    cursor_col_offset: usize,
    previous_screen: ScreenSnapshot,
}

impl Viewport {
    pub fn new(
        buffer: TextBuffer,
        num_lines: usize,
        num_cols: usize,
        cursor_line_offset: usize,
        cursor_col_offset: usize,
    ) -> Self {
        Self {
            buffers: vec![buffer],
            active: 0,
            last_positions: HashMap::new(),
            history: HierarchicalHistory::new(),
            cursor: Position::origin(),
            num_lines,
            num_cols,
            cursor_line_offset,
            cursor_col_offset,
            previous_screen: ScreenSnapshot::blank(num_lines, num_cols),
        }
    }

    /// Viewport with the cursor cell in the middle of the grid.
    pub fn centered(buffer: TextBuffer, num_lines: usize, num_cols: usize) -> Self {
        Self::new(buffer, num_lines, num_cols, num_lines / 2, num_cols / 2)
    }

    // ---------------------------------------------------------------------
    // Accessors
    // ---------------------------------------------------------------------

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffers[self.active]
    }
    pub fn buffer_mut(&mut self) -> &mut TextBuffer {
        &mut self.buffers[self.active]
    }
    pub fn cursor(&self) -> Position {
        self.cursor
    }
    pub fn cursor_line(&self) -> usize {
        self.cursor.line
    }
    pub fn cursor_col(&self) -> usize {
        self.cursor.col
    }
    pub fn num_lines(&self) -> usize {
        self.num_lines
    }
    pub fn num_cols(&self) -> usize {
        self.num_cols
    }
    pub fn cursor_offsets(&self) -> (usize, usize) {
        (self.cursor_line_offset, self.cursor_col_offset)
    }
    pub fn history(&self) -> &HierarchicalHistory {
        &self.history
    }
    pub fn history_mut(&mut self) -> &mut HierarchicalHistory {
        &mut self.history
    }
    pub fn active_path(&self) -> Option<&Path> {
        self.buffer().current_file_path()
    }

    // ---------------------------------------------------------------------
    // Grid mapping + dirty cells
    // ---------------------------------------------------------------------

    /// Display symbol for a visible cell.
    pub fn get_symbol_at(&self, visible_line: usize, visible_col: usize) -> char {
        let line =
            self.cursor.line as isize + visible_line as isize - self.cursor_line_offset as isize;
        let col =
            self.cursor.col as isize + visible_col as isize - self.cursor_col_offset as isize;
        let buffer = self.buffer();
        if line < 0 || line as usize >= buffer.line_count() {
            return ' ';
        }
        let line = line as usize;
        if col < 0 {
            let gutter = format!("{}|", line + 1);
            let idx = gutter.len() as isize + col;
            return if idx >= 0 {
                gutter.as_bytes()[idx as usize] as char
            } else {
                ' '
            };
        }
        match buffer.get_line(line).as_bytes().get(col as usize) {
            Some(b'\t') | None => ' ',
            Some(&b) if b == b' ' || b.is_ascii_graphic() => b as char,
            Some(_) => '?',
        }
    }

    /// Snapshot the grid as it currently renders.
    pub fn save_previous_viewport_screen(&mut self) {
        self.previous_screen =
            ScreenSnapshot::capture(self.num_lines, self.num_cols, |l, c| self.get_symbol_at(l, c));
    }

    pub fn tick(&mut self) {
        self.save_previous_viewport_screen();
    }

    /// Whether the cell renders differently than at the last snapshot.
    /// Cells outside the grid never count as changed.
    pub fn has_cell_changed(&self, line: usize, col: usize) -> bool {
        self.previous_screen.differs(line, col, self.get_symbol_at(line, col))
    }

    pub fn get_changed_cells_since_last_tick(&self) -> Vec<(usize, usize)> {
        let mut changed = Vec::new();
        for l in 0..self.num_lines {
            for c in 0..self.num_cols {
                if self.has_cell_changed(l, c) {
                    changed.push((l, c));
                }
            }
        }
        trace!(target: "model.viewport", cells = changed.len(), "changed_cells");
        changed
    }

    /// Change the grid size. The snapshot becomes blank and the cursor cell is
    /// pulled inside the new grid.
    pub fn resize(&mut self, num_lines: usize, num_cols: usize) {
        self.num_lines = num_lines;
        self.num_cols = num_cols;
        self.cursor_line_offset = self.cursor_line_offset.min(num_lines.saturating_sub(1));
        self.cursor_col_offset = self.cursor_col_offset.min(num_cols.saturating_sub(1));
        self.previous_screen = ScreenSnapshot::blank(num_lines, num_cols);
        debug!(target: "model.viewport", num_lines, num_cols, "resize");
    }

    pub fn set_cursor_offsets(&mut self, line_offset: usize, col_offset: usize) {
        self.cursor_line_offset = line_offset;
        self.cursor_col_offset = col_offset;
    }

    // ---------------------------------------------------------------------
    // Cursor
    // ---------------------------------------------------------------------

    /// Move the cursor, optionally recording the new position in history.
    pub fn set_cursor(&mut self, line: usize, col: usize, store_to_history: bool) {
        self.cursor = Position::new(line, col);
        if store_to_history {
            let path = self.buffers[self.active].current_file_path();
            self.history.add(path, line, col);
        }
    }

    /// Relative move, saturating at zero. Recorded in history.
    pub fn scroll(&mut self, line_delta: isize, col_delta: isize) {
        let line = self.cursor.line.saturating_add_signed(line_delta);
        let col = self.cursor.col.saturating_add_signed(col_delta);
        self.set_cursor(line, col, true);
    }

    pub fn scroll_up(&mut self) {
        self.scroll(-1, 0);
    }
    pub fn scroll_down(&mut self) {
        self.scroll(1, 0);
    }
    pub fn scroll_left(&mut self) {
        self.scroll(0, -1);
    }
    pub fn scroll_right(&mut self) {
        self.scroll(0, 1);
    }

    pub fn move_cursor_to_start_of_line(&mut self) {
        self.cursor.col = 0;
    }

    pub fn move_cursor_to_end_of_line(&mut self) {
        self.cursor.col = self.buffer().line_len(self.cursor.line);
    }

    pub fn move_cursor_to_middle_of_line(&mut self) {
        self.cursor.col = self.buffer().line_len(self.cursor.line) / 2;
    }

    pub fn move_cursor_to_first_non_whitespace(&mut self) {
        self.cursor.col = self
            .buffer()
            .find_col_idx_of_first_non_whitespace_character_in_line(self.cursor.line);
    }

    pub fn move_cursor_to_middle_of_file(&mut self) {
        let line = self.buffer().line_count() / 2;
        self.set_cursor(line, self.cursor.col, true);
    }

    pub fn move_cursor_forward_by_word(&mut self) {
        let Position { line, col } = self.cursor;
        self.cursor.col = self.buffer().find_forward_by_word_index(line, col);
    }

    pub fn move_cursor_forward_until_end_of_word(&mut self) {
        let Position { line, col } = self.cursor;
        self.cursor.col = self.buffer().find_forward_to_end_of_word(line, col);
    }

    pub fn move_cursor_backward_by_word(&mut self) {
        let Position { line, col } = self.cursor;
        self.cursor.col = self.buffer().find_backward_by_word_index(line, col);
    }

    pub fn move_cursor_backward_until_start_of_word(&mut self) {
        let Position { line, col } = self.cursor;
        self.cursor.col = self.buffer().find_backward_to_start_of_word(line, col);
    }

    /// Jump to the next `)` on the line, if any.
    pub fn move_cursor_forward_until_next_right_bracket(&mut self) {
        let Position { line, col } = self.cursor;
        if let Some(idx) = self.buffer().find_column_index_of_next_right_bracket(
            line,
            col + 1,
            core_text::Bracket::Paren,
        ) {
            self.cursor.col = idx;
        }
    }

    /// Jump to the previous `(` on the line, if any.
    pub fn move_cursor_backward_until_next_left_bracket(&mut self) {
        let Position { line, col } = self.cursor;
        if let Some(from) = col.checked_sub(1)
            && let Some(idx) = self.buffer().find_column_index_of_previous_left_bracket(
                line,
                from,
                core_text::Bracket::Paren,
            )
        {
            self.cursor.col = idx;
        }
    }

    // ---------------------------------------------------------------------
    // Edits at the cursor
    // ---------------------------------------------------------------------

    pub fn insert_character_at_cursor(&mut self, ch: char) -> Option<TextModification> {
        let Position { line, col } = self.cursor;
        let m = self.buffer_mut().insert_character(line, col, ch)?;
        self.scroll_right();
        Some(m)
    }

    /// Insert `text` and leave the cursor just after it.
    pub fn insert_string_at_cursor(&mut self, text: &str) -> Option<TextModification> {
        let Position { line, col } = self.cursor;
        let m = self.buffer_mut().insert_string(line, col, text)?;
        let end = Position::new(line, col).advanced_over(text);
        self.set_cursor(end.line, end.col, true);
        Some(m)
    }

    pub fn insert_tab_at_cursor(&mut self) -> Option<TextModification> {
        let Position { line, col } = self.cursor;
        let m = self.buffer_mut().insert_tab(line, col)?;
        self.scroll(0, TAB.len() as isize);
        Some(m)
    }

    /// Remove one leading tab unit from the cursor line.
    pub fn unindent_at_cursor(&mut self) -> Option<TextModification> {
        let line = self.cursor.line;
        let m = self.buffer_mut().remove_tab(line)?;
        self.scroll(0, -(TAB.len() as isize));
        Some(m)
    }

    pub fn delete_character_at_cursor(&mut self) -> Option<TextModification> {
        let Position { line, col } = self.cursor;
        self.buffer_mut().delete_character(line, col)
    }

    /// Delete the character left of the cursor. The cursor only moves when
    /// something was deleted.
    pub fn backspace_at_cursor(&mut self) -> Option<TextModification> {
        let Position { line, col } = self.cursor;
        let m = self.buffer_mut().delete_character(line, col.checked_sub(1)?)?;
        self.scroll_left();
        Some(m)
    }

    pub fn delete_line_at_cursor(&mut self) -> Option<TextModification> {
        let line = self.cursor.line;
        let m = self.buffer_mut().delete_line(line)?;
        let last = self.buffer().line_count() - 1;
        if self.cursor.line > last {
            self.cursor.line = last;
        }
        Some(m)
    }

    /// Open an empty line below the cursor line and move onto it (`o`).
    pub fn create_new_line_below_cursor(&mut self) -> Option<TextModification> {
        let line = self.cursor.line;
        let m = self.buffer_mut().insert_newline_after(line)?;
        self.set_cursor(line + 1, 0, true);
        Some(m)
    }

    /// Open an empty line above the cursor line and move onto it (`O`).
    pub fn create_new_line_above_cursor(&mut self) -> Option<TextModification> {
        let line = self.cursor.line;
        let m = self.buffer_mut().insert_newline_before(line)?;
        self.set_cursor(line, 0, true);
        Some(m)
    }

    /// Split the cursor line at the cursor and move to the start of the new line.
    pub fn split_line_at_cursor(&mut self) -> Option<TextModification> {
        let Position { line, col } = self.cursor;
        let m = self.buffer_mut().split_line(line, col)?;
        self.set_cursor(line + 1, 0, true);
        Some(m)
    }

    // ---------------------------------------------------------------------
    // Open buffers
    // ---------------------------------------------------------------------

    pub fn buffer_count(&self) -> usize {
        self.buffers.len()
    }

    pub fn find_buffer(&self, path: &Path) -> Option<usize> {
        self.buffers
            .iter()
            .position(|b| b.current_file_path() == Some(path))
    }

    pub fn open_buffer_paths(&self) -> Vec<&Path> {
        self.buffers
            .iter()
            .filter_map(TextBuffer::current_file_path)
            .collect()
    }

    /// Make `buffer` active. A buffer for the same path that is already open
    /// is reused and `buffer` is dropped.
    pub fn switch_buffers(&mut self, buffer: TextBuffer, store_to_history: bool) {
        let existing = buffer.current_file_path().and_then(|p| self.find_buffer(p));
        let idx = match existing {
            Some(idx) => idx,
            None => {
                self.buffers.push(buffer);
                self.buffers.len() - 1
            }
        };
        self.activate(idx, store_to_history);
    }

    /// Make the open buffer at `idx` active. Returns false for a bad index.
    pub fn switch_to_index(&mut self, idx: usize, store_to_history: bool) -> bool {
        if idx >= self.buffers.len() {
            return false;
        }
        self.activate(idx, store_to_history);
        true
    }

    fn activate(&mut self, idx: usize, store_to_history: bool) {
        if let Some(path) = self.buffers[self.active].current_file_path() {
            self.last_positions.insert(path.to_path_buf(), self.cursor);
        }
        self.active = idx;
        let restored = self.buffers[idx]
            .current_file_path()
            .and_then(|p| self.last_positions.get(p))
            .copied()
            .unwrap_or_default();
        debug!(target: "model.viewport", idx, line = restored.line, col = restored.col, "switch_buffer");
        self.set_cursor(restored.line, restored.col, store_to_history);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn five_lines() -> TextBuffer {
        TextBuffer::from_text("zero\none\ntwo\nthree\nfour")
    }

    fn named(path: &str, text: &str) -> TextBuffer {
        let mut b = TextBuffer::from_text(text);
        b.set_file_path(path);
        b
    }

    #[test]
    fn cursor_cell_shows_cursor_character() {
        let mut v = Viewport::centered(five_lines(), 5, 20);
        v.set_cursor(2, 1, false);
        assert_eq!(v.get_symbol_at(2, 10), 'w');
        assert_eq!(v.get_symbol_at(2, 11), 'o');
        assert_eq!(v.get_symbol_at(1, 10), 'n');
    }

    #[test]
    fn negative_columns_render_gutter() {
        let v = Viewport::centered(five_lines(), 5, 20);
        // cursor at (0,0) sits in cell (2,10); cells left of it are the gutter
        assert_eq!(v.get_symbol_at(2, 9), '|');
        assert_eq!(v.get_symbol_at(2, 8), '1');
        assert_eq!(v.get_symbol_at(2, 7), ' ');
        assert_eq!(v.get_symbol_at(4, 8), '3');
        for c in 0..10 {
            let sym = v.get_symbol_at(3, c);
            assert!(sym == ' ' || sym == '|' || sym.is_ascii_digit(), "gutter only, got {sym:?}");
        }
    }

    #[test]
    fn cells_outside_buffer_are_blank() {
        let v = Viewport::centered(five_lines(), 5, 20);
        assert_eq!(v.get_symbol_at(0, 12), ' ', "line above the buffer");
        assert_eq!(v.get_symbol_at(2, 19), ' ', "past the line end");
    }

    #[test]
    fn changed_cells_follow_edits() {
        let mut v = Viewport::new(TextBuffer::from_text("abc"), 1, 6, 0, 0);
        v.tick();
        assert!(v.get_changed_cells_since_last_tick().is_empty());
        v.buffer_mut().delete_character(0, 1);
        assert_eq!(v.get_changed_cells_since_last_tick(), vec![(0, 1), (0, 2)]);
        assert!(v.has_cell_changed(0, 1));
        assert!(!v.has_cell_changed(0, 0));
        assert!(!v.has_cell_changed(9, 9));
    }

    #[test]
    fn scroll_saturates_and_records_history() {
        let mut v = Viewport::centered(five_lines(), 5, 20);
        v.scroll(-3, -3);
        assert_eq!(v.cursor(), Position::origin());
        v.scroll(2, 1);
        assert_eq!(v.cursor(), Position::new(2, 1));
        assert_eq!(v.history().len(), 2);
    }

    #[test]
    fn backspace_moves_only_when_deleting() {
        let mut v = Viewport::centered(TextBuffer::from_text("ab"), 3, 10);
        assert!(v.backspace_at_cursor().is_none());
        v.set_cursor(0, 2, false);
        let m = v.backspace_at_cursor().unwrap();
        assert_eq!(m.replaced_content, "b");
        assert_eq!(v.cursor(), Position::new(0, 1));
        v.set_cursor(0, 7, false);
        assert!(v.backspace_at_cursor().is_none());
        assert_eq!(v.cursor_col(), 7);
    }

    #[test]
    fn tab_and_unindent_shift_cursor() {
        let mut v = Viewport::centered(TextBuffer::from_text("x"), 3, 10);
        assert!(v.insert_tab_at_cursor().is_some());
        assert_eq!(v.cursor_col(), 4);
        assert!(v.unindent_at_cursor().is_some());
        assert_eq!(v.cursor_col(), 0);
        assert!(v.unindent_at_cursor().is_none());
    }

    #[test]
    fn new_lines_above_and_below() {
        let mut v = Viewport::centered(TextBuffer::from_text("a\nb"), 3, 10);
        v.create_new_line_below_cursor().unwrap();
        assert_eq!(v.buffer().get_text(), "a\n\nb");
        assert_eq!(v.cursor(), Position::new(1, 0));
        v.set_cursor(2, 1, false);
        v.create_new_line_above_cursor().unwrap();
        assert_eq!(v.buffer().get_text(), "a\n\n\nb");
        assert_eq!(v.cursor(), Position::new(2, 0));
    }

    #[test]
    fn delete_last_line_pulls_cursor_up() {
        let mut v = Viewport::centered(TextBuffer::from_text("a\nb"), 3, 10);
        v.set_cursor(1, 0, false);
        v.delete_line_at_cursor().unwrap();
        assert_eq!(v.cursor_line(), 0);
    }

    #[test]
    fn insert_string_moves_past_inserted_text() {
        let mut v = Viewport::centered(TextBuffer::from_text("ad"), 3, 10);
        v.set_cursor(0, 1, false);
        v.insert_string_at_cursor("bc").unwrap();
        assert_eq!(v.cursor(), Position::new(0, 3));
        v.insert_string_at_cursor("x\ny").unwrap();
        assert_eq!(v.cursor(), Position::new(1, 1));
        assert_eq!(v.buffer().get_text(), "abcx\nyd");
    }

    #[test]
    fn switching_restores_last_position() {
        let mut v = Viewport::centered(named("a.txt", "a1\na2\na3"), 3, 10);
        v.set_cursor(2, 1, false);
        v.switch_buffers(named("b.txt", "b1"), true);
        assert_eq!(v.active_path(), Some(Path::new("b.txt")));
        assert_eq!(v.cursor(), Position::origin());
        v.switch_buffers(named("a.txt", "ignored"), true);
        assert_eq!(v.buffer().get_line(0), "a1", "open buffer reused");
        assert_eq!(v.cursor(), Position::new(2, 1));
        assert_eq!(v.buffer_count(), 2);
        assert_eq!(v.open_buffer_paths(), vec![Path::new("a.txt"), Path::new("b.txt")]);
    }

    #[test]
    fn bracket_motions_stay_put_on_miss() {
        let mut v = Viewport::centered(TextBuffer::from_text("f(a, b) x"), 3, 10);
        v.set_cursor(0, 3, false);
        v.move_cursor_forward_until_next_right_bracket();
        assert_eq!(v.cursor_col(), 6);
        v.move_cursor_forward_until_next_right_bracket();
        assert_eq!(v.cursor_col(), 6);
        v.move_cursor_backward_until_next_left_bracket();
        assert_eq!(v.cursor_col(), 1);
    }

    #[test]
    fn line_motions() {
        let mut v = Viewport::centered(TextBuffer::from_text("   abcdef"), 3, 10);
        v.move_cursor_to_end_of_line();
        assert_eq!(v.cursor_col(), 9);
        v.move_cursor_to_middle_of_line();
        assert_eq!(v.cursor_col(), 4);
        v.move_cursor_to_first_non_whitespace();
        assert_eq!(v.cursor_col(), 3);
        v.move_cursor_to_start_of_line();
        assert_eq!(v.cursor_col(), 0);
    }

    #[test]
    fn resize_blanks_snapshot_and_clamps_cursor_cell() {
        let mut v = Viewport::centered(TextBuffer::from_text("abc"), 10, 10);
        v.resize(2, 4);
        assert_eq!(v.cursor_offsets(), (1, 3));
        assert!(!v.get_changed_cells_since_last_tick().is_empty());
    }
}
