//! Buffer edits issued from MOVE_AND_EDIT and VISUAL_SELECT.

use super::EditorCore;
use core_text::Position;
use tracing::trace;

impl EditorCore {
    /// `x`
    pub(crate) fn delete_character_under_cursor(&mut self) {
        if let Some(m) = self.viewport.delete_character_at_cursor() {
            self.notify(&m);
        }
    }

    /// Remove columns `[from, to]` of `line` as one edit.
    pub(crate) fn delete_columns(&mut self, line: usize, from: usize, to: usize) {
        let mods = self
            .viewport
            .buffer_mut()
            .delete_bounding_box(line, from, line, to);
        self.notify_all(&mods);
    }

    /// `dd`
    pub(crate) fn delete_current_line(&mut self) {
        if let Some(m) = self.viewport.delete_line_at_cursor() {
            self.notify(&m);
        }
    }

    /// `yy`: the cursor line plus its separator, so pasting it is linewise.
    pub(crate) fn yank_current_line(&mut self) {
        let line = self.viewport.cursor_line();
        self.register = format!("{}\n", self.viewport.buffer().get_line(line));
        trace!(target: "actions.dispatch", op = "yank", line, "yank_line");
    }

    /// `p`
    pub(crate) fn paste_last_deleted(&mut self) {
        let Some(text) = self.viewport.buffer().last_deleted_content() else {
            return;
        };
        let text = text.to_owned();
        self.paste(&text);
    }

    /// `P`
    pub(crate) fn paste_register(&mut self) {
        let text = self.register.clone();
        self.paste(&text);
    }

    /// Text carrying a leading or trailing separator is a whole line and is
    /// pasted below the cursor line. Anything else goes in at the cursor.
    fn paste(&mut self, text: &str) {
        let linewise = text
            .strip_suffix('\n')
            .or_else(|| text.strip_prefix('\n'));
        match linewise {
            Some(body) => {
                let line = self.viewport.cursor_line();
                let end = self.viewport.buffer().line_len(line);
                let inserted = self
                    .viewport
                    .buffer_mut()
                    .insert_string(line, end, &format!("\n{body}"));
                if let Some(m) = inserted {
                    self.viewport.set_cursor(line + 1, 0, true);
                    self.notify(&m);
                }
            }
            None => {
                if let Some(m) = self.viewport.insert_string_at_cursor(text) {
                    self.notify(&m);
                }
            }
        }
    }

    /// `o` / `O`: open a line, indent it to the brace depth and start inserting.
    pub(crate) fn open_line(&mut self, below: bool) {
        let opened = if below {
            self.viewport.create_new_line_below_cursor()
        } else {
            self.viewport.create_new_line_above_cursor()
        };
        if let Some(m) = opened {
            self.notify(&m);
            self.auto_indent();
        }
        self.enter_insert();
    }

    /// Insert one tab unit per open `{` before the cursor.
    pub(crate) fn auto_indent(&mut self) {
        let Position { line, col } = self.viewport.cursor();
        let level = self.viewport.buffer().get_indentation_level(line, col);
        for _ in 0..level {
            let Some(m) = self.viewport.insert_tab_at_cursor() else {
                break;
            };
            self.notify(&m);
        }
    }

    fn selection_corners(&self) -> (Position, Position) {
        let cursor = self.viewport.cursor();
        let anchor = self.visual_anchor.unwrap_or(cursor);
        let top_left = Position::new(anchor.line.min(cursor.line), anchor.col.min(cursor.col));
        (anchor, top_left)
    }

    /// Visual `x`/`d`/`c`: delete the anchor-to-cursor block. The cursor lands
    /// on the block's top-left corner.
    pub(crate) fn delete_selection(&mut self, then_insert: bool) {
        let cursor = self.viewport.cursor();
        let (anchor, top_left) = self.selection_corners();
        let mods = self.viewport.buffer_mut().delete_bounding_box(
            anchor.line,
            anchor.col,
            cursor.line,
            cursor.col,
        );
        self.notify_all(&mods);
        self.viewport.set_cursor(top_left.line, top_left.col, false);
        if then_insert {
            self.enter_insert();
        } else {
            self.enter_move_and_edit();
        }
    }

    /// Visual `y`: copy the block into the register.
    pub(crate) fn yank_selection(&mut self) {
        let cursor = self.viewport.cursor();
        let (anchor, top_left) = self.selection_corners();
        self.register = self.viewport.buffer().get_bounding_box_text(
            anchor.line,
            anchor.col,
            cursor.line,
            cursor.col,
        );
        self.viewport.set_cursor(top_left.line, top_left.col, false);
        self.enter_move_and_edit();
    }
}
