//! INSERT mode: glyphs go straight into the buffer, no rule matching.

use super::EditorCore;
use core_events::{KeyCode, KeyEvent};

impl EditorCore {
    pub(crate) fn handle_insert_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.insert_newline(),
            KeyCode::Backspace => {
                if let Some(m) = self.viewport.backspace_at_cursor() {
                    self.notify(&m);
                }
            }
            KeyCode::Tab => {
                if let Some(m) = self.viewport.insert_tab_at_cursor() {
                    self.notify(&m);
                }
            }
            KeyCode::BackTab => {
                if let Some(m) = self.viewport.unindent_at_cursor() {
                    self.notify(&m);
                }
            }
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right => self.arrow(key.code),
            KeyCode::Char(_) => {
                if let Some(ch) = key.glyph()
                    && let Some(m) = self.viewport.insert_character_at_cursor(ch)
                {
                    self.notify(&m);
                }
            }
            KeyCode::Esc | KeyCode::CapsLock => self.enter_move_and_edit(),
        }
    }

    /// Split the line at the cursor and indent the new line to the brace depth.
    fn insert_newline(&mut self) {
        if let Some(m) = self.viewport.split_line_at_cursor() {
            self.notify(&m);
            self.auto_indent();
        }
    }
}
