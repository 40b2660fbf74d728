//! Command bar: editing, `:w` / `:q` / `:wq`, and `/` literal search.
//!
//! Unrecognised commands are dropped without feedback beyond a debug event.

use super::EditorCore;
use super::command_parser::{CommandParser, ParsedCommand};
use crate::io_ops::{WriteFileResult, write_buffer};
use core_events::{KeyCode, KeyEvent};
use core_text::Position;
use tracing::debug;

impl EditorCore {
    pub(crate) fn handle_command_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.execute_command_line(),
            KeyCode::Backspace => {
                if !self.command_line.backspace() {
                    self.enter_move_and_edit();
                }
            }
            _ => {
                let Some(ch) = key.glyph() else {
                    return;
                };
                self.command_line.push_char(ch);
            }
        }
        self.result.dirty = true;
    }

    fn execute_command_line(&mut self) {
        let raw = self.command_line.buffer().to_string();
        self.enter_move_and_edit();
        let parsed = CommandParser::parse(&raw);
        debug!(target: "actions.dispatch", cmd = %raw, ?parsed, "command_execute");
        match parsed {
            ParsedCommand::Write => {
                self.write_active_buffer();
            }
            ParsedCommand::Quit => self.result.quit = true,
            ParsedCommand::WriteQuit => {
                if self.write_active_buffer() {
                    self.result.quit = true;
                }
            }
            ParsedCommand::Search(pattern) => self.search_forward(&pattern),
            ParsedCommand::Unknown(_) => {}
        }
    }

    /// Returns whether the buffer reached disk.
    fn write_active_buffer(&mut self) -> bool {
        match write_buffer(self.viewport.buffer_mut()) {
            WriteFileResult::Success(path) => {
                self.set_status(format!("written {}", path.display()));
                true
            }
            WriteFileResult::NoFilename => {
                self.set_status("no file name");
                false
            }
            WriteFileResult::Error(e) => {
                self.set_status(e.to_string());
                false
            }
        }
    }

    /// Collect literal matches after the cursor and jump to the first.
    pub(crate) fn search_forward(&mut self, pattern: &str) {
        let Position { line, col } = self.viewport.cursor();
        let results = self
            .viewport
            .buffer()
            .find_forward_matches(line, col + 1, pattern);
        let first = results.first().copied();
        self.search.set_results(results);
        match first {
            Some(hit) => self.viewport.set_cursor(hit.start.line, hit.start.col, true),
            None => self.set_status(format!("pattern not found: {pattern}")),
        }
    }

    /// `n` / `N`
    pub(crate) fn step_search(&mut self, forward: bool) {
        let hit = if forward {
            self.search.next()
        } else {
            self.search.previous()
        };
        if let Some(hit) = hit {
            self.viewport.set_cursor(hit.start.line, hit.start.col, true);
        }
    }
}
