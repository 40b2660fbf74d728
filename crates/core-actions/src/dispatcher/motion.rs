//! Cursor motions for the navigation modes.
//!
//! Character and word targets can run under a `c`/`d` operator. Forward
//! targets delete from the cursor up to the target, backward targets from
//! the target up to (not including) the cursor.

use super::EditorCore;
use core_events::KeyCode;
use core_text::{Bracket, Position};
use tracing::trace;

/// Operator prefix captured in front of a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Move,
    Delete,
    Change,
}

impl Operator {
    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "d" => Operator::Delete,
            "c" => Operator::Change,
            _ => Operator::Move,
        }
    }
}

impl EditorCore {
    fn last_line(&self) -> usize {
        self.viewport.buffer().line_count().saturating_sub(1)
    }

    fn rightmost_col(&self, line: usize) -> usize {
        self.viewport.buffer().line_len(line) + self.viewport.num_cols()
    }

    /// `hjkl` with a repeat count. Vertical moves clamp to the buffer, left
    /// moves clamp at column 0. Right moves may leave the line end by at most
    /// one screen width.
    pub(crate) fn counted_motion(&mut self, count: usize, direction: &str) {
        let Position { line, col } = self.viewport.cursor();
        let (to_line, to_col) = match direction {
            "j" => (line.saturating_add(count).min(self.last_line()), col),
            "k" => (line.saturating_sub(count), col),
            "h" => (line, col.saturating_sub(count)),
            "l" => (line, col.saturating_add(count).min(self.rightmost_col(line).max(col))),
            _ => return,
        };
        trace!(target: "actions.dispatch", op = "motion", direction, count, to_line, to_col, "motion");
        if (to_line, to_col) != (line, col) {
            self.viewport.set_cursor(to_line, to_col, true);
        }
    }

    /// `G` / `gg`: one-based line number, `None` for the last line.
    pub(crate) fn go_to_line(&mut self, number: Option<usize>) {
        let last = self.last_line();
        let target = number.map_or(last, |n| n.saturating_sub(1).min(last));
        let col = self.viewport.cursor_col();
        self.viewport.set_cursor(target, col, true);
    }

    pub(crate) fn scroll_page(&mut self, down: bool) {
        let step = self.session.scroll_step;
        self.counted_motion(step, if down { "j" } else { "k" });
        self.result.dirty = true;
    }

    pub(crate) fn arrow(&mut self, code: KeyCode) {
        let direction = match code {
            KeyCode::Up => "k",
            KeyCode::Down => "j",
            KeyCode::Left => "h",
            KeyCode::Right => "l",
            _ => return,
        };
        self.counted_motion(1, direction);
        self.result.dirty = true;
    }

    /// `f`, `F`, `t`, `T` with an optional operator.
    pub(crate) fn find_character(&mut self, prefix: &str, kind: &str, target: char) {
        let Position { line, col } = self.viewport.cursor();
        let buffer = self.viewport.buffer();
        let to = match kind {
            "f" => buffer.find_rightward_index(line, col, target),
            "t" => buffer.find_rightward_index_before(line, col, target),
            "F" => buffer.find_leftward_index(line, col, target),
            "T" => buffer.find_leftward_index_before(line, col, target),
            _ => return,
        };
        // inclusive of the target for forward finds
        self.apply_motion(Operator::from_prefix(prefix), to, to.saturating_add(1));
    }

    /// `w`, `e`, `b`, `B` with an optional operator.
    pub(crate) fn word_motion(&mut self, prefix: &str, kind: &str) {
        let Position { line, col } = self.viewport.cursor();
        let buffer = self.viewport.buffer();
        let (to, forward_end) = match kind {
            "w" => {
                let to = buffer.find_forward_by_word_index(line, col);
                (to, to)
            }
            "e" => {
                let to = buffer.find_forward_to_end_of_word(line, col);
                (to, to.saturating_add(1))
            }
            "b" => (buffer.find_backward_to_start_of_word(line, col), col),
            "B" => (buffer.find_backward_by_word_index(line, col), col),
            _ => return,
        };
        self.apply_motion(Operator::from_prefix(prefix), to, forward_end);
    }

    /// Move the cursor to column `to` on the cursor line, or delete the span
    /// the move covers. `forward_end` is the exclusive end of a forward span.
    fn apply_motion(&mut self, op: Operator, to: usize, forward_end: usize) {
        let Position { line, col } = self.viewport.cursor();
        if to == col {
            return;
        }
        if op == Operator::Move {
            self.viewport.set_cursor(line, to, false);
            return;
        }
        let (from, end) = if to > col { (col, forward_end) } else { (to, col) };
        if end <= from {
            return;
        }
        self.delete_columns(line, from, end - 1);
        self.viewport.set_cursor(line, from, false);
        if op == Operator::Change {
            self.enter_insert();
        }
    }

    /// `ab`, `ib`, `aB`, `iB` under `c` or `d`: the bracket pair around the
    /// cursor on the current line, with or without the brackets themselves.
    pub(crate) fn bracket_object(&mut self, prefix: &str, inside: bool, bracket: Bracket) {
        let Position { line, col } = self.viewport.cursor();
        let buffer = self.viewport.buffer();
        let (Some(open), Some(close)) = (
            buffer.find_column_index_of_previous_left_bracket(line, col, bracket),
            buffer.find_column_index_of_next_right_bracket(line, col, bracket),
        ) else {
            trace!(target: "actions.dispatch", ?bracket, "bracket_pair_missing");
            return;
        };
        let (from, end) = if inside { (open + 1, close) } else { (open, close + 1) };
        if end > from {
            self.delete_columns(line, from, end - 1);
        }
        self.viewport.set_cursor(line, from, false);
        if Operator::from_prefix(prefix) == Operator::Change {
            self.enter_insert();
        }
    }
}
