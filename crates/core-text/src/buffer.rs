//! `TextBuffer`: lines plus undo/redo of reversible modifications.
//!
//! Every edit primitive funnels through [`TextBuffer::splice`], which replaces
//! a clamped range of the buffer-as-one-string with new content and reports
//! what it displaced. The recorded [`TextModification`] therefore always
//! describes exactly what happened, including padding, so undo is a plain
//! splice of the inverse.
//!
//! Bounds violations never panic: primitives return `None` (nothing changed)
//! and queries return empty strings. A buffer always holds at least one line.

use crate::{Position, TextModification, TextRange, undo::UndoEngine};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, trace};

/// One indentation unit.
pub const TAB: &str = "    ";

/// Most padding (spaces plus new lines) a single insert may add.
pub const MAX_PADDING: usize = 1 << 16;

#[derive(Debug, Error)]
pub enum BufferError {
    #[error("buffer has no file path")]
    NoPath,
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct TextBuffer {
    lines: Vec<String>,
    undo: UndoEngine,
    path: Option<PathBuf>,
    modified: bool,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl TextBuffer {
    /// Empty scratch buffer (one empty line, no path).
    pub fn new() -> Self {
        Self {
            lines: vec![String::new()],
            undo: UndoEngine::new(),
            path: None,
            modified: false,
        }
    }

    /// Construct a buffer from in-memory content.
    pub fn from_text(content: &str) -> Self {
        Self {
            lines: split_lines(content),
            ..Self::new()
        }
    }

    /// Load `path` into a new buffer.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, BufferError> {
        let mut buffer = Self::new();
        buffer.load(path)?;
        Ok(buffer)
    }

    /// Replace all content with the file at `path`. On failure the buffer is untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), BufferError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| {
            error!(target: "io", file = %path.display(), ?source, "file_open_error");
            BufferError::Read {
                path: path.to_path_buf(),
                source,
            }
        })?;
        self.lines = split_lines(&content);
        self.path = Some(path.to_path_buf());
        self.modified = false;
        self.undo.clear();
        debug!(target: "io", file = %path.display(), size_bytes = content.len(), line_count = self.lines.len(), "file_read_ok");
        Ok(())
    }

    /// Write every line followed by `\n` to the buffer's path.
    pub fn save(&mut self) -> Result<(), BufferError> {
        let Some(path) = self.path.clone() else {
            error!(target: "io", "file_write_no_path");
            return Err(BufferError::NoPath);
        };
        let mut content = String::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            content.push_str(line);
            content.push('\n');
        }
        fs::write(&path, content.as_bytes()).map_err(|source| {
            error!(target: "io", file = %path.display(), ?source, "file_write_error");
            BufferError::Write {
                path: path.clone(),
                source,
            }
        })?;
        self.modified = false;
        debug!(target: "io", file = %path.display(), line_count = self.lines.len(), "file_write_ok");
        Ok(())
    }

    pub fn current_file_path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_file_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// True when edits happened since the last load or save.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Line `i`, or `""` when out of range.
    pub fn get_line(&self, i: usize) -> &str {
        self.lines.get(i).map(String::as_str).unwrap_or("")
    }

    pub fn line_len(&self, i: usize) -> usize {
        self.get_line(i).len()
    }

    /// Whole document, lines joined by `\n`.
    pub fn get_text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn get_text_in_range(&self, range: TextRange) -> String {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end).max(start);
        self.text_between(start, end)
    }

    /// The column block `[min_col, max_col]` of every line in the line range, joined by `\n`.
    pub fn get_bounding_box_text(
        &self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> String {
        let (top, bottom) = (start_line.min(end_line), start_line.max(end_line));
        let (left, right) = (start_col.min(end_col), start_col.max(end_col));
        (top..=bottom.min(self.lines.len() - 1))
            .map(|l| {
                let line = self.get_line(l);
                let from = floor_boundary(line, left);
                let to = floor_boundary(line, right.saturating_add(1));
                line[from..to.max(from)].to_owned()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.undo_depth()
    }
    pub fn redo_depth(&self) -> usize {
        self.undo.redo_depth()
    }

    /// Content removed by the newest edit still on the undo stack that removed anything.
    pub fn last_deleted_content(&self) -> Option<&str> {
        self.undo.last_deleted()
    }

    // ---------------------------------------------------------------------
    // Edit primitives
    // ---------------------------------------------------------------------

    /// Apply an arbitrary modification as a recorded edit. The returned value
    /// carries the clamped range and the content that was actually replaced.
    pub fn apply(&mut self, modification: TextModification) -> TextModification {
        self.record(modification.range, &modification.new_content)
    }

    /// Insert `ch` at `(line, col)`, padding with empty lines and spaces as needed.
    /// Returns `None` when the padding would exceed [`MAX_PADDING`].
    pub fn insert_character(
        &mut self,
        line: usize,
        col: usize,
        ch: char,
    ) -> Option<TextModification> {
        trace!(target: "text.edit", op = "insert_char", line, col, "edit");
        let mut buf = [0u8; 4];
        self.insert_padded(line, col, ch.encode_utf8(&mut buf))
    }

    /// Insert `text` at `(line, col)` with the same padding as [`Self::insert_character`].
    pub fn insert_string(
        &mut self,
        line: usize,
        col: usize,
        text: &str,
    ) -> Option<TextModification> {
        if text.is_empty() {
            return None;
        }
        trace!(target: "text.edit", op = "insert_string", line, col, len = text.len(), "edit");
        self.insert_padded(line, col, text)
    }

    pub fn insert_tab(&mut self, line: usize, col: usize) -> Option<TextModification> {
        trace!(target: "text.edit", op = "insert_tab", line, col, "edit");
        self.insert_padded(line, col, TAB)
    }

    /// Remove one leading tab unit from `line`.
    pub fn remove_tab(&mut self, line: usize) -> Option<TextModification> {
        if !self.lines.get(line)?.starts_with(TAB) {
            return None;
        }
        trace!(target: "text.edit", op = "remove_tab", line, "edit");
        Some(self.record(TextRange::new(line, 0, line, TAB.len()), ""))
    }

    /// Remove the character at `(line, col)`.
    pub fn delete_character(&mut self, line: usize, col: usize) -> Option<TextModification> {
        let (from, to) = char_span(self.lines.get(line)?, col)?;
        trace!(target: "text.edit", op = "delete_char", line, col, "edit");
        Some(self.record(TextRange::new(line, from, line, to), ""))
    }

    /// Remove `line` together with one line separator.
    ///
    /// Normally the span `(line,0)..(line+1,0)`. The last line has no
    /// successor, so it takes the separator before it instead. Deleting the
    /// only line clears it.
    pub fn delete_line(&mut self, line: usize) -> Option<TextModification> {
        let count = self.lines.len();
        if line >= count {
            return None;
        }
        let range = if line + 1 < count {
            TextRange::new(line, 0, line + 1, 0)
        } else if line > 0 {
            TextRange::new(line - 1, self.lines[line - 1].len(), line, self.lines[line].len())
        } else if self.lines[0].is_empty() {
            return None;
        } else {
            TextRange::new(0, 0, 0, self.lines[0].len())
        };
        trace!(target: "text.edit", op = "delete_line", line, "edit");
        Some(self.record(range, ""))
    }

    /// Insert an empty line right after `line`.
    pub fn insert_newline_after(&mut self, line: usize) -> Option<TextModification> {
        if line >= self.lines.len() {
            return None;
        }
        let at = if line + 1 < self.lines.len() {
            TextRange::point(line + 1, 0)
        } else {
            TextRange::point(line, self.lines[line].len())
        };
        trace!(target: "text.edit", op = "newline_after", line, "edit");
        Some(self.record(at, "\n"))
    }

    /// Insert an empty line right before `line`.
    pub fn insert_newline_before(&mut self, line: usize) -> Option<TextModification> {
        if line >= self.lines.len() {
            return None;
        }
        trace!(target: "text.edit", op = "newline_before", line, "edit");
        Some(self.record(TextRange::point(line, 0), "\n"))
    }

    /// Break `line` in two at `col` (clamped to the line length).
    pub fn split_line(&mut self, line: usize, col: usize) -> Option<TextModification> {
        let len = self.lines.get(line)?.len();
        trace!(target: "text.edit", op = "split_line", line, col, "edit");
        Some(self.record(TextRange::point(line, col.min(len)), "\n"))
    }

    /// Delete the column block `[min_col, max_col]` from every line in
    /// `[min_line, max_line]`.
    ///
    /// This is a rectangular delete, not a linear span: each line loses the
    /// same columns regardless of where the corners fall. Lines too short to
    /// reach `min_col` are left alone. One modification per changed line.
    pub fn delete_bounding_box(
        &mut self,
        start_line: usize,
        start_col: usize,
        end_line: usize,
        end_col: usize,
    ) -> Vec<TextModification> {
        let (top, bottom) = (start_line.min(end_line), start_line.max(end_line));
        let (left, right) = (start_col.min(end_col), start_col.max(end_col));
        let mut out = Vec::new();
        if top >= self.lines.len() {
            return out;
        }
        for line in top..=bottom.min(self.lines.len() - 1) {
            let len = self.lines[line].len();
            if left >= len {
                continue;
            }
            let end = right.saturating_add(1).min(len);
            out.push(self.record(TextRange::new(line, left, line, end), ""));
        }
        trace!(target: "text.edit", op = "delete_box", top, bottom, left, right, changed = out.len(), "edit");
        out
    }

    // ---------------------------------------------------------------------
    // Undo / redo
    // ---------------------------------------------------------------------

    /// Revert the newest edit. Returns the inverse that was applied.
    pub fn undo(&mut self) -> Option<TextModification> {
        let original = self.undo.pop_undo()?;
        let inverse = original.inverse();
        self.splice(inverse.range, &inverse.new_content);
        self.undo.push_redo(original);
        self.modified = true;
        Some(inverse)
    }

    /// Re-apply the newest undone edit.
    pub fn redo(&mut self) -> Option<TextModification> {
        let original = self.undo.pop_redo()?;
        self.splice(original.range, &original.new_content);
        self.undo.push_replayed(original.clone());
        self.modified = true;
        Some(original)
    }

    // ---------------------------------------------------------------------
    // Internals
    // ---------------------------------------------------------------------

    fn insert_padded(&mut self, line: usize, col: usize, text: &str) -> Option<TextModification> {
        let last = self.lines.len() - 1;
        let (at, padding) = if line > last {
            (Position::new(last, self.lines[last].len()), (line - last).saturating_add(col))
        } else {
            let len = self.lines[line].len();
            (Position::new(line, col.min(len)), col.saturating_sub(len))
        };
        if padding > MAX_PADDING {
            debug!(target: "text.edit", line, col, padding, "padding_refused");
            return None;
        }
        let mut content = String::with_capacity(padding + text.len());
        if line > last {
            content.push_str(&"\n".repeat(line - last));
            content.push_str(&" ".repeat(col));
        } else {
            content.push_str(&" ".repeat(padding));
        }
        content.push_str(text);
        Some(self.record(TextRange::from_positions(at, at), &content))
    }

    fn record(&mut self, range: TextRange, text: &str) -> TextModification {
        let (range, replaced) = self.splice(range, text);
        let modification = TextModification::new(range, text, replaced);
        self.undo.push_edit(modification.clone());
        self.modified = true;
        modification
    }

    /// Replace `range` (clamped into the document) with `text`.
    /// Returns the clamped range and the displaced content.
    fn splice(&mut self, range: TextRange, text: &str) -> (TextRange, String) {
        let start = self.clamp(range.start);
        let end = self.clamp(range.end).max(start);
        let replaced = self.text_between(start, end);
        let joined = {
            let prefix = &self.lines[start.line][..start.col];
            let suffix = &self.lines[end.line][end.col..];
            let mut s = String::with_capacity(prefix.len() + text.len() + suffix.len());
            s.push_str(prefix);
            s.push_str(text);
            s.push_str(suffix);
            s
        };
        let replacement = joined.split('\n').map(str::to_owned);
        self.lines.splice(start.line..=end.line, replacement);
        (TextRange::from_positions(start, end), replaced)
    }

    fn clamp(&self, p: Position) -> Position {
        let last = self.lines.len() - 1;
        if p.line > last {
            return Position::new(last, self.lines[last].len());
        }
        Position::new(p.line, floor_boundary(&self.lines[p.line], p.col))
    }

    fn text_between(&self, start: Position, end: Position) -> String {
        if start.line == end.line {
            return self.lines[start.line][start.col..end.col].to_owned();
        }
        let mut s = String::from(&self.lines[start.line][start.col..]);
        for line in &self.lines[start.line + 1..end.line] {
            s.push('\n');
            s.push_str(line);
        }
        s.push('\n');
        s.push_str(&self.lines[end.line][..end.col]);
        s
    }
}

fn split_lines(content: &str) -> Vec<String> {
    let body = content.strip_suffix('\n').unwrap_or(content);
    body.split('\n').map(str::to_owned).collect()
}

/// Largest char boundary of `s` not above `idx`.
pub(crate) fn floor_boundary(s: &str, idx: usize) -> usize {
    let mut i = idx.min(s.len());
    while !s.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Byte span of the character covering `col`.
fn char_span(s: &str, col: usize) -> Option<(usize, usize)> {
    if col >= s.len() {
        return None;
    }
    let from = floor_boundary(s, col);
    let ch = s[from..].chars().next()?;
    Some((from, from + ch.len_utf8()))
}
