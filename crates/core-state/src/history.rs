//! Back/forward navigation history of cursor positions across files.
//!
//! Walking the history never mutates it. Adding while positioned mid-history
//! does not truncate: the entry under the cursor is relocated to the tail and
//! the new entry appended after it, so nothing visited is ever lost.

use std::path::{Path, PathBuf};
use tracing::trace;

/// A remembered cursor position. `path` is `None` for unnamed buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub path: Option<PathBuf>,
    pub line: usize,
    pub col: usize,
}

impl HistoryEntry {
    pub fn new(path: Option<&Path>, line: usize, col: usize) -> Self {
        Self {
            path: path.map(Path::to_path_buf),
            line,
            col,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct HierarchicalHistory {
    entries: Vec<HistoryEntry>,
    current: Option<usize>,
}

impl HierarchicalHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: Option<&Path>, line: usize, col: usize) {
        if let Some(idx) = self.current
            && idx + 1 < self.entries.len()
        {
            let entry = self.entries.remove(idx);
            self.entries.push(entry);
            trace!(target: "state.history", from = idx, "relocate_to_tail");
        }
        self.entries.push(HistoryEntry::new(path, line, col));
        self.current = Some(self.entries.len() - 1);
    }

    /// Step toward older entries. No-op at the first entry.
    pub fn go_back(&mut self) {
        if let Some(idx) = self.current
            && idx > 0
        {
            self.current = Some(idx - 1);
        }
    }

    /// Step toward newer entries. No-op at the tail.
    pub fn go_forward(&mut self) {
        if let Some(idx) = self.current
            && idx + 1 < self.entries.len()
        {
            self.current = Some(idx + 1);
        }
    }

    /// Entry under the cursor; `None` when the history is empty.
    pub fn current(&self) -> Option<&HistoryEntry> {
        self.entries.get(self.current?)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.current
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
