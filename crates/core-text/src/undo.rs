//! Undo / redo stacks of text modifications.
//!
//! The engine only stores modifications; applying them (and inverting on undo)
//! is the buffer's job. A fresh edit clears the redo stack. Replaying a redo
//! pushes back onto the undo stack without touching the remaining redo entries.

use crate::TextModification;
use std::collections::VecDeque;
use tracing::trace;

/// Maximum number of modifications retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 1000;

#[derive(Debug, Clone, Default)]
pub struct UndoEngine {
    undo_stack: VecDeque<TextModification>,
    redo_stack: Vec<TextModification>,
}

impl UndoEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Record a new edit.
    pub fn push_edit(&mut self, modification: TextModification) {
        self.push_undo(modification);
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    /// Re-record an edit replayed by redo.
    pub fn push_replayed(&mut self, modification: TextModification) {
        self.push_undo(modification);
    }

    pub fn pop_undo(&mut self) -> Option<TextModification> {
        let m = self.undo_stack.pop_back()?;
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), range = %m.range, "undo_pop");
        Some(m)
    }

    pub fn push_redo(&mut self, modification: TextModification) {
        self.redo_stack.push(modification);
        trace!(target: "state.undo", redo_depth = self.redo_stack.len(), "redo_push_from_undo");
    }

    pub fn pop_redo(&mut self) -> Option<TextModification> {
        let m = self.redo_stack.pop()?;
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), range = %m.range, "redo_pop");
        Some(m)
    }

    /// Newest recorded edit that removed text.
    pub fn last_deleted(&self) -> Option<&str> {
        self.undo_stack
            .iter()
            .rev()
            .map(|m| m.replaced_content.as_str())
            .find(|s| !s.is_empty())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn push_undo(&mut self, modification: TextModification) {
        self.undo_stack.push_back(modification);
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "push_modification");
        if self.undo_stack.len() > UNDO_HISTORY_MAX {
            self.undo_stack.pop_front();
            trace!(target: "state.undo", "undo_stack_trimmed");
        }
    }
}
