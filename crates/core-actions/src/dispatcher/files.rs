//! Buffer switching: explicit file switches, `Ctrl+o` / `Ctrl+i` history
//! jumps and the source/header companion toggle.

use super::EditorCore;
use crate::io_ops::companion_path;
use core_text::{BufferError, TextBuffer};
use std::path::Path;
use tracing::{debug, warn};

impl EditorCore {
    /// Activate the buffer for `path` (resolved against the project root),
    /// reusing an open buffer before loading from disk. On a load failure the
    /// active buffer is kept.
    pub(crate) fn switch_files(
        &mut self,
        path: &Path,
        store_to_history: bool,
    ) -> Result<(), BufferError> {
        let resolved = self.session.resolve(path);
        self.activate_path(&resolved, store_to_history)
    }

    /// Same as [`Self::switch_files`] for a path that is already resolved,
    /// such as one taken from history or derived from the active buffer.
    fn activate_path(
        &mut self,
        resolved: &Path,
        store_to_history: bool,
    ) -> Result<(), BufferError> {
        match self.viewport.find_buffer(resolved) {
            Some(idx) => {
                self.viewport.switch_to_index(idx, store_to_history);
            }
            None => {
                let buffer = TextBuffer::open(resolved).inspect_err(|e| {
                    warn!(target: "actions.dispatch", path = %resolved.display(), error = %e, "switch_files_failed");
                    self.set_status(e.to_string());
                })?;
                self.viewport.switch_buffers(buffer, store_to_history);
            }
        }
        debug!(target: "actions.dispatch", path = %resolved.display(), "switch_files");
        self.search.set_results(Vec::new());
        self.result.dirty = true;
        self.result.buffer_switched = true;
        Ok(())
    }

    pub(crate) fn history_back(&mut self) {
        self.viewport.history_mut().go_back();
        self.jump_to_history_entry();
    }

    pub(crate) fn history_forward(&mut self) {
        self.viewport.history_mut().go_forward();
        self.jump_to_history_entry();
    }

    /// Move to the current history entry, switching files first when it
    /// belongs to another buffer. Jumps are not recorded again.
    fn jump_to_history_entry(&mut self) {
        let Some(entry) = self.viewport.history().current().cloned() else {
            return;
        };
        if entry.path.as_deref() != self.viewport.active_path() {
            let Some(path) = entry.path.as_deref() else {
                return;
            };
            if self.activate_path(path, false).is_err() {
                return;
            }
        }
        self.viewport.set_cursor(entry.line, entry.col, false);
        self.result.dirty = true;
    }

    /// ` cc`: header to source.
    pub(crate) fn switch_to_source_file(&mut self) {
        let (from, to) = (
            self.session.header_extension.clone(),
            self.session.source_extension.clone(),
        );
        self.switch_to_companion(&from, &to);
    }

    /// ` hh`: source to header.
    pub(crate) fn switch_to_header_file(&mut self) {
        let (from, to) = (
            self.session.source_extension.clone(),
            self.session.header_extension.clone(),
        );
        self.switch_to_companion(&from, &to);
    }

    fn switch_to_companion(&mut self, from: &str, to: &str) {
        let Some(target) = self
            .viewport
            .active_path()
            .and_then(|p| companion_path(p, from, to))
        else {
            return;
        };
        // failure already reported through the status line
        let _ = self.activate_path(&target, true);
    }
}
