//! Undo / redo dispatch.
//!
//! The buffer owns both stacks; this layer forwards the applied
//! modification to observers and parks the cursor at its start.

use super::EditorCore;
use tracing::trace;

impl EditorCore {
    pub(crate) fn undo(&mut self) {
        let Some(inverse) = self.viewport.buffer_mut().undo() else {
            trace!(target: "actions.dispatch", op = "undo", "nothing_to_undo");
            return;
        };
        trace!(target: "actions.dispatch", op = "undo", range = %inverse.range, "undo");
        self.viewport
            .set_cursor(inverse.range.start.line, inverse.range.start.col, false);
        self.notify(&inverse);
    }

    pub(crate) fn redo(&mut self) {
        let Some(replayed) = self.viewport.buffer_mut().redo() else {
            trace!(target: "actions.dispatch", op = "redo", "nothing_to_redo");
            return;
        };
        trace!(target: "actions.dispatch", op = "redo", range = %replayed.range, "redo");
        self.viewport
            .set_cursor(replayed.range.start.line, replayed.range.start.col, false);
        self.notify(&replayed);
    }
}
