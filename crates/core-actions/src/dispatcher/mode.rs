//! Mode transitions.
//!
//! Leaving any mode for MOVE_AND_EDIT drops the pending command, the
//! command bar and the visual anchor.

use super::{EditorCore, PanelRequest};
use core_state::Mode;
use tracing::debug;

impl EditorCore {
    fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(target: "actions.dispatch", from = self.mode.label(), to = mode.label(), "mode_change");
        }
        self.mode = mode;
        self.result.dirty = true;
    }

    pub(crate) fn enter_move_and_edit(&mut self) {
        self.pending.clear();
        self.command_line.clear();
        self.visual_anchor = None;
        self.set_mode(Mode::MoveAndEdit);
    }

    pub(crate) fn enter_insert(&mut self) {
        self.visual_anchor = None;
        self.set_mode(Mode::Insert);
    }

    pub(crate) fn enter_visual(&mut self) {
        self.visual_anchor = Some(self.viewport.cursor());
        self.set_mode(Mode::VisualSelect);
    }

    /// Open the command bar pre-filled with `prefix` (`:` or `/`).
    pub(crate) fn enter_command(&mut self, prefix: char) {
        self.command_line.begin(prefix);
        self.set_mode(Mode::Command);
    }

    pub(crate) fn request_panel(&mut self, panel: PanelRequest) {
        debug!(target: "actions.dispatch", ?panel, "panel_request");
        self.panel_request = Some(panel);
    }
}
