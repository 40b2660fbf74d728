//! Hook for collaborators that track buffer edits.

use core_text::TextModification;
use std::path::Path;

/// Receives every modification applied through the dispatcher, including
/// the inverses applied by undo and the replays applied by redo.
pub trait ChangeObserver {
    fn on_change(&mut self, path: Option<&Path>, modification: &TextModification);
}
