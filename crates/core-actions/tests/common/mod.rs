#![allow(dead_code)] // Shared across the integration test binaries; each uses a subset.

use core_actions::{ChangeObserver, DispatchResult, ModalEditor, Session};
use core_events::KeyEvent;
use core_model::Viewport;
use core_text::{TextBuffer, TextModification};
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub fn editor(text: &str) -> ModalEditor {
    editor_with(TextBuffer::from_text(text), Session::default())
}

pub fn editor_with(buffer: TextBuffer, session: Session) -> ModalEditor {
    let viewport = Viewport::centered(buffer, 10, 40);
    ModalEditor::new(viewport, session).expect("default rules compile")
}

pub fn open_editor(path: &Path) -> ModalEditor {
    editor_with(TextBuffer::open(path).expect("fixture readable"), Session::default())
}

/// Feed keys in `KeyEvent::parse_sequence` notation as a single tick.
pub fn feed(ed: &mut ModalEditor, keys: &str) -> DispatchResult {
    ed.handle_keys(&KeyEvent::parse_sequence(keys))
}

pub fn text(ed: &ModalEditor) -> String {
    ed.viewport().buffer().get_text()
}

pub fn cursor(ed: &ModalEditor) -> (usize, usize) {
    let c = ed.viewport().cursor();
    (c.line, c.col)
}

pub fn active_path(ed: &ModalEditor) -> Option<PathBuf> {
    ed.viewport().active_path().map(Path::to_path_buf)
}

pub type ChangeLog = Rc<RefCell<Vec<(Option<PathBuf>, TextModification)>>>;

/// Observer that records every forwarded change.
pub struct Recorder(pub ChangeLog);

impl ChangeObserver for Recorder {
    fn on_change(&mut self, path: Option<&Path>, modification: &TextModification) {
        self.0
            .borrow_mut()
            .push((path.map(Path::to_path_buf), modification.clone()));
    }
}

pub fn record_changes(ed: &mut ModalEditor) -> ChangeLog {
    let log = ChangeLog::default();
    ed.add_observer(Box::new(Recorder(log.clone())));
    log
}
