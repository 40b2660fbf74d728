//! Modal key dispatch.
//!
//! Sub-modules:
//! * `bindings` - the default rule table for the navigation modes
//! * `motion`   - cursor movement, counts and word/character targets
//! * `edit`     - buffer edits issued from the navigation modes
//! * `insert`   - INSERT mode keys
//! * `mode`     - mode transitions
//! * `command`  - command-bar entry, `:` commands and `/` search
//! * `undo`     - undo / redo
//! * `files`    - buffer switching, history jumps and companion files
//!
//! Every key returns through [`ModalEditor::handle_key`], which resets the
//! per-key [`DispatchResult`] and hands back whatever the handlers recorded.

use crate::observer::ChangeObserver;
use crate::rules::{CommandRules, RuleError};
use crate::session::Session;
use core_events::{KeyCode, KeyEvent};
use core_model::Viewport;
use core_state::{CommandLine, Mode, SearchState};
use core_text::{BufferError, Position, TextModification, TextRange};
use std::path::Path;
use tracing::{debug, trace};

mod bindings;
mod command;
mod command_parser;
mod edit;
mod files;
mod insert;
mod mode;
mod motion;
mod undo;

pub use command_parser::{CommandParser, ParsedCommand};

/// Outcome of one key or one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchResult {
    /// Editor state changed and the screen should be repainted.
    pub dirty: bool,
    pub quit: bool,
    /// The active buffer changed; cached per-buffer render state is stale.
    pub buffer_switched: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            ..Self::default()
        }
    }
    pub fn merge(self, other: Self) -> Self {
        Self {
            dirty: self.dirty || other.dirty,
            quit: self.quit || other.quit,
            buffer_switched: self.buffer_switched || other.buffer_switched,
        }
    }
}

/// Pickers the host is asked to show. The core only records the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelRequest {
    SearchFiles,
    OpenBuffers,
}

/// Everything the rule actions operate on.
pub(crate) struct EditorCore {
    pub(crate) viewport: Viewport,
    pub(crate) session: Session,
    pub(crate) mode: Mode,
    pub(crate) pending: String,
    pub(crate) visual_anchor: Option<Position>,
    pub(crate) command_line: CommandLine,
    pub(crate) search: SearchState,
    pub(crate) register: String,
    pub(crate) panel_request: Option<PanelRequest>,
    pub(crate) status: Option<String>,
    pub(crate) observers: Vec<Box<dyn ChangeObserver>>,
    pub(crate) result: DispatchResult,
}

impl EditorCore {
    /// Forward an applied modification to every observer.
    pub(crate) fn notify(&mut self, modification: &TextModification) {
        self.result.dirty = true;
        let path = self.viewport.active_path().map(Path::to_path_buf);
        for observer in &mut self.observers {
            observer.on_change(path.as_deref(), modification);
        }
    }

    pub(crate) fn notify_all(&mut self, modifications: &[TextModification]) {
        for m in modifications {
            self.notify(m);
        }
    }

    pub(crate) fn set_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        debug!(target: "actions.dispatch", status = %message, "status");
        self.status = Some(message);
        self.result.dirty = true;
    }

    fn enforce_pending_cap(&mut self) {
        if self.pending.len() > self.session.max_pending_keys {
            debug!(target: "actions.dispatch", pending = %self.pending, cap = self.session.max_pending_keys, "pending_command_discarded");
            self.pending.clear();
            self.result.dirty = true;
        }
    }
}

/// Modal editor: a viewport plus the mode machine driving it.
pub struct ModalEditor {
    rules: CommandRules<EditorCore>,
    core: EditorCore,
}

impl ModalEditor {
    pub fn new(viewport: Viewport, session: Session) -> Result<Self, RuleError> {
        Ok(Self {
            rules: bindings::default_rules()?,
            core: EditorCore {
                viewport,
                session,
                mode: Mode::default(),
                pending: String::new(),
                visual_anchor: None,
                command_line: CommandLine::default(),
                search: SearchState::default(),
                register: String::new(),
                panel_request: None,
                status: None,
                observers: Vec::new(),
                result: DispatchResult::clean(),
            },
        })
    }

    pub fn mode(&self) -> Mode {
        self.core.mode
    }
    pub fn viewport(&self) -> &Viewport {
        &self.core.viewport
    }
    pub fn viewport_mut(&mut self) -> &mut Viewport {
        &mut self.core.viewport
    }
    pub fn session(&self) -> &Session {
        &self.core.session
    }
    /// Keys accumulated since the last rule fired.
    pub fn pending_command(&self) -> &str {
        &self.core.pending
    }
    pub fn command_bar(&self) -> &str {
        self.core.command_line.buffer()
    }
    /// Anchor of the visual selection, while in VISUAL_SELECT.
    pub fn visual_anchor(&self) -> Option<Position> {
        self.core.visual_anchor
    }
    pub fn search_results(&self) -> &[TextRange] {
        self.core.search.results()
    }
    pub fn register(&self) -> &str {
        &self.core.register
    }
    pub fn status(&self) -> Option<&str> {
        self.core.status.as_deref()
    }
    pub fn take_panel_request(&mut self) -> Option<PanelRequest> {
        self.core.panel_request.take()
    }
    pub fn add_observer(&mut self, observer: Box<dyn ChangeObserver>) {
        self.core.observers.push(observer);
    }

    /// Make the buffer for `path` active, loading it when it is not open yet.
    pub fn switch_files(&mut self, path: &Path, store_to_history: bool) -> Result<(), BufferError> {
        self.core.switch_files(path, store_to_history)
    }

    /// Process one tick's keys in arrival order. Keys after a quit request
    /// are dropped.
    pub fn handle_keys(&mut self, keys: &[KeyEvent]) -> DispatchResult {
        let mut result = DispatchResult::clean();
        for key in keys {
            result = result.merge(self.handle_key(*key));
            if result.quit {
                break;
            }
        }
        result
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> DispatchResult {
        self.core.result = DispatchResult::clean();
        let mode = self.core.mode;
        trace!(target: "actions.dispatch", key = %key, mode = mode.label(), "key");
        match key.code {
            KeyCode::Esc | KeyCode::CapsLock => self.core.enter_move_and_edit(),
            _ if key.is_ctrl('o') => self.core.history_back(),
            _ if key.is_ctrl('i') => self.core.history_forward(),
            // terminals report Ctrl+i as Tab
            KeyCode::Tab if mode != Mode::Insert && key.mods.is_empty() => {
                self.core.history_forward()
            }
            _ => match mode {
                Mode::Insert => self.core.handle_insert_key(key),
                Mode::Command => self.core.handle_command_key(key),
                Mode::MoveAndEdit | Mode::VisualSelect => self.handle_navigation_key(key),
            },
        }
        std::mem::take(&mut self.core.result)
    }

    fn handle_navigation_key(&mut self, key: KeyEvent) {
        let core = &mut self.core;
        if key.is_ctrl('u') {
            core.scroll_page(false);
            return;
        }
        if key.is_ctrl('d') {
            core.scroll_page(true);
            return;
        }
        if matches!(
            key.code,
            KeyCode::Up | KeyCode::Down | KeyCode::Left | KeyCode::Right
        ) {
            core.arrow(key.code);
            return;
        }
        let Some(glyph) = key.glyph() else {
            trace!(target: "actions.dispatch", key = %key, "unbound_key");
            return;
        };

        core.pending.push(glyph);
        let pending = std::mem::take(&mut core.pending);
        if self.rules.run(core.mode, core, &pending) {
            core.result.dirty = true;
            return;
        }
        if core.mode == Mode::MoveAndEdit && core.handle_unbound_glyph(glyph) {
            core.result.dirty = true;
            return;
        }
        core.pending = pending;
        core.enforce_pending_cap();
    }
}

impl EditorCore {
    /// Keys with fixed meaning in MOVE_AND_EDIT that are not part of the
    /// rule table. Consumes the whole pending command when handled.
    fn handle_unbound_glyph(&mut self, glyph: char) -> bool {
        match glyph {
            'n' => self.step_search(true),
            'N' => self.step_search(false),
            'M' => self.viewport.move_cursor_to_middle_of_file(),
            ':' | '/' => self.enter_command(glyph),
            _ => return false,
        }
        true
    }
}
