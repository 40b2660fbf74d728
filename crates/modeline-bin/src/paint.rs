//! Painting: changed grid cells plus the status row under the grid.

use anyhow::Result;
use core_actions::ModalEditor;
use core_state::Mode;
use crossterm::{
    cursor::{MoveTo, Show},
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use std::io::Write;

/// Text of the status row: mode, then the command bar (or the pending
/// command), then the last status message. Padded or cut to `cols`.
pub fn status_line(editor: &ModalEditor, cols: usize) -> String {
    let mut line = format!(" {} ", editor.mode().label());
    if editor.mode() == Mode::Command {
        line.push_str(editor.command_bar());
    } else if !editor.pending_command().is_empty() {
        line.push_str(editor.pending_command());
    }
    if let Some(status) = editor.status() {
        line.push_str("  ");
        line.push_str(status);
    }
    let mut out: String = line.chars().take(cols).collect();
    let width = out.chars().count();
    out.extend(std::iter::repeat_n(' ', cols - width));
    out
}

pub fn clear(out: &mut impl Write) -> Result<()> {
    queue!(out, Clear(ClearType::All))?;
    Ok(())
}

/// Repaint the cells that changed since the last tick and the status row.
pub fn paint(out: &mut impl Write, editor: &ModalEditor) -> Result<()> {
    let viewport = editor.viewport();
    let changed = viewport.get_changed_cells_since_last_tick();
    for (line, col) in &changed {
        let symbol = viewport.get_symbol_at(*line, *col);
        queue!(out, MoveTo(*col as u16, *line as u16), Print(symbol))?;
    }
    let rows = viewport.num_lines();
    queue!(
        out,
        MoveTo(0, rows as u16),
        Print(status_line(editor, viewport.num_cols()))
    )?;
    let (line_offset, col_offset) = viewport.cursor_offsets();
    queue!(out, MoveTo(col_offset as u16, line_offset as u16), Show)?;
    out.flush()?;
    tracing::trace!(target: "runtime.paint", cells = changed.len(), "paint");
    Ok(())
}
