//! modeline entrypoint.
use anyhow::Result;
use clap::Parser;
use core_actions::{ModalEditor, Session};
use core_config::{Config, load_from};
use core_model::Viewport;
use core_text::TextBuffer;
use crossterm::event::{self, Event};
use std::io::{Write, stdout};
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod input;
mod paint;
mod terminal;

use terminal::TerminalGuard;

const STATUS_ROWS: u16 = 1;
const LOG_FILE: &str = "modeline.log";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "modeline", version, about = "Modal terminal text editor")]
struct Args {
    /// File to open. A missing file starts as an empty buffer that saves to this path.
    pub path: Option<PathBuf>,
    /// Configuration file (overrides discovery of `modeline.toml`).
    #[arg(long = "config")]
    pub config: Option<PathBuf>,
}

fn configure_logging() -> Option<WorkerGuard> {
    let log_dir = Path::new(".");
    let log_path = log_dir.join(LOG_FILE);
    if log_path.exists() {
        let _ = std::fs::remove_file(&log_path);
    }
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_ansi(false)
        .with_writer(writer)
        .try_init()
        .ok()
        .map(|_| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

/// Rows and columns available to the text grid.
fn grid_size(cols: u16, rows: u16) -> (usize, usize) {
    (rows.saturating_sub(STATUS_ROWS).max(1) as usize, cols.max(1) as usize)
}

fn load_buffer(session: &Session, path: Option<&Path>) -> TextBuffer {
    let Some(path) = path else {
        return TextBuffer::new();
    };
    let resolved = session.resolve(path);
    match TextBuffer::open(&resolved) {
        Ok(buffer) => buffer,
        Err(e) => {
            warn!(target: "runtime.startup", path = %resolved.display(), error = %e, "open_failed_starting_empty");
            let mut buffer = TextBuffer::new();
            buffer.set_file_path(resolved);
            buffer
        }
    }
}

fn build_editor(args: &Args, config: &Config) -> Result<ModalEditor> {
    let session = Session::from_config(config);
    let buffer = load_buffer(&session, args.path.as_deref());
    let (cols, rows) = crossterm::terminal::size()?;
    let (num_lines, num_cols) = grid_size(cols, rows);
    let (line_offset, col_offset) = config.cursor_offsets(num_lines, num_cols);
    let viewport = Viewport::new(buffer, num_lines, num_cols, line_offset, col_offset);
    Ok(ModalEditor::new(viewport, session)?)
}

fn run(editor: &mut ModalEditor, config: &Config) -> Result<()> {
    let mut out = stdout();
    paint::clear(&mut out)?;
    paint::paint(&mut out, editor)?;
    loop {
        // one tick: block for the first event, then drain what is already queued
        let mut events = vec![event::read()?];
        while event::poll(Duration::ZERO)? {
            events.push(event::read()?);
        }
        let mut keys = Vec::with_capacity(events.len());
        let mut resized = None;
        for ev in events {
            match ev {
                Event::Key(key) => keys.extend(input::translate_key(key)),
                Event::Resize(cols, rows) => resized = Some(grid_size(cols, rows)),
                _ => {}
            }
        }

        editor.viewport_mut().tick();
        if let Some((num_lines, num_cols)) = resized {
            let (line_offset, col_offset) = config.cursor_offsets(num_lines, num_cols);
            let viewport = editor.viewport_mut();
            viewport.resize(num_lines, num_cols);
            viewport.set_cursor_offsets(line_offset, col_offset);
            paint::clear(&mut out)?;
        }

        let result = editor.handle_keys(&keys);
        if result.quit {
            info!(target: "runtime", "quit_requested");
            break;
        }
        if let Some(panel) = editor.take_panel_request() {
            info!(target: "runtime", ?panel, "panel_not_available");
        }
        if result.dirty || resized.is_some() {
            paint::paint(&mut out, editor)?;
        }
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let _log_guard = configure_logging();
    install_panic_hook();
    info!(target: "runtime", "startup");

    let args = Args::parse();
    let config = load_from(args.config.clone())?;
    let mut editor = build_editor(&args, &config)?;
    info!(
        target: "runtime.startup",
        path = ?editor.viewport().active_path(),
        lines = editor.viewport().buffer().line_count(),
        "bootstrap_complete"
    );

    let mut guard = TerminalGuard::enter("modeline")?;
    let outcome = run(&mut editor, &config);
    guard.leave()?;
    if let Err(e) = &outcome {
        error!(target: "runtime", error = %e, "runtime_error");
    }
    info!(target: "runtime", "shutdown");
    outcome
}
