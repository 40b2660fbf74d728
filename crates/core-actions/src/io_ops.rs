//! File helpers used by the dispatcher: writing the active buffer and
//! locating a source/header companion.

use core_text::{BufferError, TextBuffer};
use std::path::{Path, PathBuf};

/// Result of a write attempt.
#[derive(Debug)]
pub enum WriteFileResult {
    Success(PathBuf),
    NoFilename,
    Error(BufferError),
}

/// Write `buffer` to its own path.
pub fn write_buffer(buffer: &mut TextBuffer) -> WriteFileResult {
    match buffer.save() {
        Ok(()) => match buffer.current_file_path() {
            Some(path) => WriteFileResult::Success(path.to_path_buf()),
            None => WriteFileResult::NoFilename,
        },
        Err(BufferError::NoPath) => WriteFileResult::NoFilename,
        Err(e) => WriteFileResult::Error(e),
    }
}

/// `path` with extension `from` swapped for `to`, if it has extension `from`
/// and the companion exists on disk.
pub fn companion_path(path: &Path, from: &str, to: &str) -> Option<PathBuf> {
    if path.extension()?.to_str()? != from {
        return None;
    }
    let candidate = path.with_extension(to);
    if candidate.is_file() {
        Some(candidate)
    } else {
        tracing::debug!(target: "io", path = %candidate.display(), "companion_missing");
        None
    }
}
