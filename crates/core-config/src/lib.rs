//! Configuration loading and parsing.
//!
//! Parses `modeline.toml` (or an override path provided by the binary). Every
//! field has a default and unknown keys are ignored, so a missing or partial
//! file always yields a usable `Config`. A file that fails to parse falls back
//! to defaults and logs a warning under the `config` target.
//!
//! ```toml
//! [editor]
//! root_project_directory = "."
//! max_pending_keys = 16
//! scroll_step = 5
//! source_extension = "cpp"
//! header_extension = "hpp"
//!
//! [viewport]
//! cursor_line_offset = "center"
//! cursor_col_offset = 12
//! ```

use anyhow::Result;
use serde::Deserialize;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct EditorConfig {
    /// Base directory for resolving relative paths when switching files.
    /// `None` means the process working directory.
    pub root_project_directory: Option<PathBuf>,
    /// Pending command keys kept before the accumulation buffer is discarded.
    pub max_pending_keys: usize,
    /// Lines moved by `Ctrl+u` / `Ctrl+d`.
    pub scroll_step: usize,
    /// Companion-file pair toggled by the ` cc` / ` hh` leader sequences.
    pub source_extension: String,
    pub header_extension: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            root_project_directory: None,
            max_pending_keys: 16,
            scroll_step: 5,
            source_extension: "cpp".into(),
            header_extension: "hpp".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OffsetKeyword {
    Center,
}

/// Where the cursor cell sits along one axis of the grid.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(untagged)]
pub enum CursorOffset {
    Fixed(usize),
    Keyword(OffsetKeyword),
}

impl Default for CursorOffset {
    fn default() -> Self {
        CursorOffset::Keyword(OffsetKeyword::Center)
    }
}

impl CursorOffset {
    /// Concrete cell index within an axis of `extent` cells.
    pub fn resolve(self, extent: usize) -> usize {
        match self {
            CursorOffset::Keyword(OffsetKeyword::Center) => extent / 2,
            CursorOffset::Fixed(n) => n.min(extent.saturating_sub(1)),
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct ViewportConfig {
    pub cursor_line_offset: CursorOffset,
    pub cursor_col_offset: CursorOffset,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub viewport: ViewportConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // file contents as read, if any
    pub file: ConfigFile,    // parsed (or default) data
}

/// Best-effort config path: `./modeline.toml` first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from("modeline.toml");
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("modeline").join("modeline.toml");
    }
    PathBuf::from("modeline.toml")
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    pub fn editor(&self) -> &EditorConfig {
        &self.file.editor
    }

    /// Cursor cell for a grid of `rows` x `cols`.
    pub fn cursor_offsets(&self, rows: usize, cols: usize) -> (usize, usize) {
        let vp = &self.file.viewport;
        (
            vp.cursor_line_offset.resolve(rows),
            vp.cursor_col_offset.resolve(cols),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex, MutexGuard};
    use tracing::Level;
    use tracing::subscriber::with_default;
    use tracing_subscriber::fmt::MakeWriter;

    #[derive(Clone)]
    struct BufferWriter {
        inner: Arc<Mutex<Vec<u8>>>,
    }

    impl BufferWriter {
        fn new() -> (Self, Arc<Mutex<Vec<u8>>>) {
            let buf = Arc::new(Mutex::new(Vec::new()));
            (Self { inner: buf.clone() }, buf)
        }
    }

    struct LockedWriter<'a> {
        guard: MutexGuard<'a, Vec<u8>>,
    }

    impl<'a> Write for LockedWriter<'a> {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.guard.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for BufferWriter {
        type Writer = LockedWriter<'a>;

        fn make_writer(&'a self) -> Self::Writer {
            LockedWriter {
                guard: self.inner.lock().expect("log buffer poisoned"),
            }
        }
    }

    #[test]
    fn default_config_when_missing_file() {
        let cfg = load_from(Some(PathBuf::from("__nonexistent_hopefully__.toml"))).unwrap();
        assert_eq!(cfg.editor().max_pending_keys, 16);
        assert_eq!(cfg.editor().scroll_step, 5);
        assert!(cfg.raw.is_none());
    }

    #[test]
    fn parses_editor_section() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[editor]\nroot_project_directory = \"/src\"\nmax_pending_keys = 4\nsource_extension = \"c\"\nheader_extension = \"h\"\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        let ed = cfg.editor();
        assert_eq!(ed.root_project_directory, Some(PathBuf::from("/src")));
        assert_eq!(ed.max_pending_keys, 4);
        assert_eq!(ed.scroll_step, 5, "unset fields keep defaults");
        assert_eq!(ed.source_extension, "c");
        assert_eq!(ed.header_extension, "h");
    }

    #[test]
    fn cursor_offsets_accept_keyword_or_number() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(
            tmp.path(),
            "[viewport]\ncursor_line_offset = \"center\"\ncursor_col_offset = 12\n",
        )
        .unwrap();
        let cfg = load_from(Some(tmp.path().to_path_buf())).unwrap();
        assert_eq!(cfg.cursor_offsets(30, 80), (15, 12));
        assert_eq!(cfg.cursor_offsets(30, 8), (15, 7), "fixed offset clamped into the grid");
    }

    #[test]
    fn default_offsets_are_centered() {
        let cfg = Config::default();
        assert_eq!(cfg.cursor_offsets(24, 80), (12, 40));
    }

    #[test]
    fn parse_error_falls_back_and_warns() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "[editor\nmax_pending_keys = ").unwrap();
        let (writer, buffer) = BufferWriter::new();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(Level::INFO)
            .with_target(true)
            .with_ansi(false)
            .without_time()
            .with_writer(writer)
            .finish();

        let cfg = with_default(subscriber, || load_from(Some(tmp.path().to_path_buf())).unwrap());

        let log_output = String::from_utf8(buffer.lock().unwrap().clone()).unwrap();
        assert!(log_output.contains("WARN config:"));
        assert!(log_output.contains("config_parse_failed_using_defaults"));
        assert_eq!(cfg.editor(), &EditorConfig::default());
    }
}
