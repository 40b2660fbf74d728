//! Per-editor settings taken from configuration at startup.

use core_config::{Config, EditorConfig};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub root_project_directory: Option<PathBuf>,
    pub max_pending_keys: usize,
    pub scroll_step: usize,
    pub source_extension: String,
    pub header_extension: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::from_editor_config(&EditorConfig::default())
    }
}

impl Session {
    pub fn from_config(config: &Config) -> Self {
        Self::from_editor_config(config.editor())
    }

    pub fn from_editor_config(editor: &EditorConfig) -> Self {
        Self {
            root_project_directory: editor.root_project_directory.clone(),
            // zero would discard every key before a rule could see it
            max_pending_keys: editor.max_pending_keys.max(1),
            scroll_step: editor.scroll_step,
            source_extension: editor.source_extension.clone(),
            header_extension: editor.header_extension.clone(),
        }
    }

    /// Resolve `path` against the project root. Absolute paths pass through.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        match &self.root_project_directory {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_join_the_root() {
        let session = Session {
            root_project_directory: Some(PathBuf::from("/work")),
            ..Session::default()
        };
        assert_eq!(session.resolve(Path::new("src/a.cpp")), PathBuf::from("/work/src/a.cpp"));
        assert_eq!(session.resolve(Path::new("/etc/x")), PathBuf::from("/etc/x"));
    }

    #[test]
    fn no_root_keeps_paths_as_given() {
        let session = Session::default();
        assert_eq!(session.resolve(Path::new("a.cpp")), PathBuf::from("a.cpp"));
        assert_eq!(session.max_pending_keys, 16);
    }

    #[test]
    fn zero_pending_cap_is_raised_to_one() {
        let editor = EditorConfig {
            max_pending_keys: 0,
            ..EditorConfig::default()
        };
        assert_eq!(Session::from_editor_config(&editor).max_pending_keys, 1);
    }
}
