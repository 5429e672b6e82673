//! Clipboard state for copy/cut/paste.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// What a paste will do with the clipboard contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClipboardAction {
    /// Clipboard is empty.
    #[default]
    None,
    /// Items were copied.
    Copy,
    /// Items were cut (paste moves them).
    Cut,
}

/// Transient copy/cut buffer held in process memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardState {
    action: ClipboardAction,
    paths: Vec<PathBuf>,
}

impl ClipboardState {
    /// Copy paths to the clipboard. An empty selection leaves it unchanged.
    pub fn copy(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.set(ClipboardAction::Copy, paths);
    }

    /// Cut paths to the clipboard. An empty selection leaves it unchanged.
    pub fn cut(&mut self, paths: impl IntoIterator<Item = PathBuf>) {
        self.set(ClipboardAction::Cut, paths);
    }

    fn set(&mut self, action: ClipboardAction, paths: impl IntoIterator<Item = PathBuf>) {
        let paths: Vec<PathBuf> = paths.into_iter().collect();
        if paths.is_empty() {
            return;
        }
        self.action = action;
        self.paths = paths;
    }

    /// Clear the clipboard.
    pub fn clear(&mut self) {
        self.paths.clear();
        self.action = ClipboardAction::None;
    }

    /// Keep only the paths matching `keep`; an emptied clipboard is cleared.
    pub fn retain(&mut self, mut keep: impl FnMut(&Path) -> bool) {
        self.paths.retain(|p| keep(p));
        if self.paths.is_empty() {
            self.action = ClipboardAction::None;
        }
    }

    /// The pending action.
    pub fn action(&self) -> ClipboardAction {
        self.action
    }

    /// Paths currently in the clipboard.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Check if the clipboard is empty.
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Get the number of items in the clipboard.
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether a path is waiting to be moved by a cut-paste.
    pub fn is_cut(&self, path: &Path) -> bool {
        self.action == ClipboardAction::Cut && self.paths.iter().any(|p| p == path)
    }
}
