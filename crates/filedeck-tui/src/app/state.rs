//! Application state types and enums.

use std::path::PathBuf;

use filedeck_core::ItemProperties;

/// Number of rows to move when pressing Page Up/Down.
pub const PAGE_SIZE: usize = 10;

/// Application mode representing the current UI state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    Normal,
    Help,
    /// Typing a filter term; the listing narrows as you type.
    Filtering,
    /// Confirming deletion of the pending paths.
    ConfirmDelete,
    /// Renaming a file or folder (text input mode).
    Renaming,
    /// Creating a new file (text input mode).
    CreatingFile,
    /// Creating a new folder (text input mode).
    CreatingFolder,
    /// Going to a directory (path input mode).
    GoingTo,
    /// Properties dialog for one item.
    Properties,
    /// Error dialog; any key dismisses it.
    Error,
    Quit,
}

impl AppMode {
    /// Modes that edit text through the input prompt.
    pub fn is_input(self) -> bool {
        matches!(
            self,
            Self::Filtering
                | Self::Renaming
                | Self::CreatingFile
                | Self::CreatingFolder
                | Self::GoingTo
        )
    }

    /// Title and prompt shown by the input modal.
    pub fn prompt(self) -> (&'static str, &'static str) {
        match self {
            Self::Renaming => ("Rename", "New name:"),
            Self::CreatingFile => ("New File", "File name:"),
            Self::CreatingFolder => ("New Folder", "Folder name:"),
            Self::GoingTo => ("Go To", "Directory path:"),
            _ => ("Filter", "Name or type contains:"),
        }
    }
}

/// Status bar message from the last action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub success: bool,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
        }
    }

    pub fn failure(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
        }
    }
}

/// Dialog state that outlives a single key press.
#[derive(Debug, Clone, Default)]
pub enum Pending {
    #[default]
    None,
    /// Paths awaiting delete confirmation.
    Delete(Vec<PathBuf>),
    /// Item being renamed.
    Rename(PathBuf),
    Properties(Box<ItemProperties>),
    Error(String),
}
