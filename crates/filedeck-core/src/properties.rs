//! Item properties and selection statistics.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::entry::FileKind;
use crate::format::{format_size, format_timestamp};

/// Detailed properties of a single file or folder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemProperties {
    pub name: String,
    pub kind: FileKind,
    /// Size in bytes; recursive total for folders.
    pub size: u64,
    /// Parent directory.
    pub location: PathBuf,
    pub created: Option<DateTime<Local>>,
    pub modified: Option<DateTime<Local>>,
    pub accessed: Option<DateTime<Local>>,
}

impl ItemProperties {
    /// Human-readable size.
    pub fn size_display(&self) -> String {
        format_size(self.size)
    }

    /// Label/value rows in display order.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Name", self.name.clone()),
            ("Type", self.kind.to_string()),
            ("Size", self.size_display()),
            ("Location", self.location.display().to_string()),
            ("Created", format_timestamp(self.created.as_ref())),
            ("Modified", format_timestamp(self.modified.as_ref())),
            ("Accessed", format_timestamp(self.accessed.as_ref())),
        ]
    }
}

/// Aggregate counts for a set of selected paths.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionStats {
    pub count: usize,
    pub folders: usize,
    pub files: usize,
    /// Total bytes, folders counted recursively.
    pub bytes: u64,
}

impl SelectionStats {
    /// One-line description used for the clipboard indicator.
    ///
    /// `first_name` is the name of the only item when `count == 1`.
    pub fn describe(&self, first_name: Option<&str>) -> String {
        match self.count {
            0 => "Clipboard empty".to_string(),
            1 => format!("1 item: {}", first_name.unwrap_or_default()),
            n => {
                let mut parts = Vec::new();
                if self.folders > 0 {
                    parts.push(format!("{} folder(s)", self.folders));
                }
                if self.files > 0 {
                    parts.push(format!("{} file(s)", self.files));
                }
                format!("{n} items: {}", parts.join(", "))
            }
        }
    }
}
