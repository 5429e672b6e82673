//! Directory entry and listing types.

use std::fs::Metadata;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use strum::Display;

/// Type classification of an entry, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
pub enum FileKind {
    #[strum(to_string = "Folder")]
    Folder,
    #[strum(to_string = "Text File")]
    Text,
    #[strum(to_string = "Word Document")]
    WordDocument,
    #[strum(to_string = "PDF Document")]
    Pdf,
    #[strum(to_string = "JPEG Image")]
    Jpeg,
    #[strum(to_string = "PNG Image")]
    Png,
    #[strum(to_string = "GIF Image")]
    Gif,
    #[strum(to_string = "Bitmap Image")]
    Bitmap,
    #[strum(to_string = "MP3 Audio")]
    Mp3,
    #[strum(to_string = "WAV Audio")]
    Wav,
    #[strum(to_string = "MP4 Video")]
    Mp4,
    #[strum(to_string = "AVI Video")]
    Avi,
    #[strum(to_string = "ZIP Archive")]
    Zip,
    #[strum(to_string = "RAR Archive")]
    Rar,
    #[strum(to_string = "Executable")]
    Executable,
    #[strum(to_string = "Python File")]
    Python,
    #[strum(to_string = "JavaScript File")]
    JavaScript,
    #[strum(to_string = "HTML Document")]
    Html,
    #[strum(to_string = "CSS File")]
    Css,
    #[strum(to_string = "XML File")]
    Xml,
    #[strum(to_string = "JSON File")]
    Json,
    /// Any file without a known extension.
    #[strum(to_string = "File")]
    Other,
}

impl FileKind {
    /// Classify a file by its extension (case-insensitive, without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "txt" => Self::Text,
            "doc" | "docx" => Self::WordDocument,
            "pdf" => Self::Pdf,
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "gif" => Self::Gif,
            "bmp" => Self::Bitmap,
            "mp3" => Self::Mp3,
            "wav" => Self::Wav,
            "mp4" => Self::Mp4,
            "avi" => Self::Avi,
            "zip" => Self::Zip,
            "rar" => Self::Rar,
            "exe" => Self::Executable,
            "py" => Self::Python,
            "js" => Self::JavaScript,
            "html" => Self::Html,
            "css" => Self::Css,
            "xml" => Self::Xml,
            "json" => Self::Json,
            _ => Self::Other,
        }
    }

    /// Classify a path, given whether it is a directory.
    pub fn classify(path: &Path, is_dir: bool) -> Self {
        if is_dir {
            return Self::Folder;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .map(Self::from_extension)
            .unwrap_or(Self::Other)
    }

    /// Check if this is a folder.
    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder)
    }
}

/// A file or directory record shown in a listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// File/directory name (not full path).
    pub name: CompactString,
    /// Folder or typed file.
    pub kind: FileKind,
    /// Size in bytes; `None` for folders.
    pub size: Option<u64>,
    /// Last modification time, if the platform reports it.
    pub modified: Option<DateTime<Local>>,
    /// Absolute path.
    pub path: PathBuf,
}

impl DirectoryEntry {
    /// Build an entry from a path and its (symlink-following) metadata.
    pub fn from_metadata(path: PathBuf, metadata: &Metadata) -> Self {
        let is_dir = metadata.is_dir();
        let name = path
            .file_name()
            .map(|n| CompactString::from(n.to_string_lossy().as_ref()))
            .unwrap_or_else(|| CompactString::from(path.to_string_lossy().as_ref()));

        Self {
            kind: FileKind::classify(&path, is_dir),
            size: (!is_dir).then(|| metadata.len()),
            modified: metadata.modified().ok().map(DateTime::<Local>::from),
            name,
            path,
        }
    }

    /// Stat a path and build its entry.
    pub fn from_path(path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path)?;
        Ok(Self::from_metadata(path, &metadata))
    }

    /// Check if this entry is a folder.
    pub fn is_folder(&self) -> bool {
        self.kind.is_folder()
    }

    /// Type label as displayed in the listing.
    pub fn type_label(&self) -> String {
        self.kind.to_string()
    }
}

/// The contents of one directory at the time it was read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryListing {
    /// The directory that was listed.
    pub path: PathBuf,
    /// Its parent, absent at a filesystem root.
    pub parent: Option<PathBuf>,
    /// Entries, folders first then by case-insensitive name.
    pub entries: Vec<DirectoryEntry>,
}

impl DirectoryListing {
    /// Create a listing, ordering entries folders first then by name.
    pub fn new(path: PathBuf, mut entries: Vec<DirectoryEntry>) -> Self {
        entries.sort_by_cached_key(|e| (!e.is_folder(), e.name.to_lowercase()));
        let parent = path.parent().map(Path::to_path_buf);
        Self {
            path,
            parent,
            entries,
        }
    }

    /// Number of folders in the listing.
    pub fn folder_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_folder()).count()
    }

    /// Number of files in the listing.
    pub fn file_count(&self) -> usize {
        self.entries.len() - self.folder_count()
    }

    /// Status bar summary, e.g. `3 folders, 12 files`.
    pub fn summary(&self) -> String {
        format!(
            "{} folders, {} files",
            self.folder_count(),
            self.file_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_kind_from_extension() {
        assert_eq!(FileKind::from_extension("TXT"), FileKind::Text);
        assert_eq!(FileKind::from_extension("docx"), FileKind::WordDocument);
        assert_eq!(FileKind::from_extension("rs"), FileKind::Other);
        assert_eq!(FileKind::Jpeg.to_string(), "JPEG Image");
        assert_eq!(FileKind::Other.to_string(), "File");
    }

    #[test]
    fn test_classify_folder_ignores_extension() {
        assert_eq!(
            FileKind::classify(Path::new("/tmp/photos.zip"), true),
            FileKind::Folder
        );
        assert_eq!(
            FileKind::classify(Path::new("/tmp/Makefile"), false),
            FileKind::Other
        );
    }

    #[test]
    fn test_listing_order_and_counts() {
        let entry = |name: &str, kind: FileKind| DirectoryEntry {
            name: name.into(),
            kind,
            size: (!kind.is_folder()).then_some(1),
            modified: None,
            path: PathBuf::from("/data").join(name),
        };

        let listing = DirectoryListing::new(
            PathBuf::from("/data"),
            vec![
                entry("b.txt", FileKind::Text),
                entry("Zeta", FileKind::Folder),
                entry("A.json", FileKind::Json),
                entry("alpha", FileKind::Folder),
            ],
        );

        let names: Vec<_> = listing.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["alpha", "Zeta", "A.json", "b.txt"]);
        assert_eq!(listing.summary(), "2 folders, 2 files");
        assert_eq!(listing.parent, Some(PathBuf::from("/")));
    }
}
