//! The filesystem service used by every front end.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use filedeck_core::{
    ClipboardAction, ClipboardState, Config, DirectoryEntry, DirectoryListing, FileKind, FsError,
    FsResult, ItemProperties, SelectionStats, is_hidden_name, sanitize_filename,
};
use tracing::{debug, warn};

use crate::conflict::unique_destination;
use crate::outcome::{OperationOutcome, OperationType};
use crate::search::SearchHit;
use crate::{copy, create, delete, launch, move_op, rename, roots, search, size};

/// Synchronous filesystem operations with user-facing error messages.
///
/// Every call blocks; async callers should move it onto a blocking thread.
#[derive(Debug, Clone)]
pub struct FileService {
    show_hidden: bool,
    max_search_results: usize,
}

impl Default for FileService {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl FileService {
    /// Create a service using the listing and search settings of `config`.
    pub fn new(config: &Config) -> Self {
        Self {
            show_hidden: config.show_hidden,
            max_search_results: config.max_search_results,
        }
    }

    /// Whether listings include dot-files.
    pub fn show_hidden(&self) -> bool {
        self.show_hidden
    }

    pub fn set_show_hidden(&mut self, show: bool) {
        self.show_hidden = show;
    }

    /// List a directory, folders first then by case-insensitive name.
    ///
    /// Entries whose metadata cannot be read are skipped.
    pub fn list(&self, path: &Path) -> FsResult<DirectoryListing> {
        let read_dir = fs::read_dir(path).map_err(|e| FsError::io(path, e))?;

        let mut entries = Vec::new();
        for entry in read_dir {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(dir = %path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !self.show_hidden && is_hidden_name(&entry.file_name().to_string_lossy()) {
                continue;
            }
            let entry_path = entry.path();
            match fs::metadata(&entry_path) {
                Ok(metadata) => entries.push(DirectoryEntry::from_metadata(entry_path, &metadata)),
                Err(err) => {
                    warn!(path = %entry_path.display(), error = %err, "skipping entry without metadata");
                }
            }
        }

        debug!(dir = %path.display(), count = entries.len(), "listed directory");
        Ok(DirectoryListing::new(path.to_path_buf(), entries))
    }

    /// Create a folder (and missing parents). Fails if `path` exists.
    pub fn create_folder(&self, path: &Path) -> FsResult<()> {
        create::create_directory(path)?;
        debug!(path = %path.display(), "created folder");
        Ok(())
    }

    /// Create an empty file. Fails if `path` exists.
    pub fn create_file(&self, path: &Path) -> FsResult<()> {
        create::create_file(path)?;
        debug!(path = %path.display(), "created file");
        Ok(())
    }

    /// Copy `source` to `dest`, renaming the destination if it is taken.
    /// Returns the path actually written.
    pub fn copy(&self, source: &Path, dest: &Path) -> FsResult<PathBuf> {
        let is_dir = source.is_dir();
        let target = unique_destination(dest, is_dir);
        let bytes = copy::copy_item(source, &target)?;
        debug!(from = %source.display(), to = %target.display(), bytes, "copied");
        Ok(target)
    }

    /// Move `source` to `dest`, renaming the destination if it is taken.
    /// Returns the final path.
    pub fn move_item(&self, source: &Path, dest: &Path) -> FsResult<PathBuf> {
        let is_dir = source.is_dir();
        let target = unique_destination(dest, is_dir);
        move_op::move_item(source, &target)?;
        debug!(from = %source.display(), to = %target.display(), "moved");
        Ok(target)
    }

    /// Delete a file, or a directory with all its descendants.
    pub fn delete(&self, path: &Path) -> FsResult<()> {
        delete::delete_path(path)?;
        debug!(path = %path.display(), "deleted");
        Ok(())
    }

    /// Rename an item within its parent directory. Fails without touching
    /// the source if `new_name` is already taken.
    pub fn rename(&self, source: &Path, new_name: &str) -> FsResult<PathBuf> {
        let renamed = rename::rename_item(source, new_name)?;
        debug!(from = %source.display(), to = %renamed.display(), "renamed");
        Ok(renamed)
    }

    /// Detailed properties; folder sizes are computed recursively.
    pub fn properties(&self, path: &Path) -> FsResult<ItemProperties> {
        let metadata = fs::metadata(path).map_err(|e| FsError::io(path, e))?;
        let is_dir = metadata.is_dir();
        let size = if is_dir {
            size::directory_size(path)
        } else {
            metadata.len()
        };
        let timestamp = |time: std::io::Result<std::time::SystemTime>| {
            time.ok().map(DateTime::<Local>::from)
        };

        Ok(ItemProperties {
            name: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            kind: FileKind::classify(path, is_dir),
            size,
            location: path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| path.to_path_buf()),
            created: timestamp(metadata.created()),
            modified: timestamp(metadata.modified()),
            accessed: timestamp(metadata.accessed()),
        })
    }

    /// Sum of regular-file sizes under `path`; unreadable entries are skipped.
    pub fn directory_size(&self, path: &Path) -> u64 {
        size::directory_size(path)
    }

    /// Open with the platform's default application.
    pub fn open_with_default_app(&self, path: &Path) -> FsResult<()> {
        launch::open_with_default_app(path)
    }

    /// Recursive case-insensitive name search under `root`.
    pub fn search(&self, root: &Path, query: &str) -> Vec<SearchHit> {
        search::search(root, query, self.show_hidden, self.max_search_results)
    }

    /// Copy or move every clipboard item into `dest_dir`.
    ///
    /// Each item lands at `dest_dir/<name>` with conflict renaming. A cut is
    /// consumed by the paste except for items that failed to move; a copy
    /// stays available.
    pub fn paste(
        &self,
        clipboard: &mut ClipboardState,
        dest_dir: &Path,
    ) -> FsResult<OperationOutcome> {
        if !dest_dir.is_dir() {
            return Err(FsError::NotADirectory {
                path: dest_dir.to_path_buf(),
            });
        }

        let action = clipboard.action();
        let operation_type = match action {
            ClipboardAction::Cut => OperationType::Move,
            ClipboardAction::Copy | ClipboardAction::None => OperationType::Copy,
        };
        let mut outcome = OperationOutcome::new(operation_type);

        for source in clipboard.paths() {
            let result = match (action, source.file_name()) {
                (_, None) => Err(FsError::invalid_name(
                    source.display().to_string(),
                    "path has no file name",
                )),
                (ClipboardAction::Cut, _) if source.parent() == Some(dest_dir) => {
                    Ok(source.clone())
                }
                (ClipboardAction::Cut, Some(name)) => self.move_item(source, &dest_dir.join(name)),
                (_, Some(name)) => self.copy(source, &dest_dir.join(name)),
            };
            outcome.record(source, result.map(Some));
        }

        if action == ClipboardAction::Cut {
            // Items that failed to move stay cut so the paste can be retried
            clipboard.retain(|path| outcome.errors.iter().any(|e| e.path == path));
        }
        Ok(outcome)
    }

    /// Delete several items, continuing past failures.
    pub fn delete_many(&self, paths: &[PathBuf]) -> OperationOutcome {
        let mut outcome = OperationOutcome::new(OperationType::Delete);
        for path in paths {
            outcome.record(path, self.delete(path).map(|()| None));
        }
        outcome
    }

    /// Store uploaded bytes in `dir` under a sanitized, non-conflicting name.
    pub fn save_upload(&self, dir: &Path, file_name: &str, contents: &[u8]) -> FsResult<PathBuf> {
        if !dir.is_dir() {
            return Err(FsError::NotADirectory {
                path: dir.to_path_buf(),
            });
        }
        let target = unique_destination(&dir.join(sanitize_filename(file_name)), false);
        create::write_new_file(&target, contents)?;
        debug!(path = %target.display(), bytes = contents.len(), "saved upload");
        Ok(target)
    }

    /// Drives or mount points to offer as navigation roots.
    pub fn roots(&self) -> Vec<PathBuf> {
        roots::roots()
    }

    /// Counts and total size of a selection.
    pub fn selection_stats(&self, paths: &[PathBuf]) -> SelectionStats {
        size::selection_stats(paths)
    }

    /// One-line clipboard description, e.g. `2 items: 1 folder(s), 1 file(s)`.
    ///
    /// Only stats each path; sizes are not computed.
    pub fn clipboard_summary(&self, clipboard: &ClipboardState) -> String {
        let paths = clipboard.paths();
        let folders = paths.iter().filter(|p| p.is_dir()).count();
        let stats = SelectionStats {
            count: paths.len(),
            folders,
            files: paths.len() - folders,
            bytes: 0,
        };
        let first_name = paths
            .first()
            .and_then(|p| p.file_name())
            .map(|n| n.to_string_lossy().into_owned());
        let description = stats.describe(first_name.as_deref());
        match clipboard.action() {
            ClipboardAction::Copy => format!("{description} (copy)"),
            ClipboardAction::Cut => format!("{description} (cut)"),
            ClipboardAction::None => description,
        }
    }
}
