//! Deletion of files and directory trees.

use std::fs;
use std::path::Path;

use filedeck_core::{FsError, FsResult};

/// Delete a path. Directories are removed with all their descendants;
/// symlinks are removed without following them.
pub(crate) fn delete_path(path: &Path) -> FsResult<()> {
    let metadata = fs::symlink_metadata(path).map_err(|e| FsError::io(path, e))?;
    let result = if metadata.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    result.map_err(|e| FsError::io(path, e))
}
