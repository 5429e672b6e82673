//! Recursive copy of files and directory trees.

use std::fs;
use std::path::Path;

use filedeck_core::{FsError, FsResult};
use tracing::debug;

/// Copy a file or directory tree to `dest`, which must not exist.
///
/// Files keep their contents and permissions. Symlinks inside a tree are
/// recreated as links rather than followed. Returns the number of bytes
/// copied.
pub(crate) fn copy_item(source: &Path, dest: &Path) -> FsResult<u64> {
    let metadata = fs::metadata(source).map_err(|e| FsError::io(source, e))?;
    if metadata.is_dir() {
        ensure_not_into_itself(source, dest)?;
        copy_dir_recursive(source, dest)
    } else {
        copy_file(source, dest)
    }
}

/// Copy a single file.
fn copy_file(source: &Path, dest: &Path) -> FsResult<u64> {
    if dest.symlink_metadata().is_ok() {
        return Err(FsError::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }
    fs::copy(source, dest).map_err(|e| FsError::io(source, e))
}

/// Recursively copy a directory.
fn copy_dir_recursive(source: &Path, dest: &Path) -> FsResult<u64> {
    fs::create_dir(dest).map_err(|e| FsError::io(dest, e))?;
    debug!(from = %source.display(), to = %dest.display(), "copying directory");

    let mut total_bytes = 0u64;
    let entries = fs::read_dir(source).map_err(|e| FsError::io(source, e))?;

    for entry in entries {
        let entry = entry.map_err(|e| FsError::io(source, e))?;
        let path = entry.path();
        let dest_path = dest.join(entry.file_name());
        let file_type = entry.file_type().map_err(|e| FsError::io(&path, e))?;

        if file_type.is_dir() {
            total_bytes += copy_dir_recursive(&path, &dest_path)?;
        } else if file_type.is_symlink() {
            copy_symlink(&path, &dest_path)?;
        } else {
            total_bytes += copy_file(&path, &dest_path)?;
        }
    }

    Ok(total_bytes)
}

/// Recreate the link at `source` as `dest`, pointing at the same target.
#[cfg(unix)]
pub(crate) fn copy_symlink(source: &Path, dest: &Path) -> FsResult<()> {
    let target = fs::read_link(source).map_err(|e| FsError::io(source, e))?;
    std::os::unix::fs::symlink(target, dest).map_err(|e| FsError::io(dest, e))
}

#[cfg(not(unix))]
pub(crate) fn copy_symlink(source: &Path, dest: &Path) -> FsResult<()> {
    copy_file(source, dest).map(|_| ())
}

/// Fail if `dest` lies inside the directory `source`.
pub(crate) fn ensure_not_into_itself(source: &Path, dest: &Path) -> FsResult<()> {
    let source = source.canonicalize().map_err(|e| FsError::io(source, e))?;
    let dest_parent = dest
        .parent()
        .and_then(|p| p.canonicalize().ok())
        .unwrap_or_else(|| dest.to_path_buf());

    if dest_parent.starts_with(&source) {
        return Err(FsError::IntoItself { path: source });
    }
    Ok(())
}
