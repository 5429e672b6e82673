//! Rename within the same parent directory.

use std::fs;
use std::path::{Path, PathBuf};

use filedeck_core::{FsError, FsResult, validate_filename};

/// Rename `source` to `new_name` inside its current parent.
///
/// Fails without touching `source` if the name is invalid or already
/// taken by another item. Returns the new path.
pub(crate) fn rename_item(source: &Path, new_name: &str) -> FsResult<PathBuf> {
    validate_filename(new_name).map_err(|reason| FsError::invalid_name(new_name, reason))?;
    source
        .symlink_metadata()
        .map_err(|e| FsError::io(source, e))?;

    let parent = source.parent().unwrap_or(Path::new(""));
    let new_path = parent.join(new_name);

    if new_path == source {
        return Ok(new_path);
    }
    if new_path.symlink_metadata().is_ok() && !is_case_change(source, &new_path) {
        return Err(FsError::AlreadyExists { path: new_path });
    }

    fs::rename(source, &new_path).map_err(|e| FsError::io(source, e))?;
    Ok(new_path)
}

/// On case-insensitive filesystems `Foo` -> `foo` sees the target as
/// existing; allow it when both names resolve to the same item.
fn is_case_change(source: &Path, target: &Path) -> bool {
    let same_name = match (source.file_name(), target.file_name()) {
        (Some(a), Some(b)) => a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase(),
        _ => false,
    };
    same_name
        && matches!(
            (source.canonicalize(), target.canonicalize()),
            (Ok(a), Ok(b)) if a == b
        )
}
