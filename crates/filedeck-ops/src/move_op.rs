//! Move with copy-and-remove fallback.

use std::fs;
use std::path::Path;

use filedeck_core::{FsError, FsResult};
use tracing::debug;

use crate::copy::{copy_item, copy_symlink, ensure_not_into_itself};
use crate::delete::delete_path;

/// Move a file or directory to `dest`, which must not exist.
pub(crate) fn move_item(source: &Path, dest: &Path) -> FsResult<()> {
    let metadata = fs::symlink_metadata(source).map_err(|e| FsError::io(source, e))?;
    if metadata.is_dir() {
        ensure_not_into_itself(source, dest)?;
    }
    if dest.symlink_metadata().is_ok() {
        return Err(FsError::AlreadyExists {
            path: dest.to_path_buf(),
        });
    }

    // Fast path on the same filesystem.
    match fs::rename(source, dest) {
        Ok(()) => return Ok(()),
        Err(e) => debug!(error = %e, "rename failed, falling back to copy and remove"),
    }

    copy_then_remove(source, dest, metadata.file_type().is_symlink())
}

/// Cross-device fallback. A symlink is moved as a link, never its target.
fn copy_then_remove(source: &Path, dest: &Path, is_symlink: bool) -> FsResult<()> {
    if is_symlink {
        copy_symlink(source, dest)?;
    } else {
        copy_item(source, dest)?;
    }
    delete_path(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_directory() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("f.txt"), b"x").unwrap();

        let dst = dir.path().join("moved");
        move_item(&src, &dst).unwrap();
        assert!(!src.exists());
        assert!(dst.join("f.txt").exists());
    }

    #[test]
    fn test_move_into_itself_fails() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("src");
        fs::create_dir(&src).unwrap();

        let err = move_item(&src, &src.join("src")).unwrap_err();
        assert!(matches!(err, FsError::IntoItself { .. }));
        assert!(src.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_fallback_moves_symlink_as_link() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("target.txt");
        fs::write(&target, b"data").unwrap();
        let link = dir.path().join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let moved = dir.path().join("moved");
        copy_then_remove(&link, &moved, true).unwrap();

        assert!(moved.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&moved).unwrap(), target);
        assert!(link.symlink_metadata().is_err());
        assert_eq!(fs::read_to_string(&target).unwrap(), "data");
    }

    #[test]
    fn test_fallback_copies_then_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, b"a").unwrap();

        let dst = dir.path().join("b.txt");
        copy_then_remove(&src, &dst, false).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dst).unwrap(), "a");
    }
}
