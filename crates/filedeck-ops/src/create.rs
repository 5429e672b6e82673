//! File and directory creation.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use filedeck_core::{FsError, FsResult, validate_filename};

/// Validate the final component of a path about to be created.
fn validate_target(path: &Path) -> FsResult<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    validate_filename(&name).map_err(|reason| FsError::invalid_name(name, reason))
}

/// Create a directory and any missing parents. Fails if `path` exists.
pub(crate) fn create_directory(path: &Path) -> FsResult<()> {
    validate_target(path)?;
    if path.symlink_metadata().is_ok() {
        return Err(FsError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    fs::create_dir_all(path).map_err(|e| FsError::io(path, e))
}

/// Create an empty file. Fails if `path` exists.
pub(crate) fn create_file(path: &Path) -> FsResult<()> {
    write_new_file(path, &[])
}

/// Create `path` with the given contents, never replacing an existing item.
pub(crate) fn write_new_file(path: &Path, contents: &[u8]) -> FsResult<()> {
    validate_target(path)?;
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| FsError::io(path, e))?;
    file.write_all(contents).map_err(|e| FsError::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_directory_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/c");
        create_directory(&nested).unwrap();
        assert!(nested.is_dir());

        assert!(matches!(
            create_directory(&nested),
            Err(FsError::AlreadyExists { .. })
        ));
    }

    #[test]
    fn test_create_file_never_truncates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        fs::write(&path, b"keep").unwrap();

        assert!(matches!(
            create_file(&path),
            Err(FsError::AlreadyExists { .. })
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "keep");
    }

    #[test]
    fn test_invalid_name_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = create_file(&dir.path().join("..")).unwrap_err();
        assert!(matches!(err, FsError::InvalidName { .. }));
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_trailing_dot_and_spaces_allowed() {
        let dir = tempfile::tempdir().unwrap();
        create_directory(&dir.path().join("draft.")).unwrap();
        create_file(&dir.path().join(" spaced ")).unwrap();
        assert!(dir.path().join("draft.").is_dir());
        assert!(dir.path().join(" spaced ").is_file());
    }
}
