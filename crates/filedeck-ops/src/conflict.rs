//! Conflict renaming for copy, move and upload destinations.

use std::path::{Path, PathBuf};

/// Return `path` if it is free, otherwise the first free sibling with a
/// ` (n)` suffix, counting from 1.
///
/// Files get the suffix before the extension (`report (1).txt`); folders
/// and extension-less names get it at the end (`photos (1)`).
pub fn unique_destination(path: &Path, is_dir: bool) -> PathBuf {
    if !exists(path) {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or(Path::new(""));
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let (stem, extension) = split_name(&name, is_dir);

    (1u64..)
        .map(|i| match extension {
            Some(ext) => parent.join(format!("{stem} ({i}).{ext}")),
            None => parent.join(format!("{stem} ({i})")),
        })
        .find(|candidate| !exists(candidate))
        .unwrap_or_else(|| path.to_path_buf())
}

/// Split a name into stem and extension the way `Path::file_stem` does, so
/// `.bashrc` has no extension.
fn split_name(name: &str, is_dir: bool) -> (&str, Option<&str>) {
    if is_dir {
        return (name, None);
    }
    match name.rfind('.') {
        Some(0) | None => (name, None),
        Some(dot) => (&name[..dot], Some(&name[dot + 1..])),
    }
}

/// Existence check that also sees dangling symlinks.
fn exists(path: &Path) -> bool {
    path.symlink_metadata().is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_path_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        assert_eq!(unique_destination(&path, false), path);
    }

    #[test]
    fn test_suffix_before_extension() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("report.txt"), b"").unwrap();
        std::fs::write(dir.path().join("report (1).txt"), b"").unwrap();

        let renamed = unique_destination(&dir.path().join("report.txt"), false);
        assert_eq!(renamed, dir.path().join("report (2).txt"));
    }

    #[test]
    fn test_folder_suffix_at_end() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("v1.2")).unwrap();

        let renamed = unique_destination(&dir.path().join("v1.2"), true);
        assert_eq!(renamed, dir.path().join("v1.2 (1)"));
    }

    #[test]
    fn test_dotfile_has_no_extension() {
        assert_eq!(split_name(".bashrc", false), (".bashrc", None));
        assert_eq!(split_name("archive.tar.gz", false), ("archive.tar", Some("gz")));
        assert_eq!(split_name("Makefile", false), ("Makefile", None));
    }
}
